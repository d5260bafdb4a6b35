//! Application services - use cases built on the ports.

mod posts;

pub use posts::{NewPost, PostService, PostUpdate};
