//! Request throttling implementations.

mod memory;

pub use memory::{InMemoryRateLimiter, RateLimitConfig};
