//! Domain entities - the core business objects.

mod post;
mod stats;

pub use post::{
    Category, Comment, Post, PostChanges, PostFilter, PublicPost, ReactionKind, Reactions,
};
pub use stats::{FrequencyTable, PostStats, Stats, Tally, compute_stats};
