use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, Post, PostChanges, PostFilter, ReactionKind};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. `RepoError::NotFound` if nothing was removed.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post storage.
///
/// Counter increments and comment appends are single atomic operations in
/// the backing store; callers never read-modify-write them. Methods returning
/// `Option` yield `None` when the post does not exist.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Posts matching `filter`, newest first.
    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError>;

    /// Merge `changes` into the post. The secret hash is never touched.
    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Option<Post>, RepoError>;

    /// Add one to a reaction counter.
    async fn increment_reaction(
        &self,
        id: Uuid,
        kind: ReactionKind,
    ) -> Result<Option<Post>, RepoError>;

    /// Append a comment to the end of the post's comment list.
    async fn append_comment(&self, id: Uuid, comment: Comment)
    -> Result<Option<Post>, RepoError>;
}
