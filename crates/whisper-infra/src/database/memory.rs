//! In-memory post repository - used in tests and when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use whisper_core::domain::{Comment, Post, PostChanges, PostFilter, ReactionKind};
use whisper_core::error::RepoError;
use whisper_core::ports::{BaseRepository, PostRepository};

struct StoredPost {
    /// Insertion order; breaks ties between equal `created_at` values.
    seq: u64,
    post: Post,
}

#[derive(Default)]
struct Store {
    next_seq: u64,
    posts: HashMap<Uuid, StoredPost>,
}

/// In-memory post store behind an async RwLock.
///
/// Every mutation runs under the write lock, so counter increments and
/// comment appends are atomic with respect to each other.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store::default()),
        }
    }

    /// Run `f` on the stored post under the write lock.
    async fn mutate<F>(&self, id: Uuid, f: F) -> Option<Post>
    where
        F: FnOnce(&mut Post),
    {
        let mut store = self.store.write().await;
        let stored = store.posts.get_mut(&id)?;
        f(&mut stored.post);
        Some(stored.post.clone())
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.posts.get(&id).map(|s| s.post.clone()))
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        if store.posts.contains_key(&post.id) {
            return Err(RepoError::Constraint(format!(
                "Post {} already exists",
                post.id
            )));
        }

        let seq = store.next_seq;
        store.next_seq += 1;
        store.posts.insert(
            post.id,
            StoredPost {
                seq,
                post: post.clone(),
            },
        );

        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;

        let mut matching: Vec<&StoredPost> = store
            .posts
            .values()
            .filter(|s| filter.matches(&s.post))
            .collect();
        matching.sort_by(|a, b| {
            b.post
                .created_at
                .cmp(&a.post.created_at)
                .then(b.seq.cmp(&a.seq))
        });

        Ok(matching.into_iter().map(|s| s.post.clone()).collect())
    }

    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        Ok(self.mutate(id, |post| post.apply(&changes)).await)
    }

    async fn increment_reaction(
        &self,
        id: Uuid,
        kind: ReactionKind,
    ) -> Result<Option<Post>, RepoError> {
        Ok(self
            .mutate(id, |post| {
                post.reactions.increment(kind);
                post.updated_at = Utc::now();
            })
            .await)
    }

    async fn append_comment(
        &self,
        id: Uuid,
        comment: Comment,
    ) -> Result<Option<Post>, RepoError> {
        Ok(self
            .mutate(id, |post| {
                post.updated_at = comment.created_at;
                post.comments.push(comment);
            })
            .await)
    }
}
