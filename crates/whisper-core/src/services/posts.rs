//! Secret-gated post operations.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{
    Category, Comment, Post, PostChanges, PostFilter, PostStats, PublicPost, ReactionKind,
};
use crate::error::{DomainError, RepoError};
use crate::ports::{PostRepository, SecretError, SecretHasher};
use crate::validation::{COMMENT_RULES, POST_EDIT_RULES, POST_RULES};

/// Input for creating a post. `author_id` comes from the identity provider.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub text: Option<String>,
    pub secret: Option<String>,
    pub category: Option<String>,
    pub author_id: String,
}

/// Input for an authorized update. Absent fields stay as they are.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub secret: Option<String>,
    pub text: Option<String>,
    pub category: Option<String>,
}

/// Application service for posts.
///
/// Stateless between calls; everything lives behind the repository.
pub struct PostService {
    repo: Arc<dyn PostRepository>,
    hasher: Arc<dyn SecretHasher>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>, hasher: Arc<dyn SecretHasher>) -> Self {
        Self { repo, hasher }
    }

    pub async fn create(&self, input: NewPost) -> Result<PublicPost, DomainError> {
        let text = POST_RULES.require("text", input.text.as_deref())?;
        let secret = POST_RULES.require("secret", input.secret.as_deref())?;
        let category = parse_category(POST_RULES.check("category", input.category.as_deref())?)?
            .unwrap_or_default();
        let author_id = POST_RULES.require("authorId", Some(&input.author_id))?;

        let secret_hash = self.hasher.hash(&secret).await.map_err(secret_error)?;
        let post = self
            .repo
            .insert(Post::new(text, category, secret_hash, author_id))
            .await?;

        tracing::info!(post_id = %post.id, category = %post.category, "Post created");
        Ok(post.into())
    }

    /// All posts, newest first, optionally narrowed to one category.
    pub async fn list_all(&self, category: Option<&str>) -> Result<Vec<PublicPost>, DomainError> {
        let filter = PostFilter {
            author_id: None,
            category: category.map(str::parse::<Category>).transpose()?,
        };
        self.list(&filter).await
    }

    pub async fn list_by_author(&self, author_id: &str) -> Result<Vec<PublicPost>, DomainError> {
        self.list(&PostFilter::by_author(author_id)).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<PublicPost, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .map(PublicPost::from)
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    /// Merge text and/or category into a post whose secret the caller knows.
    pub async fn update(&self, id: Uuid, input: PostUpdate) -> Result<PublicPost, DomainError> {
        let secret = POST_EDIT_RULES.require("secret", input.secret.as_deref())?;
        let text = POST_EDIT_RULES.check("text", input.text.as_deref())?;
        let category =
            parse_category(POST_EDIT_RULES.check("category", input.category.as_deref())?)?;

        self.authorize(id, &secret).await?;

        let changes = PostChanges {
            text,
            category,
            updated_at: Utc::now(),
        };
        let post = self
            .repo
            .update(id, changes)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;

        tracing::info!(post_id = %id, "Post updated");
        Ok(post.into())
    }

    /// Permanently remove a post whose secret the caller knows.
    pub async fn delete(&self, id: Uuid, secret: Option<&str>) -> Result<Uuid, DomainError> {
        let secret = POST_EDIT_RULES.require("secret", secret)?;

        self.authorize(id, &secret).await?;

        match self.repo.delete(id).await {
            Ok(()) => {
                tracing::info!(post_id = %id, "Post deleted");
                Ok(id)
            }
            Err(RepoError::NotFound) => Err(DomainError::post_not_found(id)),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn react(&self, id: Uuid, kind: &str) -> Result<PublicPost, DomainError> {
        let kind: ReactionKind = kind.parse()?;

        self.repo
            .increment_reaction(id, kind)
            .await?
            .map(PublicPost::from)
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    pub async fn comment(&self, id: Uuid, text: Option<&str>) -> Result<PublicPost, DomainError> {
        let text = COMMENT_RULES.require("text", text)?;

        self.repo
            .append_comment(id, Comment::new(text))
            .await?
            .map(PublicPost::from)
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    /// Frequency tables over every stored post, recomputed on each call.
    pub async fn stats(&self) -> Result<PostStats, DomainError> {
        let posts = self.repo.list(&PostFilter::default()).await?;
        Ok(PostStats::from_posts(&posts))
    }

    async fn list(&self, filter: &PostFilter) -> Result<Vec<PublicPost>, DomainError> {
        let posts = self.repo.list(filter).await?;
        Ok(posts.into_iter().map(PublicPost::from).collect())
    }

    /// Load a post and check the caller's secret against its hash.
    async fn authorize(&self, id: Uuid, secret: &str) -> Result<Post, DomainError> {
        let post = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;

        if !self
            .hasher
            .verify(secret, &post.secret_hash)
            .await
            .map_err(secret_error)?
        {
            tracing::warn!(post_id = %id, "Secret code rejected");
            return Err(DomainError::Forbidden);
        }

        Ok(post)
    }
}

fn parse_category(name: Option<String>) -> Result<Option<Category>, DomainError> {
    name.map(|n| n.parse()).transpose()
}

fn secret_error(err: SecretError) -> DomainError {
    match err {
        SecretError::TooShort { .. } => DomainError::Validation(err.to_string()),
        SecretError::Hashing(msg) => DomainError::Internal(msg),
    }
}
