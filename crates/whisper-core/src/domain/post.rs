use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Topic a post is filed under.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Category {
    Crush,
    Study,
    Funny,
    #[default]
    Secret,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 4] = [
        Category::Crush,
        Category::Study,
        Category::Funny,
        Category::Secret,
    ];

    /// Wire names of every category, same order as [`Category::ALL`].
    pub const NAMES: &'static [&'static str] = &["Crush", "Study", "Funny", "Secret"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Crush => "Crush",
            Category::Study => "Study",
            Category::Funny => "Funny",
            Category::Secret => "Secret",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::InvalidCategory(s.to_string()))
    }
}

/// Kind of reaction a reader can leave on a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Love,
    Laugh,
}

impl ReactionKind {
    pub const ALL: [ReactionKind; 3] = [ReactionKind::Like, ReactionKind::Love, ReactionKind::Laugh];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Like => "like",
            ReactionKind::Love => "love",
            ReactionKind::Laugh => "laugh",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReactionKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| DomainError::InvalidKind(s.to_string()))
    }
}

/// Reaction counters. Only ever incremented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reactions {
    pub like: u64,
    pub love: u64,
    pub laugh: u64,
}

impl Reactions {
    pub fn get(&self, kind: ReactionKind) -> u64 {
        match kind {
            ReactionKind::Like => self.like,
            ReactionKind::Love => self.love,
            ReactionKind::Laugh => self.laugh,
        }
    }

    pub fn increment(&mut self, kind: ReactionKind) {
        let counter = match kind {
            ReactionKind::Like => &mut self.like,
            ReactionKind::Love => &mut self.love,
            ReactionKind::Laugh => &mut self.laugh,
        };
        *counter = counter.saturating_add(1);
    }

    pub fn total(&self) -> u64 {
        self.like + self.love + self.laugh
    }
}

/// Anonymous comment attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(text: String) -> Self {
        Self {
            text,
            created_at: Utc::now(),
        }
    }
}

/// Post entity as held by the store.
///
/// Carries the secret hash, so it is deliberately not `Serialize`.
/// Anything leaving the service goes through [`PublicPost`].
#[derive(Debug, Clone)]
pub struct Post {
    pub id: Uuid,
    pub text: String,
    pub category: Category,
    pub secret_hash: String,
    pub author_id: String,
    pub reactions: Reactions,
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post with generated ID, zeroed counters and no comments.
    pub fn new(text: String, category: Category, secret_hash: String, author_id: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            text,
            category,
            secret_hash,
            author_id,
            reactions: Reactions::default(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update. Fields left as `None` are untouched.
    pub fn apply(&mut self, changes: &PostChanges) {
        if let Some(text) = &changes.text {
            self.text = text.clone();
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        self.updated_at = changes.updated_at;
    }
}

/// A post with its secret hash stripped; the only shape handed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicPost {
    pub id: Uuid,
    pub text: String,
    pub category: Category,
    pub author_id: String,
    pub reactions: Reactions,
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PublicPost {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            text: post.text,
            category: post.category,
            author_id: post.author_id,
            reactions: post.reactions,
            comments: post.comments,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Validated field changes for an authorized update.
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub text: Option<String>,
    pub category: Option<Category>,
    pub updated_at: DateTime<Utc>,
}

/// Listing filter. Results are always newest first.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub author_id: Option<String>,
    pub category: Option<Category>,
}

impl PostFilter {
    pub fn by_author(author_id: impl Into<String>) -> Self {
        Self {
            author_id: Some(author_id.into()),
            category: None,
        }
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.author_id
            .as_deref()
            .is_none_or(|author| post.author_id == author)
            && self.category.is_none_or(|category| post.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_names() {
        for (category, name) in Category::ALL.iter().zip(Category::NAMES) {
            assert_eq!(category.as_str(), *name);
            assert_eq!(name.parse::<Category>().unwrap(), *category);
        }
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let err = "crush".parse::<Category>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidCategory(v) if v == "crush"));
    }

    #[test]
    fn test_unknown_reaction_kind_is_rejected() {
        assert!(matches!(
            "bogus".parse::<ReactionKind>(),
            Err(DomainError::InvalidKind(_))
        ));
        assert_eq!("laugh".parse::<ReactionKind>().unwrap(), ReactionKind::Laugh);
    }

    #[test]
    fn test_new_post_starts_empty() {
        let post = Post::new("hi".into(), Category::default(), "hash".into(), "u1".into());
        assert_eq!(post.category, Category::Secret);
        assert_eq!(post.reactions, Reactions::default());
        assert!(post.comments.is_empty());
        assert_eq!(post.created_at, post.updated_at);
    }

    #[test]
    fn test_public_view_has_no_secret_hash() {
        let post = Post::new("hi".into(), Category::Funny, "$argon2id$x".into(), "u1".into());
        let json = serde_json::to_value(PublicPost::from(post)).unwrap();
        let object = json.as_object().unwrap();

        assert!(!object.contains_key("secretHash"));
        assert!(!json.to_string().contains("$argon2id$x"));
        assert_eq!(json["reactions"], serde_json::json!({"like": 0, "love": 0, "laugh": 0}));
        assert_eq!(json["authorId"], "u1");
    }

    #[test]
    fn test_apply_merges_only_provided_fields() {
        let mut post = Post::new("old".into(), Category::Study, "h".into(), "u1".into());
        post.reactions.increment(ReactionKind::Love);
        let later = post.updated_at + chrono::TimeDelta::seconds(5);

        post.apply(&PostChanges {
            text: Some("new".into()),
            category: None,
            updated_at: later,
        });

        assert_eq!(post.text, "new");
        assert_eq!(post.category, Category::Study);
        assert_eq!(post.reactions.love, 1);
        assert_eq!(post.updated_at, later);
    }

    #[test]
    fn test_filter_matches_author_and_category() {
        let post = Post::new("t".into(), Category::Crush, "h".into(), "u1".into());

        assert!(PostFilter::default().matches(&post));
        assert!(PostFilter::by_author("u1").matches(&post));
        assert!(!PostFilter::by_author("u2").matches(&post));
        assert!(
            !PostFilter {
                author_id: None,
                category: Some(Category::Funny),
            }
            .matches(&post)
        );
    }
}
