//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use whisper_core::domain::{Category, Comment, ReactionKind, Reactions};
use whisper_core::error::RepoError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub category: String,
    pub secret_hash: String,
    pub author_id: String,
    pub like_count: i64,
    pub love_count: i64,
    pub laugh_count: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Counter column backing a reaction kind.
pub fn reaction_column(kind: ReactionKind) -> Column {
    match kind {
        ReactionKind::Like => Column::LikeCount,
        ReactionKind::Love => Column::LoveCount,
        ReactionKind::Laugh => Column::LaughCount,
    }
}

impl Model {
    /// Assemble the domain post from this row and its comments (in append order).
    pub fn into_domain(
        self,
        comments: Vec<Comment>,
    ) -> Result<whisper_core::domain::Post, RepoError> {
        let category: Category = self
            .category
            .parse()
            .map_err(|_| RepoError::Corrupt(format!("unknown category '{}'", self.category)))?;

        Ok(whisper_core::domain::Post {
            id: self.id,
            text: self.text,
            category,
            secret_hash: self.secret_hash,
            author_id: self.author_id,
            reactions: Reactions {
                like: counter(self.like_count),
                love: counter(self.love_count),
                laugh: counter(self.laugh_count),
            },
            comments,
            created_at: self.created_at.into(),
            updated_at: self.updated_at.into(),
        })
    }
}

fn counter(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

/// Conversion from a new domain Post to SeaORM ActiveModel.
///
/// Comments live in their own table and are not part of the row.
impl From<&whisper_core::domain::Post> for ActiveModel {
    fn from(post: &whisper_core::domain::Post) -> Self {
        let count = |kind| i64::try_from(post.reactions.get(kind)).unwrap_or(i64::MAX);

        Self {
            id: Set(post.id),
            text: Set(post.text.clone()),
            category: Set(post.category.to_string()),
            secret_hash: Set(post.secret_hash.clone()),
            author_id: Set(post.author_id.clone()),
            like_count: Set(count(ReactionKind::Like)),
            love_count: Set(count(ReactionKind::Love)),
            laugh_count: Set(count(ReactionKind::Laugh)),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
