//! Post comment entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

/// One comment row. The serial `id` records append order.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "post_comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub post_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for whisper_core::domain::Comment {
    fn from(model: Model) -> Self {
        Self {
            text: model.text,
            created_at: model.created_at.into(),
        }
    }
}

impl ActiveModel {
    /// New comment row; the id is assigned by the database.
    pub fn for_post(post_id: Uuid, comment: &whisper_core::domain::Comment) -> Self {
        Self {
            post_id: Set(post_id),
            text: Set(comment.text.clone()),
            created_at: Set(comment.created_at.into()),
            ..Default::default()
        }
    }
}
