//! PostgreSQL post repository.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbConn, DbErr, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use whisper_core::domain::{Comment, Post, PostChanges, PostFilter, ReactionKind};
use whisper_core::error::RepoError;
use whisper_core::ports::{BaseRepository, PostRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};

/// PostgreSQL-backed post repository.
///
/// Counters are bumped with `SET col = col + 1` and comments are separate
/// rows, so concurrent reactions and comments never overwrite each other.
pub struct PostgresPostRepository {
    pub(crate) db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Load one post with its comments, using `conn` (pool or transaction).
    async fn load<C>(conn: &C, id: Uuid) -> Result<Option<Post>, RepoError>
    where
        C: ConnectionTrait,
    {
        let Some(row) = PostEntity::find_by_id(id)
            .one(conn)
            .await
            .map_err(query_error)?
        else {
            return Ok(None);
        };

        let comments = CommentEntity::find()
            .filter(comment::Column::PostId.eq(id))
            .order_by_asc(comment::Column::Id)
            .all(conn)
            .await
            .map_err(query_error)?
            .into_iter()
            .map(Comment::from)
            .collect();

        row.into_domain(comments).map(Some)
    }
}

fn query_error(e: DbErr) -> RepoError {
    match e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(e.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for PostgresPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Self::load(&self.db, id).await
    }

    async fn insert(&self, entity: Post) -> Result<Post, RepoError> {
        post::ActiveModel::from(&entity)
            .insert(&self.db)
            .await
            .map_err(|e| {
                let err_str = e.to_string();
                if err_str.contains("duplicate") || err_str.contains("unique") {
                    RepoError::Constraint("Post already exists".to_string())
                } else {
                    RepoError::Query(err_str)
                }
            })?;

        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        // Comments go with the post through ON DELETE CASCADE.
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError> {
        let mut query = PostEntity::find();
        if let Some(author_id) = &filter.author_id {
            query = query.filter(post::Column::AuthorId.eq(author_id.as_str()));
        }
        if let Some(category) = filter.category {
            query = query.filter(post::Column::Category.eq(category.as_str()));
        }

        let rows = query
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut comments: HashMap<Uuid, Vec<Comment>> = HashMap::new();
        for row in CommentEntity::find()
            .filter(comment::Column::PostId.is_in(ids))
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_error)?
        {
            comments.entry(row.post_id).or_default().push(row.into());
        }

        rows.into_iter()
            .map(|row| {
                let own = comments.remove(&row.id).unwrap_or_default();
                row.into_domain(own)
            })
            .collect()
    }

    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        let updated_at: sea_orm::prelude::DateTimeWithTimeZone = changes.updated_at.into();
        let mut update = PostEntity::update_many()
            .col_expr(post::Column::UpdatedAt, Expr::value(updated_at))
            .filter(post::Column::Id.eq(id));
        if let Some(text) = changes.text {
            update = update.col_expr(post::Column::Text, Expr::value(text));
        }
        if let Some(category) = changes.category {
            update = update.col_expr(post::Column::Category, Expr::value(category.as_str()));
        }

        let result = update.exec(&self.db).await.map_err(query_error)?;
        if result.rows_affected == 0 {
            return Ok(None);
        }

        Self::load(&self.db, id).await
    }

    async fn increment_reaction(
        &self,
        id: Uuid,
        kind: ReactionKind,
    ) -> Result<Option<Post>, RepoError> {
        let column = post::reaction_column(kind);
        let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();

        let result = PostEntity::update_many()
            .col_expr(column, Expr::col(column).add(1))
            .col_expr(post::Column::UpdatedAt, Expr::value(now))
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        tracing::debug!(post_id = %id, kind = %kind, "Reaction recorded");
        Self::load(&self.db, id).await
    }

    async fn append_comment(
        &self,
        id: Uuid,
        comment: Comment,
    ) -> Result<Option<Post>, RepoError> {
        let txn = self.db.begin().await.map_err(query_error)?;

        let touched = PostEntity::update_many()
            .col_expr(
                post::Column::UpdatedAt,
                Expr::value(sea_orm::prelude::DateTimeWithTimeZone::from(comment.created_at)),
            )
            .filter(post::Column::Id.eq(id))
            .exec(&txn)
            .await
            .map_err(query_error)?;

        if touched.rows_affected == 0 {
            txn.rollback().await.map_err(query_error)?;
            return Ok(None);
        }

        comment::ActiveModel::for_post(id, &comment)
            .insert(&txn)
            .await
            .map_err(query_error)?;

        let post = Self::load(&txn, id).await?;
        txn.commit().await.map_err(query_error)?;

        Ok(post)
    }
}
