use chrono::{TimeDelta, Utc};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use whisper_core::domain::{Category, Comment, PostChanges, PostFilter, ReactionKind};
use whisper_core::error::RepoError;
use whisper_core::ports::{BaseRepository, PostRepository};

use crate::database::entity::{comment, post};
use crate::database::postgres_repo::PostgresPostRepository;

fn post_row(id: Uuid, author: &str, likes: i64) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        text: "Test Post".to_owned(),
        category: "Crush".to_owned(),
        secret_hash: "$argon2id$stub".to_owned(),
        author_id: author.to_owned(),
        like_count: likes,
        love_count: 0,
        laugh_count: 0,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn comment_row(id: i64, post_id: Uuid, text: &str) -> comment::Model {
    comment::Model {
        id,
        post_id,
        text: text.to_owned(),
        created_at: (Utc::now() + TimeDelta::seconds(id)).into(),
    }
}

fn exec(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

#[tokio::test]
async fn test_find_post_by_id_with_comments() {
    let post_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_row(post_id, "u1", 3)]])
        .append_query_results([vec![
            comment_row(1, post_id, "first"),
            comment_row(2, post_id, "second"),
        ]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let post = repo.find_by_id(post_id).await.unwrap().unwrap();

    assert_eq!(post.id, post_id);
    assert_eq!(post.category, Category::Crush);
    assert_eq!(post.reactions.like, 3);
    let texts: Vec<&str> = post.comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second"]);
}

#[tokio::test]
async fn test_find_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_corrupt_category_is_reported() {
    let post_id = Uuid::new_v4();
    let mut row = post_row(post_id, "u1", 0);
    row.category = "Gossip".to_owned();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row]])
        .append_query_results([Vec::<comment::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(matches!(
        repo.find_by_id(post_id).await,
        Err(RepoError::Corrupt(_))
    ));
}

#[tokio::test]
async fn test_increment_reaction_reloads_post() {
    let post_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([exec(1)])
        .append_query_results([vec![post_row(post_id, "u1", 1)]])
        .append_query_results([Vec::<comment::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let post = repo
        .increment_reaction(post_id, ReactionKind::Like)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(post.reactions.like, 1);
}

#[tokio::test]
async fn test_increment_reaction_on_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([exec(0)])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = repo
        .increment_reaction(Uuid::new_v4(), ReactionKind::Laugh)
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([exec(0)])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(matches!(
        repo.delete(Uuid::new_v4()).await,
        Err(RepoError::NotFound)
    ));
}

#[tokio::test]
async fn test_list_attaches_comments_to_their_posts() {
    let newer = Uuid::new_v4();
    let older = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_row(newer, "u1", 0), post_row(older, "u1", 0)]])
        .append_query_results([vec![
            comment_row(1, older, "on older"),
            comment_row(2, newer, "on newer"),
            comment_row(3, older, "older again"),
        ]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let posts = repo.list(&PostFilter::by_author("u1")).await.unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, newer);
    assert_eq!(posts[0].comments.len(), 1);
    assert_eq!(posts[1].comments[0].text, "on older");
    assert_eq!(posts[1].comments[1].text, "older again");
}

#[tokio::test]
async fn test_list_empty_skips_comment_query() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(repo.list(&PostFilter::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_missing_post_returns_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([exec(0)])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let changes = PostChanges {
        text: Some("edited".to_owned()),
        category: None,
        updated_at: Utc::now(),
    };
    assert!(repo.update(Uuid::new_v4(), changes).await.unwrap().is_none());
}

#[tokio::test]
async fn test_append_comment_reloads_in_order() {
    let post_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        // updated_at bump
        .append_exec_results([exec(1)])
        // INSERT .. RETURNING for the new comment
        .append_query_results([vec![comment_row(2, post_id, "second")]])
        .append_query_results([vec![post_row(post_id, "u1", 0)]])
        .append_query_results([vec![
            comment_row(1, post_id, "first"),
            comment_row(2, post_id, "second"),
        ]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let post = repo
        .append_comment(post_id, Comment::new("second".to_owned()))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(post.id, post_id);
    let texts: Vec<&str> = post.comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second"]);
}

#[tokio::test]
async fn test_append_comment_on_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([exec(0)])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = repo
        .append_comment(Uuid::new_v4(), Comment::new("hello".to_owned()))
        .await
        .unwrap();

    assert!(result.is_none());
}
