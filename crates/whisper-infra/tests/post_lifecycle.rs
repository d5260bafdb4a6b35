//! End-to-end post lifecycle through `PostService` with in-memory storage.

use std::sync::Arc;

use uuid::Uuid;

use whisper_core::DomainError;
use whisper_core::domain::Category;
use whisper_core::services::{NewPost, PostService, PostUpdate};
use whisper_infra::{Argon2SecretHasher, InMemoryPostRepository, SecretHashConfig};

fn service() -> PostService {
    let hasher = Argon2SecretHasher::new(&SecretHashConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
    .unwrap();
    PostService::new(Arc::new(InMemoryPostRepository::new()), Arc::new(hasher))
}

fn new_post(text: &str, secret: &str, category: Option<&str>, author: &str) -> NewPost {
    NewPost {
        text: Some(text.to_owned()),
        secret: Some(secret.to_owned()),
        category: category.map(str::to_owned),
        author_id: author.to_owned(),
    }
}

#[tokio::test]
async fn test_create_returns_public_view() {
    let svc = service();

    let post = svc
        .create(new_post("I like X", "hunter22", Some("Crush"), "u1"))
        .await
        .unwrap();

    assert_eq!(post.text, "I like X");
    assert_eq!(post.category, Category::Crush);
    assert_eq!(post.author_id, "u1");
    assert_eq!(post.reactions.total(), 0);
    assert!(post.comments.is_empty());

    let json = serde_json::to_value(&post).unwrap();
    assert!(json.get("secretHash").is_none());
    assert!(!json.to_string().contains("hunter22"));
}

#[tokio::test]
async fn test_create_defaults_category() {
    let svc = service();

    let post = svc.create(new_post("hello", "abcd", None, "u1")).await.unwrap();

    assert_eq!(post.category, Category::Secret);
}

#[tokio::test]
async fn test_create_rejects_bad_input() {
    let svc = service();

    let err = svc
        .create(new_post("hello", "abcd", Some("Gossip"), "u1"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidCategory(_)));

    let err = svc.create(new_post("hello", "abc", None, "u1")).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let err = svc
        .create(NewPost {
            text: Some("hello".to_owned()),
            author_id: "u1".to_owned(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let err = svc
        .create(new_post(&"x".repeat(1001), "abcd", None, "u1"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    assert!(svc.list_all(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_with_correct_secret_merges_fields() {
    let svc = service();
    let created = svc
        .create(new_post("original", "abcd", Some("Study"), "u1"))
        .await
        .unwrap();

    let updated = svc
        .update(
            created.id,
            PostUpdate {
                secret: Some("abcd".to_owned()),
                category: Some("Funny".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.text, "original");
    assert_eq!(updated.category, Category::Funny);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn test_wrong_secret_is_forbidden_and_changes_nothing() {
    let svc = service();
    let created = svc
        .create(new_post("original", "abcd", None, "u1"))
        .await
        .unwrap();

    let err = svc
        .update(
            created.id,
            PostUpdate {
                secret: Some("wxyz".to_owned()),
                text: Some("hijacked".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden));

    let err = svc.delete(created.id, Some("wxyz")).await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden));

    assert_eq!(svc.get_by_id(created.id).await.unwrap(), created);
}

#[tokio::test]
async fn test_missing_secret_is_a_validation_error() {
    let svc = service();
    let created = svc.create(new_post("hi", "abcd", None, "u1")).await.unwrap();

    let err = svc.delete(created.id, None).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let err = svc
        .update(created.id, PostUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let svc = service();
    let created = svc.create(new_post("bye", "abcd", None, "u1")).await.unwrap();

    assert_eq!(svc.delete(created.id, Some("abcd")).await.unwrap(), created.id);

    assert!(matches!(
        svc.get_by_id(created.id).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        svc.delete(created.id, Some("abcd")).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let svc = service();
    let id = Uuid::new_v4();

    assert!(matches!(
        svc.react(id, "like").await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        svc.comment(id, Some("hello")).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reactions_are_all_counted() {
    let svc = Arc::new(service());
    let id = svc.create(new_post("popular", "abcd", None, "u1")).await.unwrap().id;

    let tasks = (0..50).map(|_| {
        let svc = Arc::clone(&svc);
        tokio::spawn(async move { svc.react(id, "love").await })
    });
    for result in futures::future::join_all(tasks).await {
        result.unwrap().unwrap();
    }

    let post = svc.get_by_id(id).await.unwrap();
    assert_eq!(post.reactions.love, 50);
    assert_eq!(post.reactions.like, 0);
    assert_eq!(post.reactions.laugh, 0);
}

#[tokio::test]
async fn test_invalid_reaction_kind_changes_nothing() {
    let svc = service();
    let created = svc.create(new_post("hi", "abcd", None, "u1")).await.unwrap();

    let err = svc.react(created.id, "bogus").await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidKind(_)));

    assert_eq!(svc.get_by_id(created.id).await.unwrap(), created);
}

#[tokio::test]
async fn test_comments_keep_submission_order() {
    let svc = service();
    let created = svc.create(new_post("hi", "abcd", None, "u1")).await.unwrap();

    svc.comment(created.id, Some("first")).await.unwrap();
    let post = svc.comment(created.id, Some("second")).await.unwrap();

    let texts: Vec<&str> = post.comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second"]);

    let err = svc.comment(created.id, Some("   ")).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn test_list_by_author_is_newest_first() {
    let svc = service();
    let a = svc.create(new_post("a", "abcd", None, "u1")).await.unwrap();
    svc.create(new_post("other", "abcd", None, "u2")).await.unwrap();
    let b = svc.create(new_post("b", "abcd", None, "u1")).await.unwrap();

    let mine = svc.list_by_author("u1").await.unwrap();

    let ids: Vec<Uuid> = mine.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![b.id, a.id]);
    assert!(svc.list_by_author("nobody").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_all_filters_by_category() {
    let svc = service();
    svc.create(new_post("a", "abcd", Some("Crush"), "u1")).await.unwrap();
    svc.create(new_post("b", "abcd", Some("Study"), "u2")).await.unwrap();

    assert_eq!(svc.list_all(None).await.unwrap().len(), 2);

    let crush = svc.list_all(Some("Crush")).await.unwrap();
    assert_eq!(crush.len(), 1);
    assert_eq!(crush[0].text, "a");

    assert!(matches!(
        svc.list_all(Some("Gossip")).await,
        Err(DomainError::InvalidCategory(_))
    ));
}

#[tokio::test]
async fn test_stats_tally_posts_and_interactions() {
    let svc = service();
    let a = svc.create(new_post("a", "abcd", Some("Crush"), "u1")).await.unwrap();
    svc.create(new_post("b", "abcd", Some("Crush"), "u1")).await.unwrap();
    svc.create(new_post("c", "abcd", Some("Funny"), "u2")).await.unwrap();
    svc.react(a.id, "like").await.unwrap();
    svc.react(a.id, "like").await.unwrap();
    svc.comment(a.id, Some("nice")).await.unwrap();

    let stats = svc.stats().await.unwrap();

    assert_eq!(stats.stats.total, 3);
    assert_eq!(stats.stats.count("byCategory", "Crush"), 2);
    assert_eq!(stats.stats.count("byCategory", "Funny"), 1);
    assert_eq!(stats.stats.count("byCategory", "Study"), 0);
    assert_eq!(stats.reactions["like"], 2);
    assert_eq!(stats.reactions["laugh"], 0);
    assert_eq!(stats.total_comments, 1);

    let by_hour: u64 = stats.stats.table("byHour").unwrap().values().sum();
    assert_eq!(by_hour, 3);
}
