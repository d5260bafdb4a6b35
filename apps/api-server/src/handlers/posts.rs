//! Post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;
use whisper_core::services::{NewPost, PostUpdate};
use whisper_shared::ApiResponse;
use whisper_shared::dto::{
    CommentRequest, CreatePostRequest, DeletePostRequest, DeletedPost, ListPostsQuery,
    ReactRequest, UpdatePostRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let post = state
        .posts
        .create(NewPost {
            text: req.text,
            secret: req.secret_code,
            category: req.category,
            author_id: identity.author_id,
        })
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        post,
        "Post created. Keep your secret code to edit or delete it later.",
    )))
}

/// GET /api/posts?category=
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list_all(query.category.as_deref()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/posts/mine
pub async fn mine(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let posts = state.posts.list_by_author(&identity.author_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/posts/stats
pub async fn stats(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let stats = state.posts.stats().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(stats)))
}

/// GET /api/posts/{id}
pub async fn get(state: web::Data<AppState>, id: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post = state.posts.get_by_id(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let post = state
        .posts
        .update(
            id.into_inner(),
            PostUpdate {
                secret: req.secret_code,
                text: req.text,
                category: req.category,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(post, "Post updated.")))
}

/// DELETE /api/posts/{id}
///
/// A missing body is treated like a missing secret code.
pub async fn delete(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    body: Option<web::Json<DeletePostRequest>>,
) -> AppResult<HttpResponse> {
    let secret = body.and_then(|b| b.into_inner().secret_code);

    let id = state.posts.delete(id.into_inner(), secret.as_deref()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        DeletedPost { id },
        "Post deleted.",
    )))
}

/// POST /api/posts/{id}/react
pub async fn react(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    body: web::Json<ReactRequest>,
) -> AppResult<HttpResponse> {
    let post = state.posts.react(id.into_inner(), &body.kind).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// POST /api/posts/{id}/comment
pub async fn comment(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .comment(id.into_inner(), body.text.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}
