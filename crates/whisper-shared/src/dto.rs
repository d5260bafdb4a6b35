//! Data Transfer Objects - request/response bodies for the API.
//!
//! Request fields are optional so that a missing field reaches validation
//! and gets the same error shape as an invalid one.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /api/posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub text: Option<String>,
    pub secret_code: Option<String>,
    pub category: Option<String>,
}

/// Body of `PUT /api/posts/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub secret_code: Option<String>,
    pub text: Option<String>,
    pub category: Option<String>,
}

/// Body of `DELETE /api/posts/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePostRequest {
    pub secret_code: Option<String>,
}

/// Body of `POST /api/posts/{id}/react`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactRequest {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Body of `POST /api/posts/{id}/comment`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentRequest {
    pub text: Option<String>,
}

/// Query string of `GET /api/posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsQuery {
    pub category: Option<String>,
}

/// Acknowledgment of a deleted post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedPost {
    pub id: Uuid,
}

/// The caller's identity as seen by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityResponse {
    pub author_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}
