//! Identity handlers. Sign-in happens upstream; the server only checks tokens.

use actix_web::HttpResponse;
use whisper_shared::ApiResponse;
use whisper_shared::dto::IdentityResponse;

use crate::middleware::auth::Identity;

/// GET /api/auth/me - Protected route
pub async fn me(identity: Identity) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(IdentityResponse {
        author_id: identity.author_id,
        display_name: identity.display_name,
    }))
}
