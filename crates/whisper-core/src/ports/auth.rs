//! Identity and secret-code ports.

use async_trait::async_trait;

/// Claims carried by an identity token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    /// Stable id of the principal; becomes a post's `author_id`.
    pub subject: String,
    pub display_name: Option<String>,
    pub exp: i64,
}

/// Token service trait for issuing and checking identity tokens.
pub trait TokenService: Send + Sync {
    /// Issue a token for a principal.
    fn generate_token(&self, subject: &str, display_name: Option<&str>)
    -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// One-way hashing of post secret codes.
///
/// Hashing is CPU-bound; implementations keep it off the async executor
/// threads.
#[async_trait]
pub trait SecretHasher: Send + Sync {
    /// Hash a secret with a fresh salt.
    async fn hash(&self, secret: &str) -> Result<String, SecretError>;

    /// Check a secret against a stored hash.
    async fn verify(&self, secret: &str, hash: &str) -> Result<bool, SecretError>;
}

/// Secret hashing errors.
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("Secret code must be at least {min} characters.")]
    TooShort { min: usize },

    #[error("Hashing error: {0}")]
    Hashing(String),
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Token error: {0}")]
    Signing(String),
}
