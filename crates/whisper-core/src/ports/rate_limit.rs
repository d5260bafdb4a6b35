//! Request throttling port.

use async_trait::async_trait;
use std::time::Duration;

/// Per-client request throttle.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Record one request from `client` and decide whether it may proceed.
    async fn check(&self, client: &str) -> Result<RateLimitDecision, RateLimitError>;
}

/// Outcome of a throttle check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed,
    Limited { retry_after: Duration },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed)
    }
}

/// Rate limit errors.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Backend error: {0}")]
    Backend(String),
}
