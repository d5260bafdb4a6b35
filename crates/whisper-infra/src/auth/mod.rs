//! Identity tokens and secret-code hashing.

mod jwt;
mod secret;

pub use jwt::{JwtConfig, JwtTokenService};
pub use secret::{Argon2SecretHasher, SecretHashConfig};
