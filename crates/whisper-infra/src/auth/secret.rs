//! Argon2 secret-code hashing.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use async_trait::async_trait;
use tokio::task;
use whisper_core::ports::{SecretError, SecretHasher};
use whisper_core::validation::MIN_SECRET_LENGTH;

/// Argon2id cost parameters for new hashes.
///
/// Existing hashes carry their own parameters, so changing these only
/// affects posts created afterwards.
#[derive(Debug, Clone)]
pub struct SecretHashConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for SecretHashConfig {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl SecretHashConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let read = |key: &str, default: u32| {
            std::env::var(key)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default)
        };

        Self {
            memory_kib: read("SECRET_HASH_MEMORY_KIB", defaults.memory_kib),
            iterations: read("SECRET_HASH_ITERATIONS", defaults.iterations),
            parallelism: read("SECRET_HASH_PARALLELISM", defaults.parallelism),
        }
    }
}

/// Argon2id-based secret hasher with a random salt per hash.
pub struct Argon2SecretHasher {
    argon2: Argon2<'static>,
}

impl Argon2SecretHasher {
    pub fn new(config: &SecretHashConfig) -> Result<Self, SecretError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| SecretError::Hashing(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl Default for Argon2SecretHasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

#[async_trait]
impl SecretHasher for Argon2SecretHasher {
    async fn hash(&self, secret: &str) -> Result<String, SecretError> {
        if secret.chars().count() < MIN_SECRET_LENGTH {
            return Err(SecretError::TooShort {
                min: MIN_SECRET_LENGTH,
            });
        }

        let argon2 = self.argon2.clone();
        let secret = secret.to_owned();

        task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(secret.as_bytes(), &salt)
                .map(|h| h.to_string())
                .map_err(|e| SecretError::Hashing(e.to_string()))
        })
        .await
        .map_err(join_error)?
    }

    async fn verify(&self, secret: &str, hash: &str) -> Result<bool, SecretError> {
        let argon2 = self.argon2.clone();
        let secret = secret.to_owned();
        let hash = hash.to_owned();

        task::spawn_blocking(move || -> Result<bool, SecretError> {
            let parsed_hash =
                PasswordHash::new(&hash).map_err(|e| SecretError::Hashing(e.to_string()))?;
            Ok(argon2
                .verify_password(secret.as_bytes(), &parsed_hash)
                .is_ok())
        })
        .await
        .map_err(join_error)?
    }
}

fn join_error(e: task::JoinError) -> SecretError {
    SecretError::Hashing(format!("Hashing task failed: {}", e))
}
