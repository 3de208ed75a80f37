//! Password hashing with argon2id.
//!
//! The time cost is the adaptive work factor and comes from configuration;
//! the salt is random per hash and embedded in the PHC output string.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;

use crate::errors::ServiceError;

#[derive(Clone)]
pub struct CredentialHasher {
    argon: Argon2<'static>,
}

impl CredentialHasher {
    /// Build a hasher with `cost` iterations and argon2's default memory and lanes.
    pub fn new(cost: u32) -> Result<Self, ServiceError> {
        let params = Params::new(Params::DEFAULT_M_COST, cost, Params::DEFAULT_P_COST, None)
            .map_err(|e| ServiceError::Hash(e.to_string()))?;
        Ok(Self { argon: Argon2::new(Algorithm::Argon2id, Version::V0x13, params) })
    }

    /// Minimal-memory parameters for tests and benchmarks.
    pub fn fast() -> Self {
        let params = Params::new(Params::MIN_M_COST, 1, 1, None).unwrap_or_default();
        Self { argon: Argon2::new(Algorithm::Argon2id, Version::V0x13, params) }
    }

    pub fn hash(&self, plaintext: &str) -> Result<String, ServiceError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| ServiceError::Hash(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    /// Constant-time check of `plaintext` against a stored PHC string.
    /// A malformed stored hash verifies as `false`.
    pub fn verify(&self, plaintext: &str, hashed: &str) -> bool {
        match PasswordHash::new(hashed) {
            Ok(parsed) => self.argon.verify_password(plaintext.as_bytes(), &parsed).is_ok(),
            Err(_) => false,
        }
    }

    /// [`hash`](Self::hash) on tokio's blocking pool; argon2 is CPU and
    /// memory bound and must not run on a worker thread.
    pub async fn spawn_hash(&self, plaintext: &str) -> Result<String, ServiceError> {
        let hasher = self.clone();
        let plaintext = plaintext.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| ServiceError::Hash(e.to_string()))?
    }

    /// [`verify`](Self::verify) on tokio's blocking pool.
    pub async fn spawn_verify(&self, plaintext: &str, hashed: &str) -> Result<bool, ServiceError> {
        let hasher = self.clone();
        let (plaintext, hashed) = (plaintext.to_owned(), hashed.to_owned());
        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &hashed))
            .await
            .map_err(|e| ServiceError::Hash(e.to_string()))
    }
}
