//! Salted one-way password hashing (Argon2id).
//!
//! Hashing and verification are CPU-bound, so the async entry points move the
//! work onto the blocking pool instead of stalling a runtime worker.

use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString, rand_core::OsRng,
    },
};
use tokio::task;

use crate::config::SecurityConfig;

#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    pub fn new(config: &SecurityConfig) -> Result<Self> {
        let params = Params::new(
            config.argon2_memory_cost_kib,
            config.argon2_time_cost,
            config.argon2_parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash with a fresh random salt; returns a PHC string.
    pub fn hash_blocking(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

        Ok(hash.to_string())
    }

    /// The PHC string carries its own salt and params, so hashes written
    /// under an older cost setting still verify.
    pub fn verify_blocking(&self, password: &str, password_hash: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

        Ok(self
            .argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    pub async fn hash(&self, password: &str) -> Result<String> {
        let hasher = self.clone();
        let password = password.to_string();

        task::spawn_blocking(move || hasher.hash_blocking(&password))
            .await
            .context("Password hashing task panicked")?
    }

    pub async fn verify(&self, password: &str, password_hash: &str) -> Result<bool> {
        let hasher = self.clone();
        let password = password.to_string();
        let password_hash = password_hash.to_string();

        task::spawn_blocking(move || hasher.verify_blocking(&password, &password_hash))
            .await
            .context("Password verification task panicked")?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::new(&SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
        })
        .unwrap()
    }

    #[test]
    fn hash_verifies_and_is_salted() {
        let hasher = fast_hasher();
        let first = hasher.hash_blocking("hunter22").unwrap();
        let second = hasher.hash_blocking("hunter22").unwrap();

        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
        assert!(!first.contains("hunter22"));
        assert!(hasher.verify_blocking("hunter22", &first).unwrap());
        assert!(!hasher.verify_blocking("hunter23", &first).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let hasher = fast_hasher();
        assert!(hasher.verify_blocking("x", "not-a-phc-string").is_err());
    }

    #[test]
    fn rejects_invalid_params() {
        let result = PasswordHasher::new(&SecurityConfig {
            argon2_memory_cost_kib: 1,
            argon2_time_cost: 0,
            argon2_parallelism: 1,
        });
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn async_round_trip_runs_on_blocking_pool() {
        let hasher = fast_hasher();
        let hash = hasher.hash("s3cret").await.unwrap();
        assert!(hasher.verify("s3cret", &hash).await.unwrap());
    }
}
