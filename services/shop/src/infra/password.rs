//! Argon2id password hashing.

use anyhow::Context as _;
use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier, Version};
use rand::rngs::OsRng;

use crate::domain::repository::PasswordHasher;
use crate::error::ShopError;

/// Argon2id over a blocking thread. Hashes are PHC strings, so verification
/// reads the cost parameters from the stored hash, not from `self`.
#[derive(Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl Argon2Hasher {
    /// Custom cost: memory in KiB, iterations, parallelism.
    pub fn with_cost(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self, ShopError> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|e| anyhow::anyhow!("invalid argon2 params: {e}"))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

fn hash_blocking(argon2: &Argon2<'_>, password: &str) -> Result<String, ShopError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("hash password: {e}"))?;
    Ok(hash.to_string())
}

fn verify_blocking(argon2: &Argon2<'_>, password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => argon2.verify_password(password.as_bytes(), &parsed).is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "stored password hash is not a valid PHC string");
            false
        }
    }
}

impl PasswordHasher for Argon2Hasher {
    async fn hash(&self, password: &str) -> Result<String, ShopError> {
        let argon2 = self.argon2();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hash_blocking(&argon2, &password))
            .await
            .context("join password hashing task")?
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, ShopError> {
        let argon2 = self.argon2();
        let password = password.to_owned();
        let hash = hash.to_owned();
        let matched = tokio::task::spawn_blocking(move || verify_blocking(&argon2, &password, &hash))
            .await
            .context("join password verification task")?;
        Ok(matched)
    }
}
