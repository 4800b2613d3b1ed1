use anyhow::{Context, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a password using Argon2id.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .context("Failed to hash password")?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against its hash.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash).context("Failed to parse password hash")?;

    let argon2 = Argon2::default();

    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// The board's single write password, kept only as an Argon2 hash.
#[derive(Debug, Clone)]
pub struct SharedPassword {
    hash: String,
}

impl SharedPassword {
    /// Hash the configured password once at startup.
    pub fn new(password: &str) -> Result<Self> {
        Ok(Self {
            hash: hash_password(password)?,
        })
    }

    /// Check a login attempt. Verification errors count as a mismatch.
    #[must_use]
    pub fn matches(&self, attempt: &str) -> bool {
        match verify_password(attempt, &self.hash) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::error!("Password verification error: {e:#}");
                false
            }
        }
    }
}
