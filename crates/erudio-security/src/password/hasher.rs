//! Password hashing using Argon2.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Argon2, Params,
};
use erudio_core::{ErudioError, ErudioResult};
use std::sync::Arc;
use tracing::debug;

/// Password hasher service using Argon2id.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Arc<Argon2<'static>>,
}

impl PasswordHasher {
    /// Creates a new password hasher with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(Params::DEFAULT)
    }

    /// Creates a new password hasher with custom parameters.
    #[must_use]
    pub fn with_params(params: Params) -> Self {
        let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);
        Self {
            argon2: Arc::new(argon2),
        }
    }

    /// Creates a hasher with the given memory cost (KiB), iterations, and lanes.
    pub fn with_cost(memory_kib: u32, iterations: u32, parallelism: u32) -> ErudioResult<Self> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| ErudioError::Configuration(format!("Invalid Argon2 parameters: {e}")))?;
        Ok(Self::with_params(params))
    }

    /// Hashes a password into a PHC string.
    pub fn hash(&self, password: &str) -> ErudioResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| ErudioError::Internal(format!("Failed to hash password: {}", e)))?;

        debug!("Password hashed successfully");
        Ok(hash.to_string())
    }

    /// Verifies a password against a hash.
    pub fn verify(&self, password: &str, hash: &str) -> ErudioResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| ErudioError::Internal(format!("Invalid password hash format: {}", e)))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => {
                debug!("Password verification failed: incorrect password");
                Ok(false)
            }
            Err(e) => Err(ErudioError::Internal(format!("Password verification error: {}", e))),
        }
    }

    /// Returns true if `hash` was not produced by Argon2id.
    #[must_use]
    pub fn needs_rehash(&self, hash: &str) -> bool {
        PasswordHash::new(hash).map_or(true, |parsed| parsed.algorithm != argon2::Algorithm::Argon2id.ident())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}
