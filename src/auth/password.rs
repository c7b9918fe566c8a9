use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString},
};
use rand::thread_rng;

use crate::error::AppError;

/// Capability used by registration and login; the hashing scheme itself is
/// the argon2 crate's business.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, AppError>;
    fn verify(&self, hash: &str, password: &str) -> Result<bool, AppError>;
}

#[derive(Clone, Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut thread_rng());
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| AppError::internal(format!("Password hashing failed: {err}")))?
            .to_string();
        Ok(hash)
    }

    fn verify(&self, hash: &str, password: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|err| AppError::internal(format!("Invalid password hash: {err}")))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}
