//! # devbook-adapter-credentials-argon2
//!
//! Argon2id implementation of the [`CredentialHasher`] port.
//!
//! Every hash gets a fresh random salt from [`OsRng`], so hashing the same
//! password twice yields different strings. Output is a PHC string
//! (`$argon2id$v=19$m=...`) carrying algorithm, parameters and salt, which is
//! all [`Argon2Hasher::verify`] needs to check a candidate later.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use devbook_app::ports::CredentialHasher;
use devbook_domain::error::DevbookError;

/// Errors raised by the Argon2 adapter.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// Hashing or parsing a stored hash failed.
    #[error("password hashing error")]
    Hash(#[from] argon2::password_hash::Error),
}

impl From<CredentialError> for DevbookError {
    fn from(err: CredentialError) -> Self {
        Self::Credential(Box::new(err))
    }
}

/// Argon2id hasher with the crate's default parameters.
#[derive(Default)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check `plaintext` against a PHC string produced by [`CredentialHasher::hash`].
    ///
    /// # Errors
    ///
    /// Returns [`DevbookError::Credential`] when `hash` is not a valid PHC
    /// string. A wrong password is `Ok(false)`, not an error.
    pub fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, DevbookError> {
        let parsed = PasswordHash::new(hash).map_err(CredentialError::from)?;
        match self.argon2.verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(CredentialError::from(err).into()),
        }
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> Result<String, DevbookError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(CredentialError::from)?;
        Ok(hash.to_string())
    }
}
