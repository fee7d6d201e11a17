//! Credentials port — one-way password hashing.

use std::sync::Arc;

use devbook_domain::error::DevbookError;

/// Turns a plaintext password into a storable hash.
///
/// The output need not be deterministic (salted hashes differ per call), so
/// callers must never compare two hashes for equality.
pub trait CredentialHasher {
    /// Hash `plaintext`.
    ///
    /// # Errors
    ///
    /// Returns [`DevbookError::Credential`] when the hasher fails.
    fn hash(&self, plaintext: &str) -> Result<String, DevbookError>;
}

impl<T: CredentialHasher + ?Sized> CredentialHasher for Arc<T> {
    fn hash(&self, plaintext: &str) -> Result<String, DevbookError> {
        (**self).hash(plaintext)
    }
}
