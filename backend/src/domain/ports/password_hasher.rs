//! One-way salted password hashing.

use crate::domain::PasswordDigest;

use super::define_port_error;

define_port_error! {
    /// Failures producing a digest.
    pub enum PasswordHashError {
        /// The hashing primitive rejected its input or parameters.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Salted, deliberately expensive hashing primitive.
///
/// Both operations are CPU-bound and synchronous; async callers move them onto
/// a blocking thread.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `plaintext` with a fresh random salt.
    fn hash(&self, plaintext: &str) -> Result<PasswordDigest, PasswordHashError>;

    /// Return `true` iff `digest` was produced from `plaintext`.
    ///
    /// Malformed digests yield `false` rather than an error.
    fn verify(&self, plaintext: &str, digest: &PasswordDigest) -> bool;
}
