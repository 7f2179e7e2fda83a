//! Ports for issuing and verifying bearer session tokens.

use crate::domain::{IssuedToken, SessionToken, TokenRejection, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures signing a new token.
    pub enum TokenIssueError {
        /// The signer could not encode the claims.
        Signing { message: String } => "session token signing failed: {message}",
    }
}

/// Signs session tokens bound to a user identity.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Issue a token for `subject` that expires seven days from now.
    fn issue(&self, subject: &UserId) -> Result<IssuedToken, TokenIssueError>;
}

/// Checks a presented token and recovers its subject.
#[cfg_attr(test, mockall::automock)]
pub trait TokenVerifier: Send + Sync {
    /// Validate signature and expiry, returning the embedded subject.
    fn verify(&self, token: &SessionToken) -> Result<UserId, TokenRejection>;
}
