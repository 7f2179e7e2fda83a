//! Driving port for login.
//!
//! Inbound adapters call this port to exchange credentials for a bearer
//! token without knowing which store, hasher or signer sits behind it.

use async_trait::async_trait;

use crate::domain::{Error, IssuedToken, LoginCredentials, User};

/// Outcome of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSession {
    /// Signed bearer token bound to `user`.
    pub token: IssuedToken,
    /// Public identity projection of the authenticated account.
    pub user: User,
}

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify credentials and issue a session token.
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginSession, Error>;
}
