//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, SignupDetails, User};

/// Domain use-case port for signup.
#[async_trait]
pub trait SignupService: Send + Sync {
    /// Register a new account. No session token is issued here.
    async fn signup(&self, details: &SignupDetails) -> Result<User, Error>;
}
