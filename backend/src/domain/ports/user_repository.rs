//! Credential store port: persistence of user identity records.
use async_trait::async_trait;

use crate::domain::{EmailAddress, User, UserAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another record already owns this email.
        DuplicateEmail { email: String } => "a user with email {email} already exists",
    }
}

/// Store of user identity records keyed by id and by unique email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account atomically with respect to email uniqueness.
    ///
    /// Returns [`UserPersistenceError::DuplicateEmail`] when the email is
    /// already registered; no partial record is written in that case.
    async fn create(&self, account: &UserAccount) -> Result<User, UserPersistenceError>;

    /// Fetch the full account, digest included, for a login email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Fetch the public projection for an identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Every user, oldest first.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;
}
