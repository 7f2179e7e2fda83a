//! Signup, login and user lookup use-cases.
//!
//! `AccountService` implements the account driving ports on top of the
//! credential store, password hasher and token issuer it is constructed with.
//! Argon2 work runs on Tokio's blocking pool so request workers stay free.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};
use zeroize::Zeroizing;

use super::ports::{
    LoginService, LoginSession, PasswordHasher, SignupService, TokenIssuer, UserPersistenceError,
    UserProfileQuery, UserRepository, UsersQuery,
};
use super::{Error, LoginCredentials, SignupDetails, TraceId, User, UserAccount, UserId};

/// Message returned when signup hits an existing email.
pub const USER_EXISTS_MESSAGE: &str = "User already exists";
/// Message returned when no account matches a login email or session subject.
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found";
/// Message returned when the password does not match.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

/// Account use-cases backed by explicit collaborators.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    let kind = error.kind();
    match error {
        UserPersistenceError::DuplicateEmail { .. } => Error::conflict(USER_EXISTS_MESSAGE),
        UserPersistenceError::Connection { message } | UserPersistenceError::Query { message } => {
            error!(kind, "user repository failure");
            Error::internal(message)
        }
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T, Error>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let trace_id = TraceId::current();
    tokio::task::spawn_blocking(move || TraceId::sync_scope(trace_id, task))
        .await
        .map_err(|err| {
            error!(error = %err, "password hashing task did not complete");
            Error::internal("password hashing task failed")
        })
}

#[async_trait]
impl SignupService for AccountService {
    async fn signup(&self, details: &SignupDetails) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_email(details.email())
            .await
            .map_err(map_persistence_error)?;
        if existing.is_some() {
            info!("signup rejected: email already registered");
            return Err(Error::conflict(USER_EXISTS_MESSAGE));
        }

        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(details.password().to_owned());
        let digest = run_blocking(move || hasher.hash(password.as_str()))
            .await?
            .map_err(|err| {
                error!(error = %err, "password hashing failed");
                Error::internal("password hashing failed")
            })?;

        let user = User::new(
            UserId::random(),
            details.name().clone(),
            details.email().clone(),
        );
        let created = self
            .users
            .create(&UserAccount::new(user, digest))
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %created.id(), "user signed up");
        Ok(created)
    }
}

#[async_trait]
impl LoginService for AccountService {
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginSession, Error> {
        let account = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND_MESSAGE))?;

        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(credentials.password().to_owned());
        let digest = account.password_digest().clone();
        let matches = run_blocking(move || hasher.verify(password.as_str(), &digest)).await?;
        if !matches {
            info!(user_id = %account.user().id(), "login rejected: password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        }

        let user = account.into_user();
        let token = self.tokens.issue(user.id()).map_err(|err| {
            error!(error = %err, "session token issuance failed");
            Error::internal("session token issuance failed")
        })?;
        info!(user_id = %user.id(), expires_at = %token.expires_at, "session token issued");
        Ok(LoginSession { token, user })
    }
}

#[async_trait]
impl UserProfileQuery for AccountService {
    async fn current_user(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND_MESSAGE))
    }
}

#[async_trait]
impl UsersQuery for AccountService {
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users.list().await.map_err(map_persistence_error)
    }
}
