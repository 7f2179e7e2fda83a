//! Driving port for listing users.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Domain use-case port for the user directory.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every registered user, without password material.
    async fn list_users(&self) -> Result<Vec<User>, Error>;
}
