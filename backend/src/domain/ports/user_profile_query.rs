//! Driving port for the authenticated user's own profile.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Fetch the live record for the gate-attached identity.
    async fn current_user(&self, user_id: &UserId) -> Result<User, Error>;
}
