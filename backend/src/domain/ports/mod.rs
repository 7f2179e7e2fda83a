//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`UserRepository`, `PasswordHasher`, `TokenIssuer`,
//! `TokenVerifier` and the workspace repositories) are implemented by
//! outbound adapters. Driving ports (`SignupService`, `LoginService`,
//! `UserProfileQuery`, `UsersQuery`) are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod password_hasher;
mod session_tokens;
mod signup_service;
mod user_profile_query;
mod user_repository;
mod users_query;
mod workspace_repository;

pub use login_service::{LoginService, LoginSession};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use session_tokens::{MockTokenIssuer, MockTokenVerifier};
pub use session_tokens::{TokenIssueError, TokenIssuer, TokenVerifier};
pub use signup_service::SignupService;
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
pub use users_query::UsersQuery;
#[cfg(test)]
pub use workspace_repository::{
    MockProjectRepository, MockTagRepository, MockTaskRepository, MockTeamRepository,
};
pub use workspace_repository::{
    ProjectRepository, TagRepository, TaskRepository, TeamRepository, WorkspacePersistenceError,
};
