//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see port trait
//! objects, so tests can swap any collaborator without I/O.

use std::sync::Arc;

use crate::domain::AccountService;
use crate::domain::ports::{
    LoginService, ProjectRepository, SignupService, TagRepository, TaskRepository,
    TeamRepository, UserProfileQuery, UsersQuery,
};

/// Account use-cases used by the user handlers.
#[derive(Clone)]
pub struct AccountPorts {
    pub signup: Arc<dyn SignupService>,
    pub login: Arc<dyn LoginService>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub users: Arc<dyn UsersQuery>,
}

impl From<AccountService> for AccountPorts {
    fn from(service: AccountService) -> Self {
        let service = Arc::new(service);
        Self {
            signup: service.clone(),
            login: service.clone(),
            profile: service.clone(),
            users: service,
        }
    }
}

/// Workspace repositories used by the resource handlers.
#[derive(Clone)]
pub struct WorkspacePorts {
    pub projects: Arc<dyn ProjectRepository>,
    pub teams: Arc<dyn TeamRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub tasks: Arc<dyn TaskRepository>,
}

impl WorkspacePorts {
    /// Back every collection with one adapter.
    pub fn shared<R>(repository: R) -> Self
    where
        R: ProjectRepository + TeamRepository + TagRepository + TaskRepository + 'static,
    {
        let repository = Arc::new(repository);
        Self {
            projects: repository.clone(),
            teams: repository.clone(),
            tags: repository.clone(),
            tasks: repository,
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub signup: Arc<dyn SignupService>,
    pub login: Arc<dyn LoginService>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub users: Arc<dyn UsersQuery>,
    pub projects: Arc<dyn ProjectRepository>,
    pub teams: Arc<dyn TeamRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub tasks: Arc<dyn TaskRepository>,
}

impl HttpState {
    pub fn new(accounts: AccountPorts, workspace: WorkspacePorts) -> Self {
        let AccountPorts {
            signup,
            login,
            profile,
            users,
        } = accounts;
        let WorkspacePorts {
            projects,
            teams,
            tags,
            tasks,
        } = workspace;
        Self {
            signup,
            login,
            profile,
            users,
            projects,
            teams,
            tags,
            tasks,
        }
    }
}
