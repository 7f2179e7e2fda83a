//! Ports for the project, team, tag and task collections.
//!
//! These resources carry no business rules beyond shape validation, so
//! inbound adapters talk to the repositories directly.

use async_trait::async_trait;

use crate::domain::{NewProject, NewTag, NewTask, NewTeam, Project, Tag, Task, Team};

use super::define_port_error;

define_port_error! {
    /// Persistence errors shared by the workspace repositories.
    pub enum WorkspacePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "workspace repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "workspace repository query failed: {message}",
        /// A unique field already holds this value.
        Duplicate { field: String } => "a record with this {field} already exists",
        /// A referenced record does not exist.
        InvalidReference { field: String } => "{field} references a record that does not exist",
    }
}

/// Project collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Every project, oldest first.
    async fn list(&self) -> Result<Vec<Project>, WorkspacePersistenceError>;

    /// Insert a project; names are unique.
    async fn create(&self, project: &NewProject) -> Result<Project, WorkspacePersistenceError>;
}

/// Team collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Every team, oldest first.
    async fn list(&self) -> Result<Vec<Team>, WorkspacePersistenceError>;

    /// Insert a team; names are unique.
    async fn create(&self, team: &NewTeam) -> Result<Team, WorkspacePersistenceError>;
}

/// Tag collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Every tag, oldest first.
    async fn list(&self) -> Result<Vec<Tag>, WorkspacePersistenceError>;

    /// Insert a tag; names are unique.
    async fn create(&self, tag: &NewTag) -> Result<Tag, WorkspacePersistenceError>;
}

/// Task collection.
///
/// Tasks are returned with their owners hydrated to `{id, name, email}`, on
/// listing and straight after creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Every task, oldest first, owners hydrated.
    async fn list(&self) -> Result<Vec<Task>, WorkspacePersistenceError>;

    /// Insert a task after checking its project, team and owners exist, then
    /// read it back with owners hydrated.
    async fn create(&self, task: &NewTask) -> Result<Task, WorkspacePersistenceError>;
}
