//! Project, team, tag and task records.
//!
//! These collections are plain CRUD: creation payloads are checked for the
//! presence of required fields and the store enforces uniqueness and
//! references.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{User, UserId};

macro_rules! define_record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        #[serde(transparent)]
        #[schema(value_type = String, format = Uuid)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a new random identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_record_id!(
    /// Identifier of a project.
    ProjectId
);
define_record_id!(
    /// Identifier of a team.
    TeamId
);
define_record_id!(
    /// Identifier of a tag.
    TagId
);
define_record_id!(
    /// Identifier of a task.
    TaskId
);

/// Shape failures for creation payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkspaceValidationError {
    /// A required text field was missing or blank.
    #[error("{field} is required")]
    MissingField { field: &'static str },
    /// A task must name at least one owner.
    #[error("owners must contain at least one user")]
    NoOwners,
    /// A numeric field exceeds what the store can hold.
    #[error("{field} is out of range")]
    OutOfRange { field: &'static str },
}

impl WorkspaceValidationError {
    /// Name of the offending payload field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } | Self::OutOfRange { field } => field,
            Self::NoOwners => "owners",
        }
    }
}

fn required_text(value: &str, field: &'static str) -> Result<String, WorkspaceValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(WorkspaceValidationError::MissingField { field });
    }
    Ok(trimmed.to_owned())
}

fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

/// Lifecycle of a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ProjectStatus {
    #[default]
    #[serde(rename = "Planned")]
    Planned,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl ProjectStatus {
    /// Stored and serialised label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "Planned",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    /// Parse a stored label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Planned" => Some(Self::Planned),
            "In Progress" => Some(Self::InProgress),
            "Completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Lifecycle of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
    #[serde(rename = "Blocked")]
    Blocked,
}

impl TaskStatus {
    /// Stored and serialised label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Blocked => "Blocked",
        }
    }

    /// Parse a stored label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "To Do" => Some(Self::ToDo),
            "In Progress" => Some(Self::InProgress),
            "Completed" => Some(Self::Completed),
            "Blocked" => Some(Self::Blocked),
            _ => None,
        }
    }
}

/// A project record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    #[schema(example = "Website redesign")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
}

/// Validated project creation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
}

impl NewProject {
    /// Validate raw project fields; `status` defaults to `Planned`.
    pub fn try_new(
        name: &str,
        description: Option<&str>,
        status: Option<ProjectStatus>,
    ) -> Result<Self, WorkspaceValidationError> {
        Ok(Self {
            name: required_text(name, "name")?,
            description: optional_text(description),
            status: status.unwrap_or_default(),
        })
    }
}

/// A team record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    #[schema(example = "Design")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated team creation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeam {
    pub name: String,
    pub description: Option<String>,
}

impl NewTeam {
    pub fn try_new(name: &str, description: Option<&str>) -> Result<Self, WorkspaceValidationError> {
        Ok(Self {
            name: required_text(name, "name")?,
            description: optional_text(description),
        })
    }
}

/// A tag record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: TagId,
    #[schema(example = "Urgent")]
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Validated tag creation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub name: String,
}

impl NewTag {
    pub fn try_new(name: &str) -> Result<Self, WorkspaceValidationError> {
        Ok(Self {
            name: required_text(name, "name")?,
        })
    }
}

/// A task record with owners hydrated to their public projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    #[schema(example = "Draft wireframes")]
    pub name: String,
    pub project: ProjectId,
    pub team: TeamId,
    pub owners: Vec<User>,
    pub tags: Vec<String>,
    /// Estimated effort in days.
    pub time_to_complete: u32,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw task fields before validation.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft<'a> {
    pub name: &'a str,
    pub project: Option<ProjectId>,
    pub team: Option<TeamId>,
    pub owners: Vec<UserId>,
    pub tags: Vec<String>,
    pub time_to_complete: Option<u32>,
    pub status: Option<TaskStatus>,
}

/// Validated task creation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub name: String,
    pub project: ProjectId,
    pub team: TeamId,
    pub owners: Vec<UserId>,
    pub tags: Vec<String>,
    pub time_to_complete: u32,
    pub status: TaskStatus,
}

impl NewTask {
    /// Validate a task draft.
    ///
    /// Owners are de-duplicated preserving first occurrence; blank tags are
    /// dropped.
    pub fn try_from_draft(draft: TaskDraft<'_>) -> Result<Self, WorkspaceValidationError> {
        let name = required_text(draft.name, "name")?;
        let project = draft
            .project
            .ok_or(WorkspaceValidationError::MissingField { field: "project" })?;
        let team = draft
            .team
            .ok_or(WorkspaceValidationError::MissingField { field: "team" })?;
        let time_to_complete = draft
            .time_to_complete
            .ok_or(WorkspaceValidationError::MissingField {
                field: "timeToComplete",
            })?;
        if i32::try_from(time_to_complete).is_err() {
            return Err(WorkspaceValidationError::OutOfRange {
                field: "timeToComplete",
            });
        }

        let mut owners: Vec<UserId> = Vec::with_capacity(draft.owners.len());
        for owner in draft.owners {
            if !owners.contains(&owner) {
                owners.push(owner);
            }
        }
        if owners.is_empty() {
            return Err(WorkspaceValidationError::NoOwners);
        }

        let tags = draft
            .tags
            .iter()
            .filter_map(|tag| optional_text(Some(tag)))
            .collect();

        Ok(Self {
            name,
            project,
            team,
            owners,
            tags,
            time_to_complete,
            status: draft.status.unwrap_or_default(),
        })
    }
}
