//! Classification of Diesel failures shared by every repository.
//!
//! Repositories translate a [`DieselFailure`] into their own port error so
//! constraint violations keep their meaning across the boundary.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, WorkspacePersistenceError};

use super::pool::PoolError;

/// A Diesel error reduced to what the ports can express.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    Connection(&'static str),
    Query(&'static str),
    UniqueViolation { constraint: Option<String> },
    ForeignKeyViolation { constraint: Option<String> },
}

pub(crate) fn classify_diesel_error(error: DieselError) -> DieselFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => DieselFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DieselFailure::UniqueViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            DieselFailure::ForeignKeyViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        _ => DieselFailure::Query("database error"),
    }
}

/// Payload field a foreign key constraint such as `tasks_project_id_fkey`
/// guards.
fn referenced_field(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(name) if name.contains("project_id") => "project",
        Some(name) if name.contains("team_id") => "team",
        _ => "record",
    }
}

/// Payload field a unique constraint such as `projects_name_key` guards.
fn unique_field(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(name) if name.ends_with("_name_key") => "name",
        Some(name) if name.ends_with("_email_key") => "email",
        _ => "record",
    }
}

pub(crate) fn map_user_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.into_message())
}

/// Map a failed user insert or read. `email` names the value a unique
/// violation refers to.
pub(crate) fn map_user_diesel_error(error: DieselError, email: &str) -> UserPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::UniqueViolation { .. } => UserPersistenceError::duplicate_email(email),
        DieselFailure::ForeignKeyViolation { .. } => {
            UserPersistenceError::query("foreign key violation")
        }
        DieselFailure::Query(message) => UserPersistenceError::query(message),
    }
}

pub(crate) fn map_workspace_pool_error(error: PoolError) -> WorkspacePersistenceError {
    WorkspacePersistenceError::connection(error.into_message())
}

pub(crate) fn map_workspace_diesel_error(error: DieselError) -> WorkspacePersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => WorkspacePersistenceError::connection(message),
        DieselFailure::Query(message) => WorkspacePersistenceError::query(message),
        DieselFailure::UniqueViolation { constraint } => {
            WorkspacePersistenceError::duplicate(unique_field(constraint.as_deref()))
        }
        DieselFailure::ForeignKeyViolation { constraint } => {
            WorkspacePersistenceError::invalid_reference(referenced_field(constraint.as_deref()))
        }
    }
}
