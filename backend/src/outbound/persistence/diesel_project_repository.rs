//! PostgreSQL-backed `ProjectRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{ProjectRepository, WorkspacePersistenceError};
use crate::domain::{NewProject, Project, ProjectId, ProjectStatus};

use super::diesel_error_mapping::{map_workspace_diesel_error, map_workspace_pool_error};
use super::models::{NewProjectRow, ProjectRow};
use super::pool::DbPool;
use super::schema::projects;

#[derive(Clone)]
pub struct DieselProjectRepository {
    pool: DbPool,
}

impl DieselProjectRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_project(row: ProjectRow) -> Project {
    let status = ProjectStatus::from_label(&row.status).unwrap_or_else(|| {
        warn!(value = %row.status, project_id = %row.id, "unrecognised project status, defaulting to Planned");
        ProjectStatus::default()
    });
    Project {
        id: ProjectId::from_uuid(row.id),
        name: row.name,
        description: row.description,
        status,
        created_at: row.created_at,
    }
}

#[async_trait]
impl ProjectRepository for DieselProjectRepository {
    async fn list(&self) -> Result<Vec<Project>, WorkspacePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_workspace_pool_error)?;
        let rows: Vec<ProjectRow> = projects::table
            .order((projects::created_at.asc(), projects::id.asc()))
            .select(ProjectRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_workspace_diesel_error)?;
        Ok(rows.into_iter().map(row_to_project).collect())
    }

    async fn create(&self, project: &NewProject) -> Result<Project, WorkspacePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_workspace_pool_error)?;
        let row = NewProjectRow {
            id: *ProjectId::random().as_uuid(),
            name: &project.name,
            description: project.description.as_deref(),
            status: project.status.as_str(),
        };
        let inserted: ProjectRow = diesel::insert_into(projects::table)
            .values(&row)
            .returning(ProjectRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_workspace_diesel_error)?;
        Ok(row_to_project(inserted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    #[case("In Progress", ProjectStatus::InProgress)]
    #[case("Archived", ProjectStatus::Planned)]
    fn stored_status_is_parsed_or_defaulted(#[case] label: &str, #[case] expected: ProjectStatus) {
        let project = row_to_project(ProjectRow {
            id: Uuid::new_v4(),
            name: "Website".to_owned(),
            description: None,
            status: label.to_owned(),
            created_at: Utc::now(),
        });
        assert_eq!(project.status, expected);
    }
}
