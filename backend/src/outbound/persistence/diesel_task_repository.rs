//! PostgreSQL-backed `TaskRepository`.
//!
//! Tasks store owner ids in a `uuid[]` column. Owners are checked against
//! `users` before insert and hydrated to their public projection on every
//! read; an owner removed after the task was written is dropped from the
//! hydrated list.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{TaskRepository, WorkspacePersistenceError};
use crate::domain::{NewTask, ProjectId, Task, TaskId, TaskStatus, TeamId, User};

use super::diesel_error_mapping::{map_workspace_diesel_error, map_workspace_pool_error};
use super::diesel_user_repository::row_to_user;
use super::models::{NewTaskRow, TaskRow, UserRow};
use super::pool::DbPool;
use super::schema::{tasks, users};

#[derive(Clone)]
pub struct DieselTaskRepository {
    pool: DbPool,
}

impl DieselTaskRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

async fn load_owners(
    conn: &mut AsyncPgConnection,
    ids: &[Uuid],
) -> Result<HashMap<Uuid, User>, WorkspacePersistenceError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows: Vec<UserRow> = users::table
        .filter(users::id.eq_any(ids))
        .select(UserRow::as_select())
        .load(conn)
        .await
        .map_err(map_workspace_diesel_error)?;

    rows.into_iter()
        .map(|row| {
            let id = row.id;
            row_to_user(row)
                .map(|user| (id, user))
                .map_err(|err| WorkspacePersistenceError::query(err.to_string()))
        })
        .collect()
}

fn row_to_task(row: TaskRow, owners: &HashMap<Uuid, User>) -> Task {
    let status = TaskStatus::from_label(&row.status).unwrap_or_else(|| {
        warn!(value = %row.status, task_id = %row.id, "unrecognised task status, defaulting to To Do");
        TaskStatus::default()
    });
    let time_to_complete = u32::try_from(row.time_to_complete).unwrap_or_else(|_| {
        warn!(value = row.time_to_complete, task_id = %row.id, "negative timeToComplete stored");
        0
    });
    Task {
        id: TaskId::from_uuid(row.id),
        name: row.name,
        project: ProjectId::from_uuid(row.project_id),
        team: TeamId::from_uuid(row.team_id),
        owners: row
            .owner_ids
            .iter()
            .filter_map(|id| owners.get(id).cloned())
            .collect(),
        tags: row.tags,
        time_to_complete,
        status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

#[async_trait]
impl TaskRepository for DieselTaskRepository {
    async fn list(&self) -> Result<Vec<Task>, WorkspacePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_workspace_pool_error)?;
        let rows: Vec<TaskRow> = tasks::table
            .order((tasks::created_at.asc(), tasks::id.asc()))
            .select(TaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_workspace_diesel_error)?;

        let mut owner_ids: Vec<Uuid> = rows.iter().flat_map(|row| row.owner_ids.clone()).collect();
        owner_ids.sort_unstable();
        owner_ids.dedup();
        let owners = load_owners(&mut conn, &owner_ids).await?;

        Ok(rows.into_iter().map(|row| row_to_task(row, &owners)).collect())
    }

    async fn create(&self, task: &NewTask) -> Result<Task, WorkspacePersistenceError> {
        let time_to_complete = i32::try_from(task.time_to_complete)
            .map_err(|_| WorkspacePersistenceError::query("timeToComplete out of range"))?;
        let owner_ids: Vec<Uuid> = task.owners.iter().map(|id| *id.as_uuid()).collect();

        let mut conn = self.pool.get().await.map_err(map_workspace_pool_error)?;
        let owners = load_owners(&mut conn, &owner_ids).await?;
        if owners.len() != owner_ids.len() {
            return Err(WorkspacePersistenceError::invalid_reference("owners"));
        }

        let row = NewTaskRow {
            id: *TaskId::random().as_uuid(),
            name: &task.name,
            project_id: *task.project.as_uuid(),
            team_id: *task.team.as_uuid(),
            owner_ids: &owner_ids,
            tags: &task.tags,
            time_to_complete,
            status: task.status.as_str(),
        };
        let inserted: TaskRow = diesel::insert_into(tasks::table)
            .values(&row)
            .returning(TaskRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_workspace_diesel_error)?;
        Ok(row_to_task(inserted, &owners))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn owner(id: Uuid, name: &str) -> User {
        User::try_from_strings(id.to_string(), name, format!("{name}@x.com")).expect("valid user")
    }

    fn task_row(owner_ids: Vec<Uuid>) -> TaskRow {
        let now = Utc::now();
        TaskRow {
            id: Uuid::new_v4(),
            name: "Draft wireframes".to_owned(),
            project_id: Uuid::new_v4(),
            team_id: Uuid::new_v4(),
            owner_ids,
            tags: vec!["design".to_owned()],
            time_to_complete: 3,
            status: "Blocked".to_owned(),
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn hydration_keeps_stored_owner_order() {
        let (first, second) = (Uuid::new_v4(), Uuid::new_v4());
        let owners = HashMap::from([(first, owner(first, "ada")), (second, owner(second, "bob"))]);

        let task = row_to_task(task_row(vec![second, first]), &owners);

        let names: Vec<&str> = task.owners.iter().map(|user| user.name().as_ref()).collect();
        assert_eq!(names, vec!["bob", "ada"]);
        assert_eq!(task.status, TaskStatus::Blocked);
        assert_eq!(task.time_to_complete, 3);
    }

    #[rstest]
    fn vanished_owners_are_dropped() {
        let kept = Uuid::new_v4();
        let owners = HashMap::from([(kept, owner(kept, "ada"))]);

        let task = row_to_task(task_row(vec![kept, Uuid::new_v4()]), &owners);

        assert_eq!(task.owners.len(), 1);
    }
}
