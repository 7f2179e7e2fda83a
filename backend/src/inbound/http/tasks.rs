//! Task collection handlers.
//!
//! Tasks reference a project, a team and one or more owners by id; responses
//! carry owners hydrated to `{id, name, email}`.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, NewTask, ProjectId, Task, TaskDraft, TaskStatus, TeamId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{map_workspace_persistence_error, map_workspace_validation_error};
use crate::inbound::http::state::HttpState;

/// Body of `POST /tasks`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[schema(example = "Draft wireframes")]
    pub name: String,
    pub project: Option<ProjectId>,
    pub team: Option<TeamId>,
    #[schema(value_type = Vec<String>)]
    pub owners: Vec<UserId>,
    pub tags: Vec<String>,
    /// Estimated effort in days.
    pub time_to_complete: Option<u32>,
    /// Defaults to `To Do`.
    pub status: Option<TaskStatus>,
}

#[utoipa::path(
    get,
    path = "/tasks",
    responses(
        (status = 200, description = "Tasks with owners hydrated", body = [Task]),
        (status = 401, description = "Authentication required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "listTasks"
)]
#[get("/tasks")]
pub async fn list_tasks(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Task>>> {
    let tasks = state
        .tasks
        .list()
        .await
        .map_err(map_workspace_persistence_error)?;
    Ok(web::Json(tasks))
}

#[utoipa::path(
    post,
    path = "/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 200, description = "Created task with owners hydrated", body = Task),
        (status = 400, description = "Missing field or unknown reference", body = Error),
        (status = 401, description = "Authentication required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "createTask"
)]
#[post("/tasks")]
pub async fn create_task(
    state: web::Data<HttpState>,
    payload: web::Json<CreateTaskRequest>,
) -> ApiResult<web::Json<Task>> {
    let request = payload.into_inner();
    let task = NewTask::try_from_draft(TaskDraft {
        name: &request.name,
        project: request.project,
        team: request.team,
        owners: request.owners,
        tags: request.tags,
        time_to_complete: request.time_to_complete,
        status: request.status,
    })
    .map_err(map_workspace_validation_error)?;
    let created = state
        .tasks
        .create(&task)
        .await
        .map_err(map_workspace_persistence_error)?;
    Ok(web::Json(created))
}
