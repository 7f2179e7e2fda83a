//! Project collection handlers.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, NewProject, Project, ProjectStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{map_workspace_persistence_error, map_workspace_validation_error};
use crate::inbound::http::state::HttpState;

/// Body of `POST /projects`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct CreateProjectRequest {
    #[schema(example = "Website redesign")]
    pub name: String,
    pub description: Option<String>,
    /// Defaults to `Planned`.
    pub status: Option<ProjectStatus>,
}

#[utoipa::path(
    get,
    path = "/projects",
    responses(
        (status = 200, description = "Projects", body = [Project]),
        (status = 401, description = "Authentication required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projects"],
    operation_id = "listProjects"
)]
#[get("/projects")]
pub async fn list_projects(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Project>>> {
    let projects = state
        .projects
        .list()
        .await
        .map_err(map_workspace_persistence_error)?;
    Ok(web::Json(projects))
}

#[utoipa::path(
    post,
    path = "/projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 200, description = "Created project", body = Project),
        (status = 400, description = "Missing name or duplicate project", body = Error),
        (status = 401, description = "Authentication required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projects"],
    operation_id = "createProject"
)]
#[post("/projects")]
pub async fn create_project(
    state: web::Data<HttpState>,
    payload: web::Json<CreateProjectRequest>,
) -> ApiResult<web::Json<Project>> {
    let request = payload.into_inner();
    let project = NewProject::try_new(&request.name, request.description.as_deref(), request.status)
        .map_err(map_workspace_validation_error)?;
    let created = state
        .projects
        .create(&project)
        .await
        .map_err(map_workspace_persistence_error)?;
    Ok(web::Json(created))
}
