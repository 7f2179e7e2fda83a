//! Team collection handlers.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, NewTeam, Team};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{map_workspace_persistence_error, map_workspace_validation_error};
use crate::inbound::http::state::HttpState;

/// Body of `POST /teams`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct CreateTeamRequest {
    #[schema(example = "Design")]
    pub name: String,
    pub description: Option<String>,
}

#[utoipa::path(
    get,
    path = "/teams",
    responses(
        (status = 200, description = "Teams", body = [Team]),
        (status = 401, description = "Authentication required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["teams"],
    operation_id = "listTeams"
)]
#[get("/teams")]
pub async fn list_teams(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Team>>> {
    let teams = state
        .teams
        .list()
        .await
        .map_err(map_workspace_persistence_error)?;
    Ok(web::Json(teams))
}

#[utoipa::path(
    post,
    path = "/teams",
    request_body = CreateTeamRequest,
    responses(
        (status = 200, description = "Created team", body = Team),
        (status = 400, description = "Missing name or duplicate team", body = Error),
        (status = 401, description = "Authentication required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["teams"],
    operation_id = "createTeam"
)]
#[post("/teams")]
pub async fn create_team(
    state: web::Data<HttpState>,
    payload: web::Json<CreateTeamRequest>,
) -> ApiResult<web::Json<Team>> {
    let request = payload.into_inner();
    let team = NewTeam::try_new(&request.name, request.description.as_deref())
        .map_err(map_workspace_validation_error)?;
    let created = state
        .teams
        .create(&team)
        .await
        .map_err(map_workspace_persistence_error)?;
    Ok(web::Json(created))
}
