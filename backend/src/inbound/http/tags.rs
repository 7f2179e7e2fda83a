//! Tag collection handlers.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, NewTag, Tag};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{map_workspace_persistence_error, map_workspace_validation_error};
use crate::inbound::http::state::HttpState;

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct CreateTagRequest {
    #[schema(example = "Urgent")]
    pub name: String,
}

#[utoipa::path(
    get,
    path = "/tags",
    responses(
        (status = 200, description = "Tags", body = [Tag]),
        (status = 401, description = "Authentication required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tags"],
    operation_id = "listTags"
)]
#[get("/tags")]
pub async fn list_tags(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Tag>>> {
    let tags = state
        .tags
        .list()
        .await
        .map_err(map_workspace_persistence_error)?;
    Ok(web::Json(tags))
}

#[utoipa::path(
    post,
    path = "/tags",
    request_body = CreateTagRequest,
    responses(
        (status = 200, description = "Created tag", body = Tag),
        (status = 400, description = "Missing name or duplicate tag", body = Error),
        (status = 401, description = "Authentication required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tags"],
    operation_id = "createTag"
)]
#[post("/tags")]
pub async fn create_tag(
    state: web::Data<HttpState>,
    payload: web::Json<CreateTagRequest>,
) -> ApiResult<web::Json<Tag>> {
    let tag = NewTag::try_new(&payload.name).map_err(map_workspace_validation_error)?;
    let created = state
        .tags
        .create(&tag)
        .await
        .map_err(map_workspace_persistence_error)?;
    Ok(web::Json(created))
}
