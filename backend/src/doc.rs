//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the request and response bodies
//! they exchange, and the bearer security scheme the session gate enforces.
//! The document backs Swagger UI in debug builds and is exported via
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    Error, ErrorCode, Project, ProjectStatus, Tag, Task, TaskStatus, Team, User,
};
use crate::inbound::http::projects::CreateProjectRequest;
use crate::inbound::http::tags::CreateTagRequest;
use crate::inbound::http::tasks::CreateTaskRequest;
use crate::inbound::http::teams::CreateTeamRequest;
use crate::inbound::http::users::{LoginRequest, LoginResponse, MessageResponse, SignupRequest};

/// Name of the bearer scheme referenced by protected operations.
pub const BEARER_SCHEME: &str = "BearerToken";

/// Enrich the generated document with the bearer security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token returned by POST /login, valid for 7 days."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Workasana API",
        description = "Accounts, bearer sessions and the project, team, tag and task collections."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::health::root,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::users::signup,
        crate::inbound::http::users::login,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::projects::list_projects,
        crate::inbound::http::projects::create_project,
        crate::inbound::http::teams::list_teams,
        crate::inbound::http::teams::create_team,
        crate::inbound::http::tags::list_tags,
        crate::inbound::http::tags::create_tag,
        crate::inbound::http::tasks::list_tasks,
        crate::inbound::http::tasks::create_task,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        SignupRequest,
        LoginRequest,
        LoginResponse,
        MessageResponse,
        Project,
        ProjectStatus,
        CreateProjectRequest,
        Team,
        CreateTeamRequest,
        Tag,
        CreateTagRequest,
        Task,
        TaskStatus,
        CreateTaskRequest,
    )),
    tags(
        (name = "users", description = "Signup, login and user lookups"),
        (name = "projects", description = "Project records"),
        (name = "teams", description = "Team records"),
        (name = "tags", description = "Tag records"),
        (name = "tasks", description = "Task records with hydrated owners"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    #[rstest]
    #[case("/")]
    #[case("/signup")]
    #[case("/login")]
    #[case("/me")]
    #[case("/users")]
    #[case("/projects")]
    #[case("/teams")]
    #[case("/tags")]
    #[case("/tasks")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    }

    #[rstest]
    fn user_schema_never_exposes_password_fields() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        let Some(RefOr::T(Schema::Object(user))) = components.schemas.get("User") else {
            panic!("User schema should be an object");
        };
        assert!(user.properties.contains_key("email"));
        assert!(!user.properties.contains_key("password"));
        assert!(!user.properties.contains_key("passwordHash"));
    }
}
