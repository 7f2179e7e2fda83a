//! Account handlers.
//!
//! ```text
//! POST /signup {"name":"Ada","email":"ada@x.com","password":"secret123"}
//! POST /login  {"email":"ada@x.com","password":"secret123"}
//! GET  /me     (bearer)
//! GET  /users  (bearer)
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Error, LoginCredentials, LoginValidationError, SignupDetails, SignupValidationError, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

/// Acknowledgement returned by signup.
pub const SIGNUP_MESSAGE: &str = "Signup successful! Please login.";
/// Acknowledgement returned by login.
pub const LOGIN_MESSAGE: &str = "Login successful";

/// Body of `POST /signup`. Missing fields read as empty.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct SignupRequest {
    #[schema(example = "Ada")]
    pub name: String,
    #[schema(example = "ada@x.com")]
    pub email: String,
    #[schema(example = "secret123")]
    pub password: String,
}

/// Body of `POST /login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    #[schema(example = "ada@x.com")]
    pub email: String,
    #[schema(example = "secret123")]
    pub password: String,
}

/// Plain acknowledgement body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of a successful login.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[schema(example = "Login successful")]
    pub message: String,
    /// HS256 bearer token for the `Authorization` header.
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

fn map_signup_validation_error(err: SignupValidationError) -> Error {
    let field = err.field();
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": field, "code": format!("empty_{field}") }))
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    let field = err.field();
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": field, "code": format!("empty_{field}") }))
}

/// Register an account. No token is issued; the caller logs in separately.
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, description = "Missing field or email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    let details = SignupDetails::try_from_parts(&request.name, &request.email, &request.password)
        .map_err(map_signup_validation_error)?;
    state.signup.signup(&details).await?;
    Ok(HttpResponse::Created().json(MessageResponse {
        message: SIGNUP_MESSAGE.to_owned(),
    }))
}

/// Exchange credentials for a 7-day bearer token.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Missing field", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 404, description = "No account for this email", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let request = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&request.email, &request.password)
        .map_err(map_login_validation_error)?;
    let session = state.login.login(&credentials).await?;
    Ok(web::Json(LoginResponse {
        message: LOGIN_MESSAGE.to_owned(),
        token: session.token.token.into_inner(),
        expires_at: session.token.expires_at,
        user: session.user,
    }))
}

/// Live record of the token's subject.
#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Authentication required", body = Error),
        (status = 404, description = "Subject no longer exists", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<User>> {
    let record = state.profile.current_user(user.user_id()).await?;
    Ok(web::Json(record))
}

/// Every registered user.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [User]),
        (status = 401, description = "Authentication required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users))
}

#[cfg(test)]
mod tests;
