//! Tests for account handlers.

use super::*;
use crate::domain::ports::{
    MockPasswordHasher, MockTokenIssuer, MockUserRepository, UserPersistenceError,
};
use crate::domain::{AccountService, SessionGate};
use crate::inbound::http::routes;
use crate::inbound::http::state::{AccountPorts, WorkspacePorts};
use crate::outbound::memory::InMemoryStore;
use crate::test_support::TestBackend;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::Value;
use std::sync::Arc;

const NAME: &str = "Ada";
const EMAIL: &str = "ada@x.com";
const PASSWORD: &str = "secret123";

async fn app_for(
    state: HttpState,
    gate: SessionGate,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(|cfg| routes::configure(cfg, gate)),
    )
    .await
}

async fn backend_app(
    backend: &TestBackend,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    app_for(backend.state.clone(), backend.gate.clone()).await
}

fn signup_request(name: &str, email: &str, password: &str) -> actix_http::Request {
    actix_test::TestRequest::post()
        .uri("/signup")
        .set_json(SignupRequest {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        })
        .to_request()
}

fn login_request(email: &str, password: &str) -> actix_http::Request {
    actix_test::TestRequest::post()
        .uri("/login")
        .set_json(LoginRequest {
            email: email.into(),
            password: password.into(),
        })
        .to_request()
}

async fn body_json(response: ServiceResponse) -> Value {
    let body = actix_test::read_body(response).await;
    serde_json::from_slice(&body).expect("json body")
}

async fn signed_up_token(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
) -> String {
    let response = actix_test::call_service(app, signup_request(NAME, EMAIL, PASSWORD)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let response = actix_test::call_service(app, login_request(EMAIL, PASSWORD)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let value = body_json(response).await;
    value
        .get("token")
        .and_then(Value::as_str)
        .expect("token present")
        .to_owned()
}

#[actix_web::test]
async fn signup_acknowledges_without_token() {
    let backend = TestBackend::new();
    let app = backend_app(&backend).await;

    let response = actix_test::call_service(&app, signup_request(NAME, EMAIL, PASSWORD)).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let value = body_json(response).await;
    assert_eq!(value, serde_json::json!({ "message": SIGNUP_MESSAGE }));
}

#[actix_web::test]
async fn second_signup_with_same_email_is_rejected() {
    let backend = TestBackend::new();
    let app = backend_app(&backend).await;
    actix_test::call_service(&app, signup_request(NAME, EMAIL, PASSWORD)).await;

    let response = actix_test::call_service(&app, signup_request("Bob", EMAIL, "other")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value = body_json(response).await;
    assert_eq!(value.get("code").and_then(Value::as_str), Some("conflict"));
    assert_eq!(
        value.get("message").and_then(Value::as_str),
        Some("User already exists")
    );
}

#[rstest]
#[case("", EMAIL, PASSWORD, "name")]
#[case(NAME, "", PASSWORD, "email")]
#[case(NAME, EMAIL, "", "password")]
#[actix_web::test]
async fn signup_reports_missing_field(
    #[case] name: &str,
    #[case] email: &str,
    #[case] password: &str,
    #[case] field: &str,
) {
    let backend = TestBackend::new();
    let app = backend_app(&backend).await;

    let response = actix_test::call_service(&app, signup_request(name, email, password)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value = body_json(response).await;
    assert_eq!(
        value.get("code").and_then(Value::as_str),
        Some("invalid_request")
    );
    assert_eq!(
        value.pointer("/details/field").and_then(Value::as_str),
        Some(field)
    );
    let expected_code = format!("empty_{field}");
    assert_eq!(
        value.pointer("/details/code").and_then(Value::as_str),
        Some(expected_code.as_str())
    );
}

#[actix_web::test]
async fn malformed_body_uses_error_envelope() {
    let backend = TestBackend::new();
    let app = backend_app(&backend).await;
    let request = actix_test::TestRequest::post()
        .uri("/signup")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value = body_json(response).await;
    assert_eq!(
        value.get("code").and_then(Value::as_str),
        Some("invalid_request")
    );
}

#[actix_web::test]
async fn login_returns_token_expiry_and_public_user() {
    let backend = TestBackend::new();
    let app = backend_app(&backend).await;
    actix_test::call_service(&app, signup_request(NAME, EMAIL, PASSWORD)).await;

    let response = actix_test::call_service(&app, login_request(EMAIL, PASSWORD)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let value = body_json(response).await;
    assert_eq!(
        value.get("message").and_then(Value::as_str),
        Some(LOGIN_MESSAGE)
    );
    assert!(value.get("token").and_then(Value::as_str).is_some());
    assert!(value.get("expiresAt").and_then(Value::as_str).is_some());
    assert_eq!(value.pointer("/user/email").and_then(Value::as_str), Some(EMAIL));
    assert!(value.pointer("/user/password").is_none());
    assert!(value.pointer("/user/passwordHash").is_none());
}

#[rstest]
#[case("nobody@x.com", PASSWORD, StatusCode::NOT_FOUND)]
#[case(EMAIL, "wrong-password", StatusCode::UNAUTHORIZED)]
#[case("", PASSWORD, StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn login_failures_map_to_status(
    #[case] email: &str,
    #[case] password: &str,
    #[case] status: StatusCode,
) {
    let backend = TestBackend::new();
    let app = backend_app(&backend).await;
    actix_test::call_service(&app, signup_request(NAME, EMAIL, PASSWORD)).await;

    let response = actix_test::call_service(&app, login_request(email, password)).await;

    assert_eq!(response.status(), status);
    let value = body_json(response).await;
    assert!(value.get("token").is_none());
}

#[actix_web::test]
async fn me_returns_token_subject() {
    let backend = TestBackend::new();
    let app = backend_app(&backend).await;
    let token = signed_up_token(&app).await;

    let request = actix_test::TestRequest::get()
        .uri("/me")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let value = body_json(response).await;
    assert_eq!(value.get("name").and_then(Value::as_str), Some(NAME));
    assert_eq!(value.get("email").and_then(Value::as_str), Some(EMAIL));
}

#[rstest]
#[case("/me")]
#[case("/users")]
#[actix_web::test]
async fn account_reads_require_token(#[case] path: &str) {
    let backend = TestBackend::new();
    let app = backend_app(&backend).await;

    let request = actix_test::TestRequest::get().uri(path).to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn users_lists_public_projections() {
    let backend = TestBackend::new();
    let app = backend_app(&backend).await;
    let token = signed_up_token(&app).await;
    actix_test::call_service(&app, signup_request("Bob", "bob@x.com", "hunter22")).await;

    let request = actix_test::TestRequest::get()
        .uri("/users")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let value = body_json(response).await;
    let users = value.as_array().expect("array body");
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|user| user.get("passwordHash").is_none()));
}

#[actix_web::test]
async fn storage_failure_is_redacted() {
    let backend = TestBackend::new();
    let mut users = MockUserRepository::new();
    users
        .expect_list()
        .returning(|| Err(UserPersistenceError::connection("pg at 10.0.0.3 refused")));
    let accounts = AccountService::new(
        Arc::new(users),
        Arc::new(MockPasswordHasher::new()),
        Arc::new(MockTokenIssuer::new()),
    );
    let state = HttpState::new(
        AccountPorts::from(accounts),
        WorkspacePorts::shared(InMemoryStore::default()),
    );
    let seeding_app = backend_app(&backend).await;
    let token = signed_up_token(&seeding_app).await;
    let app = app_for(state, backend.gate.clone()).await;

    let request = actix_test::TestRequest::get()
        .uri("/users")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let value = body_json(response).await;
    assert_eq!(
        value.get("message").and_then(Value::as_str),
        Some("Internal server error")
    );
}
