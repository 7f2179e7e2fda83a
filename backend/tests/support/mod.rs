//! Shared helpers for HTTP-level integration tests.
//!
//! Integration tests compile as separate crates, so each suite pulls this in
//! with `mod support;` and uses the subset it needs.

#![allow(dead_code, reason = "each suite uses a different subset")]

use actix_http::Request;
use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};

use workasana::Trace;
use workasana::domain::TRACE_ID_HEADER;
use workasana::inbound::http::health::HealthState;
use workasana::inbound::http::routes;
use workasana::test_support::TestBackend;

pub const ADA_NAME: &str = "Ada";
pub const ADA_EMAIL: &str = "ada@x.com";
pub const ADA_PASSWORD: &str = "secret123";

pub type TestResponse = ServiceResponse<EitherBody<BoxBody>>;

/// In-process app wired like the server: CORS, tracing and the route table.
pub async fn init_app(
    backend: &TestBackend,
) -> impl Service<Request, Response = TestResponse, Error = actix_web::Error> {
    let gate = backend.gate.clone();
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(HealthState::new()))
            .app_data(web::Data::new(backend.state.clone()))
            .wrap(Trace)
            .wrap(routes::cors())
            .configure(|cfg| routes::configure(cfg, gate)),
    )
    .await
}

/// Status, trace header and JSON body (if any) of a response.
#[derive(Debug)]
pub struct Snapshot {
    pub status: u16,
    pub trace_id: Option<String>,
    pub body: Option<Value>,
}

impl Snapshot {
    pub fn body(&self) -> &Value {
        self.body.as_ref().expect("json body")
    }

    pub fn str_field(&self, pointer: &str) -> Option<&str> {
        self.body().pointer(pointer).and_then(Value::as_str)
    }
}

pub async fn send<S>(app: &S, request: Request) -> Snapshot
where
    S: Service<Request, Response = TestResponse, Error = actix_web::Error>,
{
    let response = actix_test::call_service(app, request).await;
    let status = response.status().as_u16();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned);
    let bytes = actix_test::read_body(response).await;
    let body = (!bytes.is_empty()).then(|| serde_json::from_slice(&bytes).expect("json body"));
    Snapshot {
        status,
        trace_id,
        body,
    }
}

pub fn post_json(path: &str, payload: &Value, token: Option<&str>) -> Request {
    let mut request = actix_test::TestRequest::post().uri(path).set_json(payload);
    if let Some(token) = token {
        request = request.insert_header((header::AUTHORIZATION, format!("Bearer {token}")));
    }
    request.to_request()
}

pub fn get(path: &str, token: Option<&str>) -> Request {
    let mut request = actix_test::TestRequest::get().uri(path);
    if let Some(token) = token {
        request = request.insert_header((header::AUTHORIZATION, format!("Bearer {token}")));
    }
    request.to_request()
}

pub fn get_with_authorization(path: &str, authorization: &str) -> Request {
    actix_test::TestRequest::get()
        .uri(path)
        .insert_header((header::AUTHORIZATION, authorization.to_owned()))
        .to_request()
}

pub async fn signup<S>(app: &S, name: &str, email: &str, password: &str) -> Snapshot
where
    S: Service<Request, Response = TestResponse, Error = actix_web::Error>,
{
    send(
        app,
        post_json(
            "/signup",
            &json!({ "name": name, "email": email, "password": password }),
            None,
        ),
    )
    .await
}

pub async fn login<S>(app: &S, email: &str, password: &str) -> Snapshot
where
    S: Service<Request, Response = TestResponse, Error = actix_web::Error>,
{
    send(
        app,
        post_json(
            "/login",
            &json!({ "email": email, "password": password }),
            None,
        ),
    )
    .await
}

/// Sign up and log in as Ada, returning the bearer token.
pub async fn ada_token<S>(app: &S) -> String
where
    S: Service<Request, Response = TestResponse, Error = actix_web::Error>,
{
    let created = signup(app, ADA_NAME, ADA_EMAIL, ADA_PASSWORD).await;
    assert_eq!(created.status, 201);
    let session = login(app, ADA_EMAIL, ADA_PASSWORD).await;
    assert_eq!(session.status, 200);
    session.str_field("/token").expect("token").to_owned()
}

/// Assert the uniform gate rejection.
pub fn assert_unauthenticated(snapshot: &Snapshot) {
    assert_eq!(snapshot.status, 401);
    assert_eq!(snapshot.str_field("/code"), Some("unauthorized"));
    assert_eq!(
        snapshot.str_field("/message"),
        Some("authentication required")
    );
}
