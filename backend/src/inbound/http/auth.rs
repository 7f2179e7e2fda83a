//! Bearer-token gate for protected routes.
//!
//! [`RequireSession`] wraps a scope and runs the domain [`SessionGate`] on
//! every request it sees. Admitted requests carry an [`AuthenticatedUser`]
//! in their extensions; rejected ones never reach a handler and all receive
//! the same `401 {"code":"unauthorized","message":"authentication required"}`
//! whatever the internal reason.

use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{FromRequest, HttpMessage, HttpRequest, ResponseError};
use futures_util::future::{LocalBoxFuture, Ready, ready};

use crate::domain::{Error, SessionGate, TokenRejection, UserId};

/// Message of every gate rejection.
pub const AUTHENTICATION_REQUIRED: &str = "authentication required";

/// Subject admitted by the gate for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(UserId);

impl AuthenticatedUser {
    pub fn user_id(&self) -> &UserId {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedUser>()
                .cloned()
                .ok_or_else(|| Error::unauthorized(AUTHENTICATION_REQUIRED)),
        )
    }
}

/// Middleware factory applying a [`SessionGate`].
#[derive(Clone)]
pub struct RequireSession {
    gate: SessionGate,
}

impl RequireSession {
    pub fn new(gate: SessionGate) -> Self {
        Self { gate }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequireSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware {
            service,
            gate: self.gate.clone(),
        }))
    }
}

/// Service produced by [`RequireSession`].
pub struct RequireSessionMiddleware<S> {
    service: S,
    gate: SessionGate,
}

impl<S> RequireSessionMiddleware<S> {
    fn admit(&self, req: &ServiceRequest) -> Result<UserId, TokenRejection> {
        match req.headers().get(header::AUTHORIZATION) {
            None => self.gate.admit(None),
            Some(value) => match value.to_str() {
                Ok(raw) => self.gate.admit(Some(raw)),
                Err(_) => Err(TokenRejection::Malformed),
            },
        }
    }
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match self.admit(&req) {
            Ok(user_id) => {
                req.extensions_mut().insert(AuthenticatedUser(user_id));
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(_) => {
                let response = Error::unauthorized(AUTHENTICATION_REQUIRED).error_response();
                Box::pin(ready(Ok(req.into_response(response).map_into_right_body())))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Gate behaviour at the HTTP boundary.
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::MockTokenVerifier;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;
    use serde_json::Value;

    const SUBJECT: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn gate() -> SessionGate {
        let mut verifier = MockTokenVerifier::new();
        verifier.expect_verify().returning(|token| match token.as_str() {
            "good" => UserId::new(SUBJECT).map_err(|_| TokenRejection::Malformed),
            "stale" => Err(TokenRejection::Expired),
            _ => Err(TokenRejection::BadSignature),
        });
        SessionGate::new(Arc::new(verifier))
    }

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.user_id().to_string())
    }

    async fn call(authorization: Option<&str>) -> ServiceResponse {
        let app = test::init_service(
            App::new().service(
                web::scope("")
                    .wrap(RequireSession::new(gate()))
                    .route("/whoami", web::get().to(whoami)),
            ),
        )
        .await;
        let mut req = test::TestRequest::get().uri("/whoami");
        if let Some(value) = authorization {
            req = req.insert_header((header::AUTHORIZATION, value));
        }
        test::call_service(&app, req.to_request()).await
    }

    #[actix_web::test]
    async fn admitted_subject_reaches_handler() {
        let res = call(Some("Bearer good")).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        assert_eq!(body.as_ref(), SUBJECT.as_bytes());
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("Bearer"))]
    #[case(Some("Basic Zm9vOmJhcg=="))]
    #[case(Some("Bearer stale"))]
    #[case(Some("Bearer forged"))]
    #[actix_web::test]
    async fn every_rejection_looks_the_same(#[case] authorization: Option<&str>) {
        let res = call(authorization).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body.get("code").and_then(Value::as_str), Some("unauthorized"));
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some(AUTHENTICATION_REQUIRED)
        );
        assert!(body.get("details").is_none());
    }

    #[actix_web::test]
    async fn extractor_without_gate_is_unauthorised() {
        let app = test::init_service(App::new().route("/whoami", web::get().to(whoami))).await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request())
            .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
