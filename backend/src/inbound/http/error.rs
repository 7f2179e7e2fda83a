//! HTTP mapping for domain errors.
//!
//! The domain `Error` stays transport-agnostic; this module gives it a status
//! code and a JSON body, and converts the adapter-level failures (payload
//! parsing, workspace persistence) into it.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::{debug, error};

use crate::domain::ports::WorkspacePersistenceError;
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER, WorkspaceValidationError};

/// Result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::Conflict => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(message = self.message(), trace_id = ?self.trace_id(), "request failed");
        }
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

/// `JsonConfig` error handler: unreadable bodies become `invalid_request`.
pub fn json_payload_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    Error::invalid_request("request body must be valid JSON")
        .with_details(json!({ "reason": err.to_string() }))
        .into()
}

/// Map a creation payload shape failure.
pub fn map_workspace_validation_error(err: WorkspaceValidationError) -> Error {
    let field = err.field();
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

/// Map a workspace repository failure. Duplicates and dangling references
/// are client errors; storage failures are internal.
pub fn map_workspace_persistence_error(err: WorkspacePersistenceError) -> Error {
    match err {
        WorkspacePersistenceError::Duplicate { ref field } => {
            let details = json!({ "field": field });
            Error::conflict(err.to_string()).with_details(details)
        }
        WorkspacePersistenceError::InvalidReference { ref field } => {
            let details = json!({ "field": field });
            Error::invalid_request(err.to_string()).with_details(details)
        }
        WorkspacePersistenceError::Connection { ref message }
        | WorkspacePersistenceError::Query { ref message } => {
            error!(kind = err.kind(), "workspace repository failure");
            Error::internal(message.clone())
        }
    }
}
