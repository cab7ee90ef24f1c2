//! Domain errors as HTTP responses.
//!
//! Status follows the error code. Server-side failures are logged here with
//! their cause and reach the client only as [`INTERNAL_MESSAGE`]; the trace
//! identifier survives in both the body and the `trace-id` header.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result type returned by every handler.
pub type ApiResult<T> = Result<T, Error>;

/// Message clients see in place of an internal failure.
pub const INTERNAL_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Body sent to the client for `error`.
fn public_body(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    let body = Error::internal(INTERNAL_MESSAGE);
    match error.trace_id() {
        Some(id) => body.with_trace_id(id.to_owned()),
        None => body,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let trace_id = self.trace_id().unwrap_or("-");
        match self.code() {
            ErrorCode::InternalError => {
                error!(%trace_id, message = self.message(), "request failed");
            }
            ErrorCode::ServiceUnavailable => {
                warn!(%trace_id, message = self.message(), "backing service unavailable");
            }
            _ => {}
        }

        let mut response = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        response.json(public_body(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "framework error surfaced in a handler");
        Error::internal(INTERNAL_MESSAGE)
    }
}
