//! Maps domain errors onto HTTP responses.
//!
//! The domain `Error` stays transport-agnostic; this module decides the status
//! line, echoes the trace identifier as a header, and strips server-side
//! detail from 500 responses before they reach the client.

use std::borrow::Cow;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias returned by the HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message substituted for every internal error body.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

const fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Body sent to the client for `error`.
///
/// Internal errors keep their code and trace id but lose message and details.
fn client_view(error: &Error) -> Cow<'_, Error> {
    if error.code() != ErrorCode::InternalError {
        return Cow::Borrowed(error);
    }
    let redacted = Error::internal(INTERNAL_ERROR_MESSAGE);
    Cow::Owned(match error.trace_id() {
        Some(trace_id) => redacted.with_trace_id(trace_id.to_owned()),
        None => redacted,
    })
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self.code() {
            ErrorCode::InternalError => {
                error!(trace_id = self.trace_id(), message = self.message(), "request failed");
            }
            ErrorCode::ServiceUnavailable => {
                warn!(trace_id = self.trace_id(), message = self.message(), "dependency unavailable");
            }
            ErrorCode::InvalidRequest | ErrorCode::NotFound => {}
        }

        let mut builder = HttpResponse::build(status);
        if let Some(trace_id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, trace_id.to_owned()));
        }
        builder.json(client_view(self).as_ref())
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "framework error surfaced as internal error");
        Self::internal(INTERNAL_ERROR_MESSAGE)
    }
}
