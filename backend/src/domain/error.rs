//! Transport-agnostic error envelope.
//!
//! Ports report failures in their own error enums; the lookup service folds
//! them into this type, and inbound adapters render it. The JSON shape is
//! `{ code, message, traceId?, details? }`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TraceId;

/// Failure category, serialised in `snake_case`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The caller sent something unusable, such as a non-integer id.
    InvalidRequest,
    NotFound,
    /// The record store could not be reached.
    ServiceUnavailable,
    /// The store answered but the answer is unusable.
    InternalError,
}

impl ErrorCode {
    /// Message used when a caller supplies a blank one.
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid request",
            Self::NotFound => "not found",
            Self::ServiceUnavailable => "service unavailable",
            Self::InternalError => "internal error",
        }
    }
}

/// Reasons a wire payload cannot become an [`Error`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    #[error("error message must not be empty")]
    EmptyMessage,
    #[error("trace identifier must not be empty")]
    EmptyTraceId,
}

/// Error envelope returned by the driving port.
///
/// `message` is never blank and `trace_id`, when set, is never blank. Errors
/// built while a request is in flight pick up the active [`TraceId`].
///
/// # Examples
/// ```
/// use characters::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("character 42");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(Error::internal("  ").message(), "internal error");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ErrorDto", into = "ErrorDto")]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
    details: Option<Value>,
}

impl Error {
    /// Build an error, substituting [`ErrorCode::default_message`] for a blank
    /// message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            code.default_message().to_owned()
        } else {
            message
        };
        Self {
            code,
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Build an error, rejecting a blank message.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self::new(code, message))
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Correlation identifier captured at construction or attached later.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach a trace identifier. A blank value leaves the current one intact.
    pub fn with_trace_id(self, trace_id: impl Into<String>) -> Self {
        let trace_id = trace_id.into();
        if trace_id.trim().is_empty() {
            return self;
        }
        Self {
            trace_id: Some(trace_id),
            ..self
        }
    }

    /// Attach a trace identifier, rejecting a blank value.
    pub fn try_with_trace_id(self, trace_id: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let trace_id = trace_id.into();
        if trace_id.trim().is_empty() {
            return Err(ErrorValidationError::EmptyTraceId);
        }
        Ok(self.with_trace_id(trace_id))
    }

    /// Attach structured context.
    ///
    /// # Examples
    /// ```
    /// use characters::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad id").with_details(json!({ "field": "id" }));
    /// assert_eq!(err.details(), Some(&json!({ "field": "id" })));
    /// ```
    pub fn with_details(self, details: Value) -> Self {
        Self {
            details: Some(details),
            ..self
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

/// Wire form; the only place field names and validation meet serde.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "trace_id")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<Error> for ErrorDto {
    fn from(error: Error) -> Self {
        let Error {
            code,
            message,
            trace_id,
            details,
        } = error;
        Self {
            code,
            message,
            trace_id,
            details,
        }
    }
}

impl TryFrom<ErrorDto> for Error {
    type Error = ErrorValidationError;

    fn try_from(dto: ErrorDto) -> Result<Self, Self::Error> {
        if dto.message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        if dto.trace_id.as_deref().is_some_and(|id| id.trim().is_empty()) {
            return Err(ErrorValidationError::EmptyTraceId);
        }
        Ok(Self {
            code: dto.code,
            message: dto.message,
            trace_id: dto.trace_id,
            details: dto.details,
        })
    }
}
