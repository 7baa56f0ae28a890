//! OpenAPI shapes for domain types.
//!
//! `crate::domain` does not depend on utoipa, so the error envelope is
//! described here by mirror types registered under the domain names.

use utoipa::ToSchema;

/// Mirror of [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// Malformed path parameter or other bad input.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No such resource.
    #[schema(rename = "not_found")]
    NotFound,
    /// A backing store is temporarily unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// Store integrity or query failure; the message is always redacted.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Mirror of the [`crate::domain::Error`] envelope.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "fields are read by the utoipa derive only"
)]
pub struct ErrorSchema {
    /// Machine-readable code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Client-facing message.
    #[schema(example = "character id must be an integer")]
    message: String,
    /// Value of the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Structured context, e.g. the rejected path parameter.
    details: Option<serde_json::Value>,
}
