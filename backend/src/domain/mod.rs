//! Domain primitives, ports, and services.
//!
//! Purpose: Define strongly typed domain entities used by the API, cache, and
//! persistence layers. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Character (alias to `character::Character`): the record served by the API.
//! - CharacterLookupService: cache-then-store implementation of
//!   [`ports::CharacterQuery`].

pub mod character;
mod character_lookup_service;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::character::{Character, CharacterDraft, CharacterId, CharacterValidationError};
pub use self::character_lookup_service::{CharacterLookupService, STORE_UNAVAILABLE_MESSAGE};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use characters::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
