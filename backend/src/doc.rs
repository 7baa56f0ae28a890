//! OpenAPI document for the service.
//!
//! Served by Swagger UI at `/docs` in debug builds and written to stdout by
//! the `openapi-dump` binary. Domain types are described through the mirrors
//! in [`crate::inbound::http::schemas`].

use crate::inbound::http::characters::{CharacterResponse, NotFoundResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// Character lookup and health probe operations.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Character lookup API",
        description = "Read-only access to characters by id, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::characters::get_character,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(CharacterResponse, NotFoundResponse, ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "characters", description = "Character lookups"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
