//! Character read endpoint.
//!
//! ```text
//! GET /api/character/{id}
//! ```

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Character, CharacterId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Body returned when no character matches the requested id.
pub const NOT_FOUND_MESSAGE: &str = "Not found";

/// Response payload for a single character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CharacterResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Diego")]
    pub first_name: String,
    #[schema(example = "de la Vega")]
    pub last_name: String,
    /// Alias; serialised as `null` when the character has none.
    #[schema(example = "Zorro")]
    pub nick_name: Option<String>,
}

impl From<Character> for CharacterResponse {
    fn from(character: Character) -> Self {
        Self {
            id: character.id().get(),
            first_name: character.first_name().to_owned(),
            last_name: character.last_name().to_owned(),
            nick_name: character.nick_name().map(str::to_owned),
        }
    }
}

/// Body of the 404 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NotFoundResponse {
    #[schema(example = "Not found")]
    pub message: String,
}

impl Default for NotFoundResponse {
    fn default() -> Self {
        Self {
            message: NOT_FOUND_MESSAGE.to_owned(),
        }
    }
}

fn parse_character_id(raw: &str) -> Result<CharacterId, Error> {
    raw.parse::<CharacterId>().map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "id",
            "value": raw,
            "code": "invalid_character_id",
        }))
    })
}

/// Fetch one character by id.
#[utoipa::path(
    get,
    path = "/api/character/{id}",
    description = "Return the character with the given id. Example request: GET /api/character/1",
    params(("id" = i64, Path, description = "Character primary key")),
    responses(
        (status = 200, description = "Character found", body = CharacterResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "No character with this id", body = NotFoundResponse),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["characters"],
    operation_id = "getCharacter"
)]
#[get("/character/{id}")]
pub async fn get_character(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_character_id(path.as_str())?;
    match state.characters.find_by_id(id).await? {
        Some(character) => Ok(HttpResponse::Ok().json(CharacterResponse::from(character))),
        None => Ok(HttpResponse::NotFound().json(NotFoundResponse::default())),
    }
}

#[cfg(test)]
mod tests {
    //! Handler coverage against a mocked lookup port.
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{
        CharacterRepositoryError, DisabledCharacterCache, MockCharacterQuery,
        MockCharacterRepository,
    };
    use crate::domain::{CharacterDraft, CharacterLookupService, ErrorCode, STORE_UNAVAILABLE_MESSAGE};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use mockall::predicate::eq;
    use rstest::{fixture, rstest};
    use serde_json::Value;

    #[fixture]
    fn zorro() -> Character {
        Character::new(CharacterDraft {
            id: 1,
            first_name: "Diego".to_owned(),
            last_name: "de la Vega".to_owned(),
            nick_name: Some("Zorro".to_owned()),
        })
        .expect("valid character")
    }

    async fn call(query: MockCharacterQuery, uri: &str) -> (StatusCode, Value) {
        let state = web::Data::new(HttpState::new(Arc::new(query)));
        let app = actix_test::init_service(
            App::new()
                .app_data(state)
                .service(web::scope("/api").service(get_character)),
        )
        .await;
        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
        let status = res.status();
        let body: Value = actix_test::read_body_json(res).await;
        (status, body)
    }

    #[rstest]
    #[actix_web::test]
    async fn found_character_is_serialised_in_camel_case(zorro: Character) {
        let mut query = MockCharacterQuery::new();
        query
            .expect_find_by_id()
            .with(eq(CharacterId::new(1)))
            .times(1)
            .return_once(move |_| Ok(Some(zorro)));

        let (status, body) = call(query, "/api/character/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"id": 1, "firstName": "Diego", "lastName": "de la Vega", "nickName": "Zorro"})
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_nick_name_serialises_as_null() {
        let bernardo = Character::new(CharacterDraft {
            id: 3,
            first_name: "Bernardo".to_owned(),
            last_name: "Mute".to_owned(),
            nick_name: None,
        })
        .expect("valid character");
        let mut query = MockCharacterQuery::new();
        query
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(bernardo)));

        let (status, body) = call(query, "/api/character/3").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.get("nickName"), Some(&Value::Null));
    }

    #[rstest]
    #[actix_web::test]
    async fn absent_character_returns_exact_not_found_body() {
        let mut query = MockCharacterQuery::new();
        query
            .expect_find_by_id()
            .with(eq(CharacterId::new(987_654_321)))
            .return_once(|_| Ok(None));

        let (status, body) = call(query, "/api/character/987654321").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"message": "Not found"}));
    }

    #[rstest]
    #[case("abc")]
    #[case("1.5")]
    #[case("99999999999999999999")]
    #[actix_web::test]
    async fn malformed_ids_are_rejected_without_lookup(#[case] raw: &str) {
        let mut query = MockCharacterQuery::new();
        query.expect_find_by_id().never();

        let (status, body) = call(query, &format!("/api/character/{raw}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], json!("invalid_request"));
        assert_eq!(
            body["details"],
            json!({"field": "id", "value": raw, "code": "invalid_character_id"})
        );
    }

    #[rstest]
    #[case(Error::service_unavailable("store down"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::internal("character id 1 matched 2 rows"), StatusCode::INTERNAL_SERVER_ERROR)]
    #[actix_web::test]
    async fn lookup_failures_map_to_status(#[case] failure: Error, #[case] expected: StatusCode) {
        let mut query = MockCharacterQuery::new();
        query
            .expect_find_by_id()
            .return_once(move |_| Err(failure));

        let (status, body) = call(query, "/api/character/1").await;
        assert_eq!(status, expected);
        if expected == StatusCode::INTERNAL_SERVER_ERROR {
            assert_eq!(body["message"], json!("Internal server error"));
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn store_outage_body_carries_no_connection_detail() {
        let mut repo = MockCharacterRepository::new();
        repo.expect_find_by_id().return_once(|_| {
            Err(CharacterRepositoryError::connection(
                "connection to server at \"10.0.3.7\", port 5432 failed: \
                 FATAL: password authentication failed for user \"svc_admin\"",
            ))
        });
        let lookup = CharacterLookupService::new(Arc::new(repo), Arc::new(DisabledCharacterCache));
        let state = web::Data::new(HttpState::new(Arc::new(lookup)));
        let app = actix_test::init_service(
            App::new()
                .app_data(state)
                .service(web::scope("/api").service(get_character)),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/character/1").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], json!("service_unavailable"));
        assert_eq!(body["message"], json!(STORE_UNAVAILABLE_MESSAGE));
        let raw = body.to_string();
        assert!(!raw.contains("10.0.3.7") && !raw.contains("svc_admin"), "leaked: {raw}");
    }

    #[rstest]
    fn parse_accepts_negative_and_zero_ids() {
        assert_eq!(parse_character_id("0"), Ok(CharacterId::new(0)));
        assert_eq!(parse_character_id("-7"), Ok(CharacterId::new(-7)));
    }

    #[rstest]
    fn parse_failure_is_invalid_request() {
        let err = parse_character_id("x").expect_err("not an integer");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }
}
