use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use models::PersonId;
use service::person::{Person, PersonInput};
use tracing::debug;

use crate::{errors::JsonApiError, state::ServerState};

/// Path prefix selecting lookup by email on `GET /person/{key}`.
pub const EMAIL_PREFIX: &str = "email:";

/// Syntactic identifier check at the transport boundary. A malformed id is a
/// client error and never reaches the service.
fn parse_id(raw: &str) -> Result<PersonId, JsonApiError> {
    PersonId::parse(raw).map_err(|e| JsonApiError::bad_request(e.to_string()))
}

/// Bodies are decoded as JSON whatever `Content-Type` says; only a payload
/// that does not decode is a client error.
fn decode_body(body: &[u8]) -> Result<PersonInput, JsonApiError> {
    serde_json::from_slice(body).map_err(|e| JsonApiError::bad_request(format!("invalid body: {e}")))
}

#[utoipa::path(
    post, path = "/person/", tag = "person",
    request_body = crate::openapi::PersonInputDoc,
    responses(
        (status = 200, description = "Created; body is the new identifier as hex text", body = String, content_type = "text/plain"),
        (status = 400, description = "Bad Request"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<String, JsonApiError> {
    let input = decode_body(&body)?;
    let id = state.people.create(input).await?;
    Ok(id.to_string())
}

#[utoipa::path(
    get, path = "/person/{id}", tag = "person",
    params(("id" = String, Path, description = "32-hex identifier, or `email:` followed by an email address")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::PersonDoc),
        (status = 400, description = "Malformed identifier"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn find(
    State(state): State<ServerState>,
    Path(key): Path<String>,
) -> Result<Json<Person>, JsonApiError> {
    let person = match key.strip_prefix(EMAIL_PREFIX) {
        Some(email) => state.people.find_by_email(email).await?,
        None => state.people.find_by_id(parse_id(&key)?).await?,
    };
    debug!(person_id = %person.id, "person_fetched");
    Ok(Json(person))
}

#[utoipa::path(
    put, path = "/person/{id}", tag = "person",
    params(("id" = String, Path, description = "32-hex identifier; wins over any id in the body")),
    request_body = crate::openapi::PersonInputDoc,
    responses(
        (status = 200, description = "Updated; body is the identifier as hex text", body = String, content_type = "text/plain"),
        (status = 400, description = "Bad Request"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<String, JsonApiError> {
    let id = parse_id(&raw_id)?;
    let input = decode_body(&body)?;
    let id = state.people.update(id, input).await?;
    Ok(id.to_string())
}

#[utoipa::path(
    delete, path = "/person/{id}", tag = "person",
    params(("id" = String, Path, description = "32-hex identifier")),
    responses(
        (status = 200, description = "Deleted; body is `OK`", body = String, content_type = "text/plain"),
        (status = 400, description = "Malformed identifier"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
) -> Result<&'static str, JsonApiError> {
    let id = parse_id(&raw_id)?;
    state.people.delete(id).await?;
    Ok("OK")
}
