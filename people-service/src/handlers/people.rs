use crate::dtos::{Person, PersonInput};
use crate::error::{ApiError, PersonError};
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

/// Bodies are decoded whatever their `Content-Type`; any JSON error is
/// `MalformedInput`. Only the first JSON value is read, so trailing data is
/// ignored, and a `null` body is a zero-valued person.
fn decode_person(body: &[u8]) -> Result<PersonInput, PersonError> {
    let mut deserializer = serde_json::Deserializer::from_slice(body);
    let person = Option::<PersonInput>::deserialize(&mut deserializer)?;
    Ok(person.unwrap_or_default())
}

#[tracing::instrument(skip(state))]
pub async fn list_people(State(state): State<AppState>) -> Result<Json<Vec<Person>>, ApiError> {
    tracing::info!("Listing people");
    let people = state.people.list().await.map_err(|e| state.reject(e))?;
    Ok(Json(people))
}

#[tracing::instrument(skip(state))]
pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Person>, ApiError> {
    tracing::info!("Fetching person");
    let person = state
        .people
        .get_by_id(&id)
        .await
        .map_err(|e| state.reject(e))?;
    Ok(Json(person))
}

#[tracing::instrument(skip(state, body))]
pub async fn create_person(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("Creating person");
    let person = decode_person(&body).map_err(|e| state.reject(e))?;
    let created = state
        .people
        .create(person)
        .await
        .map_err(|e| state.reject(e))?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[tracing::instrument(skip(state, body))]
pub async fn update_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<PersonInput>, ApiError> {
    tracing::info!("Updating person");
    let person = decode_person(&body).map_err(|e| state.reject(e))?;
    let updated = state
        .people
        .update(&id, person)
        .await
        .map_err(|e| state.reject(e))?;
    Ok(Json(updated))
}

#[tracing::instrument(skip(state))]
pub async fn delete_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    tracing::info!("Deleting person");
    state
        .people
        .delete(&id)
        .await
        .map_err(|e| state.reject(e))?;
    Ok(StatusCode::NO_CONTENT)
}
