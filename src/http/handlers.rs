//! Route handlers.
//!
//! Each handler parses its input, calls the store once and shapes the
//! response. Failures are returned as `AppError` and rendered by
//! `http::error`.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};

use crate::http::error::AppError;
use crate::http::server::AppState;
use crate::model::{PersonPayload, PersonView};

/// Format of the timestamp on the info page.
const INFO_TIMESTAMP_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

/// Parse a create/update body. An empty body counts as `{}`.
fn parse_payload(body: &Bytes) -> Result<PersonPayload, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(PersonPayload::default());
    }
    serde_json::from_slice(body).map_err(|e| AppError::MalformedBody(e.to_string()))
}

pub async fn root() -> Html<&'static str> {
    Html("<h1>Hi there</h1>")
}

pub async fn info(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let count = state.store.count().await?;
    let now = chrono::Local::now().format(INFO_TIMESTAMP_FORMAT);

    Ok(Html(format!(
        "<p>Phonebook has info for {count} people</p>\n<p>{now}</p>"
    )))
}

pub async fn list_persons(State(state): State<AppState>) -> Result<Json<Vec<PersonView>>, AppError> {
    let records = state.store.find_all().await?;
    Ok(Json(records.into_iter().map(PersonView::from).collect()))
}

pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PersonView>, AppError> {
    match state.store.find_by_id(&id).await? {
        Some(record) => Ok(Json(record.into())),
        None => Err(AppError::NotFound),
    }
}

pub async fn create_person(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PersonView>, AppError> {
    let person = parse_payload(&body)?.into_new_person()?;
    let record = state.store.insert(person).await?;

    tracing::info!(id = %record.id, name = %record.name, "Person created");
    Ok(Json(record.into()))
}

pub async fn update_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<PersonView>, AppError> {
    let person = parse_payload(&body)?.into_new_person()?;
    match state.store.update_by_id(&id, person).await? {
        Some(record) => {
            tracing::info!(id = %record.id, version = record.version, "Person updated");
            Ok(Json(record.into()))
        }
        None => Err(AppError::NotFound),
    }
}

pub async fn delete_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if let Some(record) = state.store.delete_by_id(&id).await? {
        tracing::info!(id = %record.id, "Person deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn unknown_endpoint() -> AppError {
    AppError::UnknownEndpoint
}
