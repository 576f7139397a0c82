//! Entry CRUD handlers.
//!
//! Handlers resolve the owner id via the `Owner` extractor, parse selector
//! strings leniently, and delegate to the entry service. Cache invalidation
//! happens inside the cached repository decorator.

use axum::{
    extract::{rejection::FormRejection, Path, Query, State},
    http::StatusCode,
    Form, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use shednote_core::entry::{EntryForm, PracticeEntry};
use shednote_core::storage::{repository_error_to_status_code, RangeFilter, SortOrder};

use crate::{auth::Owner, service::ServiceError, state::AppState};

/// Error response with message.
fn service_error_response(err: ServiceError) -> (StatusCode, String) {
    let status = match &err {
        ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Repository(repo_err) => {
            StatusCode::from_u16(repository_error_to_status_code(repo_err))
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        }
    };
    tracing::warn!(status = %status, message = %err, "API error");
    (status, err.to_string())
}

/// Error response for a rejected form submission.
fn form_rejection_response(err: FormRejection) -> (StatusCode, String) {
    let message = format!("Failed to parse form: {err}");
    tracing::warn!(message = %message, "API error");
    (StatusCode::BAD_REQUEST, message)
}

/// Query parameters for listing entries.
///
/// Both selectors are raw strings: unrecognized values fall back to the
/// documented defaults (`all`, `played_desc`) rather than erroring.
#[derive(Debug, Deserialize)]
pub struct ListEntriesQuery {
    pub range: Option<String>,
    pub sort: Option<String>,
}

/// List the owner's entries (GET /api/entries).
pub async fn list_entries(
    Owner(owner_id): Owner,
    State(state): State<AppState>,
    Query(query): Query<ListEntriesQuery>,
) -> Result<Json<Vec<PracticeEntry>>, (StatusCode, String)> {
    let range = RangeFilter::parse(query.range.as_deref());
    let sort = SortOrder::parse(query.sort.as_deref());

    let entries = state
        .entries
        .list_entries(owner_id, range, sort)
        .await
        .map_err(service_error_response)?;

    Ok(Json(entries))
}

/// Create a new entry (POST /api/entries).
pub async fn create_entry(
    Owner(owner_id): Owner,
    State(state): State<AppState>,
    form_result: Result<Form<EntryForm>, FormRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), (StatusCode, String)> {
    let Form(payload) = form_result.map_err(form_rejection_response)?;

    tracing::debug!(payload = ?payload, "Received create entry request");

    let id = state
        .entries
        .create_entry(owner_id, &payload)
        .await
        .map_err(service_error_response)?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id }))))
}

/// Get a single owned entry by ID (GET /api/entries/{id}).
pub async fn get_entry(
    Owner(owner_id): Owner,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PracticeEntry>, (StatusCode, String)> {
    let entry = state
        .entries
        .get_entry(owner_id, id)
        .await
        .map_err(service_error_response)?;

    Ok(Json(entry))
}

/// Update an owned entry by ID (PUT /api/entries/{id}).
pub async fn update_entry(
    Owner(owner_id): Owner,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    form_result: Result<Form<EntryForm>, FormRejection>,
) -> Result<StatusCode, (StatusCode, String)> {
    let Form(payload) = form_result.map_err(form_rejection_response)?;

    tracing::debug!(entry_id = %id, payload = ?payload, "Received update entry request");

    state
        .entries
        .update_entry(owner_id, id, &payload)
        .await
        .map_err(service_error_response)?;

    Ok(StatusCode::OK)
}

/// Delete an owned entry by ID (DELETE /api/entries/{id}).
pub async fn delete_entry(
    Owner(owner_id): Owner,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    tracing::debug!(entry_id = %id, "Received delete entry request");

    state
        .entries
        .delete_entry(owner_id, id)
        .await
        .map_err(service_error_response)?;

    Ok(StatusCode::OK)
}
