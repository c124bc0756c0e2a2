use axum::Json;
use axum::extract::{Path, State};
use common::Editor;
use common::model::RawHackathonData;
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::extractors::json::AppJson;
use crate::models::hackathon::{
    EditBatchRequest, EditBatchResponse, validate_dataset, validate_edit_batch,
};
use crate::state::AppState;

/// The full dataset with live scores and derived team project lists.
#[utoipa::path(
    get,
    path = "/{id}/data",
    tag = "Data",
    operation_id = "getData",
    summary = "Full dataset with live scores",
    params(("id" = String, Path, description = "Hackathon id")),
    responses(
        (status = 200, description = "Dataset", body = RawHackathonData),
        (status = 401, description = "Missing or wrong admin password (INVALID_CREDENTIALS)", body = ErrorBody),
        (status = 404, description = "Hackathon not found (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Remote store unreachable (BACKEND_UNAVAILABLE)", body = ErrorBody),
    ),
    security(("admin_password" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn get_data(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RawHackathonData>, AppError> {
    let data = state.repo.get_data(&id).await?;
    Ok(Json(RawHackathonData::live(&data)))
}

/// Replace the whole dataset. Scores may arrive encoded or live.
#[utoipa::path(
    put,
    path = "/{id}/data",
    tag = "Data",
    operation_id = "saveData",
    summary = "Replace the whole dataset",
    description = "Scores may be encoded strings or live objects. Values above the maximum are stored as 0.",
    params(("id" = String, Path, description = "Hackathon id")),
    request_body = RawHackathonData,
    responses(
        (status = 200, description = "Stored dataset, live scores", body = RawHackathonData),
        (status = 400, description = "Duplicate ids or unknown team (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Missing or wrong admin password (INVALID_CREDENTIALS)", body = ErrorBody),
        (status = 404, description = "Hackathon not found (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Remote store unreachable (BACKEND_UNAVAILABLE)", body = ErrorBody),
    ),
    security(("admin_password" = [])),
)]
#[instrument(skip(state, _admin, payload))]
pub async fn save_data(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<RawHackathonData>,
) -> Result<Json<RawHackathonData>, AppError> {
    let data = payload.decode();
    validate_dataset(&data)?;

    state.repo.save_data(&id, &data).await?;
    Ok(Json(RawHackathonData::live(&data)))
}

/// Apply a batch of admin edits to the stored dataset and save the result.
///
/// The batch is all or nothing: if any edit is rejected nothing is saved and
/// the response names the failing edit.
#[utoipa::path(
    post,
    path = "/{id}/edits",
    tag = "Data",
    operation_id = "applyEdits",
    summary = "Apply an edit batch and save",
    description = "All or nothing. A destructive edit without `confirmed` is answered with 409 and the warning to show.",
    params(("id" = String, Path, description = "Hackathon id")),
    request_body = EditBatchRequest,
    responses(
        (status = 200, description = "Batch applied and saved", body = EditBatchResponse),
        (status = 400, description = "Malformed or empty batch (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Missing or wrong admin password (INVALID_CREDENTIALS)", body = ErrorBody),
        (status = 404, description = "Hackathon or referenced entity not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Destructive edit not confirmed (CONFIRMATION_REQUIRED)", body = ErrorBody),
        (status = 503, description = "Remote store unreachable (BACKEND_UNAVAILABLE)", body = ErrorBody),
    ),
    security(("admin_password" = [])),
)]
#[instrument(skip(state, _admin, payload), fields(edits = payload.edits.len()))]
pub async fn apply_edits(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<EditBatchRequest>,
) -> Result<Json<EditBatchResponse>, AppError> {
    validate_edit_batch(&payload)?;

    let mut editor = Editor::new(state.repo.get_data(&id).await?);
    if payload.selected_project.is_some() {
        editor.select_project(payload.selected_project.as_deref())?;
    }

    let outcomes = editor.apply_all(payload.edits)?;
    let selected_project = editor.selected_project().map(|p| p.id.clone());
    let data = editor.into_data();

    state.repo.save_data(&id, &data).await?;
    info!(hackathon_id = %id, edits = outcomes.len(), "Applied edit batch");

    Ok(Json(EditBatchResponse {
        outcomes,
        selected_project,
        data: RawHackathonData::live(&data),
    }))
}
