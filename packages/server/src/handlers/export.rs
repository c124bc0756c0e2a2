use axum::Json;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use common::model::RawHackathonData;
use common::repository::{ExportBundle, SeedReport};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::state::AppState;

/// One dataset in its data-file form, offered as a download named after the
/// registry's data file.
#[utoipa::path(
    get,
    path = "/{id}/export",
    tag = "Export",
    operation_id = "exportHackathon",
    summary = "Download a dataset in data-file form",
    description = "Scores are encoded, whatever the active store holds.",
    params(("id" = String, Path, description = "Hackathon id")),
    responses(
        (status = 200, description = "Dataset download", body = RawHackathonData),
        (status = 401, description = "Missing or wrong admin password (INVALID_CREDENTIALS)", body = ErrorBody),
        (status = 404, description = "Hackathon not found (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Remote store unreachable (BACKEND_UNAVAILABLE)", body = ErrorBody),
    ),
    security(("admin_password" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn export_hackathon(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let info = state.repo.hackathon_info(&id).await?;
    let data = state.repo.export_data(&id).await?;
    let disposition = format!("attachment; filename=\"{}\"", info.data_file);
    Ok(([(header::CONTENT_DISPOSITION, disposition)], Json(data)))
}

/// The registry plus every dataset, scores encoded.
#[utoipa::path(
    get,
    path = "/export",
    tag = "Export",
    operation_id = "exportAll",
    summary = "Registry and every dataset in one document",
    responses(
        (status = 200, description = "Bundle", body = ExportBundle),
        (status = 401, description = "Missing or wrong admin password (INVALID_CREDENTIALS)", body = ErrorBody),
        (status = 404, description = "Registry or a dataset missing (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Remote store unreachable (BACKEND_UNAVAILABLE)", body = ErrorBody),
    ),
    security(("admin_password" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn export_all(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<ExportBundle>, AppError> {
    Ok(Json(state.repo.export_all().await?))
}

/// Copy the file store into the remote store.
#[utoipa::path(
    post,
    path = "/seed",
    tag = "Export",
    operation_id = "seedRemote",
    summary = "Copy the file store into the remote store",
    responses(
        (status = 200, description = "Seed report", body = SeedReport),
        (status = 401, description = "Missing or wrong admin password (INVALID_CREDENTIALS)", body = ErrorBody),
        (status = 503, description = "No remote store configured or reachable (BACKEND_UNAVAILABLE)", body = ErrorBody),
    ),
    security(("admin_password" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn seed_remote(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<SeedReport>, AppError> {
    Ok(Json(state.repo.seed_remote_from_files().await?))
}
