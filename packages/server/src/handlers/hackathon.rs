use axum::Json;
use axum::extract::{Path, State};
use common::model::{HackathonInfo, HackathonInfoUpdate, HackathonsList};
use common::scoring::Leaderboard;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::extractors::json::AppJson;
use crate::models::hackathon::{ProjectView, TeamPageResponse};
use crate::state::AppState;

/// The registry of every known hackathon.
#[utoipa::path(
    get,
    path = "/",
    tag = "Hackathons",
    operation_id = "listHackathons",
    summary = "List every known hackathon",
    responses(
        (status = 200, description = "The registry", body = HackathonsList),
        (status = 404, description = "No registry stored anywhere (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Remote store unreachable (BACKEND_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_hackathons(State(state): State<AppState>) -> Result<Json<HackathonsList>, AppError> {
    Ok(Json(state.repo.hackathons_list().await?))
}

/// Replace the registry.
#[utoipa::path(
    put,
    path = "/",
    tag = "Hackathons",
    operation_id = "saveHackathons",
    summary = "Replace the registry",
    description = "Ids must be non-empty and unique.",
    request_body = HackathonsList,
    responses(
        (status = 200, description = "Registry saved", body = HackathonsList),
        (status = 400, description = "Empty or duplicate id (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Missing or wrong admin password (INVALID_CREDENTIALS)", body = ErrorBody),
        (status = 503, description = "Remote store unreachable (BACKEND_UNAVAILABLE)", body = ErrorBody),
    ),
    security(("admin_password" = [])),
)]
#[instrument(skip(state, _admin, payload), fields(hackathons = payload.hackathons.len()))]
pub async fn save_hackathons(
    _admin: AdminUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<HackathonsList>,
) -> Result<Json<HackathonsList>, AppError> {
    let mut seen = std::collections::BTreeSet::new();
    for info in &payload.hackathons {
        if info.id.trim().is_empty() {
            return Err(AppError::Validation("hackathon id cannot be empty".into()));
        }
        if !seen.insert(info.id.as_str()) {
            return Err(AppError::Validation(format!(
                "duplicate hackathon id '{}'",
                info.id
            )));
        }
    }

    state.repo.save_hackathons_list(&payload).await?;
    Ok(Json(payload))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Hackathons",
    operation_id = "getHackathon",
    summary = "Get one registry entry",
    params(("id" = String, Path, description = "Hackathon id")),
    responses(
        (status = 200, description = "Registry entry", body = HackathonInfo),
        (status = 404, description = "Hackathon not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_hackathon(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HackathonInfo>, AppError> {
    Ok(Json(state.repo.hackathon_info(&id).await?))
}

/// Update the editable registry fields of one hackathon.
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Hackathons",
    operation_id = "updateHackathon",
    summary = "Update registry fields of a hackathon",
    description = "Fields left out keep their value.",
    params(("id" = String, Path, description = "Hackathon id")),
    request_body = HackathonInfoUpdate,
    responses(
        (status = 200, description = "Updated entry", body = HackathonInfo),
        (status = 400, description = "Blank name (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Missing or wrong admin password (INVALID_CREDENTIALS)", body = ErrorBody),
        (status = 404, description = "Hackathon not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("admin_password" = [])),
)]
#[instrument(skip(state, _admin, payload))]
pub async fn update_hackathon(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<HackathonInfoUpdate>,
) -> Result<Json<HackathonInfo>, AppError> {
    if payload.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::Validation("name cannot be empty".into()));
    }
    Ok(Json(state.repo.update_hackathon_info(&id, payload).await?))
}

#[utoipa::path(
    get,
    path = "/{id}/leaderboard",
    tag = "Results",
    operation_id = "getLeaderboard",
    summary = "Public standings",
    description = "Until results are published there is no podium and no overall scores, and projects are listed by title.",
    params(("id" = String, Path, description = "Hackathon id")),
    responses(
        (status = 200, description = "Standings", body = Leaderboard),
        (status = 404, description = "Hackathon not found (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Remote store unreachable (BACKEND_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn leaderboard(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Leaderboard>, AppError> {
    let info = state.repo.hackathon_info(&id).await?;
    let data = state.repo.get_data(&id).await?;
    Ok(Json(Leaderboard::build(&info, &data)))
}

#[utoipa::path(
    get,
    path = "/{id}/teams/{team_id}",
    tag = "Results",
    operation_id = "getTeamPage",
    summary = "A team with its scored projects",
    params(("id" = String, Path, description = "Hackathon id"), ("team_id" = String, Path, description = "Team id")),
    responses(
        (status = 200, description = "Team page", body = TeamPageResponse),
        (status = 404, description = "Hackathon or team not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn team_page(
    State(state): State<AppState>,
    Path((id, team_id)): Path<(String, String)>,
) -> Result<Json<TeamPageResponse>, AppError> {
    let info = state.repo.hackathon_info(&id).await?;
    let data = state.repo.get_data(&id).await?;
    let team = data
        .team(&team_id)
        .ok_or_else(|| AppError::NotFound(format!("team '{team_id}' not found")))?;
    Ok(Json(TeamPageResponse::new(info, team, &data)))
}

#[utoipa::path(
    get,
    path = "/{id}/projects/{project_id}",
    tag = "Results",
    operation_id = "getProject",
    summary = "One project with its overall score",
    params(("id" = String, Path, description = "Hackathon id"), ("project_id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project", body = ProjectView),
        (status = 404, description = "Hackathon or project not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_project(
    State(state): State<AppState>,
    Path((id, project_id)): Path<(String, String)>,
) -> Result<Json<ProjectView>, AppError> {
    let data = state.repo.get_data(&id).await?;
    let project = data
        .project(&project_id)
        .ok_or_else(|| AppError::NotFound(format!("project '{project_id}' not found")))?;
    Ok(Json(ProjectView::new(project, &data)))
}
