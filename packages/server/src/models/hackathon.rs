use std::collections::BTreeSet;

use common::editor::{Edit, EditOutcome};
use common::model::{
    HackathonData, HackathonInfo, Project, RawHackathonData, SpecialAward, Team,
};
use common::scoring::overall_score;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditBatchRequest {
    /// Edits applied in order, each an object tagged by `op`
    /// (`setScore`, `addTeam`, `deleteProject`, ...).
    #[schema(value_type = Vec<Object>)]
    pub edits: Vec<Edit>,
    /// Project selected in the admin session before the batch runs.
    #[serde(default)]
    #[schema(example = "launchpad")]
    pub selected_project: Option<String>,
}

pub fn validate_edit_batch(payload: &EditBatchRequest) -> Result<(), AppError> {
    if payload.edits.is_empty() {
        return Err(AppError::Validation("edits cannot be empty".into()));
    }
    Ok(())
}

/// Reject a replacement dataset with duplicate ids or projects owned by a
/// team that is not in it.
pub fn validate_dataset(data: &HackathonData) -> Result<(), AppError> {
    let mut team_ids = BTreeSet::new();
    for team in &data.teams {
        if !team_ids.insert(team.id.as_str()) {
            return Err(AppError::Validation(format!("duplicate team id '{}'", team.id)));
        }
    }

    let mut project_ids = BTreeSet::new();
    for project in &data.projects {
        if !project_ids.insert(project.id.as_str()) {
            return Err(AppError::Validation(format!(
                "duplicate project id '{}'",
                project.id
            )));
        }
        if !team_ids.contains(project.team_id.as_str()) {
            return Err(AppError::Validation(format!(
                "project '{}' belongs to unknown team '{}'",
                project.id, project.team_id
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditBatchResponse {
    /// One outcome per edit, each an object tagged by `result`.
    #[schema(value_type = Vec<Object>)]
    pub outcomes: Vec<EditOutcome>,
    pub selected_project: Option<String>,
    pub data: RawHackathonData,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: Project,
    pub overall_score: f64,
    /// Awards held by the project that still exist in the config.
    pub awards: Vec<SpecialAward>,
}

impl ProjectView {
    pub fn new(project: &Project, data: &HackathonData) -> Self {
        Self {
            project: project.clone(),
            overall_score: overall_score(&project.scores, &data.config.categories),
            awards: project
                .special_awards
                .iter()
                .filter_map(|id| data.config.award(id).cloned())
                .collect(),
        }
    }
}

/// Neighbour of a project in the alphabetical walk through every project.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectLink {
    pub id: String,
    pub title: String,
    pub team_id: String,
    pub team_name: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamProjectEntry {
    #[serde(flatten)]
    pub view: ProjectView,
    pub previous: Option<ProjectLink>,
    pub next: Option<ProjectLink>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamPageResponse {
    pub hackathon: HackathonInfo,
    pub team: Team,
    pub projects: Vec<TeamProjectEntry>,
}

impl TeamPageResponse {
    pub fn new(hackathon: HackathonInfo, team: &Team, data: &HackathonData) -> Self {
        let mut walk: Vec<&Project> = data.projects.iter().collect();
        walk.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.title.cmp(&b.title))
        });

        let link = |project: &Project| ProjectLink {
            id: project.id.clone(),
            title: project.title.clone(),
            team_id: project.team_id.clone(),
            team_name: data.team(&project.team_id).map(|t| t.name.clone()),
        };

        let projects = data
            .team_projects(&team.id)
            .map(|project| {
                let position = walk.iter().position(|p| p.id == project.id);
                let previous = position
                    .and_then(|i| i.checked_sub(1))
                    .and_then(|i| walk.get(i))
                    .map(|p| link(p));
                let next = position.and_then(|i| walk.get(i + 1)).map(|p| link(p));
                TeamProjectEntry {
                    view: ProjectView::new(project, data),
                    previous,
                    next,
                }
            })
            .collect();

        Self {
            hackathon,
            team: team.clone(),
            projects,
        }
    }
}
