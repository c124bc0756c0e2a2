use serde::Serialize;

use super::{EditError, Editor};

/// Something an operator can irreversibly delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionTarget {
    Team(String),
    Project(String),
    Award(String),
}

/// The warning shown to the operator before a deletion. Calling
/// [`DeletionPrompt::confirm`] is the only way to obtain a
/// [`ConfirmedDeletion`], so nothing can be deleted without passing through it.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletionPrompt {
    target: DeletionTarget,
    message: String,
}

impl DeletionPrompt {
    pub fn target(&self) -> &DeletionTarget {
        &self.target
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn confirm(self) -> ConfirmedDeletion {
        ConfirmedDeletion(self.target)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedDeletion(DeletionTarget);

/// What a deletion removed, including cascades.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionReport {
    pub removed_team: Option<String>,
    pub removed_projects: Vec<String>,
    pub removed_award: Option<String>,
    /// Projects that lost a reference to the removed award.
    pub projects_unawarded: usize,
    pub cleared_selection: bool,
}

impl Editor {
    pub fn prompt_team_deletion(&self, team_id: &str) -> Result<DeletionPrompt, EditError> {
        if self.data.team(team_id).is_none() {
            return Err(EditError::team(team_id));
        }
        let owned = self.data.team_projects(team_id).count();
        let message = if owned > 0 {
            format!(
                "This team has {owned} project(s). Deleting the team will also delete these projects. Are you sure?"
            )
        } else {
            "Are you sure you want to delete this team?".to_string()
        };
        Ok(DeletionPrompt {
            target: DeletionTarget::Team(team_id.to_string()),
            message,
        })
    }

    pub fn prompt_project_deletion(&self, project_id: &str) -> Result<DeletionPrompt, EditError> {
        if self.data.project(project_id).is_none() {
            return Err(EditError::project(project_id));
        }
        Ok(DeletionPrompt {
            target: DeletionTarget::Project(project_id.to_string()),
            message: "Are you sure you want to delete this project?".to_string(),
        })
    }

    pub fn prompt_award_deletion(&self, award_id: &str) -> Result<DeletionPrompt, EditError> {
        if self.data.config.award(award_id).is_none() {
            return Err(EditError::award(award_id));
        }
        Ok(DeletionPrompt {
            target: DeletionTarget::Award(award_id.to_string()),
            message: "Are you sure you want to delete this award? It will be removed from all projects."
                .to_string(),
        })
    }

    /// Carry out a confirmed deletion with its cascade.
    pub fn delete(&mut self, confirmed: ConfirmedDeletion) -> Result<DeletionReport, EditError> {
        match confirmed.0 {
            DeletionTarget::Team(id) => self.delete_team(&id),
            DeletionTarget::Project(id) => self.delete_project(&id),
            DeletionTarget::Award(id) => self.delete_award(&id),
        }
    }

    /// Removes the team and every project it owns.
    fn delete_team(&mut self, team_id: &str) -> Result<DeletionReport, EditError> {
        if self.data.team(team_id).is_none() {
            return Err(EditError::team(team_id));
        }
        let removed_projects = self.data.team_project_ids(team_id);

        self.data.teams.retain(|t| t.id != team_id);
        self.data.projects.retain(|p| p.team_id != team_id);

        Ok(DeletionReport {
            removed_team: Some(team_id.to_string()),
            cleared_selection: self.clear_selection_if(|id| removed_projects.iter().any(|p| p == id)),
            removed_projects,
            ..Default::default()
        })
    }

    fn delete_project(&mut self, project_id: &str) -> Result<DeletionReport, EditError> {
        if self.data.project(project_id).is_none() {
            return Err(EditError::project(project_id));
        }
        self.data.projects.retain(|p| p.id != project_id);

        Ok(DeletionReport {
            removed_projects: vec![project_id.to_string()],
            cleared_selection: self.clear_selection_if(|id| id == project_id),
            ..Default::default()
        })
    }

    /// Removes the award from the config and from every project holding it.
    fn delete_award(&mut self, award_id: &str) -> Result<DeletionReport, EditError> {
        if self.data.config.award(award_id).is_none() {
            return Err(EditError::award(award_id));
        }
        self.data.config.special_awards.retain(|a| a.id != award_id);

        let mut projects_unawarded = 0;
        for project in &mut self.data.projects {
            if project.has_award(award_id) {
                project.special_awards.retain(|a| a != award_id);
                projects_unawarded += 1;
            }
        }

        Ok(DeletionReport {
            removed_award: Some(award_id.to_string()),
            projects_unawarded,
            ..Default::default()
        })
    }

    fn clear_selection_if(&mut self, removed: impl Fn(&str) -> bool) -> bool {
        let hit = self.selected.as_deref().is_some_and(removed);
        if hit {
            self.selected = None;
        }
        hit
    }
}
