//! Admin-side editing of a loaded dataset.
//!
//! Every operation validates before touching the dataset, so a rejected
//! operation leaves it exactly as it was. Nothing here persists anything;
//! callers save the edited dataset explicitly through the repository.

mod deletion;
mod edit;

pub use deletion::{ConfirmedDeletion, DeletionPrompt, DeletionReport, DeletionTarget};
pub use edit::{BatchRejected, Edit, EditOutcome};

use thiserror::Error;

use crate::model::{HackathonData, MAX_SCORE, Project, ScoreSet, SpecialAward, Team};
use crate::slug::{award_slug, disambiguate, entity_slug};

#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("{0}")]
    Validation(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("confirmation required: {0}")]
    ConfirmationRequired(String),
}

impl EditError {
    fn project(id: &str) -> Self {
        Self::NotFound {
            kind: "project",
            id: id.to_string(),
        }
    }

    fn team(id: &str) -> Self {
        Self::NotFound {
            kind: "team",
            id: id.to_string(),
        }
    }

    fn award(id: &str) -> Self {
        Self::NotFound {
            kind: "award",
            id: id.to_string(),
        }
    }

    fn category(id: &str) -> Self {
        Self::NotFound {
            kind: "category",
            id: id.to_string(),
        }
    }
}

fn required(value: &str, what: &str) -> Result<String, EditError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EditError::Validation(format!("{what} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

fn clean_members(members: Vec<String>) -> Vec<String> {
    members
        .into_iter()
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .collect()
}

/// One admin session's working copy of a dataset plus its selected project.
#[derive(Debug, Clone)]
pub struct Editor {
    data: HackathonData,
    selected: Option<String>,
}

impl Editor {
    pub fn new(data: HackathonData) -> Self {
        Self {
            data,
            selected: None,
        }
    }

    pub fn data(&self) -> &HackathonData {
        &self.data
    }

    pub fn into_data(self) -> HackathonData {
        self.data
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.selected.as_deref().and_then(|id| self.data.project(id))
    }

    pub fn select_project(&mut self, project_id: Option<&str>) -> Result<(), EditError> {
        match project_id {
            Some(id) if self.data.project(id).is_none() => return Err(EditError::project(id)),
            _ => {}
        }
        self.selected = project_id.map(str::to_string);
        Ok(())
    }

    fn project_mut(&mut self, project_id: &str) -> Result<&mut Project, EditError> {
        self.data
            .project_mut(project_id)
            .ok_or_else(|| EditError::project(project_id))
    }

    /// Store a judge's score. Values outside `0..=MAX_SCORE` are stored as `0`.
    pub fn set_score(
        &mut self,
        project_id: &str,
        category_id: &str,
        value: i64,
    ) -> Result<u8, EditError> {
        if self.data.config.category(category_id).is_none() {
            return Err(EditError::category(category_id));
        }
        let value = u8::try_from(value)
            .ok()
            .filter(|v| *v <= MAX_SCORE)
            .unwrap_or(0);
        self.project_mut(project_id)?
            .scores
            .set(category_id, value);
        Ok(value)
    }

    pub fn set_description(&mut self, project_id: &str, description: String) -> Result<(), EditError> {
        self.project_mut(project_id)?.description = description;
        Ok(())
    }

    pub fn set_judges_notes(&mut self, project_id: &str, notes: String) -> Result<(), EditError> {
        self.project_mut(project_id)?.judges_notes = Some(notes);
        Ok(())
    }

    pub fn set_title(&mut self, project_id: &str, title: String) -> Result<(), EditError> {
        self.project_mut(project_id)?.title = title;
        Ok(())
    }

    /// Add the award if the project lacks it, remove it otherwise.
    /// Returns whether the project holds the award afterwards.
    pub fn toggle_award(&mut self, project_id: &str, award_id: &str) -> Result<bool, EditError> {
        let award_known = self.data.config.award(award_id).is_some();
        let project = self.project_mut(project_id)?;

        if project.has_award(award_id) {
            project.special_awards.retain(|a| a != award_id);
            return Ok(false);
        }
        if !award_known {
            return Err(EditError::award(award_id));
        }
        project.special_awards.push(award_id.to_string());
        Ok(true)
    }

    /// Returns the id given to the new award.
    pub fn add_award(&mut self, name: &str, emoji: &str) -> Result<String, EditError> {
        let name = required(name, "Award name")?;
        let id = disambiguate(
            &award_slug(&name),
            self.data.config.special_awards.iter().map(|a| a.id.as_str()),
        );
        self.data.config.special_awards.push(SpecialAward {
            id: id.clone(),
            name,
            emoji: emoji.to_string(),
        });
        Ok(id)
    }

    pub fn update_award(&mut self, award_id: &str, name: &str, emoji: &str) -> Result<(), EditError> {
        let name = required(name, "Award name")?;
        let award = self
            .data
            .config
            .special_awards
            .iter_mut()
            .find(|a| a.id == award_id)
            .ok_or_else(|| EditError::award(award_id))?;
        award.name = name;
        award.emoji = emoji.to_string();
        Ok(())
    }

    /// Returns the id given to the new team.
    pub fn add_team(&mut self, name: &str, members: Vec<String>) -> Result<String, EditError> {
        let name = required(name, "Team name")?;
        let base = entity_slug(&name);
        if base.is_empty() {
            return Err(EditError::Validation(
                "Team name must contain at least one letter or digit".into(),
            ));
        }
        let id = disambiguate(&base, self.data.teams.iter().map(|t| t.id.as_str()));
        self.data.teams.push(Team {
            id: id.clone(),
            name,
            members: clean_members(members),
        });
        Ok(id)
    }

    pub fn update_team(&mut self, team_id: &str, name: &str, members: Vec<String>) -> Result<(), EditError> {
        let name = required(name, "Team name")?;
        let team = self
            .data
            .teams
            .iter_mut()
            .find(|t| t.id == team_id)
            .ok_or_else(|| EditError::team(team_id))?;
        team.name = name;
        team.members = clean_members(members);
        Ok(())
    }

    /// Returns the id given to the new project. Every configured category
    /// starts unscored.
    pub fn add_project(&mut self, title: &str, team_id: &str) -> Result<String, EditError> {
        let title = required(title, "Project title")?;
        if team_id.trim().is_empty() {
            return Err(EditError::Validation("A team must be selected".into()));
        }
        if self.data.team(team_id).is_none() {
            return Err(EditError::team(team_id));
        }
        let base = entity_slug(&title);
        if base.is_empty() {
            return Err(EditError::Validation(
                "Project title must contain at least one letter or digit".into(),
            ));
        }
        let id = disambiguate(&base, self.data.projects.iter().map(|p| p.id.as_str()));
        let scores = ScoreSet::unscored(self.data.config.categories.iter().map(|c| c.id.clone()));

        self.data.projects.push(Project {
            id: id.clone(),
            team_id: team_id.to_string(),
            title,
            description: String::new(),
            judges_notes: Some(String::new()),
            images: Vec::new(),
            links: Vec::new(),
            scores,
            special_awards: Vec::new(),
        });
        Ok(id)
    }

    /// Move a project to another team. Ownership is a single field, so the
    /// old and new team project lists change together.
    pub fn reassign_project_team(&mut self, project_id: &str, new_team_id: &str) -> Result<(), EditError> {
        if self.data.team(new_team_id).is_none() {
            return Err(EditError::team(new_team_id));
        }
        self.project_mut(project_id)?.team_id = new_team_id.to_string();
        Ok(())
    }

    /// A weight of `0` keeps the category but removes its influence on the
    /// overall score.
    pub fn set_category_weight(&mut self, category_id: &str, weight: f64) -> Result<(), EditError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(EditError::Validation(format!(
                "Category weight must be a non-negative number, got {weight}"
            )));
        }
        let category = self
            .data
            .config
            .categories
            .iter_mut()
            .find(|c| c.id == category_id)
            .ok_or_else(|| EditError::category(category_id))?;
        category.weight = weight;
        Ok(())
    }
}
