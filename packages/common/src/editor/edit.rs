use serde::{Deserialize, Serialize};
use serde_json::Number;
use thiserror::Error;

use super::{DeletionReport, EditError, Editor};

fn default_award_emoji() -> String {
    "🏆".into()
}

/// Score input as typed by a judge. Fractions are truncated; numbers too large
/// for an `i64` have no integer reading.
fn score_input(value: &Number) -> Option<i64> {
    if let Some(v) = value.as_i64() {
        return Some(v);
    }
    value
        .as_f64()
        .filter(|v| v.is_finite() && v.abs() < i64::MAX as f64)
        .map(|v| v.trunc() as i64)
}

/// One admin edit, as submitted by the admin UI.
///
/// Destructive edits carry `confirmed`; without it they are rejected with the
/// warning the operator has to accept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Edit {
    SelectProject {
        project_id: Option<String>,
    },
    SetScore {
        project_id: String,
        category_id: String,
        /// Any JSON number; values that are not a score are stored as `0`.
        value: Number,
    },
    SetDescription {
        project_id: String,
        description: String,
    },
    SetJudgesNotes {
        project_id: String,
        judges_notes: String,
    },
    SetTitle {
        project_id: String,
        title: String,
    },
    ToggleAward {
        project_id: String,
        award_id: String,
    },
    AddAward {
        name: String,
        #[serde(default = "default_award_emoji")]
        emoji: String,
    },
    UpdateAward {
        id: String,
        name: String,
        emoji: String,
    },
    DeleteAward {
        id: String,
        #[serde(default)]
        confirmed: bool,
    },
    AddTeam {
        name: String,
        #[serde(default)]
        members: Vec<String>,
    },
    UpdateTeam {
        id: String,
        name: String,
        #[serde(default)]
        members: Vec<String>,
    },
    DeleteTeam {
        id: String,
        #[serde(default)]
        confirmed: bool,
    },
    AddProject {
        title: String,
        team_id: String,
    },
    DeleteProject {
        id: String,
        #[serde(default)]
        confirmed: bool,
    },
    ReassignProjectTeam {
        project_id: String,
        team_id: String,
    },
    SetCategoryWeight {
        category_id: String,
        weight: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EditOutcome {
    Updated,
    Created { id: String },
    Scored { value: u8 },
    Toggled { awarded: bool },
    Deleted(DeletionReport),
}

/// A batch edit failed; nothing from the batch was kept.
#[derive(Debug, Error, PartialEq)]
#[error("edit #{index} rejected: {error}")]
pub struct BatchRejected {
    pub index: usize,
    #[source]
    pub error: EditError,
}

impl Editor {
    pub fn apply(&mut self, edit: Edit) -> Result<EditOutcome, EditError> {
        use EditOutcome::{Created, Deleted, Scored, Toggled, Updated};

        match edit {
            Edit::SelectProject { project_id } => {
                self.select_project(project_id.as_deref()).map(|_| Updated)
            }
            Edit::SetScore {
                project_id,
                category_id,
                value,
            } => self
                .set_score(&project_id, &category_id, score_input(&value).unwrap_or(0))
                .map(|value| Scored { value }),
            Edit::SetDescription {
                project_id,
                description,
            } => self.set_description(&project_id, description).map(|_| Updated),
            Edit::SetJudgesNotes {
                project_id,
                judges_notes,
            } => self.set_judges_notes(&project_id, judges_notes).map(|_| Updated),
            Edit::SetTitle { project_id, title } => {
                self.set_title(&project_id, title).map(|_| Updated)
            }
            Edit::ToggleAward {
                project_id,
                award_id,
            } => self
                .toggle_award(&project_id, &award_id)
                .map(|awarded| Toggled { awarded }),
            Edit::AddAward { name, emoji } => self.add_award(&name, &emoji).map(|id| Created { id }),
            Edit::UpdateAward { id, name, emoji } => {
                self.update_award(&id, &name, &emoji).map(|_| Updated)
            }
            Edit::DeleteAward { id, confirmed } => {
                let prompt = self.prompt_award_deletion(&id)?;
                self.delete_if_confirmed(prompt, confirmed).map(Deleted)
            }
            Edit::AddTeam { name, members } => self.add_team(&name, members).map(|id| Created { id }),
            Edit::UpdateTeam { id, name, members } => {
                self.update_team(&id, &name, members).map(|_| Updated)
            }
            Edit::DeleteTeam { id, confirmed } => {
                let prompt = self.prompt_team_deletion(&id)?;
                self.delete_if_confirmed(prompt, confirmed).map(Deleted)
            }
            Edit::AddProject { title, team_id } => {
                self.add_project(&title, &team_id).map(|id| Created { id })
            }
            Edit::DeleteProject { id, confirmed } => {
                let prompt = self.prompt_project_deletion(&id)?;
                self.delete_if_confirmed(prompt, confirmed).map(Deleted)
            }
            Edit::ReassignProjectTeam {
                project_id,
                team_id,
            } => self
                .reassign_project_team(&project_id, &team_id)
                .map(|_| Updated),
            Edit::SetCategoryWeight {
                category_id,
                weight,
            } => self.set_category_weight(&category_id, weight).map(|_| Updated),
        }
    }

    fn delete_if_confirmed(
        &mut self,
        prompt: super::DeletionPrompt,
        confirmed: bool,
    ) -> Result<DeletionReport, EditError> {
        if !confirmed {
            return Err(EditError::ConfirmationRequired(prompt.message().to_string()));
        }
        self.delete(prompt.confirm())
    }

    /// Apply edits in order, all or nothing.
    pub fn apply_all(
        &mut self,
        edits: impl IntoIterator<Item = Edit>,
    ) -> Result<Vec<EditOutcome>, BatchRejected> {
        let snapshot = self.clone();
        let mut outcomes = Vec::new();

        for (index, edit) in edits.into_iter().enumerate() {
            match self.apply(edit) {
                Ok(outcome) => outcomes.push(outcome),
                Err(error) => {
                    *self = snapshot;
                    return Err(BatchRejected { index, error });
                }
            }
        }
        Ok(outcomes)
    }
}
