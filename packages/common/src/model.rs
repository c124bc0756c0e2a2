use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::codec::StoredScores;

/// Highest value a judge can award in a single category.
pub const MAX_SCORE: u8 = 5;

/// Category ids every dataset shipped with before categories became configurable.
/// Also the shape of the fallback score-set produced by a failed decode.
pub const DEFAULT_CATEGORY_IDS: &[&str] = &[
    "workScope",
    "polish",
    "funUseful",
    "creativity",
    "innovation",
    "doesItWork",
];

/// Registry entry for one hackathon event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HackathonInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub results_published: bool,
    /// Dataset file name inside the data directory.
    pub data_file: String,
}

/// Partial update of the editable registry fields. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HackathonInfoUpdate {
    pub name: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub emoji: Option<String>,
    pub results_published: Option<bool>,
}

impl HackathonInfoUpdate {
    pub fn apply_to(self, info: &mut HackathonInfo) {
        if let Some(name) = self.name {
            info.name = name;
        }
        if let Some(date) = self.date {
            info.date = date;
        }
        if let Some(description) = self.description {
            info.description = description;
        }
        if let Some(emoji) = self.emoji {
            info.emoji = emoji;
        }
        if let Some(published) = self.results_published {
            info.results_published = published;
        }
    }
}

/// The registry of known hackathons, in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HackathonsList {
    pub hackathons: Vec<HackathonInfo>,
}

impl HackathonsList {
    pub fn find(&self, id: &str) -> Option<&HackathonInfo> {
        self.hackathons.iter().find(|h| h.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut HackathonInfo> {
        self.hackathons.iter_mut().find(|h| h.id == id)
    }
}

/// A team. Which projects it owns is not stored here; see
/// [`HackathonData::team_project_ids`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Link {
    pub label: String,
    pub url: String,
}

/// Judged values for one project, keyed by category id.
///
/// A missing key reads as `0` ("not yet scored"). Keys are kept sorted so the
/// serialized form is canonical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(transparent)]
pub struct ScoreSet(BTreeMap<String, u8>);

impl ScoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every given category at `0`.
    pub fn unscored<I, S>(category_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(category_ids.into_iter().map(|id| (id.into(), 0)).collect())
    }

    /// The fixed score-set substituted for undecodable score fields.
    pub fn fallback() -> Self {
        Self::unscored(DEFAULT_CATEGORY_IDS.iter().copied())
    }

    pub fn get(&self, category_id: &str) -> u8 {
        self.0.get(category_id).copied().unwrap_or(0)
    }

    pub fn set(&mut self, category_id: impl Into<String>, value: u8) {
        self.0.insert(category_id.into(), value);
    }

    /// Reset every value above [`MAX_SCORE`] to `0` and return the categories
    /// that were reset.
    pub fn clear_out_of_range(&mut self) -> Vec<String> {
        let mut cleared = Vec::new();
        for (category_id, value) in self.0.iter_mut() {
            if *value > MAX_SCORE {
                *value = 0;
                cleared.push(category_id.clone());
            }
        }
        cleared
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u8)> for ScoreSet {
    fn from_iter<T: IntoIterator<Item = (S, u8)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A project. Generic over the score field so the same shape serves both the
/// in-memory form (`ScoreSet`) and the persisted form ([`StoredScores`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project<S = ScoreSet> {
    pub id: String,
    pub team_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub judges_notes: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub links: Vec<Link>,
    pub scores: S,
    #[serde(default)]
    pub special_awards: Vec<String>,
}

impl<S> Project<S> {
    pub fn map_scores<T>(self, f: impl FnOnce(S) -> T) -> Project<T> {
        Project {
            id: self.id,
            team_id: self.team_id,
            title: self.title,
            description: self.description,
            judges_notes: self.judges_notes,
            images: self.images,
            links: self.links,
            scores: f(self.scores),
            special_awards: self.special_awards,
        }
    }

    pub fn has_award(&self, award_id: &str) -> bool {
        self.special_awards.iter().any(|a| a == award_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Category {
    pub id: String,
    pub label: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SpecialAward {
    pub id: String,
    pub name: String,
    pub emoji: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub categories: Vec<Category>,
    #[serde(default)]
    pub special_awards: Vec<SpecialAward>,
}

impl Default for Config {
    fn default() -> Self {
        let labels = [
            "Work Scope",
            "Polish",
            "Fun / Useful",
            "Creativity",
            "Innovation",
            "Does It Work",
        ];
        Self {
            categories: DEFAULT_CATEGORY_IDS
                .iter()
                .zip(labels)
                .map(|(id, label)| Category {
                    id: (*id).to_string(),
                    label: label.to_string(),
                    weight: 1.0,
                })
                .collect(),
            special_awards: Vec::new(),
        }
    }
}

impl Config {
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn award(&self, id: &str) -> Option<&SpecialAward> {
        self.special_awards.iter().find(|a| a.id == id)
    }
}

/// The full mutable dataset for one hackathon, with live score-sets.
///
/// Project ownership lives only in `Project::team_id`; a team's project list
/// is always derived from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HackathonData {
    pub teams: Vec<Team>,
    pub projects: Vec<Project>,
    pub config: Config,
}

impl HackathonData {
    pub fn team(&self, team_id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    pub fn project(&self, project_id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == project_id)
    }

    pub fn project_mut(&mut self, project_id: &str) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id == project_id)
    }

    pub fn team_projects<'a>(&'a self, team_id: &'a str) -> impl Iterator<Item = &'a Project> {
        self.projects.iter().filter(move |p| p.team_id == team_id)
    }

    /// Ids of the projects owned by `team_id`, in project order.
    pub fn team_project_ids(&self, team_id: &str) -> Vec<String> {
        self.team_projects(team_id).map(|p| p.id.clone()).collect()
    }
}

/// Persisted form of a team: the team plus its (derived) project id list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TeamRecord {
    #[serde(flatten)]
    pub team: Team,
    #[serde(default)]
    pub projects: Vec<String>,
}

/// Persisted form of a dataset, as found in data files and the remote store.
///
/// Score fields may be encoded strings or live objects, possibly mixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RawHackathonData {
    pub teams: Vec<TeamRecord>,
    pub projects: Vec<Project<StoredScores>>,
    pub config: Config,
}

impl RawHackathonData {
    /// Persisted form with every score field held live.
    pub fn live(data: &HackathonData) -> Self {
        Self::from_data(data, |scores| StoredScores::Live(scores.clone()))
    }

    /// Persisted form with every score field encoded.
    pub fn encoded(data: &HackathonData) -> Self {
        Self::from_data(data, StoredScores::encode)
    }

    fn from_data(data: &HackathonData, store: impl Fn(&ScoreSet) -> StoredScores) -> Self {
        Self {
            teams: data
                .teams
                .iter()
                .map(|team| TeamRecord {
                    team: team.clone(),
                    projects: data.team_project_ids(&team.id),
                })
                .collect(),
            projects: data
                .projects
                .iter()
                .map(|p| p.clone().map_scores(|scores| store(&scores)))
                .collect(),
            config: data.config.clone(),
        }
    }

    /// Re-encode any live score fields in place.
    pub fn into_encoded(self) -> Self {
        Self {
            projects: self
                .projects
                .into_iter()
                .map(|p| p.map_scores(StoredScores::into_encoded))
                .collect(),
            ..self
        }
    }

    /// Decode score fields and drop the stored team project lists in favour of
    /// the ownership recorded on each project.
    pub fn decode(self) -> HackathonData {
        let projects: Vec<Project> = self
            .projects
            .into_iter()
            .map(|p| {
                let mut project = p.map_scores(StoredScores::into_live);
                let cleared = project.scores.clear_out_of_range();
                if !cleared.is_empty() {
                    warn!(
                        project_id = %project.id,
                        categories = ?cleared,
                        "Stored scores above the maximum were reset to 0"
                    );
                }
                project
            })
            .collect();

        let team_ids: BTreeSet<&str> = self.teams.iter().map(|t| t.team.id.as_str()).collect();
        for project in &projects {
            if !team_ids.contains(project.team_id.as_str()) {
                warn!(
                    project_id = %project.id,
                    team_id = %project.team_id,
                    "Stored project refers to a team that does not exist"
                );
            }
        }

        let teams = self
            .teams
            .into_iter()
            .map(|record| {
                let stored: BTreeSet<&str> = record.projects.iter().map(String::as_str).collect();
                let derived: BTreeSet<&str> = projects
                    .iter()
                    .filter(|p| p.team_id == record.team.id)
                    .map(|p| p.id.as_str())
                    .collect();
                if stored != derived {
                    warn!(
                        team_id = %record.team.id,
                        "Stored team project list disagrees with project ownership; using ownership"
                    );
                }
                record.team
            })
            .collect();

        HackathonData {
            teams,
            projects,
            config: self.config,
        }
    }
}
