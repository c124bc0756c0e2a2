use std::cmp::Ordering;

use serde::Serialize;

use crate::model::{Category, HackathonData, HackathonInfo, Project, ScoreSet, SpecialAward};

/// Number of places on the published podium.
pub const PODIUM_SIZE: usize = 3;

/// Weighted mean of the scored categories, on the 0–5 scale.
///
/// Categories with a non-positive weight are ignored. A category left at `0`
/// counts as not yet judged and contributes to neither the sum nor the weight
/// total. Returns `0.0` when nothing weighted has been scored.
pub fn overall_score(scores: &ScoreSet, categories: &[Category]) -> f64 {
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    for category in categories.iter().filter(|c| c.weight > 0.0) {
        let score = scores.get(&category.id);
        if score > 0 {
            weighted_sum += f64::from(score) * category.weight;
            total_weight += category.weight;
        }
    }

    if total_weight == 0.0 {
        return 0.0;
    }
    weighted_sum / total_weight
}

/// A project paired with its overall score.
#[derive(Debug, Clone, Copy)]
pub struct RankedProject<'a> {
    pub project: &'a Project,
    pub overall: f64,
}

/// Projects ordered by overall score, highest first. Ties keep dataset order.
pub fn rank_projects(data: &HackathonData) -> Vec<RankedProject<'_>> {
    let mut ranked: Vec<RankedProject<'_>> = data
        .projects
        .iter()
        .map(|project| RankedProject {
            project,
            overall: overall_score(&project.scores, &data.config.categories),
        })
        .collect();
    // `sort_by` is stable, so the first-listed project wins a tie.
    ranked.sort_by(|a, b| b.overall.total_cmp(&a.overall));
    ranked
}

fn by_title(a: &Project, b: &Project) -> Ordering {
    a.title
        .to_lowercase()
        .cmp(&b.title.to_lowercase())
        .then_with(|| a.title.cmp(&b.title))
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// 1-based podium place; `None` outside the podium.
    pub place: Option<usize>,
    pub project_id: String,
    pub title: String,
    pub team_id: String,
    pub team_name: Option<String>,
    /// Only exposed once results are published.
    pub overall_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AwardWinner {
    pub project_id: String,
    pub title: String,
    pub awards: Vec<SpecialAward>,
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    pub hackathon_id: String,
    pub results_published: bool,
    pub podium: Vec<LeaderboardEntry>,
    pub others: Vec<LeaderboardEntry>,
    pub award_winners: Vec<AwardWinner>,
    /// Projects with a non-zero overall score.
    pub reviewed: usize,
    pub total: usize,
}

impl Leaderboard {
    /// Public standings. Until `results_published` is set no ranking leaks:
    /// there is no podium, no overall scores, and every project is listed by title.
    pub fn build(info: &HackathonInfo, data: &HackathonData) -> Self {
        let ranked = rank_projects(data);
        let published = info.results_published;

        let entry = |r: &RankedProject<'_>, place: Option<usize>| LeaderboardEntry {
            place,
            project_id: r.project.id.clone(),
            title: r.project.title.clone(),
            team_id: r.project.team_id.clone(),
            team_name: data.team(&r.project.team_id).map(|t| t.name.clone()),
            overall_score: published.then_some(r.overall),
        };

        let (podium, mut rest): (Vec<_>, Vec<_>) = if published {
            let split = ranked.len().min(PODIUM_SIZE);
            (ranked[..split].to_vec(), ranked[split..].to_vec())
        } else {
            (Vec::new(), ranked.clone())
        };
        // Unpublished standings are ordered by title, not score, so the
        // listing order cannot reveal the ranking.
        rest.sort_by(|a, b| by_title(a.project, b.project));

        let award_winners = data
            .projects
            .iter()
            .filter(|p| !p.special_awards.is_empty())
            .map(|p| AwardWinner {
                project_id: p.id.clone(),
                title: p.title.clone(),
                awards: p
                    .special_awards
                    .iter()
                    .filter_map(|id| data.config.award(id).cloned())
                    .collect(),
            })
            .collect();

        Self {
            hackathon_id: info.id.clone(),
            results_published: published,
            podium: podium
                .iter()
                .enumerate()
                .map(|(i, r)| entry(r, Some(i + 1)))
                .collect(),
            others: rest.iter().map(|r| entry(r, None)).collect(),
            award_winners,
            reviewed: ranked.iter().filter(|r| r.overall > 0.0).count(),
            total: ranked.len(),
        }
    }
}
