//! Read and write access to hackathon data across the configured backends.
//!
//! The remote store, when configured, is the active backend for the whole
//! process. The file store is always present: it serves reads the remote store
//! has no entry for, and receives an encoded mirror of every remote write.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::model::{
    HackathonData, HackathonInfo, HackathonInfoUpdate, HackathonsList, Project, RawHackathonData,
    Team,
};
use crate::storage::{BackendKind, HackathonStore, StoreError};

/// Every hackathon in one document, scores encoded.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct ExportBundle {
    pub hackathons: Vec<HackathonInfo>,
    pub data: BTreeMap<String, RawHackathonData>,
}

/// Outcome of copying the file store into the remote store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
    pub seeded: Vec<String>,
    /// Registry entries whose data file was missing.
    pub skipped: Vec<String>,
}

pub struct Repository {
    files: Arc<dyn HackathonStore>,
    remote: Option<Arc<dyn HackathonStore>>,
    mirror_to_file: bool,
}

impl Repository {
    /// Repository backed by the file store alone.
    pub fn new(files: Arc<dyn HackathonStore>) -> Self {
        Self {
            files,
            remote: None,
            mirror_to_file: true,
        }
    }

    /// Make `remote` the active backend.
    pub fn with_remote(mut self, remote: Arc<dyn HackathonStore>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn mirror_to_file(mut self, enabled: bool) -> Self {
        self.mirror_to_file = enabled;
        self
    }

    pub fn active_backend(&self) -> BackendKind {
        self.active().kind()
    }

    fn active(&self) -> &dyn HackathonStore {
        self.remote.as_deref().unwrap_or(self.files.as_ref())
    }

    pub async fn hackathons_list(&self) -> Result<HackathonsList, StoreError> {
        if let Some(remote) = &self.remote {
            if let Some(list) = remote.load_registry().await? {
                return Ok(list);
            }
            warn!("Remote store has no registry; reading it from the file store");
        }
        self.files
            .load_registry()
            .await?
            .ok_or_else(|| StoreError::NotFound("hackathon registry".into()))
    }

    pub async fn hackathon_info(&self, hackathon_id: &str) -> Result<HackathonInfo, StoreError> {
        self.hackathons_list()
            .await?
            .find(hackathon_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("hackathon '{hackathon_id}'")))
    }

    async fn load_raw(&self, info: &HackathonInfo) -> Result<RawHackathonData, StoreError> {
        if let Some(remote) = &self.remote {
            if let Some(raw) = remote.load_raw(info).await? {
                return Ok(raw);
            }
            warn!(
                hackathon_id = %info.id,
                "Remote store has no dataset; falling back to the file store"
            );
        }
        self.files
            .load_raw(info)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("dataset for hackathon '{}'", info.id)))
    }

    /// Load a dataset with every score field decoded.
    pub async fn get_data(&self, hackathon_id: &str) -> Result<HackathonData, StoreError> {
        let info = self.hackathon_info(hackathon_id).await?;
        Ok(self.load_raw(&info).await?.decode())
    }

    pub async fn get_team(&self, hackathon_id: &str, team_id: &str) -> Result<Option<Team>, StoreError> {
        let data = self.get_data(hackathon_id).await?;
        Ok(data.team(team_id).cloned())
    }

    pub async fn get_project(
        &self,
        hackathon_id: &str,
        project_id: &str,
    ) -> Result<Option<Project>, StoreError> {
        let data = self.get_data(hackathon_id).await?;
        Ok(data.project(project_id).cloned())
    }

    pub async fn get_team_projects(
        &self,
        hackathon_id: &str,
        team_id: &str,
    ) -> Result<Vec<Project>, StoreError> {
        let data = self.get_data(hackathon_id).await?;
        Ok(data.team_projects(team_id).cloned().collect())
    }

    pub async fn save_hackathons_list(&self, list: &HackathonsList) -> Result<(), StoreError> {
        self.active().save_registry(list).await?;
        if self.remote.is_some() && self.mirror_to_file {
            if let Err(e) = self.files.save_registry(list).await {
                warn!(error = %e, "Failed to mirror registry to the file store");
            }
        }
        info!(hackathons = list.hackathons.len(), "Saved hackathon registry");
        Ok(())
    }

    /// Apply `update` to one registry entry and save the registry.
    pub async fn update_hackathon_info(
        &self,
        hackathon_id: &str,
        update: HackathonInfoUpdate,
    ) -> Result<HackathonInfo, StoreError> {
        let mut list = self.hackathons_list().await?;
        let info = list
            .find_mut(hackathon_id)
            .ok_or_else(|| StoreError::NotFound(format!("hackathon '{hackathon_id}'")))?;
        update.apply_to(info);
        let updated = info.clone();
        self.save_hackathons_list(&list).await?;
        Ok(updated)
    }

    /// Replace the stored dataset with `data`.
    ///
    /// The remote store receives live scores. The file store always receives
    /// encoded scores, either as the active backend or as the mirror.
    pub async fn save_data(&self, hackathon_id: &str, data: &HackathonData) -> Result<(), StoreError> {
        let info = self.hackathon_info(hackathon_id).await?;

        match &self.remote {
            Some(remote) => {
                remote.save_raw(&info, &RawHackathonData::live(data)).await?;
                if self.mirror_to_file {
                    if let Err(e) = self.files.save_raw(&info, &RawHackathonData::encoded(data)).await {
                        warn!(
                            hackathon_id = %info.id,
                            error = %e,
                            "Failed to mirror dataset to the file store"
                        );
                    }
                }
            }
            None => {
                self.files.save_raw(&info, &RawHackathonData::encoded(data)).await?;
            }
        }

        info!(
            hackathon_id = %info.id,
            backend = %self.active_backend(),
            teams = data.teams.len(),
            projects = data.projects.len(),
            "Saved hackathon data"
        );
        Ok(())
    }

    /// The dataset in its file form, ready to be written to a data file.
    pub async fn export_data(&self, hackathon_id: &str) -> Result<RawHackathonData, StoreError> {
        let data = self.get_data(hackathon_id).await?;
        Ok(RawHackathonData::encoded(&data))
    }

    pub async fn export_all(&self) -> Result<ExportBundle, StoreError> {
        let list = self.hackathons_list().await?;
        let mut data = BTreeMap::new();
        for info in &list.hackathons {
            let raw = self.load_raw(info).await?.decode();
            data.insert(info.id.clone(), RawHackathonData::encoded(&raw));
        }
        Ok(ExportBundle {
            hackathons: list.hackathons,
            data,
        })
    }

    /// Copy the file registry and every file dataset into the remote store.
    pub async fn seed_remote_from_files(&self) -> Result<SeedReport, StoreError> {
        let remote = self
            .remote
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("no remote store configured".into()))?;

        let list = self
            .files
            .load_registry()
            .await?
            .ok_or_else(|| StoreError::NotFound("hackathon registry".into()))?;
        remote.save_registry(&list).await?;

        let mut report = SeedReport::default();
        for info in &list.hackathons {
            match self.files.load_raw(info).await? {
                Some(raw) => {
                    let live = RawHackathonData::live(&raw.decode());
                    remote.save_raw(info, &live).await?;
                    report.seeded.push(info.id.clone());
                }
                None => {
                    warn!(hackathon_id = %info.id, "No data file to seed from");
                    report.skipped.push(info.id.clone());
                }
            }
        }

        info!(
            seeded = report.seeded.len(),
            skipped = report.skipped.len(),
            "Seeded remote store from files"
        );
        Ok(report)
    }
}
