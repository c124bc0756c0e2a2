use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;

use super::error::StoreError;
use super::traits::{BackendKind, HackathonStore};
use crate::model::{HackathonInfo, HackathonsList, RawHackathonData};

/// File-backed store: one registry file plus one JSON file per hackathon,
/// all inside `data_dir`.
///
/// Datasets are always written with encoded score fields. Every write goes to
/// a temporary file first and is renamed over the target, so readers see
/// either the old file or the new one.
pub struct FilesystemStore {
    data_dir: PathBuf,
    registry_file: String,
}

impl FilesystemStore {
    pub fn new(data_dir: impl Into<PathBuf>, registry_file: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            registry_file: registry_file.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn registry_path(&self) -> PathBuf {
        self.data_dir.join(&self.registry_file)
    }

    /// Resolve a registry entry's data file, refusing anything but a flat file name.
    fn data_path(&self, info: &HackathonInfo) -> Result<PathBuf, StoreError> {
        let name = info.data_file.trim();
        if name.is_empty()
            || name.contains('/')
            || name.contains('\\')
            || name.contains('\0')
            || name.starts_with('.')
        {
            return Err(StoreError::InvalidPath(info.data_file.clone()));
        }
        Ok(self.data_dir.join(name))
    }

    /// Path for a temporary file during writes. Kept next to the target so the
    /// final rename stays on one filesystem.
    fn temp_path(&self, target: &Path) -> PathBuf {
        let file_name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.data_dir
            .join(format!(".{file_name}.{}.tmp", uuid::Uuid::new_v4()))
    }

    async fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>, StoreError> {
        match fs::read(path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(value)?;
        fs::create_dir_all(&self.data_dir).await?;

        let temp_path = self.temp_path(path);
        if let Err(e) = fs::write(&temp_path, &bytes).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp_path, path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl HackathonStore for FilesystemStore {
    fn kind(&self) -> BackendKind {
        BackendKind::File
    }

    async fn load_registry(&self) -> Result<Option<HackathonsList>, StoreError> {
        self.read_json(&self.registry_path()).await
    }

    async fn save_registry(&self, list: &HackathonsList) -> Result<(), StoreError> {
        self.write_json(&self.registry_path(), list).await
    }

    async fn load_raw(&self, info: &HackathonInfo) -> Result<Option<RawHackathonData>, StoreError> {
        let path = self.data_path(info)?;
        self.read_json(&path).await
    }

    async fn save_raw(&self, info: &HackathonInfo, data: &RawHackathonData) -> Result<(), StoreError> {
        let path = self.data_path(info)?;
        let encoded = data.clone().into_encoded();
        self.write_json(&path, &encoded).await
    }
}
