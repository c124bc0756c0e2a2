use std::fmt;

use async_trait::async_trait;

use super::error::StoreError;
use crate::model::{HackathonInfo, HackathonsList, RawHackathonData};

/// Which kind of backend a store is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Durable remote key-value store.
    Remote,
    /// Local structured files.
    File,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote => write!(f, "remote"),
            Self::File => write!(f, "file"),
        }
    }
}

/// Whole-snapshot persistence of the registry and per-hackathon datasets.
///
/// Reads report an absent entry as `Ok(None)`; `Err` is reserved for genuine
/// failures (transport, I/O, malformed records) so callers can tell the two apart.
/// Writes replace the previous snapshot entirely.
#[async_trait]
pub trait HackathonStore: Send + Sync {
    fn kind(&self) -> BackendKind;

    async fn load_registry(&self) -> Result<Option<HackathonsList>, StoreError>;

    async fn save_registry(&self, list: &HackathonsList) -> Result<(), StoreError>;

    /// Load a dataset with its score fields as stored.
    async fn load_raw(&self, info: &HackathonInfo) -> Result<Option<RawHackathonData>, StoreError>;

    /// Replace a dataset. Score fields are persisted in this backend's own form.
    async fn save_raw(&self, info: &HackathonInfo, data: &RawHackathonData) -> Result<(), StoreError>;
}
