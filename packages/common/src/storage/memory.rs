use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use super::error::StoreError;
use super::traits::{BackendKind, HackathonStore};
use crate::model::{HackathonInfo, HackathonsList, RawHackathonData};

#[derive(Default)]
struct Contents {
    registry: Option<HackathonsList>,
    datasets: HashMap<String, RawHackathonData>,
}

/// In-process store for tests. Keeps whatever it is handed, keyed by hackathon id,
/// and can be switched into a failing state to simulate a lost connection.
pub struct MemoryStore {
    kind: BackendKind,
    contents: Mutex<Contents>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new(kind: BackendKind) -> Self {
        Self {
            kind,
            contents: Mutex::new(Contents::default()),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn registry(&self) -> Option<HackathonsList> {
        self.lock().registry.clone()
    }

    pub fn dataset(&self, hackathon_id: &str) -> Option<RawHackathonData> {
        self.lock().datasets.get(hackathon_id).cloned()
    }

    pub fn insert_registry(&self, list: HackathonsList) {
        self.lock().registry = Some(list);
    }

    pub fn insert_dataset(&self, hackathon_id: impl Into<String>, data: RawHackathonData) {
        self.lock().datasets.insert(hackathon_id.into(), data);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Contents> {
        self.contents.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!("{} store offline", self.kind)));
        }
        Ok(())
    }
}

#[async_trait]
impl HackathonStore for MemoryStore {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    async fn load_registry(&self) -> Result<Option<HackathonsList>, StoreError> {
        self.check()?;
        Ok(self.registry())
    }

    async fn save_registry(&self, list: &HackathonsList) -> Result<(), StoreError> {
        self.check()?;
        self.insert_registry(list.clone());
        Ok(())
    }

    async fn load_raw(&self, info: &HackathonInfo) -> Result<Option<RawHackathonData>, StoreError> {
        self.check()?;
        Ok(self.dataset(&info.id))
    }

    async fn save_raw(&self, info: &HackathonInfo, data: &RawHackathonData) -> Result<(), StoreError> {
        self.check()?;
        self.insert_dataset(info.id.clone(), data.clone());
        Ok(())
    }
}
