use async_trait::async_trait;
use ::redis::AsyncCommands;
use ::redis::aio::MultiplexedConnection;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use super::error::StoreError;
use super::traits::{BackendKind, HackathonStore};
use crate::model::{HackathonInfo, HackathonsList, RawHackathonData};

/// Key holding the registry.
pub const REGISTRY_KEY: &str = "hackathons-list";

/// Key holding one hackathon's dataset.
pub fn dataset_key(hackathon_id: &str) -> String {
    format!("hackathon:{hackathon_id}")
}

/// Remote key-value store. Each value is a JSON document.
///
/// Datasets are stored exactly as handed over; the repository passes the
/// live form so reads skip the decode step.
#[derive(Clone)]
pub struct RedisStore {
    conn: MultiplexedConnection,
}

impl RedisStore {
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = ::redis::Client::open(url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        info!("Connected to remote store");
        Ok(Self { conn })
    }

    async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        match value {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    async fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let text = serde_json::to_string(value)?;
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, text).await?;
        Ok(())
    }
}

#[async_trait]
impl HackathonStore for RedisStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Remote
    }

    async fn load_registry(&self) -> Result<Option<HackathonsList>, StoreError> {
        self.get_json(REGISTRY_KEY).await
    }

    async fn save_registry(&self, list: &HackathonsList) -> Result<(), StoreError> {
        self.set_json(REGISTRY_KEY, list).await
    }

    async fn load_raw(&self, info: &HackathonInfo) -> Result<Option<RawHackathonData>, StoreError> {
        self.get_json(&dataset_key(&info.id)).await
    }

    async fn save_raw(&self, info: &HackathonInfo, data: &RawHackathonData) -> Result<(), StoreError> {
        self.set_json(&dataset_key(&info.id), data).await
    }
}
