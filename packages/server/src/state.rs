use std::sync::Arc;

use common::Repository;
use common::auth::AdminCredential;
use common::storage::filesystem::FilesystemStore;
use common::storage::redis::RedisStore;
use tracing::info;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub credential: Arc<AdminCredential>,
    pub config: AppConfig,
}

impl AppState {
    /// Build the backends the configuration asks for. The choice of active
    /// backend is made here, once, for the life of the process.
    pub async fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let files = Arc::new(FilesystemStore::new(
            config.storage.data_dir.clone(),
            config.storage.registry_file.clone(),
        ));
        let mut repo = Repository::new(files).mirror_to_file(config.storage.mirror_to_file);

        if let Some(redis) = &config.redis {
            let remote = RedisStore::connect(&redis.url).await?;
            repo = repo.with_remote(Arc::new(remote));
        }
        info!(
            backend = %repo.active_backend(),
            data_dir = %config.storage.data_dir.display(),
            "Storage initialized"
        );

        Ok(Self {
            repo: Arc::new(repo),
            credential: Arc::new(AdminCredential::new(config.auth.admin_password.clone())),
            config,
        })
    }
}
