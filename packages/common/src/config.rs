use std::path::PathBuf;

use serde::Deserialize;

/// File backend configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageAppConfig {
    /// Directory holding the registry and dataset files. Default: "./data".
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Registry file name inside `data_dir`. Default: "hackathons.json".
    #[serde(default = "default_registry_file")]
    pub registry_file: String,
    /// Also write the encoded dataset to the file backend when the remote
    /// backend is active. Default: true.
    #[serde(default = "default_mirror_to_file")]
    pub mirror_to_file: bool,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}
fn default_registry_file() -> String {
    "hackathons.json".into()
}
fn default_mirror_to_file() -> bool {
    true
}

impl Default for StorageAppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            registry_file: default_registry_file(),
            mirror_to_file: default_mirror_to_file(),
        }
    }
}

/// Remote key-value backend configuration. Its presence selects the remote
/// backend for the whole process.
#[derive(Debug, Deserialize, Clone)]
pub struct RedisAppConfig {
    /// Connection URL, e.g. "redis://localhost:6379".
    pub url: String,
}
