use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use common::model::{HackathonsList, RawHackathonData};
use common::storage::HackathonStore;
use common::storage::filesystem::FilesystemStore;
use tracing::{info, warn};

const ADMIN_PASSWORD_HEADER: &str = "X-Admin-Password";

#[derive(Debug, Default)]
pub struct SyncReport {
    pub saved: Vec<String>,
    pub failed: Vec<String>,
}

/// Download the registry and every dataset export from `server` into `data_dir`.
///
/// A dataset that fails to download is reported and skipped; a registry that
/// fails to download aborts the sync before anything is written.
pub async fn run(server: &str, password: &str, data_dir: PathBuf, registry_file: &str) -> Result<SyncReport> {
    let base = server.trim_end_matches('/');
    let client = reqwest::Client::new();
    let files = FilesystemStore::new(data_dir, registry_file);

    let res = client
        .get(format!("{base}/api/v1/hackathons"))
        .send()
        .await
        .context("Failed to reach the server")?;
    if !res.status().is_success() {
        bail!("Failed to download hackathons list: {}", res.status());
    }
    let list: HackathonsList = res.json().await.context("Malformed hackathons list")?;

    files.save_registry(&list).await?;
    info!(hackathons = list.hackathons.len(), "Saved registry");

    let mut report = SyncReport::default();
    for hackathon in &list.hackathons {
        let url = format!("{base}/api/v1/hackathons/{}/export", hackathon.id);
        let result = async {
            let res = client
                .get(&url)
                .header(ADMIN_PASSWORD_HEADER, password)
                .send()
                .await?;
            if !res.status().is_success() {
                bail!("server answered {}", res.status());
            }
            let data: RawHackathonData = res.json().await?;
            files.save_raw(hackathon, &data).await?;
            Ok::<(), anyhow::Error>(())
        }
        .await;

        match result {
            Ok(()) => {
                info!(hackathon_id = %hackathon.id, file = %hackathon.data_file, "Saved dataset");
                report.saved.push(hackathon.id.clone());
            }
            Err(e) => {
                warn!(hackathon_id = %hackathon.id, error = %e, "Failed to download dataset");
                report.failed.push(hackathon.id.clone());
            }
        }
    }

    Ok(report)
}
