//! Offline tooling for hackathon data files.

mod scores;
mod sync;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download the registry and every dataset from a running server,
    /// overwriting the local data files.
    Sync {
        /// Base URL of the server, e.g. "https://scores.example.com"
        #[arg(long, env = "HACKBOARD_SERVER_URL")]
        server: String,

        /// Admin password
        #[arg(long, env = "HACKBOARD_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,

        /// Directory holding the data files
        #[arg(long, default_value = "./data")]
        data_dir: PathBuf,

        /// Registry file name inside the data directory
        #[arg(long, default_value = "hackathons.json")]
        registry_file: String,
    },

    /// Encode every plain score field in the data files.
    Obfuscate {
        #[arg(long, default_value = "./data")]
        data_dir: PathBuf,

        #[arg(long, default_value = "hackathons.json")]
        registry_file: String,
    },

    /// Decode every encoded score field in the data files.
    Deobfuscate {
        #[arg(long, default_value = "./data")]
        data_dir: PathBuf,

        #[arg(long, default_value = "hackathons.json")]
        registry_file: String,
    },

    /// Print the obfuscated form of a password.
    EncodePassword { password: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Command::Sync {
            server,
            password,
            data_dir,
            registry_file,
        } => {
            let report = sync::run(&server, &password, data_dir, &registry_file).await?;
            println!(
                "Synced {} hackathon(s), {} failed",
                report.saved.len(),
                report.failed.len()
            );
        }
        Command::Obfuscate {
            data_dir,
            registry_file,
        } => {
            let converted = scores::rewrite_data_dir(&data_dir, &registry_file, scores::Direction::Encode)?;
            println!("Obfuscated {converted} project score field(s)");
        }
        Command::Deobfuscate {
            data_dir,
            registry_file,
        } => {
            let converted = scores::rewrite_data_dir(&data_dir, &registry_file, scores::Direction::Decode)?;
            println!("Deobfuscated {converted} project score field(s)");
        }
        Command::EncodePassword { password } => {
            println!("{}", common::auth::encode_password(&password));
        }
    }

    Ok(())
}
