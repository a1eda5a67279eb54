//! `coslift` — upload local video files to IBM COS through the local
//! transfer daemon.

mod bridge;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use coslift_daemon_client::TransferdClient;
use coslift_discovery::{MediaFilter, SourceAsset};
use coslift_uploader::{
    MonitorOutcome, UploadConfig, UploadError, UploadSession, build_transfer_spec,
    destination_hint,
};

const MB: f64 = 1024.0 * 1024.0;

#[derive(Parser)]
#[command(
    name = "coslift",
    version,
    about = "Upload video files to IBM COS through the local Aspera transfer daemon"
)]
struct Cli {
    /// Directory to scan (or a single video file)
    #[arg(default_value = ".")]
    directory: PathBuf,

    /// Print the transfer spec without uploading
    #[arg(long)]
    dry_run: bool,

    /// Transfer daemon address as host:port
    #[arg(long, default_value = "localhost:55002")]
    transfer_manager_host: String,

    /// Do not create a destination folder marker (sets file_system.create_dir=false)
    #[arg(long)]
    no_folder_marker: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Credentials come from a .env file when present; never from code.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            if let Some(hint) = destination_hint(&e.to_string()) {
                warn!("hint: {hint}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), UploadError> {
    let mut config = UploadConfig::from_env();
    config.create_dir = !cli.no_folder_marker;

    let found = coslift_discovery::discover(&cli.directory, &MediaFilter::default());
    if found.is_empty() {
        return Err(UploadError::DiscoveryEmpty(cli.directory));
    }

    let (assets, rejections) = coslift_discovery::validate(&found);
    for rejection in &rejections {
        warn!(path = %rejection.path.display(), "{}", rejection.reason);
    }
    if assets.is_empty() {
        return Err(UploadError::NoValidSources);
    }

    let total_bytes = log_listing(&assets);
    let spec = build_transfer_spec(&config, &assets);

    if cli.dry_run {
        // Previewing does not require credentials.
        println!("{}", serde_json::to_string_pretty(&spec)?);
        info!("dry run complete");
        return Ok(());
    }

    // The daemon must already be running locally; a failed connect is a
    // setup error, not a transient one.
    let client = TransferdClient::connect(&cli.transfer_manager_host)
        .await
        .map_err(|e| UploadError::Connection(e.to_string()))?;
    let bridge = bridge::DaemonBridge::new(client);

    let session = UploadSession::new(&bridge, &config);
    match session.run(&spec, total_bytes).await? {
        MonitorOutcome::Completed => {
            info!("upload completed successfully");
            Ok(())
        }
        MonitorOutcome::Failed => Err(UploadError::Monitoring(
            "transfer reached the Failed state".into(),
        )),
        MonitorOutcome::TimedOut => {
            warn!("stopped watching after the watchdog window; the transfer may still be running");
            Ok(())
        }
    }
}

/// Logs the upload listing and returns the total size in bytes.
fn log_listing(assets: &[SourceAsset]) -> u64 {
    info!("found {} video(s) to upload", assets.len());
    let mut total: u64 = 0;
    for asset in assets {
        match asset.size_bytes {
            Some(size) => {
                info!("  - {} ({:.1} MB)", asset.absolute_path.display(), size as f64 / MB);
                total += size;
            }
            None => info!("  - {}", asset.absolute_path.display()),
        }
    }
    info!("total size: {:.1} MB", total as f64 / MB);
    total
}
