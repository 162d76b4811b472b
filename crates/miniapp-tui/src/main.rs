//! Mini app terminal client entry point.
//!
//! # Usage
//!
//! ```bash
//! # Launch as user 42 inside a simulated host
//! miniapp-tui --init-data 'user=%7B%22id%22%3A42%2C%22first_name%22%3A%22Ada%22%7D&auth_date=1700000000'
//!
//! # Standalone development mode with throwaway storage
//! miniapp-tui --no-host --ephemeral
//! ```

use std::{fs::OpenOptions, path::PathBuf, sync::Mutex};

use clap::Parser;
use miniapp_core::{Host, LocalStorage, MemoryStorage, PartialInsets, RedbStorage, SimHost};
use miniapp_tui::{Runtime, StorageChoice, TerminalDriver, TuiConfig, parse_insets};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Profile mini app terminal client
#[derive(Parser, Debug)]
#[command(name = "miniapp-tui")]
#[command(about = "Terminal client for the profile mini app")]
#[command(version)]
struct Args {
    /// Session token (initData) handed out by the simulated host
    #[arg(short, long)]
    init_data: Option<String>,

    /// Launch URL or query string; read for tgWebAppData when the host has no token
    #[arg(short, long)]
    url: Option<String>,

    /// Run without a host (development mode)
    #[arg(long)]
    no_host: bool,

    /// Platform reported by the simulated host
    #[arg(long, default_value = "tdesktop")]
    platform: String,

    /// Device safe area as top,right,bottom,left in pixels
    #[arg(long, value_parser = parse_insets)]
    safe_area: Option<PartialInsets>,

    /// Content safe area as top,right,bottom,left in pixels
    #[arg(long, value_parser = parse_insets)]
    content_safe_area: Option<PartialInsets>,

    /// Profile database file
    #[arg(short, long, default_value = "miniapp-profiles.redb")]
    storage: PathBuf,

    /// Keep profiles in memory only
    #[arg(long, conflicts_with = "storage")]
    ephemeral: bool,

    /// Log file (the terminal belongs to the UI)
    #[arg(long, default_value = "miniapp-tui.log")]
    log_file: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl From<Args> for TuiConfig {
    fn from(args: Args) -> Self {
        Self {
            init_data: args.init_data,
            launch_url: args.url,
            host_enabled: !args.no_host,
            platform: args.platform,
            safe_area: args.safe_area,
            content_safe_area: args.content_safe_area,
            storage: if args.ephemeral {
                StorageChoice::Memory
            } else {
                StorageChoice::File(args.storage)
            },
            log_file: args.log_file,
            log_level: args.log_level,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = TuiConfig::from(Args::parse());

    let log_file = OpenOptions::new().create(true).append(true).open(&config.log_file)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(log_file)).with_ansi(false))
        .with(filter)
        .init();

    tracing::info!(host = config.host_enabled, storage = ?config.storage, "mini app starting");

    let host = config.host();
    let launch_url = config.launch_url.clone();

    match &config.storage {
        StorageChoice::Memory => run(host, MemoryStorage::new(), launch_url).await,
        StorageChoice::File(path) => run(host, RedbStorage::open(path)?, launch_url).await,
    }
}

async fn run<S: LocalStorage>(
    host: Host<SimHost>,
    storage: S,
    launch_url: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let driver = TerminalDriver::new()?;
    Runtime::new(driver, host, storage, launch_url).run().await?;
    Ok(())
}
