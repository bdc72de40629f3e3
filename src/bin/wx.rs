//! wx: print cached weather for one observation station.
//!
//! With no key, prints every value as a JSON record. With a key, prints
//! that single value.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, Utc};
use clap::Parser;
use tracing::{debug, warn};

use stationwx::station::DERIVED_NAMES;
use stationwx::{CacheKey, Config, Station};

/// Cached weather and sun state for one station
#[derive(Parser)]
#[command(name = "wx")]
#[command(version = stationwx::PKG_VERSION)]
#[command(about = "Cached NWS station weather")]
struct Args {
    /// Value to print (e.g. temperature, alerts, isDay, icon); omit for all
    key: Option<String>,

    /// Path to configuration file.
    #[arg(short, long, env = "WX_CONFIG")]
    config: Option<PathBuf>,

    /// Observation station code.
    #[arg(short, long, env = "WX_STATION")]
    station: Option<String>,

    /// Directory holding cache files.
    #[arg(long, env = "WX_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    /// Cache file name prefix.
    #[arg(long, env = "WX_CACHE_PREFIX")]
    cache_prefix: Option<String>,

    /// Cache lifetime in minutes; 0 always refetches.
    #[arg(long, env = "WX_CACHE_LIFETIME")]
    cache_lifetime: Option<u32>,

    /// Marker printed for unavailable values.
    #[arg(long, env = "WX_UNKNOWN")]
    unknown: Option<String>,

    /// Minutes either side of sunrise/sunset that count as near.
    #[arg(long, env = "WX_SUN_BUFFER")]
    sun_buffer: Option<u32>,

    /// Reference instant (RFC 3339) instead of the current time.
    #[arg(long)]
    now: Option<DateTime<Utc>>,
}

impl Args {
    /// Apply command-line overrides on top of the file configuration.
    fn apply(&self, config: &mut Config) {
        if let Some(station) = &self.station {
            config.station = station.clone();
            // A station override without a prefix keeps caches apart.
            if self.cache_prefix.is_none() {
                config.cache_prefix = None;
            }
        }
        if let Some(dir) = &self.cache_dir {
            config.cache_dir = Some(dir.clone());
        }
        if let Some(prefix) = &self.cache_prefix {
            config.cache_prefix = Some(prefix.clone());
        }
        if let Some(minutes) = self.cache_lifetime {
            config.cache_lifetime = minutes;
        }
        if let Some(unknown) = &self.unknown {
            config.unknown = unknown.clone();
        }
        if let Some(minutes) = self.sun_buffer {
            config.sun_buffer_minutes = minutes;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("wx: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load(args.config.as_deref())?;
    args.apply(&mut config);

    let mut builder = Station::builder().config(config);
    if let Some(now) = args.now {
        builder = builder.now(now);
    }
    let station = builder.build()?;
    debug!(
        version = stationwx::version_string(),
        station = station.code(),
        "wx starting"
    );

    let report = station.refresh().await;
    for (group, e) in report.errors() {
        if e.is_fetch_failure() {
            warn!(group = group.as_str(), error = %e, "using cached values");
        }
    }
    if let Some(e) = report.cache_write_failure() {
        return Err(format!("cache not updated: {e}").into());
    }

    match args.key.as_deref() {
        Some(name) => {
            if name.parse::<CacheKey>().is_err() && !DERIVED_NAMES.contains(&name) {
                warn!(key = name, "unknown key");
            }
            println!("{}", station.value(name));
        }
        None => println!("{}", serde_json::to_string_pretty(&station.snapshot())?),
    }
    Ok(())
}
