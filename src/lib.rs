//! stationwx - cached weather and sun state for one observation station
//!
//! Current conditions come from the National Weather Service station
//! observation endpoint and active alerts from its alerts-by-point
//! endpoint. Every value is persisted in a per-key TTL file cache so
//! repeated invocations within the cache lifetime never touch the network.
//! Day/night flags and the condition icon are derived from the cached
//! station coordinates on every access.
//!
//! # Example
//!
//! ```rust,no_run
//! #[tokio::main]
//! async fn main() -> stationwx::Result<()> {
//!     let station = stationwx::Station::builder()
//!         .station("KJAX")
//!         .cache_lifetime(5)
//!         .build()?;
//!
//!     let report = station.refresh().await;
//!     if let Some(e) = report.cache_write_failure() {
//!         eprintln!("cache not updated: {e}");
//!     }
//!
//!     println!("{}°F {}", station.value("temperature"), station.value("icon"));
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod convert;
pub mod error;
pub mod providers;
pub mod sky;
pub mod station;
pub mod telemetry;
pub mod types;
pub mod version;

// Re-export main types at crate root
pub use config::{Config, ProviderConfig};
pub use error::{Result, WeatherError};
pub use providers::{NwsClient, WeatherProvider};
pub use sky::{DayPhase, Icon, SunEvents};
pub use station::{GroupStatus, RefreshReport, Snapshot, Station, StationBuilder};
pub use types::{CacheKey, CachedValue, Coordinates, Group, StationObservation, ValueKind};
pub use version::{PKG_VERSION, version_string};
