//! Builder for configuring station instances

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::Station;
use crate::Result;
use crate::cache::CacheStore;
use crate::config::Config;
use crate::providers::{NwsClient, WeatherProvider};
use crate::sky::buffer_minutes;

/// Builder for configuring [`Station`] instances.
///
/// Starts from [`Config::default()`]; individual setters override single
/// fields, [`config`](Self::config) replaces the whole set.
///
/// ```rust,no_run
/// # fn main() -> stationwx::Result<()> {
/// let station = stationwx::Station::builder()
///     .station("KSAV")
///     .cache_lifetime(10)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct StationBuilder {
    config: Config,
    provider: Option<Arc<dyn WeatherProvider>>,
    now: Option<DateTime<Utc>>,
}

impl StationBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            provider: None,
            now: None,
        }
    }

    /// Replace all settings with `config`.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Observation station code, e.g. `"KJAX"`.
    pub fn station(mut self, code: impl Into<String>) -> Self {
        self.config.station = code.into();
        self
    }

    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.cache_dir = Some(dir.into());
        self
    }

    pub fn cache_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.cache_prefix = Some(prefix.into());
        self
    }

    /// Cache lifetime in minutes. Zero refetches on every refresh.
    pub fn cache_lifetime(mut self, minutes: u32) -> Self {
        self.config.cache_lifetime = minutes;
        self
    }

    /// Marker returned for values that are not available.
    pub fn unknown(mut self, marker: impl Into<String>) -> Self {
        self.config.unknown = marker.into();
        self
    }

    pub fn sun_buffer_minutes(mut self, minutes: u32) -> Self {
        self.config.sun_buffer_minutes = minutes;
        self
    }

    /// Use `provider` instead of the NWS client built from the config.
    pub fn provider(mut self, provider: Arc<dyn WeatherProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Pin the reference instant used for day/night classification.
    pub fn now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn build(self) -> Result<Station> {
        let config = self.config;
        config.validate()?;

        let provider: Arc<dyn WeatherProvider> = match self.provider {
            Some(provider) => provider,
            None => Arc::new(NwsClient::new(&config.provider)?),
        };

        Ok(Station {
            store: CacheStore::new(config.cache_dir(), config.cache_prefix()),
            provider,
            cache_lifetime: config.cache_lifetime,
            sun_buffer: buffer_minutes(config.sun_buffer_minutes),
            reference: self.now.unwrap_or_else(Utc::now),
            station: config.station,
            unknown: config.unknown,
        })
    }
}

impl Default for StationBuilder {
    fn default() -> Self {
        Self::new()
    }
}
