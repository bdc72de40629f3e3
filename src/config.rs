//! Configuration loading.
//!
//! Configuration is loaded from a TOML file with the following resolution
//! order:
//! 1. `--config <path>` (CLI flag; must exist)
//! 2. `<config_dir>/stationwx/config.toml` (user, e.g. `~/.config`)
//! 3. `/etc/stationwx/config.toml` (system)
//! 4. Built-in defaults
//!
//! Every field is optional; a missing field takes its default.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::sky::DEFAULT_BUFFER_MINUTES;
use crate::version::default_user_agent;
use crate::{Result, WeatherError};

/// stationwx configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Observation station code (default: KJAX).
    #[serde(default = "default_station")]
    pub station: String,
    /// Directory holding cache files (default: the system temp directory).
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    /// Cache file name prefix (default: `stationwx.<STATION>.`).
    #[serde(default)]
    pub cache_prefix: Option<String>,
    /// Cache lifetime in minutes; 0 disables caching (default: 5).
    #[serde(default = "default_cache_lifetime")]
    pub cache_lifetime: u32,
    /// Marker shown for values that are not available (default: "?").
    #[serde(default = "default_unknown")]
    pub unknown: String,
    /// Minutes either side of sunrise/sunset that count as "near" (default: 15).
    #[serde(default = "default_sun_buffer")]
    pub sun_buffer_minutes: u32,
    #[serde(default)]
    pub provider: ProviderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            station: default_station(),
            cache_dir: None,
            cache_prefix: None,
            cache_lifetime: default_cache_lifetime(),
            unknown: default_unknown(),
            sun_buffer_minutes: default_sun_buffer(),
            provider: ProviderConfig::default(),
        }
    }
}

fn default_station() -> String {
    "KJAX".to_string()
}

fn default_cache_lifetime() -> u32 {
    5
}

fn default_unknown() -> String {
    "?".to_string()
}

fn default_sun_buffer() -> u32 {
    DEFAULT_BUFFER_MINUTES
}

/// Cache prefix scoped to `station`, so several stations can share a
/// cache directory.
pub fn default_cache_prefix(station: &str) -> String {
    format!("stationwx.{station}.")
}

/// Remote provider settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Observation URL template; `{station}` is substituted.
    #[serde(default = "default_observation_url")]
    pub observation_url: String,
    /// Alerts URL template; `{point}` is substituted with `lat,lon`.
    #[serde(default = "default_alerts_url")]
    pub alerts_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds (default: 10).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            observation_url: default_observation_url(),
            alerts_url: default_alerts_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_observation_url() -> String {
    "https://api.weather.gov/stations/{station}/observations/latest".to_string()
}

fn default_alerts_url() -> String {
    "https://api.weather.gov/alerts/active?point={point}".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided)
    /// 2. `<config_dir>/stationwx/config.toml`
    /// 3. `/etc/stationwx/config.toml`
    /// 4. Defaults
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let config = match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path)?,
            None => Config::default(),
        };
        config.validate()?;
        Ok(config)
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            WeatherError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            WeatherError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Resolve the config file path; `None` means use defaults.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(WeatherError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(dir) = dirs::config_dir() {
            let user_config = dir.join("stationwx").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/stationwx/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }

    /// Reject settings that would produce unusable cache paths or requests.
    pub fn validate(&self) -> Result<()> {
        if self.station.is_empty() {
            return Err(WeatherError::Configuration(
                "station must not be empty".to_string(),
            ));
        }
        if self.station.contains(['/', '\\']) || self.station.contains("..") {
            return Err(WeatherError::Configuration(format!(
                "station {:?} contains path characters",
                self.station
            )));
        }
        if let Some(prefix) = &self.cache_prefix {
            if prefix.contains(['/', '\\']) {
                return Err(WeatherError::Configuration(format!(
                    "cache_prefix {prefix:?} must be a file name prefix, not a path"
                )));
            }
        }
        if self.provider.timeout_secs == 0 {
            return Err(WeatherError::Configuration(
                "provider.timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Effective cache directory.
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// Effective cache file prefix.
    pub fn cache_prefix(&self) -> String {
        self.cache_prefix
            .clone()
            .unwrap_or_else(|| default_cache_prefix(&self.station))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.station, "KJAX");
        assert_eq!(config.cache_lifetime, 5);
        assert_eq!(config.unknown, "?");
        assert_eq!(config.sun_buffer_minutes, 15);
        assert_eq!(config.cache_prefix(), "stationwx.KJAX.");
        assert_eq!(config.cache_dir(), std::env::temp_dir());
        assert_eq!(config.provider.timeout_secs, 10);
    }

    #[test]
    fn parse_minimal_config() {
        let config: Config = toml::from_str(r#"station = "KSFO""#).unwrap();
        assert_eq!(config.station, "KSFO");
        // Defaults preserved, prefix follows the station
        assert_eq!(config.cache_lifetime, 5);
        assert_eq!(config.cache_prefix(), "stationwx.KSFO.");
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
            station = "KORD"
            cache_dir = "/var/cache/wx"
            cache_prefix = "ord-"
            cache_lifetime = 0
            unknown = "n/a"
            sun_buffer_minutes = 30

            [provider]
            observation_url = "http://localhost:8080/{station}"
            alerts_url = "http://localhost:8080/alerts?point={point}"
            user_agent = "dashboard (ops@example.com)"
            timeout_secs = 3
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.cache_dir(), PathBuf::from("/var/cache/wx"));
        assert_eq!(config.cache_prefix(), "ord-");
        assert_eq!(config.cache_lifetime, 0);
        assert_eq!(config.unknown, "n/a");
        assert_eq!(config.sun_buffer_minutes, 30);
        assert_eq!(config.provider.observation_url, "http://localhost:8080/{station}");
        assert_eq!(config.provider.user_agent, "dashboard (ops@example.com)");
        assert_eq!(config.provider.timeout_secs, 3);
    }

    #[test]
    fn config_not_found_returns_error() {
        let result = Config::load(Some(Path::new("/nonexistent/stationwx.toml")));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Config file not found"));
    }

    #[test]
    fn load_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "station = \"KTPA\"\ncache_lifetime = 15\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.station, "KTPA");
        assert_eq!(config.cache_lifetime, 15);
    }

    #[test]
    fn load_rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "station = ").unwrap();

        let err = Config::load(Some(&path)).unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn path_like_station_is_rejected() {
        let config = Config {
            station: "../etc".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
