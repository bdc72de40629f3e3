//! Provider trait for remote weather data.
//!
//! The refresh orchestrator only talks to a [`WeatherProvider`]; the NWS
//! client is one implementation, tests script their own. A provider returns
//! raw SI observations; unit conversion and caching happen above it.
//!
//! # Failure semantics
//!
//! Any error returned here is a fetch failure for the group that issued the
//! call. It never touches cached values of other groups.

use async_trait::async_trait;

use crate::Result;
use crate::types::{Coordinates, StationObservation};

/// Source of station observations and active alerts.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    /// Latest observation reported by `station` (e.g. `"KJAX"`).
    ///
    /// Fields the station did not report are `None`; only a response that
    /// cannot be interpreted at all is an error.
    async fn latest_observation(&self, station: &str) -> Result<StationObservation>;

    /// Event names of alerts currently active at `point`, in feed order.
    async fn active_alerts(&self, point: Coordinates) -> Result<Vec<String>>;
}
