//! National Weather Service API client.
//!
//! Observations come from `/stations/{station}/observations/latest`, alerts
//! from `/alerts/active?point={lat},{lon}`. Both URLs are templates so tests
//! (and mirrors) can point elsewhere.
//! See: <https://www.weather.gov/documentation/services-web-api>

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::traits::WeatherProvider;
use crate::config::ProviderConfig;
use crate::types::{Coordinates, NwsAlertsResponse, NwsObservationResponse, StationObservation};
use crate::{Result, WeatherError};

/// Longest error body excerpt carried in [`WeatherError::Api`].
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Client for `api.weather.gov`.
#[derive(Clone)]
pub struct NwsClient {
    http: Client,
    observation_url: String,
    alerts_url: String,
}

impl NwsClient {
    /// Build a client from provider settings.
    ///
    /// weather.gov rejects requests without a `User-Agent`, so one is always
    /// sent.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            observation_url: config.observation_url.clone(),
            alerts_url: config.alerts_url.clone(),
        })
    }

    pub fn observation_url(&self, station: &str) -> String {
        self.observation_url.replace("{station}", station)
    }

    pub fn alerts_url(&self, point: Coordinates) -> String {
        self.alerts_url.replace("{point}", &point.to_string())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url, "fetching from NWS");

        let response = self
            .http
            .get(url)
            .header("Accept", "application/geo+json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        if body.trim().is_empty() {
            return Err(WeatherError::InvalidResponse(format!("empty body from {url}")));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl WeatherProvider for NwsClient {
    fn name(&self) -> &str {
        "nws"
    }

    async fn latest_observation(&self, station: &str) -> Result<StationObservation> {
        let response: NwsObservationResponse = self.get_json(&self.observation_url(station)).await?;
        Ok(response.into())
    }

    async fn active_alerts(&self, point: Coordinates) -> Result<Vec<String>> {
        let response: NwsAlertsResponse = self.get_json(&self.alerts_url(point)).await?;
        Ok(response.events())
    }
}
