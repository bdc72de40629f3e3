//! Remote weather data providers.
//!
//! [`WeatherProvider`] is the seam between the refresh orchestrator and the
//! network. [`NwsClient`] implements it against `api.weather.gov`.

pub mod nws;
pub mod traits;

pub use nws::NwsClient;
pub use traits::WeatherProvider;
