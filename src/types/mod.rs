//! Public types for the stationwx API.

mod key;
mod observation;
mod value;

pub use key::{CacheKey, Group, ValueKind};
pub use observation::{
    NwsAlertFeature, NwsAlertProperties, NwsAlertsResponse, NwsGeometry, NwsObservationProperties,
    NwsObservationResponse, QuantValue, StationObservation,
};
pub use value::{CachedValue, Coordinates};
