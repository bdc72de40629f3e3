//! Derived sky state: sun times, day/night flags and the display icon.
//!
//! Everything here is a pure function of a reference instant, the station
//! coordinates and the cached condition/alert text. Nothing is persisted;
//! [`Station`](crate::Station) recomputes it on every access.

pub mod icon;
pub mod phase;
pub mod sun;

pub use icon::{Icon, IconRule, WEATHER_RULES, condition_icon, sun_icon, weather_icon};
pub use phase::{DEFAULT_BUFFER_MINUTES, DayPhase, buffer_minutes};
pub use sun::{SunEvents, solar_date, sun_events, sun_events_at};
