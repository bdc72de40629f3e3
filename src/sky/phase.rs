//! Day/night classification around sunrise and sunset.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use super::sun::SunEvents;

/// Default window either side of sunrise/sunset for the "near" flags.
pub const DEFAULT_BUFFER_MINUTES: u32 = 15;

/// Day/night flags for one reference instant.
///
/// `is_sunrise`/`is_sunset` are independent of `is_day`/`is_night`: exactly
/// at sunrise both `is_day` and `is_sunrise` hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPhase {
    pub is_day: bool,
    pub is_night: bool,
    pub is_sunrise: bool,
    pub is_sunset: bool,
}

impl DayPhase {
    /// Classify `now` against a sunrise/sunset pair. All bounds inclusive.
    pub fn at(
        now: DateTime<Utc>,
        sunrise: DateTime<Utc>,
        sunset: DateTime<Utc>,
        buffer: TimeDelta,
    ) -> Self {
        let within = |from: DateTime<Utc>, to: DateTime<Utc>| from <= now && now <= to;
        let is_day = within(sunrise, sunset);
        Self {
            is_day,
            is_night: !is_day,
            is_sunrise: within(sunrise - buffer, sunrise + buffer),
            is_sunset: within(sunset - buffer, sunset + buffer),
        }
    }

    pub fn from_events(now: DateTime<Utc>, events: &SunEvents, buffer: TimeDelta) -> Self {
        match events {
            SunEvents::Daily { sunrise, sunset } => Self::at(now, *sunrise, *sunset, buffer),
            SunEvents::PolarDay => Self::constant(true),
            SunEvents::PolarNight => Self::constant(false),
        }
    }

    fn constant(is_day: bool) -> Self {
        Self {
            is_day,
            is_night: !is_day,
            is_sunrise: false,
            is_sunset: false,
        }
    }
}

/// Buffer length from a minute count.
pub fn buffer_minutes(minutes: u32) -> TimeDelta {
    TimeDelta::minutes(i64::from(minutes))
}
