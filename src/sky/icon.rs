//! Condition icon selection.
//!
//! Icons are code points of the Weather Icons font. Selection runs an
//! ordered rule table over `alerts + "\n" + condition` (case-insensitive
//! substring match); the first rule with a matching pattern wins. When no
//! weather rule matches, the icon falls back to the sun's position.

use serde::{Serialize, Serializer};

use super::phase::DayPhase;

/// A display icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Sunset,
    Sunrise,
    Day,
    Night,
    TropicalStorm,
    Hurricane,
    Tornado,
    Thunderstorm,
    Mixed,
    Snow,
    Drizzle,
    Showers,
    Rain,
    Hail,
    Ice,
    Dust,
    Fog,
    Haze,
    Fire,
    Smoke,
    Windy,
    MostlyCloudy,
    Cloudy,
}

impl Icon {
    /// Weather Icons font glyph.
    pub fn glyph(&self) -> char {
        match self {
            Icon::Sunset => '\u{f047}',
            Icon::Sunrise => '\u{f046}',
            Icon::Day => '\u{f00d}',
            Icon::Night => '\u{f02e}',
            Icon::TropicalStorm | Icon::Hurricane => '\u{f073}',
            Icon::Tornado => '\u{f056}',
            Icon::Thunderstorm => '\u{f016}',
            Icon::Mixed => '\u{f017}',
            Icon::Snow => '\u{f01b}',
            Icon::Drizzle | Icon::Showers | Icon::Rain => '\u{f019}',
            Icon::Hail | Icon::Ice => '\u{f015}',
            Icon::Dust => '\u{f063}',
            Icon::Fog | Icon::Haze => '\u{f014}',
            Icon::Fire => '\u{f0c7}',
            Icon::Smoke => '\u{f062}',
            Icon::Windy => '\u{f050}',
            Icon::MostlyCloudy => '\u{f013}',
            Icon::Cloudy => '\u{f041}',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Icon::Sunset => "sunset",
            Icon::Sunrise => "sunrise",
            Icon::Day => "day",
            Icon::Night => "night",
            Icon::TropicalStorm => "tropical-storm",
            Icon::Hurricane => "hurricane",
            Icon::Tornado => "tornado",
            Icon::Thunderstorm => "thunderstorm",
            Icon::Mixed => "mixed",
            Icon::Snow => "snow",
            Icon::Drizzle => "drizzle",
            Icon::Showers => "showers",
            Icon::Rain => "rain",
            Icon::Hail => "hail",
            Icon::Ice => "ice",
            Icon::Dust => "dust",
            Icon::Fog => "fog",
            Icon::Haze => "haze",
            Icon::Fire => "fire",
            Icon::Smoke => "smoke",
            Icon::Windy => "windy",
            Icon::MostlyCloudy => "mostly-cloudy",
            Icon::Cloudy => "cloudy",
        }
    }
}

impl Serialize for Icon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// One row of the precedence table.
#[derive(Debug)]
pub struct IconRule {
    /// Lower-case substrings; any one matching selects `icon`.
    pub patterns: &'static [&'static str],
    pub icon: Icon,
}

impl IconRule {
    fn matches(&self, haystack: &str) -> bool {
        self.patterns.iter().any(|p| haystack.contains(p))
    }
}

/// Weather rules in precedence order.
pub const WEATHER_RULES: &[IconRule] = &[
    IconRule { patterns: &["tropical storm"], icon: Icon::TropicalStorm },
    IconRule { patterns: &["hurricane"], icon: Icon::Hurricane },
    IconRule { patterns: &["tornado"], icon: Icon::Tornado },
    IconRule { patterns: &["thunder"], icon: Icon::Thunderstorm },
    IconRule { patterns: &["mixed", "freezing", "sleet"], icon: Icon::Mixed },
    IconRule { patterns: &["blizzard", "snow"], icon: Icon::Snow },
    IconRule { patterns: &["drizzle"], icon: Icon::Drizzle },
    IconRule { patterns: &["shower"], icon: Icon::Showers },
    IconRule { patterns: &["rain"], icon: Icon::Rain },
    IconRule { patterns: &["hail"], icon: Icon::Hail },
    IconRule { patterns: &["ice pellets", "ice storm", "ice crystals"], icon: Icon::Ice },
    IconRule { patterns: &["dust"], icon: Icon::Dust },
    IconRule { patterns: &["fog"], icon: Icon::Fog },
    IconRule { patterns: &["haze"], icon: Icon::Haze },
    IconRule { patterns: &["fire"], icon: Icon::Fire },
    IconRule { patterns: &["smoke"], icon: Icon::Smoke },
    IconRule { patterns: &["bluster", "windy"], icon: Icon::Windy },
    IconRule { patterns: &["mostly cloudy", "overcast"], icon: Icon::MostlyCloudy },
    IconRule { patterns: &["cloudy"], icon: Icon::Cloudy },
];

/// First weather rule matching the alerts or the condition text.
pub fn weather_icon(alerts: &str, condition: &str) -> Option<Icon> {
    let haystack = format!("{alerts}\n{condition}").to_lowercase();
    WEATHER_RULES
        .iter()
        .find(|rule| rule.matches(&haystack))
        .map(|rule| rule.icon)
}

/// Icon for the sun's position: sunset > sunrise > day > night.
pub fn sun_icon(phase: &DayPhase) -> Icon {
    if phase.is_sunset {
        Icon::Sunset
    } else if phase.is_sunrise {
        Icon::Sunrise
    } else if phase.is_day {
        Icon::Day
    } else {
        Icon::Night
    }
}

/// Weather icon if any rule matches, otherwise the sun icon when the phase
/// is known.
pub fn condition_icon(alerts: &str, condition: &str, phase: Option<&DayPhase>) -> Option<Icon> {
    weather_icon(alerts, condition).or_else(|| phase.map(sun_icon))
}
