//! Metric → US customary unit conversions.
//!
//! Pure functions over `f64`. No rounding happens here; the display layer
//! rounds once, after conversion.

const FEET_PER_METER: f64 = 3.28084;
const MPH_PER_MPS: f64 = 2.23694;
const MMHG_PER_PASCAL: f64 = 0.00750062;
const FEET_PER_MILE: f64 = 5280.0;
const INCHES_PER_FOOT: f64 = 12.0;

/// Degrees Celsius to degrees Fahrenheit.
pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

/// Meters per second to miles per hour.
pub fn mps_to_mph(mps: f64) -> f64 {
    mps * MPH_PER_MPS
}

pub fn meters_to_feet(m: f64) -> f64 {
    m * FEET_PER_METER
}

pub fn meters_to_inches(m: f64) -> f64 {
    meters_to_feet(m) * INCHES_PER_FOOT
}

pub fn meters_to_miles(m: f64) -> f64 {
    meters_to_feet(m) / FEET_PER_MILE
}

/// Pascals to millimetres of mercury.
pub fn pascals_to_mmhg(pa: f64) -> f64 {
    pa * MMHG_PER_PASCAL
}
