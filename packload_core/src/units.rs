//! Unit conversion helpers.
//!
//! The calculator compares distance, elevation and temperature against
//! thresholds expressed in US customary units; these helpers normalise a
//! caller's quantity into that system.

use crate::Units;

/// Pounds per kilogram
pub const LB_PER_KG: f64 = 2.2046226218;
/// Miles per kilometer
pub const MI_PER_KM: f64 = 0.621371;
/// Feet per meter
pub const FT_PER_M: f64 = 3.28084;

/// Distance in miles
pub fn to_miles(distance: f64, units: Units) -> f64 {
    match units {
        Units::Us => distance,
        Units::Metric => distance * MI_PER_KM,
    }
}

/// Elevation in feet
pub fn to_feet(elevation: f64, units: Units) -> f64 {
    match units {
        Units::Us => elevation,
        Units::Metric => elevation * FT_PER_M,
    }
}

/// Temperature in degrees Fahrenheit
pub fn to_fahrenheit(temperature: f64, units: Units) -> f64 {
    match units {
        Units::Us => temperature,
        Units::Metric => temperature * 9.0 / 5.0 + 32.0,
    }
}

pub fn pounds_to_kg(lb: f64) -> f64 {
    lb / LB_PER_KG
}

pub fn kg_to_pounds(kg: f64) -> f64 {
    kg * LB_PER_KG
}

/// Body weight in pounds, whatever the input system
pub fn to_pounds(weight: f64, units: Units) -> f64 {
    match units {
        Units::Us => weight,
        Units::Metric => kg_to_pounds(weight),
    }
}

impl Units {
    pub fn weight_suffix(self) -> &'static str {
        match self {
            Units::Us => "lb",
            Units::Metric => "kg",
        }
    }

    pub fn distance_suffix(self) -> &'static str {
        match self {
            Units::Us => "miles",
            Units::Metric => "km",
        }
    }

    pub fn elevation_suffix(self) -> &'static str {
        match self {
            Units::Us => "ft",
            Units::Metric => "m",
        }
    }

    pub fn temperature_suffix(self) -> &'static str {
        match self {
            Units::Us => "°F",
            Units::Metric => "°C",
        }
    }
}

/// Render a weight with two decimals and the matching unit suffix
pub fn format_weight(value: f64, units: Units) -> String {
    format!("{:.2} {}", value, units.weight_suffix())
}
