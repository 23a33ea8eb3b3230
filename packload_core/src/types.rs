//! Core domain types for the pack load calculator.
//!
//! This module defines the fundamental types used throughout the system:
//! - Dog profile classifications (size, fitness, experience)
//! - Hike conditions (terrain) and the measurement system
//! - Calculation input and result snapshots
//! - Stored dog profiles

use crate::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Classification Enums
// ============================================================================

/// Measurement system used for every quantity of a calculation
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Pounds, miles, feet, Fahrenheit
    #[default]
    Us,
    /// Kilograms, kilometers, meters, Celsius
    Metric,
}

/// Breed size class; determines when a dog counts as senior
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Toy,
    Small,
    Medium,
    Large,
    Giant,
}

impl SizeClass {
    /// Age in years at which a dog of this size is treated as senior
    pub fn senior_age_years(self) -> f64 {
        match self {
            SizeClass::Toy => 11.0,
            SizeClass::Small => 10.0,
            SizeClass::Medium => 9.0,
            SizeClass::Large => 7.0,
            SizeClass::Giant => 6.0,
        }
    }
}

/// General fitness level; selects the baseline load range
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Fitness {
    Low,
    Avg,
    High,
}

impl Fitness {
    /// Baseline (min, max) load as percent of body weight
    pub fn baseline_pct(self) -> (f64, f64) {
        match self {
            Fitness::Low => (8.0, 10.0),
            Fitness::Avg => (10.0, 14.0),
            Fitness::High => (12.0, 16.0),
        }
    }
}

/// Prior experience carrying a pack
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Experience {
    New,
    Some,
    Trained,
}

/// Trail surface difficulty
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    Easy,
    Mixed,
    Rugged,
}

/// Life stage of the dog at calculation time
///
/// Puppies take a fixed range and skip the experience/senior adjustments;
/// adults and seniors go through both.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifeStage {
    Puppy,
    Adult,
    Senior,
}

impl LifeStage {
    /// Dogs younger than this are puppies regardless of size
    pub const PUPPY_AGE_YEARS: f64 = 1.5;

    /// Classify a dog by combined age in years and size class
    pub fn classify(age_years: f64, size_class: SizeClass) -> Self {
        if age_years < Self::PUPPY_AGE_YEARS {
            LifeStage::Puppy
        } else if age_years >= size_class.senior_age_years() {
            LifeStage::Senior
        } else {
            LifeStage::Adult
        }
    }
}

// String forms shared by the CLI parser and display output.
macro_rules! impl_str_enum {
    ($ty:ty, $what:literal, { $($variant:path => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($variant => $name,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($name => Ok($variant),)+
                    other => Err(Error::Validation(format!(
                        "Unknown {}: {}",
                        $what, other
                    ))),
                }
            }
        }
    };
}

impl_str_enum!(Units, "units", { Units::Us => "us", Units::Metric => "metric" });
impl_str_enum!(SizeClass, "size class", {
    SizeClass::Toy => "toy",
    SizeClass::Small => "small",
    SizeClass::Medium => "medium",
    SizeClass::Large => "large",
    SizeClass::Giant => "giant",
});
impl_str_enum!(Fitness, "fitness", {
    Fitness::Low => "low",
    Fitness::Avg => "avg",
    Fitness::High => "high",
});
impl_str_enum!(Experience, "experience", {
    Experience::New => "new",
    Experience::Some => "some",
    Experience::Trained => "trained",
});
impl_str_enum!(Terrain, "terrain", {
    Terrain::Easy => "easy",
    Terrain::Mixed => "mixed",
    Terrain::Rugged => "rugged",
});

// ============================================================================
// Calculation Input and Result
// ============================================================================

/// Dog and hike description for a single calculation
///
/// Quantities are expressed in the system named by `units`. Callers are
/// expected to run [`CalculationInput::validate`] before calculating.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CalculationInput {
    pub units: Units,
    pub dog_weight: f64,
    pub age_years: f64,
    pub age_months: f64,
    pub size_class: SizeClass,
    pub fitness: Fitness,
    pub experience: Experience,
    pub distance: f64,
    pub terrain: Terrain,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_gain: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl CalculationInput {
    /// Combined age in fractional years
    pub fn age_total_years(&self) -> f64 {
        self.age_years + self.age_months / 12.0
    }
}

/// Target weight expressed as a volume of water, for intuition only
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WaterEquivalent {
    pub label: String,
    pub primary: String,
    pub secondary: String,
}

/// Immutable outcome of a pack load calculation
///
/// Weights are in the input's unit system; all numbers are rounded to two
/// decimal places.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CalculationResult {
    pub min_pct: f64,
    pub max_pct: f64,
    pub min_weight: f64,
    pub max_weight: f64,
    pub target_weight: f64,
    pub hard_cap_weight: f64,
    pub warnings: Vec<String>,
    pub applied_adjustments: Vec<String>,
    pub water_equivalent: WaterEquivalent,
}

// ============================================================================
// Dog Profiles
// ============================================================================

/// A saved dog profile
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DogProfile {
    pub id: Uuid,
    pub name: String,
    pub units: Units,
    pub dog_weight: f64,
    pub age_years: f64,
    pub age_months: f64,
    pub size_class: SizeClass,
    pub fitness: Fitness,
    pub experience: Experience,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User-entered values for a new profile, before validation
#[derive(Clone, Debug, PartialEq)]
pub struct ProfileDraft {
    pub name: String,
    pub units: Units,
    pub dog_weight: f64,
    pub age_years: f64,
    pub age_months: f64,
    pub size_class: SizeClass,
    pub fitness: Fitness,
    pub experience: Experience,
}

/// Hike-only conditions; combined with a profile to form a full input
#[derive(Clone, Debug, PartialEq)]
pub struct HikeConditions {
    pub distance: f64,
    pub terrain: Terrain,
    pub elevation_gain: Option<f64>,
    pub temperature: Option<f64>,
}

impl DogProfile {
    /// Build calculation input from this profile and the given hike
    ///
    /// Hike quantities must already be in the profile's units.
    pub fn to_input(&self, hike: &HikeConditions) -> CalculationInput {
        CalculationInput {
            units: self.units,
            dog_weight: self.dog_weight,
            age_years: self.age_years,
            age_months: self.age_months,
            size_class: self.size_class,
            fitness: self.fitness,
            experience: self.experience,
            distance: hike.distance,
            terrain: hike.terrain,
            elevation_gain: hike.elevation_gain,
            temperature: hike.temperature,
        }
    }
}
