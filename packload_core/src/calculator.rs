//! Pack load calculator.
//!
//! Turns a dog/hike description into a recommended load range:
//! - Baseline range by fitness
//! - Life-stage adjustments (puppy cap, or experience and senior penalties)
//! - Hike penalties for distance, terrain, elevation and heat
//! - Conversion to weights under a 20% body weight hard cap

use crate::units::{to_fahrenheit, to_feet, to_miles, to_pounds};
use crate::{
    CalculationInput, CalculationResult, Experience, LifeStage, Terrain, Units, WaterEquivalent,
};

/// Absolute ceiling on load, as a fraction of body weight
pub const HARD_CAP_FRACTION: f64 = 0.20;
/// Pounds of water per US gallon
pub const LB_WATER_PER_GALLON: f64 = 8.34;
/// US fluid ounces per gallon
pub const FL_OZ_PER_GALLON: f64 = 128.0;
/// Dogs lighter than this (in pounds) get a carrier-suitability warning
pub const SMALL_DOG_LB: f64 = 5.5;

const PUPPY_RANGE_PCT: (f64, f64) = (0.0, 5.0);
const WATER_LABEL: &str = "Equivalent if the pack load were entirely water.";

/// Running min/max percentages plus the trail of what changed them
struct LoadRange {
    min_pct: f64,
    max_pct: f64,
    warnings: Vec<String>,
    adjustments: Vec<String>,
}

impl LoadRange {
    fn new((min_pct, max_pct): (f64, f64)) -> Self {
        Self {
            min_pct,
            max_pct,
            warnings: Vec::new(),
            adjustments: Vec::new(),
        }
    }

    /// Shift both bounds and record the step
    fn adjust(&mut self, min_delta: f64, max_delta: f64, entry: &str) {
        self.min_pct += min_delta;
        self.max_pct += max_delta;
        tracing::debug!(
            "{} -> {:.2}%..{:.2}%",
            entry,
            self.min_pct,
            self.max_pct
        );
        self.adjustments.push(entry.to_string());
    }

    fn warn(&mut self, warning: &str) {
        self.warnings.push(warning.to_string());
    }

    /// Floor both bounds at zero; an inverted range collapses onto min
    fn clamp(&mut self) {
        self.min_pct = self.min_pct.max(0.0);
        self.max_pct = self.max_pct.max(0.0);
        if self.max_pct < self.min_pct {
            self.max_pct = self.min_pct;
        }
    }
}

/// Calculate a safe pack load range for the given dog and hike
///
/// ## Pipeline
///
/// 1. **Baseline** by fitness: low 8–10%, avg 10–14%, high 12–16%
/// 2. **Life stage**:
///    - Puppy (< 1.5 years) → fixed 0–5%, no experience/senior changes
///    - Otherwise → experience (new -2/-2, trained +0/+1), then senior -3/-3
///      once age reaches the size-class threshold
/// 3. **Distance**: -2/-2 beyond 8 miles, another -2/-2 beyond 12 miles
/// 4. **Terrain**: mixed -1/-1, rugged -2/-2
/// 5. **Elevation gain**: -1/-1 beyond 1500 ft, another -1/-1 beyond 3000 ft
/// 6. **Temperature**: -2/-2 from 75°F, another -2/-2 from 85°F
/// 7. **Clamp** at 0%, never letting max fall below min
/// 8. **Weights** from body weight, capped at 20%
///
/// Input is assumed to be validated; this function never fails.
pub fn calculate_pack_weight(input: &CalculationInput) -> CalculationResult {
    let mut range = LoadRange::new(input.fitness.baseline_pct());

    apply_life_stage(&mut range, input);
    apply_hike_conditions(&mut range, input);
    range.clamp();

    let hard_cap_weight = input.dog_weight * HARD_CAP_FRACTION;
    let min_weight = (input.dog_weight * range.min_pct / 100.0).min(hard_cap_weight);
    let max_weight = (input.dog_weight * range.max_pct / 100.0).min(hard_cap_weight);
    let target_weight = ((min_weight + max_weight) / 2.0).min(hard_cap_weight);

    // Either condition warns, whether or not the cap actually bound a weight.
    if max_weight >= hard_cap_weight || range.max_pct >= 20.0 {
        range.warn("Hard cap reached: do not exceed 20% body weight.");
    }

    let water_equivalent = water_equivalent(target_weight, input.units);

    if to_pounds(input.dog_weight, input.units) < SMALL_DOG_LB {
        range.warn("Very small dogs may not be appropriate pack carriers.");
    }

    tracing::info!(
        "Pack load: {:.2}%..{:.2}% ({} adjustments, {} warnings)",
        range.min_pct,
        range.max_pct,
        range.adjustments.len(),
        range.warnings.len()
    );

    CalculationResult {
        min_pct: round_two(range.min_pct),
        max_pct: round_two(range.max_pct),
        min_weight: round_two(min_weight),
        max_weight: round_two(max_weight),
        target_weight: round_two(target_weight),
        hard_cap_weight: round_two(hard_cap_weight),
        warnings: range.warnings,
        applied_adjustments: range.adjustments,
        water_equivalent,
    }
}

fn apply_life_stage(range: &mut LoadRange, input: &CalculationInput) {
    let stage = LifeStage::classify(input.age_total_years(), input.size_class);

    if stage == LifeStage::Puppy {
        (range.min_pct, range.max_pct) = PUPPY_RANGE_PCT;
        range.warn("Puppy detected (< 1.5 years): load is capped to 0–5%.");
        range.adjustments.push("Life stage: puppy cap set to 0–5%.".into());
        return;
    }

    match input.experience {
        Experience::New => range.adjust(-2.0, -2.0, "Experience: new to pack (-2% min, -2% max)."),
        Experience::Trained => range.adjust(0.0, 1.0, "Experience: trained (+1% max)."),
        Experience::Some => {}
    }

    if stage == LifeStage::Senior {
        range.warn("Senior dog adjustment applied (-3% min/max).");
        range.adjust(-3.0, -3.0, "Life stage: senior (-3% min/max).");
    }
}

fn apply_hike_conditions(range: &mut LoadRange, input: &CalculationInput) {
    let miles = to_miles(input.distance, input.units);
    if miles > 8.0 {
        range.adjust(-2.0, -2.0, "Distance > 8 miles (-2% min/max).");
    }
    if miles > 12.0 {
        range.adjust(-2.0, -2.0, "Distance > 12 miles (additional -2% min/max).");
    }

    match input.terrain {
        Terrain::Mixed => range.adjust(-1.0, -1.0, "Terrain mixed (-1% min/max)."),
        Terrain::Rugged => range.adjust(-2.0, -2.0, "Terrain rugged (-2% min/max)."),
        Terrain::Easy => {}
    }

    if let Some(elevation) = input.elevation_gain.filter(|v| v.is_finite()) {
        let feet = to_feet(elevation, input.units);
        if feet > 1500.0 {
            range.adjust(-1.0, -1.0, "Elevation > 1500 ft (-1% min/max).");
        }
        if feet > 3000.0 {
            range.adjust(-1.0, -1.0, "Elevation > 3000 ft (additional -1% min/max).");
        }
    }

    if let Some(temperature) = input.temperature.filter(|v| v.is_finite()) {
        let fahrenheit = to_fahrenheit(temperature, input.units);
        if fahrenheit >= 75.0 {
            range.warn("Warm temperature (≥ 75°F) reduces safe load range.");
            range.adjust(-2.0, -2.0, "Temperature ≥ 75°F (-2% min/max).");
        }
        if fahrenheit >= 85.0 {
            range.warn("Hot temperature (≥ 85°F) further reduces safe load range.");
            range.adjust(-2.0, -2.0, "Temperature ≥ 85°F (additional -2% min/max).");
        }
    }
}

/// Express the target weight as if it were all water
fn water_equivalent(target_weight: f64, units: Units) -> WaterEquivalent {
    let (primary, secondary) = match units {
        Units::Us => {
            let gallons = target_weight / LB_WATER_PER_GALLON;
            let fl_oz = gallons * FL_OZ_PER_GALLON;
            (
                format!("{} gallons", round_two(gallons)),
                format!("{} fl oz", round_two(fl_oz)),
            )
        }
        Units::Metric => {
            // 1 kg of water is 1 L
            let liters = target_weight;
            let milliliters = liters * 1000.0;
            (
                format!("{} liters", round_two(liters)),
                format!("{} mL", round_two(milliliters)),
            )
        }
    };

    WaterEquivalent {
        label: WATER_LABEL.to_string(),
        primary,
        secondary,
    }
}

fn round_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
