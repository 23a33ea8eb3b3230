//! Rendering of calculation results for display.

use crate::units::format_weight;
use crate::{CalculationInput, CalculationResult, Units};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

pub const DISCLAIMER: &str =
    "This calculator provides planning estimates only and is not veterinary advice.";

const CHECKLIST: [&str; 3] = [
    "Check paw condition and gait before and after the hike.",
    "Start light and increase load gradually over several outings.",
    "Adjust load down immediately in heat or rough conditions.",
];

/// Input echo carried next to the result so it can be rendered on its own
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PayloadInput {
    pub units: Units,
    pub dog_weight: f64,
    pub distance: f64,
}

/// Everything a display needs to show one calculation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ResultsPayload {
    pub result: CalculationResult,
    pub input: PayloadInput,
}

impl ResultsPayload {
    pub fn new(input: &CalculationInput, result: CalculationResult) -> Self {
        Self {
            result,
            input: PayloadInput {
                units: input.units,
                dog_weight: input.dog_weight,
                distance: input.distance,
            },
        }
    }
}

/// One-line summary of the hike as entered, in the input's own units
pub fn render_hike(input: &CalculationInput) -> String {
    let units = input.units;
    let mut line = format!(
        "Hike: {} {}, {} terrain",
        input.distance,
        units.distance_suffix(),
        input.terrain
    );
    if let Some(gain) = input.elevation_gain {
        let _ = write!(line, ", {} {} gain", gain, units.elevation_suffix());
    }
    if let Some(temperature) = input.temperature {
        let _ = write!(line, ", {}{}", temperature, units.temperature_suffix());
    }
    line
}

/// Render a payload as plain text, optionally with the adjustment trail
pub fn render_text(payload: &ResultsPayload, show_adjustments: bool) -> String {
    let result = &payload.result;
    let units = payload.input.units;
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "Target Pack Weight");
    let _ = writeln!(out, "  {}", format_weight(result.target_weight, units));
    let _ = writeln!(out);
    let _ = writeln!(out, "Safe Range");
    let _ = writeln!(
        out,
        "  {} – {}",
        format_weight(result.min_weight, units),
        format_weight(result.max_weight, units)
    );
    let _ = writeln!(out, "  {:.2}% – {:.2}%", result.min_pct, result.max_pct);
    let _ = writeln!(out);
    let _ = writeln!(out, "Hard Cap (20%)");
    let _ = writeln!(out, "  {}", format_weight(result.hard_cap_weight, units));
    let _ = writeln!(out);
    let _ = writeln!(out, "Water-only equivalence");
    let _ = writeln!(out, "  {}", result.water_equivalent.label);
    let _ = writeln!(out, "  {}", result.water_equivalent.primary);
    let _ = writeln!(out, "  {}", result.water_equivalent.secondary);

    if !result.warnings.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Warnings");
        write_bullets(&mut out, &result.warnings);
    }

    if show_adjustments {
        let _ = writeln!(out);
        let _ = writeln!(out, "How this was calculated");
        if result.applied_adjustments.is_empty() {
            let _ = writeln!(out, "  • Baseline range, no adjustments.");
        } else {
            write_bullets(&mut out, &result.applied_adjustments);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Checklist");
    write_bullets(&mut out, &CHECKLIST);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", DISCLAIMER);

    out
}

fn write_bullets<S: AsRef<str>>(out: &mut String, items: &[S]) {
    for item in items {
        let _ = writeln!(out, "  • {}", item.as_ref());
    }
}

/// A titled block of static safety guidance
pub struct ResourceSection {
    pub heading: &'static str,
    pub bullets: &'static [&'static str],
}

pub const RESOURCES: &[ResourceSection] = &[
    ResourceSection {
        heading: "How calculations are performed",
        bullets: &[
            "Starts with a baseline pack percentage by fitness: low 8–10%, average 10–14%, high 12–16%.",
            "Experience adjusts that range: new dogs reduce min/max by 2%; trained dogs increase max by 1%.",
            "Life-stage adjustments apply next: puppies (under 1.5 years) are capped to 0–5%; seniors reduce min/max by 3% based on size-class thresholds.",
            "Hike demands then reduce load: long distance, harder terrain, elevation gain, and warm/hot temperature each lower the recommended percentages.",
            "Final values are clamped so range never drops below 0%, max never falls below min, and hard cap remains 20% of body weight.",
            "Water equivalence is shown to contextualize load if it were entirely water.",
        ],
    },
    ResourceSection {
        heading: "Pack fit checklist",
        bullets: &[
            "Measure your dog and choose a pack size that matches manufacturer sizing guidance.",
            "Adjust straps so the harness is snug but not restrictive; you should be able to slide fingers under straps.",
            "Keep weight balanced side-to-side and positioned so it does not shift or rub while walking.",
            "Check for rubbing points at shoulders, chest, and behind front legs after short trial walks.",
        ],
    },
    ResourceSection {
        heading: "Training your dog to carry a pack",
        bullets: &[
            "Start with an empty pack indoors or on short easy walks so your dog learns the feel of the harness.",
            "Add weight gradually over multiple outings, keeping sessions short and positive.",
            "Maintain good gait and enthusiasm before increasing either distance or load.",
            "Use frequent water breaks and remove weight immediately if your dog shows discomfort.",
        ],
    },
    ResourceSection {
        heading: "Signs your dog may be over-tired",
        bullets: &[
            "Slowing down significantly, lagging behind, refusing to continue, or repeatedly lying down.",
            "Excessive panting, drooling, heat stress behavior, or delayed recovery during rest breaks.",
            "Gait changes (limping/stiffness), paw sensitivity, stumbling, or frequent stops to shake/scratch.",
            "If signs appear, stop, cool down, hydrate, reduce or remove load, and end the hike if needed.",
        ],
    },
];

/// Render all resource sections as plain text
pub fn render_resources() -> String {
    let mut out = String::new();
    for section in RESOURCES {
        let _ = writeln!(out, "{}", section.heading);
        write_bullets(&mut out, section.bullets);
        let _ = writeln!(out);
    }
    let _ = writeln!(out, "{}", DISCLAIMER);
    out
}
