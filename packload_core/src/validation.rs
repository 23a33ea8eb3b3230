//! Input checks performed before anything reaches the calculator.
//!
//! The calculator trusts its input; every range and finiteness rule lives
//! here so that callers reject bad values with a user-facing message.

use crate::{CalculationInput, Error, ProfileDraft, Result};

impl CalculationInput {
    /// Check that every quantity is finite and within its legal range
    pub fn validate(&self) -> Result<()> {
        let required = [self.dog_weight, self.age_years, self.age_months, self.distance];
        if !required.iter().all(|v| v.is_finite()) {
            return Err(Error::Validation(
                "Please enter valid numbers before calculating.".into(),
            ));
        }

        if self.dog_weight <= 0.0
            || self.distance <= 0.0
            || !age_in_range(self.age_years, self.age_months)
        {
            return Err(Error::Validation(
                "Please check values for weight, distance, and age fields.".into(),
            ));
        }

        let optional_ok = [self.elevation_gain, self.temperature]
            .iter()
            .flatten()
            .all(|v| v.is_finite());
        if !optional_ok {
            return Err(Error::Validation(
                "Elevation and temperature must be valid numbers when provided.".into(),
            ));
        }

        Ok(())
    }
}

impl ProfileDraft {
    /// Check a new profile before it is stored
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("Please provide a profile name.".into()));
        }

        let numbers = [self.dog_weight, self.age_years, self.age_months];
        if !numbers.iter().all(|v| v.is_finite()) {
            return Err(Error::Validation(
                "Please enter valid numbers for weight and age.".into(),
            ));
        }

        if self.dog_weight <= 0.0 || !age_in_range(self.age_years, self.age_months) {
            return Err(Error::Validation(
                "Please use positive values and keep months between 0 and 11.".into(),
            ));
        }

        Ok(())
    }
}

fn age_in_range(years: f64, months: f64) -> bool {
    years >= 0.0 && (0.0..=11.0).contains(&months)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Experience, Fitness, SizeClass, Terrain, Units};

    fn valid_input() -> CalculationInput {
        CalculationInput {
            units: Units::Us,
            dog_weight: 45.0,
            age_years: 4.0,
            age_months: 0.0,
            size_class: SizeClass::Medium,
            fitness: Fitness::Avg,
            experience: Experience::Some,
            distance: 6.0,
            terrain: Terrain::Easy,
            elevation_gain: None,
            temperature: None,
        }
    }

    fn valid_draft() -> ProfileDraft {
        ProfileDraft {
            name: "Juniper".into(),
            units: Units::Us,
            dog_weight: 45.0,
            age_years: 4.0,
            age_months: 0.0,
            size_class: SizeClass::Medium,
            fitness: Fitness::Avg,
            experience: Experience::Some,
        }
    }

    fn message(err: Error) -> String {
        match err {
            Error::Validation(msg) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(valid_input().validate().is_ok());

        let mut input = valid_input();
        input.age_months = 11.0;
        input.elevation_gain = Some(0.0);
        input.temperature = Some(-10.0);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_non_finite_required_values() {
        let mut input = valid_input();
        input.distance = f64::NAN;
        assert_eq!(
            message(input.validate().unwrap_err()),
            "Please enter valid numbers before calculating."
        );

        let mut input = valid_input();
        input.dog_weight = f64::INFINITY;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_out_of_range_values() {
        let cases: Vec<fn(&mut CalculationInput)> = vec![
            |i: &mut CalculationInput| i.dog_weight = 0.0,
            |i: &mut CalculationInput| i.distance = -1.0,
            |i: &mut CalculationInput| i.age_years = -1.0,
            |i: &mut CalculationInput| i.age_months = 12.0,
            |i: &mut CalculationInput| i.age_months = -1.0,
        ];

        for mutate in cases {
            let mut input = valid_input();
            mutate(&mut input);
            assert_eq!(
                message(input.validate().unwrap_err()),
                "Please check values for weight, distance, and age fields."
            );
        }
    }

    #[test]
    fn test_non_finite_optional_values() {
        let mut input = valid_input();
        input.temperature = Some(f64::NAN);
        assert_eq!(
            message(input.validate().unwrap_err()),
            "Elevation and temperature must be valid numbers when provided."
        );

        let mut input = valid_input();
        input.elevation_gain = Some(f64::NEG_INFINITY);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_profile_draft_rules() {
        assert!(valid_draft().validate().is_ok());

        let mut draft = valid_draft();
        draft.name = "   ".into();
        assert_eq!(
            message(draft.validate().unwrap_err()),
            "Please provide a profile name."
        );

        let mut draft = valid_draft();
        draft.age_years = f64::NAN;
        assert_eq!(
            message(draft.validate().unwrap_err()),
            "Please enter valid numbers for weight and age."
        );

        let mut draft = valid_draft();
        draft.dog_weight = -3.0;
        assert_eq!(
            message(draft.validate().unwrap_err()),
            "Please use positive values and keep months between 0 and 11."
        );
    }
}
