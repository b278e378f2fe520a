//models.rs
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_INTENSITY: u8 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkoutType {
    #[serde(rename = "Spacer")]
    Walk,
    #[serde(rename = "Bieg")]
    Run,
    #[serde(rename = "Trening Siłowy")]
    Strength,
}

impl WorkoutType {
    pub const ALL: [WorkoutType; 3] = [WorkoutType::Walk, WorkoutType::Run, WorkoutType::Strength];

    /// Localized label, also the value written to the data file.
    pub fn label(self) -> &'static str {
        match self {
            WorkoutType::Walk => "Spacer",
            WorkoutType::Run => "Bieg",
            WorkoutType::Strength => "Trening Siłowy",
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ranges are enforced by [`WorkoutForm::validate`] only; the signed fields let
/// hand-edited or older files with out-of-range values still load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    #[serde(rename = "type")]
    pub kind: WorkoutType,
    pub distance: f32,
    pub duration: i32,
    pub calories: i32,
    pub intensity: i32,
}

impl Workout {
    /// One-line summary shown in the list row.
    pub fn summary(&self) -> String {
        // Debug keeps the trailing ".0" on whole distances.
        format!("{:?} km, {} min", self.distance, self.duration)
    }

    pub fn details_title(&self) -> String {
        format!("{} Szczegóły", self.kind)
    }

    pub fn details(&self) -> String {
        format!(
            "Dystans: {:?} km\nCzas trwania: {} min\nKalorie: {}\nIntensywność: {}/{}",
            self.distance, self.duration, self.calories, self.intensity, MAX_INTENSITY
        )
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("no workout type selected")]
    MissingType,
    #[error("distance must be a positive number, got {0:?}")]
    InvalidDistance(String),
    #[error("duration must be a positive whole number of minutes, got {0:?}")]
    InvalidDuration(String),
    #[error("calories must be a positive whole number, got {0:?}")]
    InvalidCalories(String),
    #[error("intensity {0} is outside 0-100")]
    IntensityOutOfRange(u8),
}

/// Raw state of the input widgets.
#[derive(Clone, Debug, Default)]
pub struct WorkoutForm {
    pub kind: Option<WorkoutType>,
    pub distance: String,
    pub duration: String,
    pub calories: String,
    pub intensity: u8,
}

impl WorkoutForm {
    pub fn validate(&self) -> Result<Workout, ValidationError> {
        let kind = self.kind.ok_or(ValidationError::MissingType)?;

        let distance = parse_distance(&self.distance);
        if !(distance.is_finite() && distance > 0.0) {
            return Err(ValidationError::InvalidDistance(self.distance.clone()));
        }

        let duration = parse_whole(&self.duration);
        if duration <= 0 {
            return Err(ValidationError::InvalidDuration(self.duration.clone()));
        }

        let calories = parse_whole(&self.calories);
        if calories <= 0 {
            return Err(ValidationError::InvalidCalories(self.calories.clone()));
        }

        if self.intensity > MAX_INTENSITY {
            return Err(ValidationError::IntensityOutOfRange(self.intensity));
        }

        Ok(Workout {
            kind,
            distance,
            duration,
            calories,
            intensity: i32::from(self.intensity),
        })
    }

    /// Clears the text fields, keeping the selected type and intensity.
    pub fn clear_inputs(&mut self) {
        self.distance.clear();
        self.duration.clear();
        self.calories.clear();
    }
}

// Unparsable input counts as zero and is rejected by the caller.
fn parse_distance(raw: &str) -> f32 {
    raw.trim().replace(',', ".").parse().unwrap_or(0.0)
}

fn parse_whole(raw: &str) -> i32 {
    raw.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn form(kind: Option<WorkoutType>, distance: &str, duration: &str, calories: &str, intensity: u8) -> WorkoutForm {
        WorkoutForm {
            kind,
            distance: distance.to_string(),
            duration: duration.to_string(),
            calories: calories.to_string(),
            intensity,
        }
    }

    #[test]
    fn valid_form_builds_workout() {
        let workout = form(Some(WorkoutType::Run), "5.2", "30", "300", 70).validate().unwrap();
        assert_eq!(
            workout,
            Workout {
                kind: WorkoutType::Run,
                distance: 5.2,
                duration: 30,
                calories: 300,
                intensity: 70,
            }
        );
    }

    #[test]
    fn accepts_comma_decimal_and_whitespace() {
        let workout = form(Some(WorkoutType::Walk), " 3,5 ", " 45", "120 ", 0).validate().unwrap();
        assert_eq!(workout.distance, 3.5);
        assert_eq!(workout.duration, 45);
        assert_eq!(workout.calories, 120);
        assert_eq!(workout.intensity, 0);
    }

    #[test]
    fn missing_type_is_rejected_first() {
        let err = form(None, "5", "30", "300", 70).validate().unwrap_err();
        assert_eq!(err, ValidationError::MissingType);
    }

    #[test]
    fn zero_and_garbage_fields_are_rejected() {
        let run = Some(WorkoutType::Run);
        assert!(matches!(form(run, "0", "30", "300", 70).validate(), Err(ValidationError::InvalidDistance(_))));
        assert!(matches!(form(run, "abc", "30", "300", 70).validate(), Err(ValidationError::InvalidDistance(_))));
        assert!(matches!(form(run, "inf", "30", "300", 70).validate(), Err(ValidationError::InvalidDistance(_))));
        assert!(matches!(form(run, "-2", "30", "300", 70).validate(), Err(ValidationError::InvalidDistance(_))));
        assert!(matches!(form(run, "5", "", "300", 70).validate(), Err(ValidationError::InvalidDuration(_))));
        assert!(matches!(form(run, "5", "-30", "300", 70).validate(), Err(ValidationError::InvalidDuration(_))));
        assert!(matches!(form(run, "5", "30", "0", 70).validate(), Err(ValidationError::InvalidCalories(_))));
        assert_eq!(
            form(run, "5", "30", "300", 101).validate(),
            Err(ValidationError::IntensityOutOfRange(101))
        );
    }

    #[test]
    fn detail_text_uses_fixed_template() {
        let workout = Workout {
            kind: WorkoutType::Strength,
            distance: 1.0,
            duration: 40,
            calories: 250,
            intensity: 90,
        };
        assert_eq!(workout.details_title(), "Trening Siłowy Szczegóły");
        assert_eq!(
            workout.details(),
            "Dystans: 1.0 km\nCzas trwania: 40 min\nKalorie: 250\nIntensywność: 90/100"
        );
        assert_eq!(workout.summary(), "1.0 km, 40 min");
    }

    #[test]
    fn type_serializes_as_label() {
        for kind in WorkoutType::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.label()));
        }
    }

    proptest! {
        #[test]
        fn any_positive_tuple_validates(
            kind in prop::sample::select(WorkoutType::ALL.to_vec()),
            distance in 0.01f32..1000.0,
            duration in 1i32..10_000,
            calories in 1i32..100_000,
            intensity in 0u8..=MAX_INTENSITY,
        ) {
            let workout = form(
                Some(kind),
                &distance.to_string(),
                &duration.to_string(),
                &calories.to_string(),
                intensity,
            )
            .validate()
            .unwrap();
            prop_assert_eq!(
                workout,
                Workout { kind, distance, duration, calories, intensity: i32::from(intensity) }
            );
        }
    }
}
