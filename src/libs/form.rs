//! The workout form and its input validation.
//!
//! Field values are kept as the raw text the user typed, the same way an
//! HTML input keeps them; they only become numbers when the form is read.
//! Coercion follows the usual form semantics: blank text is `0`, anything
//! unparseable is `NaN`, and validation rejects what isn't finite.

use super::workout::{Workout, WorkoutInput, WorkoutType};
use thiserror::Error;

/// Whether a submission creates a workout or replaces the staged one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    New,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// A numeric field is not a finite number, or a required one is not positive.
    #[error("Inputs have to be positive numbers!")]
    NotPositive,
    /// The form was submitted while hidden.
    #[error("The workout form is not open")]
    FormClosed,
    /// A new workout was submitted before a map position was picked.
    #[error("No position selected for the new workout")]
    NoPosition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutForm {
    pub mode: FormMode,
    pub workout_type: WorkoutType,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
    hidden: bool,
}

impl Default for WorkoutForm {
    fn default() -> Self {
        WorkoutForm {
            mode: FormMode::New,
            workout_type: WorkoutType::Running,
            distance: String::new(),
            duration: String::new(),
            cadence: String::new(),
            elevation: String::new(),
            hidden: true,
        }
    }
}

impl WorkoutForm {
    pub fn show(&mut self) {
        self.hidden = false;
    }

    /// Hides the form and empties every field. Mode and type stay as they are.
    pub fn hide(&mut self) {
        self.distance.clear();
        self.duration.clear();
        self.cadence.clear();
        self.elevation.clear();
        self.hidden = true;
    }

    pub fn reset(&mut self) {
        *self = WorkoutForm::default();
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Switches the type; only that type's specific field is visible afterwards.
    pub fn set_type(&mut self, workout_type: WorkoutType) {
        self.workout_type = workout_type;
    }

    pub fn toggle_type(&mut self) {
        self.workout_type = match self.workout_type {
            WorkoutType::Running => WorkoutType::Cycling,
            WorkoutType::Cycling => WorkoutType::Running,
        };
    }

    pub fn cadence_visible(&self) -> bool {
        self.workout_type == WorkoutType::Running
    }

    pub fn elevation_visible(&self) -> bool {
        self.workout_type == WorkoutType::Cycling
    }

    /// Loads a workout's current values and switches to edit mode.
    ///
    /// The hidden type-specific field keeps whatever it held before.
    pub fn populate(&mut self, workout: &Workout) {
        self.workout_type = workout.workout_type();
        self.distance = workout.distance.to_string();
        self.duration = workout.duration.to_string();
        if let Some(cadence) = workout.cadence() {
            self.cadence = cadence.to_string();
        }
        if let Some(elevation_gain) = workout.elevation_gain() {
            self.elevation = elevation_gain.to_string();
        }
        self.mode = FormMode::Edit;
        self.show();
    }

    /// Coerces and validates the fields for the selected type.
    pub fn read(&self) -> Result<WorkoutInput, InputError> {
        if self.hidden {
            return Err(InputError::FormClosed);
        }

        let distance = coerce(&self.distance);
        let duration = coerce(&self.duration);
        match self.workout_type {
            WorkoutType::Running => validate(WorkoutInput::Running {
                distance,
                duration,
                cadence: coerce(&self.cadence),
            }),
            WorkoutType::Cycling => validate(WorkoutInput::Cycling {
                distance,
                duration,
                elevation_gain: coerce(&self.elevation),
            }),
        }
    }
}

/// Text to number the way a form field converts: blank is zero, junk is NaN.
pub fn coerce(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Accepts input whose numbers are all finite, with positive distance and
/// duration. Cadence must be positive too; elevation gain only finite.
pub fn validate(input: WorkoutInput) -> Result<WorkoutInput, InputError> {
    let (finite, positive) = match input {
        WorkoutInput::Running { distance, duration, cadence } => (
            all_finite(&[distance, duration, cadence]),
            all_positive(&[distance, duration, cadence]),
        ),
        WorkoutInput::Cycling {
            distance,
            duration,
            elevation_gain,
        } => (all_finite(&[distance, duration, elevation_gain]), all_positive(&[distance, duration])),
    };

    if finite && positive {
        Ok(input)
    } else {
        Err(InputError::NotPositive)
    }
}

fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|value| value.is_finite())
}

fn all_positive(values: &[f64]) -> bool {
    values.iter().all(|value| *value > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::workout::Coords;

    fn open_form(workout_type: WorkoutType, distance: &str, duration: &str, cadence: &str, elevation: &str) -> WorkoutForm {
        let mut form = WorkoutForm::default();
        form.set_type(workout_type);
        form.distance = distance.to_string();
        form.duration = duration.to_string();
        form.cadence = cadence.to_string();
        form.elevation = elevation.to_string();
        form.show();
        form
    }

    #[test]
    fn test_coerce() {
        assert_eq!(coerce(" 5.5 "), 5.5);
        assert_eq!(coerce(""), 0.0);
        assert!(coerce("five").is_nan());
        assert!(coerce("inf").is_infinite());
    }

    #[test]
    fn test_running_requires_positive_cadence() {
        assert!(open_form(WorkoutType::Running, "5", "30", "150", "").read().is_ok());
        assert_eq!(open_form(WorkoutType::Running, "5", "30", "0", "").read(), Err(InputError::NotPositive));
        assert_eq!(open_form(WorkoutType::Running, "5", "30", "", "").read(), Err(InputError::NotPositive));
    }

    #[test]
    fn test_cycling_accepts_zero_and_negative_elevation() {
        assert!(open_form(WorkoutType::Cycling, "20", "60", "", "0").read().is_ok());
        assert!(open_form(WorkoutType::Cycling, "20", "60", "", "-40").read().is_ok());
        assert!(open_form(WorkoutType::Cycling, "20", "60", "", "").read().is_ok());
        assert_eq!(open_form(WorkoutType::Cycling, "20", "60", "", "abc").read(), Err(InputError::NotPositive));
    }

    #[test]
    fn test_distance_and_duration_must_be_positive() {
        for (distance, duration) in [("0", "30"), ("5", "0"), ("-1", "30"), ("5", "-2"), ("x", "30"), ("5", "inf")] {
            assert_eq!(
                open_form(WorkoutType::Cycling, distance, duration, "", "10").read(),
                Err(InputError::NotPositive),
                "{} / {}",
                distance,
                duration
            );
        }
    }

    #[test]
    fn test_read_on_hidden_form() {
        let form = WorkoutForm::default();
        assert_eq!(form.read(), Err(InputError::FormClosed));
    }

    #[test]
    fn test_hide_clears_fields() {
        let mut form = open_form(WorkoutType::Running, "5", "30", "150", "12");
        form.hide();

        assert!(form.is_hidden());
        assert!(form.distance.is_empty() && form.duration.is_empty());
        assert!(form.cadence.is_empty() && form.elevation.is_empty());
    }

    #[test]
    fn test_toggle_switches_visible_field() {
        let mut form = WorkoutForm::default();
        assert!(form.cadence_visible() && !form.elevation_visible());

        form.toggle_type();
        assert!(!form.cadence_visible() && form.elevation_visible());
    }

    #[test]
    fn test_populate_enters_edit_mode() {
        let ride = Workout::cycling(Coords::new(1.0, 2.0), 27.0, 95.0, 533.0);
        let mut form = WorkoutForm::default();

        form.populate(&ride);

        assert_eq!(form.mode, FormMode::Edit);
        assert_eq!(form.workout_type, WorkoutType::Cycling);
        assert_eq!(form.distance, "27");
        assert_eq!(form.duration, "95");
        assert_eq!(form.elevation, "533");
        assert!(!form.is_hidden());
        assert!(form.read().is_ok());
    }
}
