//! Workout records and their derived metrics.
//!
//! A workout is one exercise session pinned to a map coordinate. Shared
//! fields live on [`Workout`]; the running/cycling specifics live in the
//! [`WorkoutKind`] payload, which also carries the serialized `type` tag.
//!
//! Derived values (`pace`, `speed`, `description`) are computed once at
//! construction and stored. Records read back from storage keep whatever
//! values were persisted with them.
//!
//! ## Usage
//!
//! ```rust
//! use mapty::libs::workout::{Coords, Workout};
//!
//! let run = Workout::running(Coords::new(40.7, -73.9), 5.0, 30.0, 150.0);
//! assert_eq!(run.pace(), Some(6.0));
//! ```

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Geographic position stored as `[latitude, longitude]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords(pub f64, pub f64);

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Coords(lat, lng)
    }

    pub fn lat(&self) -> f64 {
        self.0
    }

    pub fn lng(&self) -> f64 {
        self.1
    }

    /// Placeholder for a stored record without a readable position.
    pub fn unknown() -> Self {
        Coords(f64::NAN, f64::NAN)
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.0, self.1)
    }
}

/// Opaque workout identifier.
///
/// The value is the last ten digits of the creation instant in Unix
/// milliseconds. It joins store entries, list entries and map markers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    const DIGITS: usize = 10;

    pub fn from_timestamp(created_at: &DateTime<Local>) -> Self {
        let millis = created_at.timestamp_millis().to_string();
        let start = millis.len().saturating_sub(Self::DIGITS);
        WorkoutId(millis[start..].to_string())
    }

    /// Returns the identifier that follows this one numerically.
    ///
    /// Used to resolve collisions when two workouts share a creation
    /// millisecond. Non-numeric identifiers (hand-edited storage) get a
    /// suffix instead.
    pub fn successor(&self) -> Self {
        match self.0.parse::<u64>() {
            Ok(value) => WorkoutId(format!("{:0width$}", value + 1, width = self.0.len())),
            Err(_) => WorkoutId(format!("{}-1", self.0)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WorkoutId {
    fn from(value: &str) -> Self {
        WorkoutId(value.to_string())
    }
}

impl From<String> for WorkoutId {
    fn from(value: String) -> Self {
        WorkoutId(value)
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Workout type tag, also used as a CLI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    Running,
    Cycling,
}

impl WorkoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Running => "running",
            WorkoutType::Cycling => "cycling",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkoutType::Running => "Running",
            WorkoutType::Cycling => "Cycling",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutType::Running => "🏃‍♂️",
            WorkoutType::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant-specific payload, serialized inline with a `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkoutKind {
    Running {
        /// Steps per minute
        #[serde(default = "lenient::nan", deserialize_with = "lenient::number")]
        cadence: f64,
        /// Minutes per kilometer
        #[serde(default = "lenient::nan", deserialize_with = "lenient::number")]
        pace: f64,
    },
    Cycling {
        /// Meters; zero and negative values are legitimate
        #[serde(rename = "elevationGain", default = "lenient::nan", deserialize_with = "lenient::number")]
        elevation_gain: f64,
        /// Kilometers per hour
        #[serde(default = "lenient::nan", deserialize_with = "lenient::number")]
        speed: f64,
    },
}

impl WorkoutKind {
    pub fn workout_type(&self) -> WorkoutType {
        match self {
            WorkoutKind::Running { .. } => WorkoutType::Running,
            WorkoutKind::Cycling { .. } => WorkoutType::Cycling,
        }
    }
}

/// Base inputs for a new workout, before derived values are computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutInput {
    Running { distance: f64, duration: f64, cadence: f64 },
    Cycling { distance: f64, duration: f64, elevation_gain: f64 },
}

impl WorkoutInput {
    pub fn workout_type(&self) -> WorkoutType {
        match self {
            WorkoutInput::Running { .. } => WorkoutType::Running,
            WorkoutInput::Cycling { .. } => WorkoutType::Cycling,
        }
    }
}

/// A single workout.
///
/// Stored records are trusted as they are: a field that is missing or of
/// the wrong JSON type loads as NaN, zero or empty rather than rejecting
/// the record. Only the `type` tag has to name a known variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: WorkoutId,
    #[serde(default = "Coords::unknown", deserialize_with = "lenient::coords")]
    pub coords: Coords,
    /// Kilometers
    #[serde(default = "lenient::nan", deserialize_with = "lenient::number")]
    pub distance: f64,
    /// Minutes
    #[serde(default = "lenient::nan", deserialize_with = "lenient::number")]
    pub duration: f64,
    /// `None` for stored records without a readable timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Local>>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub click_count: u32,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(flatten)]
    pub kind: WorkoutKind,
    /// Stored fields with no counterpart here, written back unchanged.
    #[serde(skip)]
    pub extra: Map<String, Value>,
}

impl Workout {
    /// Builds a workout and computes its derived fields.
    ///
    /// No validation happens here: a zero distance yields an infinite or
    /// NaN pace, exactly as the arithmetic dictates. Callers validate
    /// through [`crate::libs::form::validate`] first.
    pub fn new(id: WorkoutId, coords: Coords, input: WorkoutInput, created_at: DateTime<Local>) -> Self {
        let (distance, duration, kind) = match input {
            WorkoutInput::Running { distance, duration, cadence } => (
                distance,
                duration,
                WorkoutKind::Running {
                    cadence,
                    pace: calc_pace(distance, duration),
                },
            ),
            WorkoutInput::Cycling {
                distance,
                duration,
                elevation_gain,
            } => (
                distance,
                duration,
                WorkoutKind::Cycling {
                    elevation_gain,
                    speed: calc_speed(distance, duration),
                },
            ),
        };
        let description = describe(kind.workout_type(), &created_at);

        Workout {
            id,
            coords,
            distance,
            duration,
            created_at: Some(created_at),
            click_count: 0,
            description,
            kind,
            extra: Map::new(),
        }
    }

    pub fn running(coords: Coords, distance: f64, duration: f64, cadence: f64) -> Self {
        Self::now(coords, WorkoutInput::Running { distance, duration, cadence })
    }

    pub fn cycling(coords: Coords, distance: f64, duration: f64, elevation_gain: f64) -> Self {
        Self::now(
            coords,
            WorkoutInput::Cycling {
                distance,
                duration,
                elevation_gain,
            },
        )
    }

    fn now(coords: Coords, input: WorkoutInput) -> Self {
        let created_at = Local::now();
        Self::new(WorkoutId::from_timestamp(&created_at), coords, input, created_at)
    }

    pub fn workout_type(&self) -> WorkoutType {
        self.kind.workout_type()
    }

    /// Registers one selection in the list view.
    pub fn click(&mut self) {
        self.click_count += 1;
    }

    pub fn pace(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Running { pace, .. } => Some(pace),
            WorkoutKind::Cycling { .. } => None,
        }
    }

    pub fn speed(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Cycling { speed, .. } => Some(speed),
            WorkoutKind::Running { .. } => None,
        }
    }

    pub fn cadence(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Running { cadence, .. } => Some(cadence),
            WorkoutKind::Cycling { .. } => None,
        }
    }

    pub fn elevation_gain(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Cycling { elevation_gain, .. } => Some(elevation_gain),
            WorkoutKind::Running { .. } => None,
        }
    }
}

/// Minutes per kilometer.
pub fn calc_pace(distance: f64, duration: f64) -> f64 {
    duration / distance
}

/// Kilometers per hour.
pub fn calc_speed(distance: f64, duration: f64) -> f64 {
    distance / (duration / 60.0)
}

/// "Running on March 14"
pub fn describe(workout_type: WorkoutType, created_at: &DateTime<Local>) -> String {
    format!("{} on {}", workout_type.label(), created_at.format("%B %-d"))
}

/// Field decoders for stored records.
mod lenient {
    use super::{Coords, WorkoutId};
    use chrono::{DateTime, Local};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn nan() -> f64 {
        f64::NAN
    }

    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Value::deserialize(deserializer)?.as_f64().unwrap_or(f64::NAN))
    }

    pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value.as_f64().filter(|n| n.is_finite() && *n >= 0.0).map(|n| n as u32).unwrap_or(0))
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(text) => text,
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }

    pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<WorkoutId, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(id) => WorkoutId::from(id),
            Value::Null => WorkoutId::default(),
            other => WorkoutId::from(other.to_string()),
        })
    }

    pub fn coords<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Coords, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value.as_array().map(Vec::as_slice) {
            Some([lat, lng]) => Coords::new(lat.as_f64().unwrap_or(f64::NAN), lng.as_f64().unwrap_or(f64::NAN)),
            _ => Coords::unknown(),
        })
    }

    pub fn timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Local>>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value
            .as_str()
            .and_then(|text| DateTime::parse_from_rfc3339(text).ok())
            .map(|created_at| created_at.with_timezone(&Local)))
    }
}
