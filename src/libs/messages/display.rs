//! Display implementation for mapty application messages.
//!
//! All user-facing text lives here so the rest of the crate refers to
//! messages by variant only. Messages with parameters interpolate them
//! directly:
//!
//! ```rust
//! use mapty::libs::messages::Message;
//!
//! let message = Message::WorkoutDeleted("1710405000".to_string());
//! assert_eq!(message.to_string(), "Workout 1710405000 deleted");
//! ```

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === WORKOUT MESSAGES ===
            Message::WorkoutCreated(description) => format!("{} saved", description),
            Message::WorkoutUpdated(description) => format!("Workout updated: {}", description),
            Message::WorkoutDeleted(id) => format!("Workout {} deleted", id),
            Message::WorkoutNotFound(id) => format!("Workout {} not found", id),
            Message::WorkoutSelected(description, clicks) => format!("{} (selected {} time(s))", description, clicks),
            Message::WorkoutsHeader(count) => format!("Workouts ({})", count),
            Message::NoWorkouts => "No workouts yet. Pick a spot and record one with 'mapty new'.".to_string(),
            Message::EditingWorkout(description) => format!("Editing: {}", description),
            Message::EditSkipped => "The workout being edited no longer exists, nothing changed.".to_string(),
            Message::InvalidInputs => "Inputs have to be positive numbers!".to_string(),
            Message::NoPositionSelected => "No position selected. Pass --lat and --lng or allow geolocation.".to_string(),

            // === RESET MESSAGES ===
            Message::ConfirmReset(count) => format!("Delete ALL {} workout(s)? This cannot be undone.", count),
            Message::ResetCancelled => "Reset cancelled.".to_string(),
            Message::WorkoutsCleared => "All workouts deleted.".to_string(),

            // === MAP MESSAGES ===
            Message::PositionUnavailable => "Could not get your current position".to_string(),
            Message::PositionFound(coords) => format!("Current position: {}", coords),
            Message::MapView(url) => format!("Map: {}", url),
            Message::MapExported(path) => format!("Map markers written to {}", path),
            Message::MarkersRendered(count) => format!("{} marker(s) on the map", count),

            // === FORM PROMPTS ===
            Message::PromptWorkoutType => "Type".to_string(),
            Message::PromptDistance => "Distance (km)".to_string(),
            Message::PromptDuration => "Duration (min)".to_string(),
            Message::PromptCadence => "Cadence (step/min)".to_string(),
            Message::PromptElevation => "Elev Gain (meters)".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleMap => "Map settings".to_string(),
            Message::ConfigModuleGeolocation => "Geolocation settings".to_string(),
            Message::PromptSelectModules => "Select modules to configure (space to select, enter to confirm)".to_string(),
            Message::PromptZoomLevel => "Map zoom level".to_string(),
            Message::PromptTileUrl => "Map tile URL template".to_string(),
            Message::PromptGeolocationProvider => "Where should your position come from?".to_string(),
            Message::PromptGeolocationUrl => "IP geolocation service URL".to_string(),
            Message::PromptGeolocationTimeout => "Request timeout (seconds)".to_string(),
            Message::PromptHomeLatitude => "Home latitude".to_string(),
            Message::PromptHomeLongitude => "Home longitude".to_string(),

            // === EXPORT MESSAGES ===
            Message::ExportCompleted(path) => format!("Export completed: {}", path),
            Message::ExportingWorkouts(count) => format!("Exporting {} workout(s)...", count),

            // === DATABASE MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed successfully".to_string(),
        };
        write!(f, "{}", text)
    }
}
