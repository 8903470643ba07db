#[derive(Debug, Clone)]
pub enum Message {
    // === WORKOUT MESSAGES ===
    WorkoutCreated(String),      // description
    WorkoutUpdated(String),      // description
    WorkoutDeleted(String),      // id
    WorkoutNotFound(String),     // id
    WorkoutSelected(String, u32), // description, click count
    WorkoutsHeader(usize),       // count
    NoWorkouts,
    EditingWorkout(String), // description
    EditSkipped,
    InvalidInputs,
    NoPositionSelected,

    // === RESET MESSAGES ===
    ConfirmReset(usize), // count
    ResetCancelled,
    WorkoutsCleared,

    // === MAP MESSAGES ===
    PositionUnavailable,
    PositionFound(String), // coordinates
    MapView(String),       // url
    MapExported(String),   // path
    MarkersRendered(usize),

    // === FORM PROMPTS ===
    PromptWorkoutType,
    PromptDistance,
    PromptDuration,
    PromptCadence,
    PromptElevation,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleMap,
    ConfigModuleGeolocation,
    PromptSelectModules,
    PromptZoomLevel,
    PromptTileUrl,
    PromptGeolocationProvider,
    PromptGeolocationUrl,
    PromptGeolocationTimeout,
    PromptHomeLatitude,
    PromptHomeLongitude,

    // === EXPORT MESSAGES ===
    ExportCompleted(String), // path
    ExportingWorkouts(usize), // count

    // === DATABASE MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
}
