use super::formatter::{format_metric, format_quantity};
use super::workout::{Workout, WorkoutId, WorkoutKind};
use prettytable::{row, Table};

/// One rendered line of the workout list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub id: WorkoutId,
    pub icon: &'static str,
    pub title: String,
    pub distance: String,
    pub duration: String,
    /// Pace or speed, one decimal, with unit
    pub rate: String,
    /// Cadence or elevation gain, with unit
    pub extra: String,
}

impl ListEntry {
    pub fn from_workout(workout: &Workout) -> Self {
        let (rate, extra) = match workout.kind {
            WorkoutKind::Running { cadence, pace } => (format_metric(pace, "min/km"), format_quantity(cadence, "spm")),
            WorkoutKind::Cycling { elevation_gain, speed } => (format_metric(speed, "km/h"), format_quantity(elevation_gain, "m")),
        };

        ListEntry {
            id: workout.id.clone(),
            icon: workout.workout_type().icon(),
            title: workout.description.clone(),
            distance: format_quantity(workout.distance, "km"),
            duration: format_quantity(workout.duration, "min"),
            rate,
            extra,
        }
    }
}

/// Rendered workout list, newest entry first.
///
/// Entries are addressed by workout id, which is how the controller
/// removes a single entry without re-rendering the rest.
#[derive(Debug, Clone, Default)]
pub struct WorkoutList {
    entries: Vec<ListEntry>,
}

impl WorkoutList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the entry at the top of the list.
    pub fn render(&mut self, workout: &Workout) {
        self.entries.insert(0, ListEntry::from_workout(workout));
    }

    pub fn remove(&mut self, id: &WorkoutId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| &entry.id != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn get(&self, id: &WorkoutId) -> Option<&ListEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct View {}

impl View {
    pub fn workouts<'a>(entries: impl IntoIterator<Item = &'a ListEntry>) {
        let mut table = Table::new();

        table.add_row(row!["ID", "", "WORKOUT", "DISTANCE", "DURATION", "⚡️", ""]);
        for entry in entries {
            table.add_row(row![entry.id, entry.icon, entry.title, entry.distance, entry.duration, entry.rate, entry.extra]);
        }
        table.printstd();
    }

    pub fn workout(workout: &Workout) {
        let entry = ListEntry::from_workout(workout);
        let mut table = Table::new();

        table.add_row(row!["ID", entry.id]);
        table.add_row(row!["WORKOUT", format!("{} {}", entry.icon, entry.title)]);
        table.add_row(row!["POSITION", workout.coords]);
        table.add_row(row!["DISTANCE", entry.distance]);
        table.add_row(row!["DURATION", entry.duration]);
        table.add_row(row!["⚡️", entry.rate]);
        table.add_row(row!["", entry.extra]);
        table.add_row(row!["SELECTED", workout.click_count]);
        table.printstd();
    }
}
