//! Application controller.
//!
//! `App` owns every piece of mutable state: the workout store, the map and
//! its marker cache, the rendered list, the form and the edit target. Each
//! public method is one user interaction and runs to completion before the
//! next one starts. Store mutations are written back to [`Storage`] in full
//! before the method returns.
//!
//! ```text
//! user action ──▶ App method ──▶ Workouts ──▶ markers + list ──▶ Storage
//! ```
//!
//! The marker cache (`id → MarkerId`) and the list are derived from the
//! store and can always be rebuilt from it with [`App::resync`].
//!
//! ```rust
//! use mapty::db::storage::LocalStorage;
//! use mapty::libs::app::{App, Submission};
//! use mapty::libs::map::GeoJsonMap;
//! use mapty::libs::workout::Coords;
//!
//! let storage = LocalStorage::in_memory()?;
//! let mut app: App<LocalStorage, GeoJsonMap> = App::new(storage, 14)?;
//!
//! app.show_form(Coords::new(40.7, -73.9));
//! let form = app.form_mut();
//! form.distance = "5".into();
//! form.duration = "30".into();
//! form.cadence = "150".into();
//!
//! assert!(matches!(app.submit()?, Submission::Created(_)));
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::form::{FormMode, InputError, WorkoutForm};
use super::map::{MapView, MarkerId, Popup};
use super::store::{Workouts, WORKOUTS_KEY};
use super::view::WorkoutList;
use super::workout::{Coords, Workout, WorkoutId, WorkoutInput};
use crate::db::storage::Storage;
use crate::msg_debug;
use anyhow::Result;
use chrono::Local;
use std::collections::HashMap;

/// Outcome of submitting the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Created(WorkoutId),
    /// The staged workout was replaced; carries the replacement's id.
    Updated(WorkoutId),
    /// Nothing changed and the form stays open with its values.
    Rejected(InputError),
    /// The edit target disappeared before submission; nothing changed.
    Skipped,
}

pub struct App<S: Storage, M: MapView> {
    storage: S,
    workouts: Workouts,
    map: Option<M>,
    zoom_level: u8,
    markers: HashMap<WorkoutId, MarkerId>,
    list: WorkoutList,
    form: WorkoutForm,
    map_event: Option<Coords>,
    workout_to_edit: Option<WorkoutId>,
}

impl<S: Storage, M: MapView> App<S, M> {
    /// Rehydrates the store from `storage` and renders the list.
    ///
    /// There is no map until [`App::load_map`] is called.
    pub fn new(storage: S, zoom_level: u8) -> Result<Self> {
        let mut app = App {
            storage,
            workouts: Workouts::new(),
            map: None,
            zoom_level,
            markers: HashMap::new(),
            list: WorkoutList::new(),
            form: WorkoutForm::default(),
            map_event: None,
            workout_to_edit: None,
        };
        app.get_local_storage()?;
        Ok(app)
    }

    /// Attaches a map, already centered on the user's position, and puts a
    /// marker on it for every stored workout.
    pub fn load_map(&mut self, map: M) {
        self.map = Some(map);
        for workout in self.workouts.iter() {
            render_marker(&mut self.map, &mut self.markers, workout);
        }
    }

    pub fn workouts(&self) -> &Workouts {
        &self.workouts
    }

    pub fn list(&self) -> &WorkoutList {
        &self.list
    }

    pub fn map(&self) -> Option<&M> {
        self.map.as_ref()
    }

    pub fn marker(&self, id: &WorkoutId) -> Option<MarkerId> {
        self.markers.get(id).copied()
    }

    pub fn form(&self) -> &WorkoutForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut WorkoutForm {
        &mut self.form
    }

    pub fn edit_target(&self) -> Option<&WorkoutId> {
        self.workout_to_edit.as_ref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// A click on the map: remembers the position and opens a blank form.
    pub fn show_form(&mut self, coords: Coords) {
        self.map_event = Some(coords);
        self.workout_to_edit = None;
        self.form.mode = FormMode::New;
        self.form.show();
    }

    pub fn toggle_elevation_field(&mut self) {
        self.form.toggle_type();
    }

    /// Stages a workout for editing and loads it into the form.
    ///
    /// Returns `false`, changing nothing, when `id` is unknown.
    pub fn stage_edit(&mut self, id: &WorkoutId) -> bool {
        let Some(workout) = self.workouts.get(id) else {
            return false;
        };

        self.form.populate(workout);
        self.workout_to_edit = Some(id.clone());
        true
    }

    /// Submits the form in its current mode.
    pub fn submit(&mut self) -> Result<Submission> {
        match self.form.mode {
            FormMode::New => self.new_workout(),
            FormMode::Edit => self.update_workout(),
        }
    }

    fn new_workout(&mut self) -> Result<Submission> {
        let input = match self.form.read() {
            Ok(input) => input,
            Err(e) => return Ok(Submission::Rejected(e)),
        };
        let Some(coords) = self.map_event else {
            return Ok(Submission::Rejected(InputError::NoPosition));
        };

        let workout = self.build(coords, input);
        let id = workout.id.clone();

        render_marker(&mut self.map, &mut self.markers, &workout);
        self.list.render(&workout);
        self.workouts.push(workout);

        self.form.hide();
        self.map_event = None;
        self.set_local_storage()?;

        Ok(Submission::Created(id))
    }

    /// Replaces the staged workout with a new record at its coordinates.
    ///
    /// The replacement gets a fresh id, creation time and click count; only
    /// the coordinates and the slot in the store carry over.
    fn update_workout(&mut self) -> Result<Submission> {
        let Some(target) = self.workout_to_edit.clone() else {
            return Ok(Submission::Skipped);
        };
        let input = match self.form.read() {
            Ok(input) => input,
            Err(e) => return Ok(Submission::Rejected(e)),
        };
        let Some(coords) = self.workouts.get(&target).map(|workout| workout.coords) else {
            msg_debug!(format!("Edit target {} is gone", target));
            self.workout_to_edit = None;
            return Ok(Submission::Skipped);
        };

        let updated = self.build(coords, input);
        let id = updated.id.clone();
        self.workouts.replace(&target, updated);

        self.form.hide();
        self.form.mode = FormMode::New;
        self.workout_to_edit = None;
        self.set_local_storage()?;
        self.resync();

        Ok(Submission::Updated(id))
    }

    fn build(&self, coords: Coords, input: WorkoutInput) -> Workout {
        let created_at = Local::now();
        let id = self.workouts.vacant_id(WorkoutId::from_timestamp(&created_at));
        Workout::new(id, coords, input, created_at)
    }

    /// Deletes a workout with its marker and list entry.
    ///
    /// Returns `false`, changing nothing, when `id` is unknown.
    pub fn remove_workout(&mut self, id: &WorkoutId) -> Result<bool> {
        if self.workouts.position(id).is_none() {
            return Ok(false);
        }

        if let Some(marker) = self.markers.remove(id) {
            if let Some(map) = self.map.as_mut() {
                map.remove_marker(marker);
            }
        }
        self.list.remove(id);
        self.workouts.remove(id);
        if self.workout_to_edit.as_ref() == Some(id) {
            self.workout_to_edit = None;
        }

        self.set_local_storage()?;
        Ok(true)
    }

    /// A click on a list entry: pans the map to the workout, opens its
    /// popup and counts the click.
    ///
    /// Returns the workout, or `None` when `id` is unknown.
    pub fn select(&mut self, id: &WorkoutId) -> Result<Option<&Workout>> {
        let Some(workout) = self.workouts.get_mut(id) else {
            return Ok(None);
        };

        if let Some(map) = self.map.as_mut() {
            map.set_view(workout.coords, self.zoom_level, true);
            if let Some(marker) = self.markers.get(id) {
                map.open_popup(*marker);
            }
        }
        workout.click();

        // Each command is its own process, so the counter only survives if written.
        self.set_local_storage()?;
        Ok(self.workouts.get(id))
    }

    /// Wipes the stored workouts and every view derived from them.
    pub fn reset(&mut self) -> Result<()> {
        self.storage.remove_item(WORKOUTS_KEY)?;

        self.workouts.clear();
        self.teardown();
        self.form.reset();
        self.map_event = None;
        self.workout_to_edit = None;
        Ok(())
    }

    /// Rebuilds markers and list from the store.
    pub fn resync(&mut self) {
        self.teardown();
        for workout in self.workouts.iter() {
            render_marker(&mut self.map, &mut self.markers, workout);
            self.list.render(workout);
        }
    }

    fn teardown(&mut self) {
        if let Some(map) = self.map.as_mut() {
            for (_, marker) in self.markers.drain() {
                map.remove_marker(marker);
            }
        }
        self.markers.clear();
        self.list.clear();
    }

    fn set_local_storage(&mut self) -> Result<()> {
        let blob = self.workouts.to_json()?;
        self.storage.set_item(WORKOUTS_KEY, &blob)
    }

    fn get_local_storage(&mut self) -> Result<()> {
        let Some(blob) = self.storage.get_item(WORKOUTS_KEY)? else {
            return Ok(());
        };

        self.workouts = Workouts::from_json(&blob);
        for workout in self.workouts.iter() {
            self.list.render(workout);
        }
        Ok(())
    }
}

fn render_marker<M: MapView>(map: &mut Option<M>, markers: &mut HashMap<WorkoutId, MarkerId>, workout: &Workout) {
    let Some(map) = map.as_mut() else {
        return;
    };

    let marker = map.add_marker(workout.coords, Popup::for_workout(workout));
    map.open_popup(marker);
    markers.insert(workout.id.clone(), marker);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::storage::LocalStorage;
    use crate::libs::map::{GeoJsonMap, DEFAULT_TILE_URL};
    use crate::libs::workout::WorkoutType;

    type TestApp = App<LocalStorage, GeoJsonMap>;

    fn app() -> TestApp {
        App::new(LocalStorage::in_memory().unwrap(), 14).unwrap()
    }

    fn with_map(mut app: TestApp) -> TestApp {
        app.load_map(GeoJsonMap::new(Coords::new(40.7, -73.9), 14, DEFAULT_TILE_URL));
        app
    }

    fn fill(app: &mut TestApp, workout_type: WorkoutType, distance: &str, duration: &str, specific: &str) {
        let form = app.form_mut();
        form.set_type(workout_type);
        form.distance = distance.to_string();
        form.duration = duration.to_string();
        match workout_type {
            WorkoutType::Running => form.cadence = specific.to_string(),
            WorkoutType::Cycling => form.elevation = specific.to_string(),
        }
    }

    fn create(app: &mut TestApp, workout_type: WorkoutType, distance: &str, duration: &str, specific: &str) -> WorkoutId {
        app.show_form(Coords::new(40.7, -73.9));
        fill(app, workout_type, distance, duration, specific);
        match app.submit().unwrap() {
            Submission::Created(id) => id,
            other => panic!("expected a created workout, got {:?}", other),
        }
    }

    #[test]
    fn test_create_running_and_cycling() {
        let mut app = with_map(app());

        let run = create(&mut app, WorkoutType::Running, "5", "30", "150");
        let ride = create(&mut app, WorkoutType::Cycling, "20", "60", "300");

        assert_eq!(app.workouts().get(&run).unwrap().pace(), Some(6.0));
        assert_eq!(app.workouts().get(&ride).unwrap().speed(), Some(20.0));
        assert_ne!(run, ride);
        assert!(app.marker(&run).is_some() && app.marker(&ride).is_some());
        assert_eq!(app.map().unwrap().marker_count(), 2);
        assert_eq!(app.list().entries()[0].id, ride);
        assert!(app.form().is_hidden());
    }

    #[test]
    fn test_create_persists_whole_store() {
        let mut app = app();
        create(&mut app, WorkoutType::Running, "5", "30", "150");
        create(&mut app, WorkoutType::Cycling, "20", "60", "0");

        let blob = app.storage().get_item(WORKOUTS_KEY).unwrap().unwrap();
        assert_eq!(Workouts::from_json(&blob), *app.workouts());
    }

    #[test]
    fn test_invalid_input_keeps_form_and_store() {
        let mut app = app();
        app.show_form(Coords::new(1.0, 2.0));
        fill(&mut app, WorkoutType::Running, "5", "-30", "150");

        assert_eq!(app.submit().unwrap(), Submission::Rejected(InputError::NotPositive));
        assert!(app.workouts().is_empty());
        assert!(!app.form().is_hidden());
        assert_eq!(app.form().duration, "-30");
        assert_eq!(app.storage().get_item(WORKOUTS_KEY).unwrap(), None);
    }

    #[test]
    fn test_create_without_position_is_rejected() {
        let mut app = app();
        app.form_mut().show();
        fill(&mut app, WorkoutType::Running, "5", "30", "150");

        assert_eq!(app.submit().unwrap(), Submission::Rejected(InputError::NoPosition));
        assert!(app.workouts().is_empty());
    }

    #[test]
    fn test_create_without_map_still_lists() {
        let mut app = app();
        let id = create(&mut app, WorkoutType::Running, "5", "30", "150");

        assert!(app.map().is_none());
        assert!(app.marker(&id).is_none());
        assert_eq!(app.list().len(), 1);
    }

    #[test]
    fn test_delete_first_of_two() {
        let mut app = with_map(app());
        let first = create(&mut app, WorkoutType::Running, "5", "30", "150");
        let second = create(&mut app, WorkoutType::Cycling, "20", "60", "300");

        assert!(app.remove_workout(&first).unwrap());

        assert_eq!(app.workouts().len(), 1);
        assert_eq!(app.workouts().as_slice()[0].id, second);
        assert!(app.marker(&first).is_none());
        assert!(app.list().get(&first).is_none());
        assert_eq!(app.map().unwrap().marker_count(), 1);
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let mut app = app();
        create(&mut app, WorkoutType::Running, "5", "30", "150");
        let before = app.workouts().clone();

        assert!(!app.remove_workout(&WorkoutId::from("nope")).unwrap());
        assert_eq!(*app.workouts(), before);
    }

    #[test]
    fn test_edit_replaces_in_slot_with_new_identity() {
        let mut app = with_map(app());
        let first = create(&mut app, WorkoutType::Running, "5", "30", "150");
        let second = create(&mut app, WorkoutType::Running, "8", "40", "170");
        app.select(&first).unwrap();
        let original = app.workouts().get(&first).unwrap().clone();

        assert!(app.stage_edit(&first));
        assert_eq!(app.form().mode, FormMode::Edit);
        assert_eq!(app.form().distance, "5");
        assert_eq!(app.edit_target(), Some(&first));

        app.form_mut().set_type(WorkoutType::Cycling);
        app.form_mut().distance = "20".to_string();
        app.form_mut().duration = "60".to_string();
        app.form_mut().elevation = "300".to_string();

        let Submission::Updated(replacement) = app.submit().unwrap() else {
            panic!("expected an update");
        };

        let slot = &app.workouts().as_slice()[0];
        assert_eq!(slot.id, replacement);
        assert_ne!(slot.id, first);
        assert_eq!(slot.coords, original.coords);
        assert_eq!(slot.click_count, 0);
        assert_eq!(slot.workout_type(), WorkoutType::Cycling);
        assert_eq!(slot.speed(), Some(20.0));
        assert_eq!(app.workouts().as_slice()[1].id, second);
        assert_eq!(app.edit_target(), None);
        assert!(app.form().is_hidden());

        // Views follow the store after the edit.
        assert!(app.marker(&first).is_none());
        assert!(app.marker(&replacement).is_some());
        assert_eq!(app.map().unwrap().marker_count(), 2);
        assert!(app.list().get(&replacement).is_some());
        assert!(app.list().get(&first).is_none());
    }

    #[test]
    fn test_invalid_edit_keeps_target() {
        let mut app = app();
        let id = create(&mut app, WorkoutType::Running, "5", "30", "150");

        app.stage_edit(&id);
        app.form_mut().cadence = "0".to_string();

        assert_eq!(app.submit().unwrap(), Submission::Rejected(InputError::NotPositive));
        assert_eq!(app.edit_target(), Some(&id));
        assert_eq!(app.workouts().get(&id).unwrap().cadence(), Some(150.0));
    }

    #[test]
    fn test_edit_of_deleted_target_is_skipped() {
        let mut app = app();
        let id = create(&mut app, WorkoutType::Running, "5", "30", "150");

        app.stage_edit(&id);
        app.remove_workout(&id).unwrap();

        assert_eq!(app.submit().unwrap(), Submission::Skipped);
        assert!(app.workouts().is_empty());
    }

    #[test]
    fn test_stage_unknown_is_noop() {
        let mut app = app();
        assert!(!app.stage_edit(&WorkoutId::from("nope")));
        assert_eq!(app.form().mode, FormMode::New);
        assert!(app.form().is_hidden());
    }

    #[test]
    fn test_select_centers_and_counts() {
        let mut app = with_map(app());
        app.show_form(Coords::new(38.7, -9.1));
        fill(&mut app, WorkoutType::Running, "5", "30", "150");
        let Submission::Created(id) = app.submit().unwrap() else {
            panic!("expected a created workout");
        };

        let clicks = app.select(&id).unwrap().map(|workout| workout.click_count);

        assert_eq!(clicks, Some(1));
        assert_eq!(app.map().unwrap().center(), Coords::new(38.7, -9.1));
        assert!(app.select(&WorkoutId::from("nope")).unwrap().is_none());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut app = with_map(app());
        create(&mut app, WorkoutType::Running, "5", "30", "150");
        create(&mut app, WorkoutType::Cycling, "20", "60", "300");

        app.reset().unwrap();

        assert!(app.workouts().is_empty());
        assert!(app.list().is_empty());
        assert_eq!(app.map().unwrap().marker_count(), 0);
        assert_eq!(app.storage().get_item(WORKOUTS_KEY).unwrap(), None);
    }

    #[test]
    fn test_load_map_renders_stored_workouts() {
        let mut storage = LocalStorage::in_memory().unwrap();
        let run = Workout::running(Coords::new(1.0, 2.0), 5.0, 30.0, 150.0);
        let mut ride = Workout::cycling(Coords::new(3.0, 4.0), 20.0, 60.0, 300.0);
        ride.id = run.id.successor();
        let stored = Workouts::from(vec![run, ride]);
        storage.set_item(WORKOUTS_KEY, &stored.to_json().unwrap()).unwrap();

        let app: TestApp = with_map(App::new(storage, 14).unwrap());

        assert_eq!(app.workouts().len(), 2);
        assert_eq!(app.list().len(), 2);
        assert_eq!(app.map().unwrap().marker_count(), 2);
    }

    #[test]
    fn test_corrupt_storage_starts_empty() {
        let mut storage = LocalStorage::in_memory().unwrap();
        storage.set_item(WORKOUTS_KEY, "{broken").unwrap();

        let app: TestApp = App::new(storage, 14).unwrap();

        assert!(app.workouts().is_empty());
        assert!(app.list().is_empty());
    }
}
