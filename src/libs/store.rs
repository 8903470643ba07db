//! The ordered workout collection and its storage blob.
//!
//! `Workouts` is the single authoritative copy of the user's data. It is
//! serialized as a whole (a JSON array) after every mutation and rebuilt
//! from that blob at startup. Map markers and list entries are derived
//! from it and never consulted as truth.

use super::workout::{Workout, WorkoutId, WorkoutType};
use crate::msg_debug;
use anyhow::Result;
use serde_json::{Map, Value};

/// Storage key holding the serialized collection.
pub const WORKOUTS_KEY: &str = "workouts";

/// Field used to order the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SortField {
    Date,
    Distance,
    Duration,
    Type,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workouts(Vec<Workout>);

impl Workouts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Workout> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Workout] {
        &self.0
    }

    pub fn push(&mut self, workout: Workout) {
        self.0.push(workout);
    }

    pub fn position(&self, id: &WorkoutId) -> Option<usize> {
        self.0.iter().position(|workout| &workout.id == id)
    }

    pub fn get(&self, id: &WorkoutId) -> Option<&Workout> {
        self.0.iter().find(|workout| &workout.id == id)
    }

    pub fn get_mut(&mut self, id: &WorkoutId) -> Option<&mut Workout> {
        self.0.iter_mut().find(|workout| &workout.id == id)
    }

    /// Puts `workout` into the slot currently held by `id`.
    ///
    /// Returns `false` and leaves the collection untouched when `id` is absent.
    pub fn replace(&mut self, id: &WorkoutId, workout: Workout) -> bool {
        match self.position(id) {
            Some(index) => {
                self.0[index] = workout;
                true
            }
            None => false,
        }
    }

    /// Removes the workout with `id`, preserving the order of the rest.
    pub fn remove(&mut self, id: &WorkoutId) -> Option<Workout> {
        let index = self.position(id)?;
        Some(self.0.remove(index))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns `candidate`, or the first free successor if it is taken.
    pub fn vacant_id(&self, candidate: WorkoutId) -> WorkoutId {
        let mut id = candidate;
        while self.position(&id).is_some() {
            id = id.successor();
        }
        id
    }

    /// References in display order. The collection itself is not reordered.
    pub fn sorted_by(&self, field: SortField) -> Vec<&Workout> {
        let mut sorted: Vec<&Workout> = self.0.iter().collect();
        match field {
            SortField::Date => sorted.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            SortField::Distance => sorted.sort_by(|a, b| a.distance.total_cmp(&b.distance)),
            SortField::Duration => sorted.sort_by(|a, b| a.duration.total_cmp(&b.duration)),
            SortField::Type => sorted.sort_by_key(|workout| match workout.workout_type() {
                WorkoutType::Running => 0,
                WorkoutType::Cycling => 1,
            }),
        }
        sorted
    }

    /// One JSON object per workout, including the fields it was loaded
    /// with that the model doesn't know.
    pub fn to_records(&self) -> Result<Vec<Value>> {
        self.0
            .iter()
            .map(|workout| {
                let mut record = serde_json::to_value(workout)?;
                if let Value::Object(fields) = &mut record {
                    for (key, value) in &workout.extra {
                        fields.entry(key.clone()).or_insert_with(|| value.clone());
                    }
                }
                Ok(record)
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_records()?)?)
    }

    /// Rebuilds the collection from a stored blob.
    ///
    /// Anything that is not a JSON array yields an empty collection. Each
    /// element is reconstructed by its `type` tag with its fields copied
    /// as they are; only elements whose tag names neither variant are
    /// skipped.
    pub fn from_json(blob: &str) -> Self {
        let records: Vec<Value> = match serde_json::from_str(blob) {
            Ok(records) => records,
            Err(e) => {
                msg_debug!(format!("Ignoring stored workouts: {}", e));
                return Self::new();
            }
        };

        let workouts = records
            .into_iter()
            .filter_map(|record| match serde_json::from_value::<Workout>(record.clone()) {
                Ok(mut workout) => {
                    workout.extra = unknown_fields(&workout, record);
                    Some(workout)
                }
                Err(e) => {
                    msg_debug!(format!("Skipping workout record of unknown type: {}", e));
                    None
                }
            })
            .collect();

        Workouts(workouts)
    }
}

/// Fields of `record` that serializing `workout` would not write.
fn unknown_fields(workout: &Workout, record: Value) -> Map<String, Value> {
    let (Value::Object(fields), Ok(Value::Object(known))) = (record, serde_json::to_value(workout)) else {
        return Map::new();
    };
    fields.into_iter().filter(|(key, _)| !known.contains_key(key)).collect()
}

impl From<Vec<Workout>> for Workouts {
    fn from(workouts: Vec<Workout>) -> Self {
        Workouts(workouts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::workout::{Coords, WorkoutInput};
    use chrono::{Local, TimeZone};

    fn workout(id: &str, day: u32, distance: f64) -> Workout {
        Workout::new(
            WorkoutId::from(id),
            Coords::new(40.7, -73.9),
            WorkoutInput::Running {
                distance,
                duration: 30.0,
                cadence: 150.0,
            },
            Local.with_ymd_and_hms(2024, 5, day, 8, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut workouts = Workouts::from(vec![workout("a", 1, 5.0), workout("b", 2, 6.0), workout("c", 3, 7.0)]);

        let removed = workouts.remove(&WorkoutId::from("b")).unwrap();

        assert_eq!(removed.id, WorkoutId::from("b"));
        let ids: Vec<&str> = workouts.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut workouts = Workouts::from(vec![workout("a", 1, 5.0), workout("b", 2, 6.0)]);
        let before = workouts.clone();

        assert!(workouts.remove(&WorkoutId::from("zzz")).is_none());
        assert_eq!(workouts, before);
    }

    #[test]
    fn test_replace_in_place() {
        let mut workouts = Workouts::from(vec![workout("a", 1, 5.0), workout("b", 2, 6.0)]);

        assert!(workouts.replace(&WorkoutId::from("a"), workout("n", 9, 10.0)));
        assert!(!workouts.replace(&WorkoutId::from("missing"), workout("x", 9, 1.0)));

        let ids: Vec<&str> = workouts.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["n", "b"]);
    }

    #[test]
    fn test_vacant_id_skips_taken() {
        let workouts = Workouts::from(vec![workout("0000000100", 1, 5.0), workout("0000000101", 2, 6.0)]);

        assert_eq!(workouts.vacant_id(WorkoutId::from("0000000100")), WorkoutId::from("0000000102"));
        assert_eq!(workouts.vacant_id(WorkoutId::from("0000000050")), WorkoutId::from("0000000050"));
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let mut clicked = workout("a", 1, 5.0);
        clicked.click();
        let workouts = Workouts::from(vec![clicked, workout("b", 2, 6.0)]);

        let restored = Workouts::from_json(&workouts.to_json().unwrap());

        assert_eq!(restored, workouts);
        assert_eq!(restored.as_slice()[0].click_count, 1);
    }

    #[test]
    fn test_derived_fields_are_not_recomputed() {
        let blob = r#"[{"type":"running","id":"1","coords":[1.0,2.0],"distance":5,"duration":30,
            "createdAt":"2024-03-14T09:30:00Z","clickCount":3,"description":"Legacy label",
            "cadence":150,"pace":99.5}]"#;

        let workouts = Workouts::from_json(blob);

        let run = &workouts.as_slice()[0];
        assert_eq!(run.pace(), Some(99.5));
        assert_eq!(run.description, "Legacy label");
        assert_eq!(run.click_count, 3);
    }

    #[test]
    fn test_invalid_blob_yields_empty() {
        assert!(Workouts::from_json("not json").is_empty());
        assert!(Workouts::from_json("null").is_empty());
        assert!(Workouts::from_json(r#"{"type":"running"}"#).is_empty());
    }

    #[test]
    fn test_unknown_records_are_skipped() {
        let blob = r#"[{"type":"swimming","id":"1"},
            {"type":"cycling","id":"2","coords":[1.0,2.0],"distance":20,"duration":60,
            "createdAt":"2024-03-14T09:30:00Z","clickCount":0,"description":"Cycling on March 14",
            "elevationGain":300,"speed":20}]"#;

        let workouts = Workouts::from_json(blob);

        assert_eq!(workouts.len(), 1);
        assert_eq!(workouts.as_slice()[0].speed(), Some(20.0));
    }

    #[test]
    fn test_partial_record_is_kept() {
        let blob = r#"[{"type":"running","id":"1","coords":[1.0,2.0],"distance":5,"duration":30,
            "cadence":150,"pace":6}]"#;

        let workouts = Workouts::from_json(blob);
        assert_eq!(workouts.len(), 1);
        assert_eq!(workouts.as_slice()[0].click_count, 0);

        let restored = Workouts::from_json(&workouts.to_json().unwrap());
        assert_eq!(restored.len(), 1);
        assert_eq!(restored.as_slice()[0].id, WorkoutId::from("1"));
        assert_eq!(restored.as_slice()[0].pace(), Some(6.0));
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let blob = r#"[{"type":"cycling","id":"2","coords":[1.0,2.0],"distance":20,"duration":60,
            "createdAt":"last tuesday","clickCount":1,"description":"Cycling on March 14",
            "elevationGain":300,"speed":20,"extra":"kept"}]"#;

        let workouts = Workouts::from_json(blob);
        let records = workouts.to_records().unwrap();

        assert_eq!(workouts.as_slice()[0].created_at, None);
        assert_eq!(records[0]["extra"], "kept");
        assert_eq!(records[0]["createdAt"], "last tuesday");
        assert_eq!(records[0]["speed"], 20.0);
    }

    #[test]
    fn test_sorted_by_distance_leaves_store_order() {
        let workouts = Workouts::from(vec![workout("a", 1, 9.0), workout("b", 2, 3.0), workout("c", 3, 6.0)]);

        let sorted: Vec<&str> = workouts.sorted_by(SortField::Distance).iter().map(|w| w.id.as_str()).collect();

        assert_eq!(sorted, vec!["b", "c", "a"]);
        assert_eq!(workouts.as_slice()[0].id.as_str(), "a");
    }
}
