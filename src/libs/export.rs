//! Workout export for backup and external analysis.
//!
//! - **JSON**: the stored records, pretty-printed, in store order. The
//!   output has the same shape as the storage blob.
//! - **CSV**: one flat row per workout; fields that don't apply to a
//!   workout's type are left empty.
//!
//! ```rust,no_run
//! use mapty::libs::export::{ExportFormat, Exporter};
//! # use mapty::libs::store::Workouts;
//! # let workouts = Workouts::new();
//!
//! let exporter = Exporter::new(ExportFormat::Csv, None);
//! exporter.export(&workouts)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::store::Workouts;
use super::workout::Workout;
use anyhow::Result;
use chrono::Local;
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Flat CSV row.
#[derive(Debug, Serialize)]
pub struct ExportRow {
    pub id: String,
    #[serde(rename = "type")]
    pub workout_type: String,
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    pub distance_km: f64,
    pub duration_min: f64,
    pub pace_min_per_km: Option<f64>,
    pub speed_km_per_h: Option<f64>,
    pub cadence_spm: Option<f64>,
    pub elevation_gain_m: Option<f64>,
    pub created_at: String,
    pub click_count: u32,
}

impl From<&Workout> for ExportRow {
    fn from(workout: &Workout) -> Self {
        ExportRow {
            id: workout.id.to_string(),
            workout_type: workout.workout_type().to_string(),
            description: workout.description.clone(),
            lat: workout.coords.lat(),
            lng: workout.coords.lng(),
            distance_km: workout.distance,
            duration_min: workout.duration,
            pace_min_per_km: workout.pace(),
            speed_km_per_h: workout.speed(),
            cadence_spm: workout.cadence(),
            elevation_gain_m: workout.elevation_gain(),
            created_at: workout.created_at.map(|created_at| created_at.to_rfc3339()).unwrap_or_default(),
            click_count: workout.click_count,
        }
    }
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Without an explicit path the file is named `mapty_export_<timestamp>.<ext>`
    /// in the working directory.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        let default_name = format!("mapty_export_{}", Local::now().format("%Y%m%d_%H%M%S"));

        let extension = match format {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        };

        let output_path = output_path.unwrap_or_else(|| PathBuf::from(format!("{}.{}", default_name, extension)));

        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn export(&self, workouts: &Workouts) -> Result<()> {
        match self.format {
            ExportFormat::Csv => self.export_csv(workouts),
            ExportFormat::Json => self.export_json(workouts),
        }
    }

    fn export_csv(&self, workouts: &Workouts) -> Result<()> {
        let mut writer = csv::Writer::from_path(&self.output_path)?;
        for workout in workouts.iter() {
            writer.serialize(ExportRow::from(workout))?;
        }
        writer.flush()?;
        Ok(())
    }

    fn export_json(&self, workouts: &Workouts) -> Result<()> {
        let file = File::create(&self.output_path)?;
        serde_json::to_writer_pretty(&file, &workouts.to_records()?)?;
        Ok(())
    }
}
