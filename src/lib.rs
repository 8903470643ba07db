//! # Mapty - workouts on a map
//!
//! A command-line tracker for running and cycling workouts, each pinned to
//! the coordinates where it happened.
//!
//! ## Features
//!
//! - **Workout Log**: Record runs (cadence, pace) and rides (elevation
//!   gain, speed) at a map position
//! - **Edit and Delete**: Replace or remove single workouts, or reset all
//! - **Map Export**: Markers with popups as GeoJSON plus an OpenStreetMap link
//! - **Persistence**: The whole log is kept as one JSON value in a local
//!   key-value store and restored on start without recomputation
//! - **Data Export**: Export workouts to CSV and JSON
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mapty::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
