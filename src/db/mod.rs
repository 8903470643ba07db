//! SQLite persistence layer.
//!
//! The browser-style key-value store lives in a single table managed by
//! [`storage::LocalStorage`]; its schema is versioned through
//! [`migrations::MigrationManager`].
//!
//! ```rust,no_run
//! use mapty::db::storage::{LocalStorage, Storage};
//!
//! let mut storage = LocalStorage::new()?;
//! storage.set_item("workouts", "[]")?;
//! assert_eq!(storage.get_item("workouts")?.as_deref(), Some("[]"));
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection management.
pub mod db;

/// Versioned schema changes.
pub mod migrations;

/// String-keyed persistent storage.
pub mod storage;
