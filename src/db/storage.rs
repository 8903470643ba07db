//! Persistent string-keyed storage.
//!
//! Mirrors the browser `localStorage` contract: whole string values are
//! read, overwritten or removed by key. There is no partial update and no
//! history; the last write wins.

use super::db::Db;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

const SELECT_ITEM: &str = "SELECT value FROM local_storage WHERE key = ?1";
const UPSERT_ITEM: &str = "INSERT INTO local_storage (key, value, updated_at) VALUES (?1, ?2, CURRENT_TIMESTAMP)
    ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";
const DELETE_ITEM: &str = "DELETE FROM local_storage WHERE key = ?1";

pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// SQLite-backed [`Storage`] living in the application data directory.
pub struct LocalStorage {
    pub conn: Connection,
}

impl LocalStorage {
    pub fn new() -> Result<LocalStorage> {
        let db = Db::new()?;
        Ok(LocalStorage { conn: db.conn })
    }

    /// Storage that disappears with the value. Handy for dry runs and tests.
    pub fn in_memory() -> Result<LocalStorage> {
        let db = Db::in_memory()?;
        Ok(LocalStorage { conn: db.conn })
    }
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value = self.conn.query_row(SELECT_ITEM, params![key], |row| row.get(0)).optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(UPSERT_ITEM, params![key, value])?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.conn.execute(DELETE_ITEM, params![key])?;
        Ok(())
    }
}
