use super::migrations::{get_db_version, init_with_migrations, needs_migration};
use crate::libs::data_storage::DataStorage;
use crate::msg_debug;
use anyhow::Result;
use rusqlite::Connection;

pub const DB_FILE_NAME: &str = "mapty.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the application database and brings its schema up to date.
    pub fn new() -> Result<Db> {
        let mut conn = Self::new_without_migrations()?;
        if needs_migration(&conn)? {
            init_with_migrations(&mut conn)?;
        }
        msg_debug!(format!("Database schema v{}", get_db_version(&conn)?));

        Ok(Db { conn })
    }

    /// Opens a private in-memory database with the current schema.
    pub fn in_memory() -> Result<Db> {
        let mut conn = Connection::open_in_memory()?;
        init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }

    pub fn new_without_migrations() -> Result<Connection> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        Ok(Connection::open(db_file_path)?)
    }
}
