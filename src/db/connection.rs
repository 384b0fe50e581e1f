use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::StoreError;

use super::slots::SlotStore;

/// Ensure the database file exists, create the slot table if needed, and
/// return a live connection. Parent directories are created on the way.
pub fn ensure_schema(db_path: &Path) -> Result<Connection> {
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let conn = Connection::open(db_path).context("failed to open SQLite database")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS slots (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )
    .context("failed to create slots table")?;

    Ok(conn)
}

/// Slots stored as rows of a single SQLite table, one row per key.
#[derive(Debug)]
pub struct SqliteSlots {
    conn: Connection,
}

impl SqliteSlots {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = ensure_schema(db_path)?;
        Ok(Self { conn })
    }

    /// Wrap a connection whose schema is already in place.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl SlotStore for SqliteSlots {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM slots WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO slots (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}
