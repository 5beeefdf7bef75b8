//! SQLite-backed asset store.
//!
//! Assets live in a single table, `files(name TEXT PRIMARY KEY, bytes BLOB)`.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::assets::{is_safe_asset_name, AssetStore};
use crate::AssetError;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS files (
    name  TEXT PRIMARY KEY,
    bytes BLOB NOT NULL
)";

/// Assets stored as rows of a SQLite database.
#[derive(Debug)]
pub struct SqliteAssetStore {
    conn: Connection,
}

impl SqliteAssetStore {
    /// Opens (or creates) a database file and ensures the table exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, AssetError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, AssetError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Stores an asset, replacing any previous bytes under the same name.
    pub fn save(&self, name: &str, bytes: &[u8]) -> Result<(), AssetError> {
        if !is_safe_asset_name(name) {
            return Err(AssetError::UnsafeName(name.to_string()));
        }
        self.conn.execute(
            "INSERT OR REPLACE INTO files (name, bytes) VALUES (?1, ?2)",
            params![name, bytes],
        )?;
        log::debug!("stored asset {} ({} bytes)", name, bytes.len());
        Ok(())
    }

    /// Names of all stored assets, sorted.
    pub fn names(&self) -> Result<Vec<String>, AssetError> {
        let mut stmt = self.conn.prepare("SELECT name FROM files ORDER BY name")?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }
}

impl AssetStore for SqliteAssetStore {
    fn get(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        self.conn
            .query_row(
                "SELECT bytes FROM files WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| AssetError::NotFound(name.to_string()))
    }
}
