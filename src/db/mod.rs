mod cats;
mod missions;
mod notes;
mod schema;
mod targets;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::Connection;

/// Handle to the relational store.
///
/// Cheap to clone; all clones share one SQLite connection. Each entity's
/// store operations live in their own submodule as `impl Database` blocks.
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::from_connection(conn)
    }

    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "spy-cats")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let db_path = dirs.data_dir().join("spy-cats.db");
        Self::open(db_path)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Apply the embedded schema migrations.
    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn()?;
        schema::run_migrations(&conn)
    }

    /// Apply raw SQL files from `dir` in lexical order, skipping ones already applied.
    pub fn migrate_dir(&self, dir: &Path) -> Result<usize> {
        let conn = self.conn()?;
        schema::run_directory_migrations(&conn, dir)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

/// Whether `err` was caused by a violated SQLite constraint (unique, check, foreign key).
pub fn is_constraint_violation(err: &anyhow::Error) -> bool {
    matches!(
        sqlite_failure(err),
        Some(e) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

/// Whether `err` is a unique index violation. The only unique index outside
/// primary keys is `uq_missions_ongoing_cat`.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        sqlite_failure(err),
        Some(e) if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Whether `err` is a foreign key violation, such as a reference to a deleted cat.
pub fn is_foreign_key_violation(err: &anyhow::Error) -> bool {
    matches!(
        sqlite_failure(err),
        Some(e) if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    )
}

fn sqlite_failure(err: &anyhow::Error) -> Option<&rusqlite::ffi::Error> {
    match err.downcast_ref::<rusqlite::Error>() {
        Some(rusqlite::Error::SqliteFailure(e, _)) => Some(e),
        _ => None,
    }
}

fn parse_datetime(s: String) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

fn parse_optional_datetime(s: Option<String>) -> Option<DateTime<Utc>> {
    s.map(parse_datetime)
}
