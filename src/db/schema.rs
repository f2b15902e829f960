use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::Connection;

struct Migration {
    version: &'static str,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "001",
        name: "initial",
        sql: include_str!("migrations/001_initial.sql"),
    },
    Migration {
        version: "002",
        name: "one_ongoing_mission_per_cat",
        sql: include_str!("migrations/002_one_ongoing_mission_per_cat.sql"),
    },
];

pub fn run_migrations(conn: &Connection) -> Result<()> {
    ensure_tracking_table(conn)?;

    let applied = get_applied_migrations(conn)?;

    for migration in MIGRATIONS {
        if !applied.iter().any(|v| v == migration.version) {
            apply_migration(conn, migration.version, migration.name, migration.sql)?;
        }
    }

    Ok(())
}

/// Apply raw `*.sql` files from `dir` in lexical file-name order.
///
/// Each file is recorded under its file name, so it runs at most once.
/// A missing directory is not an error. Returns how many files were applied.
pub fn run_directory_migrations(conn: &Connection, dir: &Path) -> Result<usize> {
    if !dir.is_dir() {
        tracing::debug!("No migrations directory at {}, skipping", dir.display());
        return Ok(0);
    }

    ensure_tracking_table(conn)?;
    let applied = get_applied_migrations(conn)?;

    let mut count = 0;
    for path in sql_files(dir)? {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if applied.iter().any(|v| v == file_name) {
            continue;
        }

        let sql = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read migration {}", path.display()))?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name);

        apply_migration(conn, file_name, name, &sql)?;
        count += 1;
    }

    Ok(count)
}

fn sql_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read migrations directory {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "sql") {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn ensure_tracking_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL
        )",
    )
    .context("Failed to create schema_migrations table")
}

fn get_applied_migrations(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT version FROM schema_migrations ORDER BY version")?;
    let versions = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(versions)
}

fn apply_migration(conn: &Connection, version: &str, name: &str, sql: &str) -> Result<()> {
    tracing::info!("Applying migration {}: {}", version, name);

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(sql)
        .with_context(|| format!("Failed to apply migration {}: {}", version, name))?;
    tx.execute(
        "INSERT INTO schema_migrations (version, name, applied_at) VALUES (?, ?, ?)",
        (version, name, chrono::Utc::now().to_rfc3339()),
    )?;
    tx.commit()?;

    tracing::info!("Migration {} applied successfully", version);
    Ok(())
}
