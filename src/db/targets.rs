use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, Row};

use super::{parse_datetime, parse_optional_datetime, Database};
use crate::models::*;

const TARGET_COLUMNS: &str =
    "id, mission_id, name, country, notes, status, completed_at, created_at, updated_at";

fn target_from_row(row: &Row<'_>) -> rusqlite::Result<Target> {
    Ok(Target {
        id: row.get(0)?,
        mission_id: row.get(1)?,
        name: row.get(2)?,
        country: row.get(3)?,
        notes: row.get(4)?,
        status: Status::from_str(&row.get::<_, String>(5)?).unwrap_or(Status::Ongoing),
        completed_at: parse_optional_datetime(row.get(6)?),
        created_at: parse_datetime(row.get::<_, String>(7)?),
        updated_at: parse_datetime(row.get::<_, String>(8)?),
    })
}

impl Database {
    // ============================================================
    // Target operations
    // ============================================================

    pub fn get_target(&self, id: i64) -> Result<Option<Target>> {
        let conn = self.conn()?;
        let target = conn
            .query_row(
                &format!("SELECT {TARGET_COLUMNS} FROM targets WHERE id = ?"),
                [id],
                target_from_row,
            )
            .optional()?;
        Ok(target)
    }

    pub fn get_targets_by_mission(&self, mission_id: i64) -> Result<Vec<Target>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {TARGET_COLUMNS} FROM targets WHERE mission_id = ? ORDER BY id"
        ))?;

        let targets = stmt
            .query_map([mission_id], target_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(targets)
    }

    pub fn count_targets(&self, mission_id: i64) -> Result<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM targets WHERE mission_id = ?",
            [mission_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Number of targets under `mission_id` that are still ongoing.
    pub fn count_open_targets(&self, mission_id: i64) -> Result<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM targets WHERE mission_id = ? AND status = 'ONGOING'",
            [mission_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Insert a target unless the mission already holds `max_targets`.
    ///
    /// The count check and the insert are a single statement. Returns `None`
    /// when the mission is full.
    pub fn add_target(
        &self,
        mission_id: i64,
        input: CreateTargetInput,
        max_targets: usize,
    ) -> Result<Option<Target>> {
        let conn = self.conn()?;
        let now = Utc::now();

        let rows = conn.execute(
            "INSERT INTO targets (mission_id, name, country, notes, status, created_at, updated_at)
             SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?6
             WHERE (SELECT COUNT(*) FROM targets WHERE mission_id = ?1) < ?7",
            (
                mission_id,
                &input.name,
                &input.country,
                &input.notes,
                Status::Ongoing.as_str(),
                now.to_rfc3339(),
                max_targets as i64,
            ),
        )?;

        if rows == 0 {
            return Ok(None);
        }

        Ok(Some(Target {
            id: conn.last_insert_rowid(),
            mission_id,
            name: input.name,
            country: input.country,
            notes: input.notes,
            status: Status::Ongoing,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }))
    }

    /// Overwrite the descriptive fields of an existing target.
    pub fn update_target(&self, target: &Target) -> Result<Option<Target>> {
        let conn = self.conn()?;
        let now = Utc::now();

        let rows = conn.execute(
            "UPDATE targets SET name = ?, country = ?, notes = ?, updated_at = ? WHERE id = ?",
            (
                &target.name,
                &target.country,
                &target.notes,
                now.to_rfc3339(),
                target.id,
            ),
        )?;

        if rows == 0 {
            return Ok(None);
        }

        Ok(Some(Target {
            updated_at: now,
            ..target.clone()
        }))
    }

    /// Move an ongoing target to `COMPLETED`.
    ///
    /// Returns `false` if the target was not ongoing.
    pub fn complete_target(&self, id: i64, at: DateTime<Utc>) -> Result<bool> {
        let conn = self.conn()?;
        let rows = conn.execute(
            "UPDATE targets SET status = 'COMPLETED', completed_at = ?, updated_at = ?
             WHERE id = ? AND status = 'ONGOING'",
            (at.to_rfc3339(), at.to_rfc3339(), id),
        )?;
        Ok(rows > 0)
    }

    pub fn delete_target(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let rows = conn.execute("DELETE FROM targets WHERE id = ?", [id])?;
        Ok(rows > 0)
    }
}
