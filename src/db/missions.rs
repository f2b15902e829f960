use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, Row};

use super::{parse_datetime, parse_optional_datetime, Database};
use crate::models::*;

const MISSION_COLUMNS: &str = "id, cat_id, status, created_at, updated_at, completed_at";

fn mission_from_row(row: &Row<'_>) -> rusqlite::Result<Mission> {
    Ok(Mission {
        id: row.get(0)?,
        cat_id: row.get(1)?,
        status: Status::from_str(&row.get::<_, String>(2)?).unwrap_or(Status::Ongoing),
        created_at: parse_datetime(row.get::<_, String>(3)?),
        updated_at: parse_datetime(row.get::<_, String>(4)?),
        completed_at: parse_optional_datetime(row.get(5)?),
    })
}

impl Database {
    // ============================================================
    // Mission operations
    // ============================================================

    pub fn get_all_missions(&self) -> Result<Vec<Mission>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare(&format!("SELECT {MISSION_COLUMNS} FROM missions ORDER BY id"))?;

        let missions = stmt
            .query_map([], mission_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(missions)
    }

    pub fn get_mission(&self, id: i64) -> Result<Option<Mission>> {
        let conn = self.conn()?;
        let mission = conn
            .query_row(
                &format!("SELECT {MISSION_COLUMNS} FROM missions WHERE id = ?"),
                [id],
                mission_from_row,
            )
            .optional()?;
        Ok(mission)
    }

    pub fn get_mission_with_targets(&self, id: i64) -> Result<Option<MissionWithTargets>> {
        let Some(mission) = self.get_mission(id)? else {
            return Ok(None);
        };

        let targets = self.get_targets_by_mission(id)?;

        Ok(Some(MissionWithTargets { mission, targets }))
    }

    pub fn get_all_missions_with_targets(&self) -> Result<Vec<MissionWithTargets>> {
        self.get_all_missions()?
            .into_iter()
            .map(|mission| {
                let targets = self.get_targets_by_mission(mission.id)?;
                Ok::<_, anyhow::Error>(MissionWithTargets { mission, targets })
            })
            .collect()
    }

    /// The ongoing mission currently held by `cat_id`, if any.
    pub fn find_ongoing_mission_for_cat(&self, cat_id: i64) -> Result<Option<Mission>> {
        let conn = self.conn()?;
        let mission = conn
            .query_row(
                &format!(
                    "SELECT {MISSION_COLUMNS} FROM missions
                     WHERE cat_id = ? AND status = 'ONGOING'
                     ORDER BY id LIMIT 1"
                ),
                [cat_id],
                mission_from_row,
            )
            .optional()?;
        Ok(mission)
    }

    /// Insert a mission and all of its targets in one transaction.
    pub fn create_mission(
        &self,
        cat_id: Option<i64>,
        targets: Vec<CreateTargetInput>,
    ) -> Result<MissionWithTargets> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let now = Utc::now();

        tx.execute(
            "INSERT INTO missions (cat_id, status, created_at, updated_at)
             VALUES (?, ?, ?, ?)",
            (
                cat_id,
                Status::Ongoing.as_str(),
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;
        let mission_id = tx.last_insert_rowid();

        let mut created = Vec::with_capacity(targets.len());
        for input in targets {
            tx.execute(
                "INSERT INTO targets (mission_id, name, country, notes, status, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
                (
                    mission_id,
                    &input.name,
                    &input.country,
                    &input.notes,
                    Status::Ongoing.as_str(),
                    now.to_rfc3339(),
                    now.to_rfc3339(),
                ),
            )?;

            created.push(Target {
                id: tx.last_insert_rowid(),
                mission_id,
                name: input.name,
                country: input.country,
                notes: input.notes,
                status: Status::Ongoing,
                completed_at: None,
                created_at: now,
                updated_at: now,
            });
        }

        tx.commit()?;

        Ok(MissionWithTargets {
            mission: Mission {
                id: mission_id,
                cat_id,
                status: Status::Ongoing,
                created_at: now,
                updated_at: now,
                completed_at: None,
            },
            targets: created,
        })
    }

    /// Assign `cat_id` to a mission that is still ongoing.
    ///
    /// Returns `false` when the mission does not exist or is already completed.
    pub fn assign_cat(&self, mission_id: i64, cat_id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let rows = conn.execute(
            "UPDATE missions SET cat_id = ?, updated_at = ? WHERE id = ? AND status = 'ONGOING'",
            (cat_id, Utc::now().to_rfc3339(), mission_id),
        )?;
        Ok(rows > 0)
    }

    /// Move an ongoing mission to `COMPLETED`.
    ///
    /// Returns `false` if the mission was not ongoing, so the transition happens once.
    pub fn complete_mission(&self, id: i64, at: DateTime<Utc>) -> Result<bool> {
        let conn = self.conn()?;
        let rows = conn.execute(
            "UPDATE missions SET status = 'COMPLETED', completed_at = ?, updated_at = ?
             WHERE id = ? AND status = 'ONGOING'",
            (at.to_rfc3339(), at.to_rfc3339(), id),
        )?;
        Ok(rows > 0)
    }

    pub fn delete_mission(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let rows = conn.execute("DELETE FROM missions WHERE id = ?", [id])?;
        Ok(rows > 0)
    }
}
