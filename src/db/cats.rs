use anyhow::Result;
use chrono::Utc;
use rusqlite::{OptionalExtension, Row};

use super::{parse_datetime, Database};
use crate::models::*;

const CAT_COLUMNS: &str = "id, name, breed, years_of_experience, salary, created_at, updated_at";

fn cat_from_row(row: &Row<'_>) -> rusqlite::Result<Cat> {
    Ok(Cat {
        id: row.get(0)?,
        name: row.get(1)?,
        breed: row.get(2)?,
        years_of_experience: row.get(3)?,
        salary: row.get(4)?,
        created_at: parse_datetime(row.get::<_, String>(5)?),
        updated_at: parse_datetime(row.get::<_, String>(6)?),
    })
}

impl Database {
    // ============================================================
    // Cat operations
    // ============================================================

    pub fn get_all_cats(&self) -> Result<Vec<Cat>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("SELECT {CAT_COLUMNS} FROM cats ORDER BY id"))?;

        let cats = stmt
            .query_map([], cat_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(cats)
    }

    pub fn get_cat(&self, id: i64) -> Result<Option<Cat>> {
        let conn = self.conn()?;
        let cat = conn
            .query_row(
                &format!("SELECT {CAT_COLUMNS} FROM cats WHERE id = ?"),
                [id],
                cat_from_row,
            )
            .optional()?;
        Ok(cat)
    }

    pub fn create_cat(&self, input: CreateCatInput) -> Result<Cat> {
        let conn = self.conn()?;
        let now = Utc::now();

        conn.execute(
            "INSERT INTO cats (name, breed, years_of_experience, salary, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            (
                &input.name,
                &input.breed,
                input.years_of_experience,
                input.salary,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;

        Ok(Cat {
            id: conn.last_insert_rowid(),
            name: input.name,
            breed: input.breed,
            years_of_experience: input.years_of_experience,
            salary: input.salary,
            created_at: now,
            updated_at: now,
        })
    }

    /// Overwrite every mutable column of an existing cat.
    pub fn update_cat(&self, cat: &Cat) -> Result<Option<Cat>> {
        let conn = self.conn()?;
        let now = Utc::now();

        let rows = conn.execute(
            "UPDATE cats SET name = ?, breed = ?, years_of_experience = ?, salary = ?, updated_at = ?
             WHERE id = ?",
            (
                &cat.name,
                &cat.breed,
                cat.years_of_experience,
                cat.salary,
                now.to_rfc3339(),
                cat.id,
            ),
        )?;

        if rows == 0 {
            return Ok(None);
        }

        Ok(Some(Cat {
            updated_at: now,
            ..cat.clone()
        }))
    }

    pub fn delete_cat(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let rows = conn.execute("DELETE FROM cats WHERE id = ?", [id])?;
        Ok(rows > 0)
    }
}
