use anyhow::Result;
use chrono::Utc;
use rusqlite::{OptionalExtension, Row};

use super::{parse_datetime, Database};
use crate::models::*;

const NOTE_COLUMNS: &str = "id, target_id, content, created_at, updated_at";

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        target_id: row.get(1)?,
        content: row.get(2)?,
        created_at: parse_datetime(row.get::<_, String>(3)?),
        updated_at: parse_datetime(row.get::<_, String>(4)?),
    })
}

impl Database {
    // ============================================================
    // Note operations
    // ============================================================

    pub fn get_note(&self, id: i64) -> Result<Option<Note>> {
        let conn = self.conn()?;
        let note = conn
            .query_row(
                &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?"),
                [id],
                note_from_row,
            )
            .optional()?;
        Ok(note)
    }

    pub fn get_notes_by_target(&self, target_id: i64) -> Result<Vec<Note>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE target_id = ? ORDER BY id"
        ))?;

        let notes = stmt
            .query_map([target_id], note_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(notes)
    }

    pub fn create_note(&self, target_id: i64, content: String) -> Result<Note> {
        let conn = self.conn()?;
        let now = Utc::now();

        conn.execute(
            "INSERT INTO notes (target_id, content, created_at, updated_at) VALUES (?, ?, ?, ?)",
            (target_id, &content, now.to_rfc3339(), now.to_rfc3339()),
        )?;

        Ok(Note {
            id: conn.last_insert_rowid(),
            target_id,
            content,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update_note(&self, id: i64, content: String) -> Result<Option<Note>> {
        let Some(existing) = self.get_note(id)? else {
            return Ok(None);
        };

        let conn = self.conn()?;
        let now = Utc::now();

        conn.execute(
            "UPDATE notes SET content = ?, updated_at = ? WHERE id = ?",
            (&content, now.to_rfc3339(), id),
        )?;

        Ok(Some(Note {
            content,
            updated_at: now,
            ..existing
        }))
    }
}
