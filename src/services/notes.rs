use super::required;
use crate::db::Database;
use crate::error::{ServiceError, ServiceResult};
use crate::models::*;

/// Field notes on targets. Frozen once the target or its mission completes.
#[derive(Clone)]
pub struct NoteService {
    db: Database,
}

impl NoteService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn create_note(&self, target_id: i64, content: &str) -> ServiceResult<Note> {
        let content = required("note content", content)?;
        self.require_writable_target(target_id, "add a note to")?;

        let note = self.db.create_note(target_id, content)?;
        tracing::debug!("Note {} added to target {}", note.id, target_id);
        Ok(note)
    }

    pub fn update_note(&self, id: i64, content: &str) -> ServiceResult<Note> {
        let existing = self.get_note(id)?;
        let content = required("note content", content)?;
        self.require_writable_target(existing.target_id, "update a note of")?;

        self.db
            .update_note(id, content)?
            .ok_or(ServiceError::not_found("note", id))
    }

    pub fn get_note(&self, id: i64) -> ServiceResult<Note> {
        self.db
            .get_note(id)?
            .ok_or(ServiceError::not_found("note", id))
    }

    pub fn list_notes(&self, target_id: i64) -> ServiceResult<Vec<Note>> {
        if self.db.get_target(target_id)?.is_none() {
            return Err(ServiceError::not_found("target", target_id));
        }
        Ok(self.db.get_notes_by_target(target_id)?)
    }

    fn require_writable_target(&self, target_id: i64, action: &str) -> ServiceResult<()> {
        let target = self
            .db
            .get_target(target_id)?
            .ok_or(ServiceError::not_found("target", target_id))?;
        if target.status.is_completed() {
            return Err(ServiceError::conflict(format!(
                "cannot {action} a completed target"
            )));
        }

        let mission = self
            .db
            .get_mission(target.mission_id)?
            .ok_or(ServiceError::not_found("mission", target.mission_id))?;
        if mission.status.is_completed() {
            return Err(ServiceError::conflict(format!(
                "cannot {action} a target of a completed mission"
            )));
        }

        Ok(())
    }
}
