use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A field note attached to a target.
///
/// Notes can be written and rewritten while the target and its mission are
/// ongoing. Once either completes, the note is frozen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub target_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for creating or rewriting a note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteInput {
    pub content: String,
}
