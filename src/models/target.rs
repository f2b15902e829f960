use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::Status;

/// A target within a mission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: i64,
    pub mission_id: i64,
    pub name: String,
    pub country: Option<String>,
    /// Free-form briefing kept on the target itself.
    pub notes: Option<String>,
    pub status: Status,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a target.
///
/// Deserializes from either a bare name (`"Paris"`) or a full object
/// (`{"name": "Paris", "country": "France"}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "TargetSpec")]
pub struct CreateTargetInput {
    pub name: String,
    pub country: Option<String>,
    pub notes: Option<String>,
}

impl CreateTargetInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: None,
            notes: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TargetSpec {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        country: Option<String>,
        #[serde(default)]
        notes: Option<String>,
    },
}

impl From<TargetSpec> for CreateTargetInput {
    fn from(spec: TargetSpec) -> Self {
        match spec {
            TargetSpec::Name(name) => Self::named(name),
            TargetSpec::Detailed {
                name,
                country,
                notes,
            } => Self {
                name,
                country,
                notes,
            },
        }
    }
}

/// Input for updating a target. All fields are optional for partial updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTargetInput {
    pub name: Option<String>,
    pub country: Option<String>,
    pub notes: Option<String>,
}
