use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::Status;
use super::target::{CreateTargetInput, Target};

/// The most targets a single mission may carry.
pub const MAX_TARGETS_PER_MISSION: usize = 3;

/// A mission, optionally assigned to one cat.
///
/// A cat may hold at most one `Ongoing` mission at a time. A mission with an
/// assigned cat cannot be deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    pub id: i64,
    /// Assigned cat, `None` while the mission is unassigned.
    pub cat_id: Option<i64>,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Input for creating a mission together with its targets.
///
/// `cat_id` of `0` is treated the same as an absent cat. Targets may also be
/// sent as `target_names`, and each entry may be a plain name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMissionInput {
    #[serde(default)]
    pub cat_id: Option<i64>,
    #[serde(default, alias = "target_names")]
    pub targets: Vec<CreateTargetInput>,
}

/// A mission with its targets, used for detailed responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionWithTargets {
    #[serde(flatten)]
    pub mission: Mission,
    pub targets: Vec<Target>,
}
