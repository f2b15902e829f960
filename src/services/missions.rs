use chrono::Utc;

use super::{assignment_error, required, CAT_BUSY};
use crate::db::Database;
use crate::error::{ServiceError, ServiceResult};
use crate::models::*;

/// Missions and the mission/target completion state machine.
///
/// Targets move `ONGOING -> COMPLETED`; when the last open target of a
/// mission completes, the mission follows. A mission can also be completed
/// directly, regardless of its targets. Nothing is ever reopened.
#[derive(Clone)]
pub struct MissionService {
    db: Database,
}

impl MissionService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create a mission with 1–3 targets, optionally assigned to a cat.
    pub fn create_mission(&self, input: CreateMissionInput) -> ServiceResult<MissionWithTargets> {
        if input.targets.is_empty() || input.targets.len() > MAX_TARGETS_PER_MISSION {
            return Err(ServiceError::validation(format!(
                "mission must have between 1 and {MAX_TARGETS_PER_MISSION} targets"
            )));
        }

        let targets = input
            .targets
            .into_iter()
            .map(|target| {
                Ok::<_, ServiceError>(CreateTargetInput {
                    name: required("target name", &target.name)?,
                    ..target
                })
            })
            .collect::<ServiceResult<Vec<_>>>()?;

        let cat_id = input.cat_id.filter(|&id| id != 0);
        if let Some(cat_id) = cat_id {
            self.require_cat(cat_id)?;
            if self.db.find_ongoing_mission_for_cat(cat_id)?.is_some() {
                return Err(ServiceError::conflict(
                    "this cat already has an ongoing mission",
                ));
            }
        }

        let mission = self
            .db
            .create_mission(cat_id, targets)
            .map_err(|e| assignment_error(e, cat_id))?;

        tracing::info!(
            "Mission {} created with {} targets",
            mission.mission.id,
            mission.targets.len()
        );
        Ok(mission)
    }

    pub fn list_missions(&self) -> ServiceResult<Vec<MissionWithTargets>> {
        Ok(self.db.get_all_missions_with_targets()?)
    }

    pub fn get_mission(&self, id: i64) -> ServiceResult<MissionWithTargets> {
        self.db
            .get_mission_with_targets(id)?
            .ok_or(ServiceError::not_found("mission", id))
    }

    /// Delete a mission and, by cascade, its targets and notes.
    ///
    /// Missions with an assigned cat cannot be deleted.
    pub fn delete_mission(&self, id: i64) -> ServiceResult<()> {
        let mission = self.require_mission(id)?;

        if let Some(cat_id) = mission.cat_id {
            return Err(ServiceError::conflict(format!(
                "cannot delete a mission that is assigned to cat {cat_id}"
            )));
        }

        if !self.db.delete_mission(id)? {
            return Err(ServiceError::not_found("mission", id));
        }
        tracing::info!("Mission {} deleted", id);
        Ok(())
    }

    /// Assign a cat to an ongoing mission.
    ///
    /// Re-assigning the cat the mission already has is a no-op.
    pub fn assign_cat(&self, mission_id: i64, cat_id: i64) -> ServiceResult<MissionWithTargets> {
        let mission = self.require_mission(mission_id)?;
        if mission.status.is_completed() {
            return Err(ServiceError::conflict(
                "cannot assign a cat to a completed mission",
            ));
        }

        self.require_cat(cat_id)?;

        if mission.cat_id != Some(cat_id) {
            if let Some(other) = self.db.find_ongoing_mission_for_cat(cat_id)? {
                tracing::debug!("Cat {} is busy with mission {}", cat_id, other.id);
                return Err(ServiceError::conflict(CAT_BUSY));
            }

            let assigned = self
                .db
                .assign_cat(mission_id, cat_id)
                .map_err(|e| assignment_error(e, Some(cat_id)))?;
            if !assigned {
                return Err(ServiceError::conflict(
                    "cannot assign a cat to a completed mission",
                ));
            }
            tracing::info!("Cat {} assigned to mission {}", cat_id, mission_id);
        }

        self.get_mission(mission_id)
    }

    /// Force a mission to `COMPLETED` regardless of its targets.
    pub fn complete_mission(&self, id: i64) -> ServiceResult<MissionWithTargets> {
        let mission = self.require_mission(id)?;
        if mission.status.is_completed() || !self.db.complete_mission(id, Utc::now())? {
            return Err(ServiceError::conflict("mission is already completed"));
        }

        tracing::info!("Mission {} marked as completed", id);
        self.get_mission(id)
    }

    /// Complete a target, then complete its mission if no targets remain open.
    ///
    /// Returns the owning mission with its targets after the transition.
    pub fn complete_target(&self, target_id: i64) -> ServiceResult<MissionWithTargets> {
        let target = self
            .db
            .get_target(target_id)?
            .ok_or(ServiceError::not_found("target", target_id))?;
        if target.status.is_completed() {
            return Err(ServiceError::conflict("target is already completed"));
        }

        let mission = self.require_mission(target.mission_id)?;
        if mission.status.is_completed() {
            return Err(ServiceError::conflict(
                "cannot complete a target of a completed mission",
            ));
        }

        let now = Utc::now();
        if !self.db.complete_target(target_id, now)? {
            return Err(ServiceError::conflict("target is already completed"));
        }
        tracing::info!("Target {} of mission {} completed", target_id, mission.id);

        self.complete_mission_if_done(mission.id)?;
        self.get_mission(mission.id)
    }

    /// Complete the mission once none of its targets are ongoing.
    ///
    /// Shared with target deletion, which can also leave a mission with only
    /// completed targets. Returns whether the mission transitioned.
    pub(crate) fn complete_mission_if_done(&self, mission_id: i64) -> ServiceResult<bool> {
        if self.db.count_open_targets(mission_id)? > 0 {
            return Ok(false);
        }

        let completed = self.db.complete_mission(mission_id, Utc::now())?;
        if completed {
            tracing::info!("All targets done, mission {} completed", mission_id);
        }
        Ok(completed)
    }

    fn require_mission(&self, id: i64) -> ServiceResult<Mission> {
        self.db
            .get_mission(id)?
            .ok_or(ServiceError::not_found("mission", id))
    }

    fn require_cat(&self, id: i64) -> ServiceResult<Cat> {
        self.db
            .get_cat(id)?
            .ok_or(ServiceError::not_found("cat", id))
    }
}
