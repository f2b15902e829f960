use super::missions::MissionService;
use super::required;
use crate::db::Database;
use crate::error::{ServiceError, ServiceResult};
use crate::models::*;

/// Adding, editing and removing targets of ongoing missions.
///
/// Completion goes through [`MissionService::complete_target`].
#[derive(Clone)]
pub struct TargetService {
    db: Database,
    missions: MissionService,
}

impl TargetService {
    pub fn new(db: Database, missions: MissionService) -> Self {
        Self { db, missions }
    }

    pub fn get_target(&self, id: i64) -> ServiceResult<Target> {
        self.db
            .get_target(id)?
            .ok_or(ServiceError::not_found("target", id))
    }

    /// Add a target to an ongoing mission that has room for it.
    pub fn add_target(&self, mission_id: i64, input: CreateTargetInput) -> ServiceResult<Target> {
        let mission = self
            .db
            .get_mission(mission_id)?
            .ok_or(ServiceError::not_found("mission", mission_id))?;
        if mission.status.is_completed() {
            return Err(ServiceError::conflict(
                "cannot add a target to a completed mission",
            ));
        }

        let name = required("target name", &input.name)?;
        let target = self
            .db
            .add_target(
                mission_id,
                CreateTargetInput { name, ..input },
                MAX_TARGETS_PER_MISSION,
            )?
            .ok_or_else(|| {
                ServiceError::validation(format!(
                    "cannot add more than {MAX_TARGETS_PER_MISSION} targets to a mission"
                ))
            })?;

        tracing::info!("Target {} added to mission {}", target.id, mission_id);
        Ok(target)
    }

    /// Edit name, country or briefing notes of a target that is still open.
    pub fn update_target(&self, id: i64, input: UpdateTargetInput) -> ServiceResult<Target> {
        let existing = self.require_open_target(id, "modify")?;

        let name = match input.name {
            Some(name) => required("target name", &name)?,
            None => existing.name.clone(),
        };

        self.db
            .update_target(&Target {
                name,
                country: input.country.or(existing.country.clone()),
                notes: input.notes.or(existing.notes.clone()),
                ..existing
            })?
            .ok_or(ServiceError::not_found("target", id))
    }

    /// Remove an open target.
    ///
    /// A mission keeps at least one target. If every remaining target is
    /// already completed, the mission completes.
    pub fn delete_target(&self, id: i64) -> ServiceResult<()> {
        let target = self.require_open_target(id, "delete")?;

        if self.db.count_targets(target.mission_id)? <= 1 {
            return Err(ServiceError::conflict(
                "cannot delete the only target of a mission",
            ));
        }

        if !self.db.delete_target(id)? {
            return Err(ServiceError::not_found("target", id));
        }
        tracing::info!("Target {} removed from mission {}", id, target.mission_id);

        self.missions.complete_mission_if_done(target.mission_id)?;
        Ok(())
    }

    /// Load a target, refusing if it or its mission has completed.
    fn require_open_target(&self, id: i64, action: &str) -> ServiceResult<Target> {
        let target = self.get_target(id)?;
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

        Ok(target)
    }
}
