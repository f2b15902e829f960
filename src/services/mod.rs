//! Business rules on top of the entity stores.
//!
//! Each service owns a cheap clone of [`Database`](crate::db::Database) and
//! enforces field validation and the cross-entity invariants before touching
//! the store. Mission lifecycle transitions live in [`MissionService`].

pub mod breeds;
mod cats;
mod missions;
mod notes;
mod targets;

pub use breeds::BreedCatalog;
pub use cats::CatService;
pub use missions::MissionService;
pub use notes::NoteService;
pub use targets::TargetService;

use crate::error::{ServiceError, ServiceResult};

const CAT_BUSY: &str = "this cat is already on another ongoing mission";

/// Trim `value` and reject it if nothing is left.
fn required(field: &str, value: &str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

/// Map a failed mission insert or assignment for `cat_id`.
///
/// A unique index hit means the cat picked up another ongoing mission in the
/// meantime; a foreign key hit means the cat was deleted.
fn assignment_error(err: anyhow::Error, cat_id: Option<i64>) -> ServiceError {
    match cat_id {
        Some(_) if crate::db::is_unique_violation(&err) => ServiceError::conflict(CAT_BUSY),
        Some(id) if crate::db::is_foreign_key_violation(&err) => ServiceError::not_found("cat", id),
        _ => ServiceError::Internal(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::{CreateCatInput, CreateTargetInput};

    fn db_with_cat() -> (Database, i64) {
        let db = Database::open_memory().unwrap();
        db.migrate().unwrap();
        let cat = db
            .create_cat(CreateCatInput {
                name: "Tom".to_string(),
                breed: "Siamese".to_string(),
                years_of_experience: 1,
                salary: 100.0,
            })
            .unwrap();
        (db, cat.id)
    }

    #[test]
    fn unique_index_hit_is_a_busy_cat_conflict() {
        let (db, cat_id) = db_with_cat();
        db.create_mission(Some(cat_id), vec![CreateTargetInput::named("Paris")])
            .unwrap();

        let err = db
            .create_mission(Some(cat_id), vec![CreateTargetInput::named("Oslo")])
            .unwrap_err();

        match assignment_error(err, Some(cat_id)) {
            ServiceError::Conflict(msg) => assert_eq!(msg, CAT_BUSY),
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn foreign_key_hit_is_a_missing_cat() {
        let (db, _) = db_with_cat();

        let err = db
            .create_mission(Some(404), vec![CreateTargetInput::named("Paris")])
            .unwrap_err();

        assert!(matches!(
            assignment_error(err, Some(404)),
            ServiceError::NotFound { entity: "cat", id: 404 }
        ));
    }

    #[test]
    fn other_failures_stay_internal() {
        let err = anyhow::anyhow!("disk full");
        assert!(matches!(
            assignment_error(err, Some(1)),
            ServiceError::Internal(_)
        ));
    }
}
