mod error;
mod extract;
mod handlers;

use axum::{
    extract::FromRef,
    routing::{get, patch, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::Database;
use crate::services::{BreedCatalog, CatService, MissionService, NoteService, TargetService};

/// Services shared by all handlers.
///
/// Handlers extract the one service they need via `State<...>`.
#[derive(Clone)]
pub struct AppState {
    pub cats: CatService,
    pub missions: MissionService,
    pub targets: TargetService,
    pub notes: NoteService,
}

impl AppState {
    pub fn new(db: Database, breeds: BreedCatalog) -> Self {
        let missions = MissionService::new(db.clone());
        Self {
            cats: CatService::new(db.clone(), breeds),
            targets: TargetService::new(db.clone(), missions.clone()),
            notes: NoteService::new(db),
            missions,
        }
    }
}

impl FromRef<AppState> for CatService {
    fn from_ref(state: &AppState) -> Self {
        state.cats.clone()
    }
}

impl FromRef<AppState> for MissionService {
    fn from_ref(state: &AppState) -> Self {
        state.missions.clone()
    }
}

impl FromRef<AppState> for TargetService {
    fn from_ref(state: &AppState) -> Self {
        state.targets.clone()
    }
}

impl FromRef<AppState> for NoteService {
    fn from_ref(state: &AppState) -> Self {
        state.notes.clone()
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Cats
        .route("/cats", get(handlers::list_cats).post(handlers::create_cat))
        .route(
            "/cats/{id}",
            get(handlers::get_cat)
                .put(handlers::update_cat)
                .delete(handlers::delete_cat),
        )
        // Missions
        .route(
            "/missions",
            get(handlers::list_missions).post(handlers::create_mission),
        )
        .route(
            "/missions/{id}",
            get(handlers::get_mission).delete(handlers::delete_mission),
        )
        .route(
            "/missions/{id}/assign-cat/{cat_id}",
            patch(handlers::assign_cat),
        )
        .route("/missions/{id}/complete", patch(handlers::complete_mission))
        .route("/missions/{id}/targets", post(handlers::add_target))
        // Targets
        .route(
            "/targets/{id}",
            get(handlers::get_target)
                .put(handlers::update_target)
                .delete(handlers::delete_target),
        )
        .route("/targets/{id}/complete", patch(handlers::complete_target))
        .route(
            "/targets/{id}/notes",
            get(handlers::list_notes).post(handlers::create_note),
        )
        // Notes
        .route(
            "/notes/{id}",
            get(handlers::get_note).put(handlers::update_note),
        )
        // Health
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
