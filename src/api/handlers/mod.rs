use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use super::extract::{AppJson, AppPath};

use crate::error::ServiceError;
use crate::models::*;
use crate::services::{CatService, MissionService, NoteService, TargetService};

type ApiResult<T> = Result<T, ServiceError>;

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Cats
// ============================================================

pub async fn list_cats(State(cats): State<CatService>) -> ApiResult<Json<Vec<Cat>>> {
    cats.list_cats().map(Json)
}

pub async fn get_cat(
    State(cats): State<CatService>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<Cat>> {
    cats.get_cat(id).map(Json)
}

pub async fn create_cat(
    State(cats): State<CatService>,
    AppJson(input): AppJson<CreateCatInput>,
) -> ApiResult<(StatusCode, Json<Cat>)> {
    cats.create_cat(input)
        .await
        .map(|c| (StatusCode::CREATED, Json(c)))
}

pub async fn update_cat(
    State(cats): State<CatService>,
    AppPath(id): AppPath<i64>,
    AppJson(input): AppJson<UpdateCatInput>,
) -> ApiResult<Json<Cat>> {
    cats.update_cat(id, input).await.map(Json)
}

pub async fn delete_cat(
    State(cats): State<CatService>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<StatusCode> {
    cats.delete_cat(id).map(|_| StatusCode::NO_CONTENT)
}

// ============================================================
// Missions
// ============================================================

pub async fn list_missions(
    State(missions): State<MissionService>,
) -> ApiResult<Json<Vec<MissionWithTargets>>> {
    missions.list_missions().map(Json)
}

pub async fn get_mission(
    State(missions): State<MissionService>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<MissionWithTargets>> {
    missions.get_mission(id).map(Json)
}

pub async fn create_mission(
    State(missions): State<MissionService>,
    AppJson(input): AppJson<CreateMissionInput>,
) -> ApiResult<(StatusCode, Json<MissionWithTargets>)> {
    missions
        .create_mission(input)
        .map(|m| (StatusCode::CREATED, Json(m)))
}

pub async fn delete_mission(
    State(missions): State<MissionService>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<StatusCode> {
    missions.delete_mission(id).map(|_| StatusCode::NO_CONTENT)
}

pub async fn assign_cat(
    State(missions): State<MissionService>,
    AppPath((id, cat_id)): AppPath<(i64, i64)>,
) -> ApiResult<Json<MissionWithTargets>> {
    missions.assign_cat(id, cat_id).map(Json)
}

pub async fn complete_mission(
    State(missions): State<MissionService>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<MissionWithTargets>> {
    missions.complete_mission(id).map(Json)
}

// ============================================================
// Targets
// ============================================================

pub async fn add_target(
    State(targets): State<TargetService>,
    AppPath(mission_id): AppPath<i64>,
    AppJson(input): AppJson<CreateTargetInput>,
) -> ApiResult<(StatusCode, Json<Target>)> {
    targets
        .add_target(mission_id, input)
        .map(|t| (StatusCode::CREATED, Json(t)))
}

pub async fn get_target(
    State(targets): State<TargetService>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<Target>> {
    targets.get_target(id).map(Json)
}

pub async fn update_target(
    State(targets): State<TargetService>,
    AppPath(id): AppPath<i64>,
    AppJson(input): AppJson<UpdateTargetInput>,
) -> ApiResult<Json<Target>> {
    targets.update_target(id, input).map(Json)
}

pub async fn delete_target(
    State(targets): State<TargetService>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<StatusCode> {
    targets.delete_target(id).map(|_| StatusCode::NO_CONTENT)
}

/// Completing a target may complete its mission, so the whole mission is returned.
pub async fn complete_target(
    State(missions): State<MissionService>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<MissionWithTargets>> {
    missions.complete_target(id).map(Json)
}

// ============================================================
// Notes
// ============================================================

pub async fn list_notes(
    State(notes): State<NoteService>,
    AppPath(target_id): AppPath<i64>,
) -> ApiResult<Json<Vec<Note>>> {
    notes.list_notes(target_id).map(Json)
}

pub async fn create_note(
    State(notes): State<NoteService>,
    AppPath(target_id): AppPath<i64>,
    AppJson(input): AppJson<NoteInput>,
) -> ApiResult<(StatusCode, Json<Note>)> {
    notes
        .create_note(target_id, &input.content)
        .map(|n| (StatusCode::CREATED, Json(n)))
}

pub async fn get_note(
    State(notes): State<NoteService>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<Note>> {
    notes.get_note(id).map(Json)
}

pub async fn update_note(
    State(notes): State<NoteService>,
    AppPath(id): AppPath<i64>,
    AppJson(input): AppJson<NoteInput>,
) -> ApiResult<Json<Note>> {
    notes.update_note(id, &input.content).map(Json)
}
