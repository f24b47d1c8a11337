//! Handlers for the `/checklists` resource.
//!
//! Every read returns the checklist with its category, ordered steps and
//! computed stats.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use checklist_core::types::DbId;
use checklist_db::models::checklist::UpdateChecklist;

use crate::error::AppResult;
use crate::response;
use crate::services::input::CreateChecklistRequest;
use crate::state::AppState;

/// GET /api/v1/checklists
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let checklists = state.checklists().list().await?;
    Ok(response::ok(checklists))
}

/// POST /api/v1/checklists
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateChecklistRequest>,
) -> AppResult<impl IntoResponse> {
    let checklist = state.checklists().create(input).await?;
    Ok(response::created(checklist))
}

/// GET /api/v1/checklists/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let checklist = state.checklists().get(id).await?;
    Ok(response::ok(checklist))
}

/// PUT /api/v1/checklists/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateChecklist>,
) -> AppResult<impl IntoResponse> {
    let checklist = state.checklists().update(id, input).await?;
    Ok(response::ok(checklist))
}

/// DELETE /api/v1/checklists/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    state.checklists().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/checklists/{id}/clone
pub async fn clone(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let checklist = state.checklists().clone_checklist(id).await?;
    Ok(response::created(checklist))
}
