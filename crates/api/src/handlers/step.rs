//! Handlers for steps, both checklist-scoped and by id.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use checklist_core::types::DbId;

use crate::error::AppResult;
use crate::response;
use crate::services::input::{CreateStepRequest, ReorderRequest, UpdateStepRequest};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// /checklists/{id}/steps
// ---------------------------------------------------------------------------

/// GET /api/v1/checklists/{id}/steps
pub async fn list_by_checklist(
    State(state): State<AppState>,
    Path(checklist_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let steps = state.checklists().list_steps(checklist_id).await?;
    Ok(response::ok(steps))
}

/// POST /api/v1/checklists/{id}/steps
///
/// Accepts `insert_after`, `insert_before` or `order_index` for placement;
/// appends when none is given.
pub async fn create(
    State(state): State<AppState>,
    Path(checklist_id): Path<DbId>,
    Json(input): Json<CreateStepRequest>,
) -> AppResult<impl IntoResponse> {
    let step = state.checklists().add_step(checklist_id, input).await?;
    Ok(response::created(step))
}

// ---------------------------------------------------------------------------
// /steps
// ---------------------------------------------------------------------------

/// PUT /api/v1/steps/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStepRequest>,
) -> AppResult<impl IntoResponse> {
    let step = state.checklists().update_step(id, input).await?;
    Ok(response::ok(step))
}

/// DELETE /api/v1/steps/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    state.checklists().delete_step(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/steps/{id}/clone
pub async fn clone(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let step = state.checklists().clone_step(id).await?;
    Ok(response::created(step))
}

/// POST /api/v1/steps/reorder
pub async fn reorder(
    State(state): State<AppState>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    let steps = state.checklists().reorder_steps(input).await?;
    Ok(response::ok(steps))
}
