use axum::routing::{post, put};
use axum::Router;

use crate::handlers::step;
use crate::state::AppState;

/// Routes mounted at `/steps`.
///
/// ```text
/// POST   /reorder         -> reorder
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// POST   /{id}/clone      -> clone
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reorder", post(step::reorder))
        .route("/{id}", put(step::update).delete(step::delete))
        .route("/{id}/clone", post(step::clone))
}
