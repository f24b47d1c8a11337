//! Route definitions for the `/checklists` resource.
//!
//! Also nests the checklist-scoped step collection and the CSV endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{checklist, csv, step};
use crate::state::AppState;

/// Routes mounted at `/checklists`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// POST   /import          -> csv::import
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// POST   /{id}/clone      -> clone
/// GET    /{id}/export     -> csv::export
/// GET    /{id}/steps      -> step::list_by_checklist
/// POST   /{id}/steps      -> step::create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(checklist::list).post(checklist::create))
        .route("/import", post(csv::import))
        .route(
            "/{id}",
            get(checklist::get_by_id)
                .put(checklist::update)
                .delete(checklist::delete),
        )
        .route("/{id}/clone", post(checklist::clone))
        .route("/{id}/export", get(csv::export))
        .route(
            "/{id}/steps",
            get(step::list_by_checklist).post(step::create),
        )
}
