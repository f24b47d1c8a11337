pub mod categories;
pub mod checklists;
pub mod health;
pub mod steps;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /categories                              list, create
/// /categories/{id}                         update, delete
///
/// /checklists                              list, create
/// /checklists/import                       CSV import (multipart POST)
/// /checklists/{id}                         get, update, delete
/// /checklists/{id}/clone                   clone with steps (POST)
/// /checklists/{id}/export                  CSV download (GET)
/// /checklists/{id}/steps                   list, add
///
/// /steps/reorder                           bulk reorder (POST)
/// /steps/{id}                              update, delete
/// /steps/{id}/clone                        clone after original (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/categories", categories::router())
        .nest("/checklists", checklists::router())
        .nest("/steps", steps::router())
}
