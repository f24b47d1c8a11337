//! Handlers for the `/categories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use checklist_core::checklist::MSG_CATEGORY_NAME_REQUIRED;
use checklist_core::error::CoreError;
use checklist_core::types::DbId;
use checklist_db::models::category::{CreateCategory, UpdateCategory};
use checklist_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::response;
use crate::state::AppState;

/// GET /api/v1/categories
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list_with_counts(&state.pool).await?;
    Ok(response::ok(categories))
}

/// POST /api/v1/categories
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    let name = non_blank(Some(input.name))
        .ok_or_else(|| AppError::BadRequest(MSG_CATEGORY_NAME_REQUIRED.into()))?;
    let input = CreateCategory {
        color: non_blank(input.color),
        name,
    };

    let category = CategoryRepo::create(&state.pool, &input)
        .await
        .map_err(|e| duplicate_name(e, &input.name))?;

    tracing::info!(category_id = category.id, name = %category.name, "Category created");
    Ok(response::created(category))
}

/// PUT /api/v1/categories/{id}
///
/// Blank `name` or `color` values are ignored rather than stored.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    let input = UpdateCategory {
        name: non_blank(input.name),
        color: non_blank(input.color),
    };
    let name = input.name.clone().unwrap_or_default();

    let category = CategoryRepo::update(&state.pool, id, &input)
        .await
        .map_err(|e| duplicate_name(e, &name))?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    Ok(response::ok(category))
}

/// DELETE /api/v1/categories/{id}
///
/// Checklists in the category are kept and become uncategorized.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if CategoryRepo::delete(&state.pool, id).await? {
        tracing::info!(category_id = id, "Category deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn duplicate_name(err: sqlx::Error, name: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AppError::Core(
            CoreError::Conflict(format!("Category '{name}' already exists")),
        ),
        _ => AppError::Database(err),
    }
}
