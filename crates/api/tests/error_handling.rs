//! `AppError` rendering, without a router or database.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use checklist_api::error::AppError;
use checklist_core::error::CoreError;
use checklist_core::ordering::OrderingError;
use checklist_db::RepoError;
use http_body_util::BodyExt;

async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn not_found_names_entity_and_id() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Checklist",
        id: 42,
    });

    let (status, json) = render(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Checklist with id 42 not found");
}

#[tokio::test]
async fn default_checklist_guard_is_forbidden() {
    let err = AppError::Core(CoreError::Forbidden("Cannot edit default checklists".into()));

    let (status, json) = render(err).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
    assert_eq!(json["error"], "Cannot edit default checklists");
}

#[tokio::test]
async fn plain_errors_have_no_details() {
    let (status, json) = render(AppError::BadRequest("No file uploaded".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json.get("details").is_none());
}

#[tokio::test]
async fn conflict_is_409() {
    let err = AppError::Core(CoreError::Conflict("duplicate name".into()));

    let (status, json) = render(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn csv_rejection_lists_details() {
    let err = AppError::CsvRejected {
        message: "CSV validation failed".into(),
        errors: vec!["Row 2: Title is required".into(), "Row 4: Invalid orderIndex: x".into()],
    };

    let (status, json) = render(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "CSV_VALIDATION_ERROR");
    assert_eq!(json["details"].as_array().unwrap().len(), 2);
    assert_eq!(json["details"][0], "Row 2: Title is required");
}

#[tokio::test]
async fn ordering_errors_map_through_repo_error() {
    let not_found: AppError = RepoError::Ordering(OrderingError::StepNotFound(7)).into();
    let (status, json) = render(not_found).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Step with id 7 not found");

    let invalid: AppError =
        RepoError::Ordering(OrderingError::InvalidReorder("bad list".into())).into();
    let (status, json) = render(invalid).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "bad list");
}

#[tokio::test]
async fn internal_errors_are_sanitized() {
    let (status, json) =
        render(AppError::InternalError("secret detail".into())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn row_not_found_maps_to_404() {
    let (status, _) = render(AppError::Database(sqlx::Error::RowNotFound)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
