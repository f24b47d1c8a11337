//! HTTP-level integration tests for CSV export and import.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, body_text, build_test_app, create_checklist, get, post_multipart, step_titles,
};
use serde_json::json;
use sqlx::SqlitePool;

const IMPORT_URI: &str = "/api/v1/checklists/import";

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn export_returns_csv_attachment(pool: SqlitePool) {
    let checklist = create_checklist(
        &pool,
        json!({
            "title": "Release Plan",
            "steps": [
                { "title": "Plan, then build", "duration_minutes": 30, "status": "started" },
                { "title": "Ship", "comments": "say \"done\"" }
            ]
        }),
    )
    .await;

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/checklists/{}/export", checklist["id"]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert!(headers["content-type"].to_str().unwrap().starts_with("text/csv"));
    assert_eq!(
        headers["content-disposition"],
        "attachment; filename=\"Release_Plan_steps.csv\""
    );

    let body = body_text(response).await;
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(
        lines[0],
        "title,description,durationMinutes,startDatetime,endDatetime,status,comments,orderIndex"
    );
    assert_eq!(lines[1], "\"Plan, then build\",,30,,,started,,0");
    assert_eq!(lines[2], "Ship,,60,,,draft,\"say \"\"done\"\"\",1");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn export_unknown_checklist_is_404(pool: SqlitePool) {
    let response = get(build_test_app(pool), "/api/v1/checklists/404/export").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn import_creates_checklist_from_rows(pool: SqlitePool) {
    let csv = "Title,Status,DurationMinutes,orderIndex\n\
               Second,Completed,15,1\n\
               First,draft,,0\n";

    let response = post_multipart(
        build_test_app(pool.clone()),
        IMPORT_URI,
        Some(("onboarding.csv", "text/csv", csv.as_bytes())),
        &[("description", "From a file")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let checklist = body_json(response).await["data"].clone();
    assert_eq!(checklist["title"], "onboarding");
    assert_eq!(checklist["description"], "From a file");
    assert_eq!(checklist["is_default"], false);
    assert_eq!(checklist["steps"][0]["title"], "First");
    assert_eq!(checklist["steps"][0]["duration_minutes"], 60);
    assert_eq!(checklist["steps"][1]["status"], "completed");
    assert_eq!(checklist["stats"]["completion_percentage"], 50);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn export_then_import_preserves_steps(pool: SqlitePool) {
    let source = create_checklist(
        &pool,
        json!({
            "title": "Audit",
            "steps": [
                { "title": "Gather, sort", "description": "line one\nline two" },
                { "title": "Report", "start_datetime": "2024-03-01T09:30:00Z" }
            ]
        }),
    )
    .await;
    let response = get(
        build_test_app(pool.clone()),
        &format!("/api/v1/checklists/{}/export", source["id"]),
    )
    .await;
    let csv = body_text(response).await;

    let response = post_multipart(
        build_test_app(pool.clone()),
        IMPORT_URI,
        Some(("Audit_steps.csv", "text/csv", csv.as_bytes())),
        &[("title", "Audit again")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let imported = body_json(response).await["data"].clone();
    assert_eq!(imported["title"], "Audit again");
    assert_eq!(imported["steps"][0]["description"], "line one\nline two");
    assert_eq!(
        imported["steps"][1]["start_datetime"],
        source["steps"][1]["start_datetime"]
    );
    assert_eq!(
        step_titles(&pool, imported["id"].as_i64().unwrap()).await,
        ["Gather, sort", "Report"]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn import_rejects_whole_file_on_bad_rows(pool: SqlitePool) {
    let csv = "title,status,durationMinutes\n\
               Good,draft,10\n\
               ,draft,10\n\
               Bad,unknown,10\n";

    let response = post_multipart(
        build_test_app(pool.clone()),
        IMPORT_URI,
        Some(("broken.csv", "text/csv", csv.as_bytes())),
        &[],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CSV_VALIDATION_ERROR");
    let details = json["details"].as_array().unwrap();
    assert_eq!(details.len(), 2);
    assert_eq!(details[0], "Row 3: Title is required");
    assert!(details[1].as_str().unwrap().starts_with("Row 4: Invalid status: unknown"));

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM checklists")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn import_without_title_column_is_rejected(pool: SqlitePool) {
    let response = post_multipart(
        build_test_app(pool),
        IMPORT_URI,
        Some(("steps.csv", "text/csv", b"name,status\nA,draft\n")),
        &[],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["details"][0], "CSV must include a 'title' column");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn import_rejects_non_csv_file(pool: SqlitePool) {
    let response = post_multipart(
        build_test_app(pool),
        IMPORT_URI,
        Some(("steps.txt", "text/plain", b"title\nA\n")),
        &[],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid file type. Please upload a CSV file.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn import_without_file_is_bad_request(pool: SqlitePool) {
    let response = post_multipart(
        build_test_app(pool),
        IMPORT_URI,
        None,
        &[("title", "Nothing")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No file uploaded");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn import_strips_byte_order_mark(pool: SqlitePool) {
    let csv = "\u{feff}title\nOnly\n";

    let response = post_multipart(
        build_test_app(pool),
        IMPORT_URI,
        Some(("bom.csv", "text/csv", csv.as_bytes())),
        &[],
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let checklist = body_json(response).await["data"].clone();
    assert_eq!(checklist["steps"][0]["title"], "Only");
}
