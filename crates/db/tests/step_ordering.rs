//! Integration tests for positional step writes.
//!
//! Every test checks the stored indices, not just the returned rows: after
//! each operation the checklist must read back as `0..n` in the expected
//! order.

use assert_matches::assert_matches;
use checklist_core::ordering::{is_contiguous, InsertPosition, OrderingError};
use checklist_core::step_status::StepStatus;
use checklist_core::types::DbId;
use checklist_db::models::checklist::{Checklist, CreateChecklist};
use checklist_db::models::step::{NewStep, Step, StepFields};
use checklist_db::repositories::{ChecklistRepo, StepRepo};
use checklist_db::RepoError;
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn fields(title: &str) -> StepFields {
    StepFields {
        title: title.to_string(),
        ..StepFields::default()
    }
}

async fn checklist_with(pool: &SqlitePool, titles: &[&str]) -> (Checklist, Vec<Step>) {
    let input = CreateChecklist {
        title: "Release".to_string(),
        ..CreateChecklist::default()
    };
    let steps: Vec<NewStep> = titles
        .iter()
        .enumerate()
        .map(|(i, t)| NewStep {
            order_index: i as i32,
            fields: fields(t),
        })
        .collect();
    ChecklistRepo::create_with_steps(pool, &input, &steps)
        .await
        .unwrap()
}

async fn titles_in_order(pool: &SqlitePool, checklist_id: DbId) -> Vec<String> {
    let steps = StepRepo::list_by_checklist(pool, checklist_id).await.unwrap();
    assert!(
        is_contiguous(steps.iter().map(|s| s.order_index)),
        "indices not contiguous: {:?}",
        steps.iter().map(|s| s.order_index).collect::<Vec<_>>()
    );
    steps.into_iter().map(|s| s.title).collect()
}

// ---------------------------------------------------------------------------
// Insert
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_append_goes_last(pool: SqlitePool) {
    let (checklist, _) = checklist_with(&pool, &["A", "B"]).await;

    let step = StepRepo::create(&pool, checklist.id, &fields("C"), InsertPosition::End)
        .await
        .unwrap();

    assert_eq!(step.order_index, 2);
    assert_eq!(titles_in_order(&pool, checklist.id).await, ["A", "B", "C"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_append_to_empty_checklist(pool: SqlitePool) {
    let (checklist, _) = checklist_with(&pool, &[]).await;

    let step = StepRepo::create(&pool, checklist.id, &fields("First"), InsertPosition::End)
        .await
        .unwrap();

    assert_eq!(step.order_index, 0);
    assert_eq!(step.status, StepStatus::Draft);
    assert_eq!(step.duration_minutes, 60);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_insert_after_shifts_successors(pool: SqlitePool) {
    let (checklist, steps) = checklist_with(&pool, &["A", "B", "C"]).await;

    let step = StepRepo::create(
        &pool,
        checklist.id,
        &fields("X"),
        InsertPosition::After(steps[0].id),
    )
    .await
    .unwrap();

    assert_eq!(step.order_index, 1);
    assert_eq!(titles_in_order(&pool, checklist.id).await, ["A", "X", "B", "C"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_insert_before_takes_target_slot(pool: SqlitePool) {
    let (checklist, steps) = checklist_with(&pool, &["A", "B", "C"]).await;

    let step = StepRepo::create(
        &pool,
        checklist.id,
        &fields("X"),
        InsertPosition::Before(steps[0].id),
    )
    .await
    .unwrap();

    assert_eq!(step.order_index, 0);
    assert_eq!(titles_in_order(&pool, checklist.id).await, ["X", "A", "B", "C"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_insert_relative_to_foreign_step_is_not_found(pool: SqlitePool) {
    let (checklist, _) = checklist_with(&pool, &["A"]).await;
    let (_, other_steps) = checklist_with(&pool, &["Other"]).await;

    let result = StepRepo::create(
        &pool,
        checklist.id,
        &fields("X"),
        InsertPosition::After(other_steps[0].id),
    )
    .await;

    assert_matches!(result, Err(RepoError::Ordering(OrderingError::StepNotFound(_))));
    assert_eq!(titles_in_order(&pool, checklist.id).await, ["A"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_explicit_index_is_clamped(pool: SqlitePool) {
    let (checklist, _) = checklist_with(&pool, &["A", "B"]).await;

    let step = StepRepo::create(&pool, checklist.id, &fields("Z"), InsertPosition::At(99))
        .await
        .unwrap();

    assert_eq!(step.order_index, 2);
    assert_eq!(titles_in_order(&pool, checklist.id).await, ["A", "B", "Z"]);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_recompacts(pool: SqlitePool) {
    let (checklist, steps) = checklist_with(&pool, &["A", "B", "C", "D"]).await;

    assert!(StepRepo::delete(&pool, steps[1].id).await.unwrap());

    assert_eq!(titles_in_order(&pool, checklist.id).await, ["A", "C", "D"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_repairs_existing_gaps(pool: SqlitePool) {
    let (checklist, steps) = checklist_with(&pool, &["A", "B", "C"]).await;
    sqlx::query("UPDATE steps SET order_index = order_index * 5 WHERE checklist_id = $1")
        .bind(checklist.id)
        .execute(&pool)
        .await
        .unwrap();

    StepRepo::delete(&pool, steps[0].id).await.unwrap();

    let remaining = StepRepo::list_by_checklist(&pool, checklist.id).await.unwrap();
    let indices: Vec<i32> = remaining.iter().map(|s| s.order_index).collect();
    assert_eq!(indices, vec![0, 1]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_missing_step_returns_false(pool: SqlitePool) {
    assert!(!StepRepo::delete(&pool, 12345).await.unwrap());
}

// ---------------------------------------------------------------------------
// Clone
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_clone_lands_after_source(pool: SqlitePool) {
    let (checklist, steps) = checklist_with(&pool, &["Plan", "Build", "Review", "Ship"]).await;
    let review = StepRepo::update(
        &pool,
        steps[2].id,
        &StepFields {
            status: StepStatus::Completed,
            comments: Some("ok".to_string()),
            description: Some("check it".to_string()),
            duration_minutes: 45,
            ..fields("Review")
        },
    )
    .await
    .unwrap()
    .unwrap();

    let copy = StepRepo::clone_after(&pool, &review).await.unwrap();

    assert_eq!(copy.title, "Review (Copy)");
    assert_eq!(copy.order_index, 3);
    assert_eq!(copy.status, StepStatus::Draft);
    assert_eq!(copy.comments, None);
    assert_eq!(copy.description.as_deref(), Some("check it"));
    assert_eq!(copy.duration_minutes, 45);

    let ship = StepRepo::find_by_id(&pool, steps[3].id).await.unwrap().unwrap();
    assert_eq!(ship.order_index, 4);
    assert_eq!(
        titles_in_order(&pool, checklist.id).await,
        ["Plan", "Build", "Review", "Review (Copy)", "Ship"]
    );
}

// ---------------------------------------------------------------------------
// Reorder
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_applies_permutation(pool: SqlitePool) {
    let (checklist, steps) = checklist_with(&pool, &["A", "B", "C"]).await;
    let ids = [steps[2].id, steps[0].id, steps[1].id];

    let reordered = StepRepo::reorder(&pool, checklist.id, &ids).await.unwrap();

    let titles: Vec<&str> = reordered.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["C", "A", "B"]);
    assert_eq!(titles_in_order(&pool, checklist.id).await, ["C", "A", "B"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_rejects_partial_list_without_writing(pool: SqlitePool) {
    let (checklist, steps) = checklist_with(&pool, &["A", "B", "C"]).await;

    let result = StepRepo::reorder(&pool, checklist.id, &[steps[2].id, steps[0].id]).await;

    assert_matches!(result, Err(RepoError::Ordering(OrderingError::InvalidReorder(_))));
    assert_eq!(titles_in_order(&pool, checklist.id).await, ["A", "B", "C"]);
}

// ---------------------------------------------------------------------------
// Cascade
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_checklist_delete_cascades_to_steps(pool: SqlitePool) {
    let (checklist, steps) = checklist_with(&pool, &["A", "B"]).await;

    assert!(ChecklistRepo::delete(&pool, checklist.id).await.unwrap());

    assert!(StepRepo::find_by_id(&pool, steps[0].id).await.unwrap().is_none());
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM steps")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0);
}
