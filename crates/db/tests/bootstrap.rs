use sqlx::SqlitePool;

/// Connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: SqlitePool) {
    checklist_db::health_check(&pool).await.unwrap();

    for table in ["categories", "checklists", "steps"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_check_constraint(pool: SqlitePool) {
    sqlx::query("INSERT INTO checklists (title) VALUES ('c')")
        .execute(&pool)
        .await
        .unwrap();
    let result = sqlx::query("INSERT INTO steps (checklist_id, title, status) VALUES (1, 's', 'done')")
        .execute(&pool)
        .await;
    assert!(result.is_err(), "unknown status must be rejected");
}
