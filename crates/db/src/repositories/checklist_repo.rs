//! Repository for the `checklists` table.

use checklist_core::checklist::copy_title;
use checklist_core::ordering;
use checklist_core::types::DbId;
use sqlx::SqliteConnection;

use crate::models::checklist::{Checklist, CreateChecklist, UpdateChecklist};
use crate::models::step::{NewStep, Step};
use crate::repositories::StepRepo;
use crate::{DbPool, NOW};

/// Column list for checklists queries.
const COLUMNS: &str = "id, title, description, category_id, is_default, created_at, updated_at";

pub struct ChecklistRepo;

impl ChecklistRepo {
    /// Insert a checklist together with its initial steps in one transaction.
    pub async fn create_with_steps(
        pool: &DbPool,
        input: &CreateChecklist,
        steps: &[NewStep],
    ) -> Result<(Checklist, Vec<Step>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let checklist = Self::insert_inner(&mut tx, input).await?;
        let steps = StepRepo::insert_batch_inner(&mut tx, checklist.id, steps).await?;

        tx.commit().await?;
        Ok((checklist, steps))
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Checklist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM checklists WHERE id = $1");
        sqlx::query_as::<_, Checklist>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All checklists, most recently updated first.
    pub async fn list(pool: &DbPool) -> Result<Vec<Checklist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM checklists ORDER BY updated_at DESC, id DESC");
        sqlx::query_as::<_, Checklist>(&query)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update. Returns `None` if not found.
    ///
    /// `description` and `category_id` are only written when present in the
    /// patch; an explicit null clears them.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdateChecklist,
    ) -> Result<Option<Checklist>, sqlx::Error> {
        let query = format!(
            "UPDATE checklists SET
                title = COALESCE($1, title),
                description = CASE WHEN $2 THEN $3 ELSE description END,
                category_id = CASE WHEN $4 THEN $5 ELSE category_id END,
                updated_at = {NOW}
             WHERE id = $6
             RETURNING {COLUMNS}"
        );
        let description = input.description.clone().into_update();
        let category_id = input.category_id.clone().into_update();

        sqlx::query_as::<_, Checklist>(&query)
            .bind(&input.title)
            .bind(description.is_some())
            .bind(description.flatten())
            .bind(category_id.is_some())
            .bind(category_id.flatten())
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a checklist; its steps go with it.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM checklists WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Copy a checklist and all of its steps.
    ///
    /// The copy is never a default. Steps keep their order and content but
    /// start over as drafts without comments.
    pub async fn clone_with_steps(
        pool: &DbPool,
        source: &Checklist,
        steps: &[Step],
    ) -> Result<(Checklist, Vec<Step>), sqlx::Error> {
        let input = CreateChecklist {
            title: copy_title(&source.title),
            description: source.description.clone(),
            category_id: source.category_id,
            is_default: false,
        };

        let requested: Vec<Option<i32>> = steps.iter().map(|s| Some(s.order_index)).collect();
        let copies: Vec<NewStep> = steps
            .iter()
            .zip(ordering::batch_indices(&requested))
            .map(|(step, order_index)| NewStep {
                order_index,
                fields: step.to_clone(step.title.clone()),
            })
            .collect();

        Self::create_with_steps(pool, &input, &copies).await
    }

    // -----------------------------------------------------------------------
    // Transaction helpers
    // -----------------------------------------------------------------------

    pub(crate) async fn insert_inner(
        conn: &mut SqliteConnection,
        input: &CreateChecklist,
    ) -> Result<Checklist, sqlx::Error> {
        let query = format!(
            "INSERT INTO checklists (title, description, category_id, is_default)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Checklist>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(input.is_default)
            .fetch_one(&mut *conn)
            .await
    }

    pub(crate) async fn count_defaults_inner(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM checklists WHERE is_default = 1")
            .fetch_one(&mut *conn)
            .await?;
        Ok(row.0)
    }

    /// Remove every user-created checklist. Returns how many were deleted.
    pub(crate) async fn delete_non_default_inner(
        conn: &mut SqliteConnection,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM checklists WHERE is_default = 0")
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }
}
