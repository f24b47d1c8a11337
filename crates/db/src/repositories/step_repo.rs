//! Repository for the `steps` table.
//!
//! Every write that moves indices reads the checklist's current positions,
//! asks `checklist_core::ordering` for a plan and applies it in the same
//! transaction. Shifts are written before the row that triggered them.

use checklist_core::checklist::copy_title;
use checklist_core::ordering::{self, IndexUpdate, InsertPosition, StepPosition};
use checklist_core::types::DbId;
use sqlx::SqliteConnection;

use crate::error::RepoError;
use crate::models::step::{NewStep, Step, StepFields};
use crate::{DbPool, NOW};

/// Column list for steps queries.
const COLUMNS: &str = "id, checklist_id, title, description, duration_minutes, \
    start_datetime, end_datetime, status, comments, order_index, created_at, updated_at";

pub struct StepRepo;

impl StepRepo {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Step>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM steps WHERE id = $1");
        sqlx::query_as::<_, Step>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Steps of a checklist in display order.
    pub async fn list_by_checklist(
        pool: &DbPool,
        checklist_id: DbId,
    ) -> Result<Vec<Step>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM steps
             WHERE checklist_id = $1
             ORDER BY order_index ASC, id ASC"
        );
        sqlx::query_as::<_, Step>(&query)
            .bind(checklist_id)
            .fetch_all(pool)
            .await
    }

    async fn positions_inner(
        conn: &mut SqliteConnection,
        checklist_id: DbId,
    ) -> Result<Vec<StepPosition>, sqlx::Error> {
        let rows: Vec<(DbId, i32)> = sqlx::query_as(
            "SELECT id, order_index FROM steps
             WHERE checklist_id = $1
             ORDER BY order_index ASC, id ASC",
        )
        .bind(checklist_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, order_index)| StepPosition { id, order_index })
            .collect())
    }

    // -----------------------------------------------------------------------
    // Positional writes
    // -----------------------------------------------------------------------

    /// Add one step to a checklist at `position`, shifting successors.
    pub async fn create(
        pool: &DbPool,
        checklist_id: DbId,
        fields: &StepFields,
        position: InsertPosition,
    ) -> Result<Step, RepoError> {
        let mut tx = pool.begin().await?;

        let positions = Self::positions_inner(&mut tx, checklist_id).await?;
        let plan = ordering::plan_insert(&positions, position)?;
        Self::apply_updates_inner(&mut tx, &plan.shifts).await?;
        let step = Self::insert_inner(&mut tx, checklist_id, fields, plan.order_index).await?;

        tx.commit().await?;
        Ok(step)
    }

    /// Duplicate `source` directly after itself.
    ///
    /// The copy gets the ` (Copy)` title suffix, draft status and no
    /// comments; everything else is carried over.
    pub async fn clone_after(pool: &DbPool, source: &Step) -> Result<Step, RepoError> {
        let mut tx = pool.begin().await?;

        let positions = Self::positions_inner(&mut tx, source.checklist_id).await?;
        let plan = ordering::plan_clone(&positions, source.id)?;
        Self::apply_updates_inner(&mut tx, &plan.shifts).await?;
        let fields = source.to_clone(copy_title(&source.title));
        let step =
            Self::insert_inner(&mut tx, source.checklist_id, &fields, plan.order_index).await?;

        tx.commit().await?;
        Ok(step)
    }

    /// Delete a step and recompact its siblings to `0..n-1`.
    ///
    /// Returns `false` if the step does not exist.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, RepoError> {
        let mut tx = pool.begin().await?;

        let owner: Option<(DbId,)> = sqlx::query_as("SELECT checklist_id FROM steps WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some((checklist_id,)) = owner else {
            return Ok(false);
        };

        let positions = Self::positions_inner(&mut tx, checklist_id).await?;
        let updates = ordering::plan_removal(&positions, id)?;

        sqlx::query("DELETE FROM steps WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        Self::apply_updates_inner(&mut tx, &updates).await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Assign each id its position in `ordered_ids`.
    ///
    /// `ordered_ids` must be a permutation of the checklist's step ids.
    /// Returns the reordered steps.
    pub async fn reorder(
        pool: &DbPool,
        checklist_id: DbId,
        ordered_ids: &[DbId],
    ) -> Result<Vec<Step>, RepoError> {
        let mut tx = pool.begin().await?;

        let positions = Self::positions_inner(&mut tx, checklist_id).await?;
        let updates = ordering::plan_reorder(&positions, ordered_ids)?;
        Self::apply_updates_inner(&mut tx, &updates).await?;

        tx.commit().await?;
        Ok(Self::list_by_checklist(pool, checklist_id).await?)
    }

    // -----------------------------------------------------------------------
    // Content writes
    // -----------------------------------------------------------------------

    /// Overwrite every content column. `order_index` is left alone.
    /// Returns `None` if not found.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        fields: &StepFields,
    ) -> Result<Option<Step>, sqlx::Error> {
        let query = format!(
            "UPDATE steps SET
                title = $1,
                description = $2,
                duration_minutes = $3,
                start_datetime = $4,
                end_datetime = $5,
                status = $6,
                comments = $7,
                updated_at = {NOW}
             WHERE id = $8
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Step>(&query)
            .bind(&fields.title)
            .bind(&fields.description)
            .bind(fields.duration_minutes)
            .bind(fields.start_datetime)
            .bind(fields.end_datetime)
            .bind(fields.status.as_str())
            .bind(&fields.comments)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Transaction helpers
    // -----------------------------------------------------------------------

    pub(crate) async fn insert_inner(
        conn: &mut SqliteConnection,
        checklist_id: DbId,
        fields: &StepFields,
        order_index: i32,
    ) -> Result<Step, sqlx::Error> {
        let query = format!(
            "INSERT INTO steps
                (checklist_id, title, description, duration_minutes,
                 start_datetime, end_datetime, status, comments, order_index)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Step>(&query)
            .bind(checklist_id)
            .bind(&fields.title)
            .bind(&fields.description)
            .bind(fields.duration_minutes)
            .bind(fields.start_datetime)
            .bind(fields.end_datetime)
            .bind(fields.status.as_str())
            .bind(&fields.comments)
            .bind(order_index)
            .fetch_one(&mut *conn)
            .await
    }

    /// Insert a batch of steps whose indices were already planned.
    pub(crate) async fn insert_batch_inner(
        conn: &mut SqliteConnection,
        checklist_id: DbId,
        steps: &[NewStep],
    ) -> Result<Vec<Step>, sqlx::Error> {
        let mut inserted = Vec::with_capacity(steps.len());
        for step in steps {
            inserted.push(
                Self::insert_inner(&mut *conn, checklist_id, &step.fields, step.order_index)
                    .await?,
            );
        }
        Ok(inserted)
    }

    async fn apply_updates_inner(
        conn: &mut SqliteConnection,
        updates: &[IndexUpdate],
    ) -> Result<(), sqlx::Error> {
        let query = format!("UPDATE steps SET order_index = $1, updated_at = {NOW} WHERE id = $2");
        for update in updates {
            sqlx::query(&query)
                .bind(update.order_index)
                .bind(update.step_id)
                .execute(&mut *conn)
                .await?;
        }
        Ok(())
    }
}
