//! Repository for the `categories` table.

use checklist_core::checklist::DEFAULT_CATEGORY_COLOR;
use checklist_core::types::DbId;
use sqlx::SqliteConnection;

use crate::models::category::{Category, CategoryWithCount, CreateCategory, UpdateCategory};
use crate::{DbPool, NOW};

const COLUMNS: &str = "id, name, color, created_at, updated_at";

pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a category. The color falls back to the neutral grey.
    pub async fn create(pool: &DbPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, color)
             VALUES ($1, COALESCE($2, '{DEFAULT_CATEGORY_COLOR}'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&input.color)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &DbPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name ASC");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// All categories by name, each with its checklist count.
    pub async fn list_with_counts(pool: &DbPool) -> Result<Vec<CategoryWithCount>, sqlx::Error> {
        sqlx::query_as::<_, CategoryWithCount>(
            "SELECT c.id, c.name, c.color, c.created_at, c.updated_at,
                    COUNT(cl.id) AS checklist_count
             FROM categories c
             LEFT JOIN checklists cl ON cl.category_id = c.id
             GROUP BY c.id
             ORDER BY c.name ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Update a category. Returns `None` if not found.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET
                name = COALESCE($1, name),
                color = COALESCE($2, color),
                updated_at = {NOW}
             WHERE id = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&input.color)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category. Checklists that referenced it keep existing with
    /// a null `category_id`.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert the category if its name is new, otherwise return the existing
    /// row untouched.
    pub(crate) async fn upsert_by_name_inner(
        conn: &mut SqliteConnection,
        name: &str,
        color: &str,
    ) -> Result<Category, sqlx::Error> {
        sqlx::query("INSERT INTO categories (name, color) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .bind(color)
            .execute(&mut *conn)
            .await?;

        let query = format!("SELECT {COLUMNS} FROM categories WHERE name = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(name)
            .fetch_one(&mut *conn)
            .await
    }
}
