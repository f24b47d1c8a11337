//! Checklist models and DTOs.

use checklist_core::patch::Patch;
use checklist_core::stats::ChecklistStats;
use checklist_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::category::Category;
use super::step::Step;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `checklists` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Checklist {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub is_default: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create / update DTOs
// ---------------------------------------------------------------------------

/// Checklist columns for an insert. `is_default` is only ever set by the
/// seed command.
#[derive(Debug, Clone, Default)]
pub struct CreateChecklist {
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub is_default: bool,
}

/// Partial update. Nullable columns use [`Patch`] so that an explicit
/// `null` clears the value while an omitted field keeps it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateChecklist {
    pub title: Option<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub category_id: Patch<DbId>,
}

// ---------------------------------------------------------------------------
// Read model
// ---------------------------------------------------------------------------

/// A checklist as returned by the API: category, ordered steps and stats.
#[derive(Debug, Clone, Serialize)]
pub struct ChecklistDetail {
    #[serde(flatten)]
    pub checklist: Checklist,
    pub category: Option<Category>,
    pub steps: Vec<Step>,
    pub stats: ChecklistStats,
}
