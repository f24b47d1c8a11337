//! Step models and DTOs.

use checklist_core::checklist::{DEFAULT_DURATION_MINUTES, DEFAULT_STEP_TITLE};
use checklist_core::csv_steps::{ParsedStep, StepCsvRow};
use checklist_core::stats::StepFacts;
use checklist_core::step_status::StepStatus;
use checklist_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `steps` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Step {
    pub id: DbId,
    pub checklist_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub start_datetime: Option<Timestamp>,
    pub end_datetime: Option<Timestamp>,
    #[sqlx(try_from = "String")]
    pub status: StepStatus,
    pub comments: Option<String>,
    pub order_index: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Step {
    pub fn facts(&self) -> StepFacts {
        StepFacts {
            status: self.status,
            duration_minutes: self.duration_minutes,
            start_datetime: self.start_datetime,
            end_datetime: self.end_datetime,
        }
    }

    pub fn csv_row(&self) -> StepCsvRow<'_> {
        StepCsvRow {
            title: &self.title,
            description: self.description.as_deref(),
            duration_minutes: self.duration_minutes,
            start_datetime: self.start_datetime,
            end_datetime: self.end_datetime,
            status: self.status,
            comments: self.comments.as_deref(),
            order_index: self.order_index,
        }
    }

    /// Content of this step as written by a clone: status resets to draft
    /// and comments are dropped.
    pub fn to_clone(&self, title: String) -> StepFields {
        StepFields {
            title,
            description: self.description.clone(),
            duration_minutes: self.duration_minutes,
            start_datetime: self.start_datetime,
            end_datetime: self.end_datetime,
            status: StepStatus::Draft,
            comments: None,
        }
    }

    pub fn fields(&self) -> StepFields {
        StepFields {
            title: self.title.clone(),
            description: self.description.clone(),
            duration_minutes: self.duration_minutes,
            start_datetime: self.start_datetime,
            end_datetime: self.end_datetime,
            status: self.status,
            comments: self.comments.clone(),
        }
    }
}

/// Every content column of a step. `order_index` is owned by the ordering
/// engine and never part of this struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFields {
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub start_datetime: Option<Timestamp>,
    pub end_datetime: Option<Timestamp>,
    pub status: StepStatus,
    pub comments: Option<String>,
}

impl Default for StepFields {
    fn default() -> Self {
        Self {
            title: DEFAULT_STEP_TITLE.to_string(),
            description: None,
            duration_minutes: DEFAULT_DURATION_MINUTES,
            start_datetime: None,
            end_datetime: None,
            status: StepStatus::Draft,
            comments: None,
        }
    }
}

/// A step to insert at a known slot, as part of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStep {
    pub order_index: i32,
    pub fields: StepFields,
}

impl From<ParsedStep> for StepFields {
    /// Columns absent from the CSV take the usual step defaults.
    fn from(parsed: ParsedStep) -> Self {
        let defaults = StepFields::default();
        Self {
            title: parsed.title,
            description: parsed.description,
            duration_minutes: parsed.duration_minutes.unwrap_or(defaults.duration_minutes),
            start_datetime: parsed.start_datetime,
            end_datetime: parsed.end_datetime,
            status: parsed.status.unwrap_or(defaults.status),
            comments: parsed.comments,
        }
    }
}
