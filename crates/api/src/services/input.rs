//! Request bodies accepted by the checklist service.

use checklist_core::checklist::{optional_text, require_title, validate_duration};
use checklist_core::error::CoreError;
use checklist_core::ordering::InsertPosition;
use checklist_core::patch::Patch;
use checklist_core::step_status::StepStatus;
use checklist_core::types::{DbId, Timestamp};
use checklist_db::models::step::StepFields;
use serde::Deserialize;

/// Body of `POST /checklists`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateChecklistRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    /// Initial steps. Entries without `order_index` take their list position.
    #[serde(default)]
    pub steps: Vec<StepInput>,
}

/// A step supplied by a client. Every field may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StepInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub start_datetime: Option<Timestamp>,
    pub end_datetime: Option<Timestamp>,
    pub status: Option<String>,
    pub comments: Option<String>,
    pub order_index: Option<i32>,
}

impl StepInput {
    /// Resolve defaults: "New Step", 60 minutes, draft. Blank description
    /// and comments are stored as absent.
    pub fn to_fields(&self) -> Result<StepFields, CoreError> {
        let mut fields = StepFields {
            description: optional_text(self.description.clone()),
            start_datetime: self.start_datetime,
            end_datetime: self.end_datetime,
            comments: optional_text(self.comments.clone()),
            ..StepFields::default()
        };
        if let Some(title) = self.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            fields.title = title.to_string();
        }
        if let Some(minutes) = self.duration_minutes {
            fields.duration_minutes = validate_duration(minutes)?;
        }
        if let Some(status) = &self.status {
            fields.status = parse_status(status)?;
        }
        Ok(fields)
    }
}

/// Body of `POST /checklists/{id}/steps`.
///
/// Placement precedence: `insert_after`, then `insert_before`, then
/// `order_index`, else append.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateStepRequest {
    #[serde(flatten)]
    pub step: StepInput,
    pub insert_after: Option<DbId>,
    pub insert_before: Option<DbId>,
}

impl CreateStepRequest {
    pub fn position(&self) -> InsertPosition {
        match (self.insert_after, self.insert_before, self.step.order_index) {
            (Some(target), _, _) => InsertPosition::After(target),
            (None, Some(target), _) => InsertPosition::Before(target),
            (None, None, Some(index)) => InsertPosition::At(index),
            (None, None, None) => InsertPosition::End,
        }
    }
}

/// Body of `PUT /steps/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStepRequest {
    pub title: Option<String>,
    #[serde(default)]
    pub description: Patch<String>,
    pub duration_minutes: Option<i32>,
    #[serde(default)]
    pub start_datetime: Patch<Timestamp>,
    #[serde(default)]
    pub end_datetime: Patch<Timestamp>,
    pub status: Option<String>,
    #[serde(default)]
    pub comments: Patch<String>,
}

impl UpdateStepRequest {
    /// Merge this patch onto the stored content of a step.
    pub fn apply_to(self, current: StepFields) -> Result<StepFields, CoreError> {
        let title = match self.title {
            Some(title) => require_title(Some(&title), "Step title cannot be empty")?,
            None => current.title,
        };
        let duration_minutes = match self.duration_minutes {
            Some(minutes) => validate_duration(minutes)?,
            None => current.duration_minutes,
        };
        let status = match self.status {
            Some(status) => parse_status(&status)?,
            None => current.status,
        };

        Ok(StepFields {
            title,
            description: self.description.blank_as_null().apply_to(current.description),
            duration_minutes,
            start_datetime: self.start_datetime.apply_to(current.start_datetime),
            end_datetime: self.end_datetime.apply_to(current.end_datetime),
            status,
            comments: self.comments.blank_as_null().apply_to(current.comments),
        })
    }
}

/// Body of `POST /steps/reorder`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderRequest {
    pub checklist_id: DbId,
    pub step_ids: Vec<DbId>,
}

/// A CSV file received through the import endpoint, plus the optional
/// checklist fields sent alongside it.
#[derive(Debug, Clone, Default)]
pub struct CsvUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
}

fn parse_status(raw: &str) -> Result<StepStatus, CoreError> {
    StepStatus::parse_lenient(raw).map_err(CoreError::Validation)
}
