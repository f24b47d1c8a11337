//! Checklist aggregate operations.
//!
//! Handlers stay thin: they extract the request and delegate here. This
//! layer enforces existence and default-checklist protection, resolves step
//! defaults, and hands index planning to the repositories.

use std::collections::HashMap;

use checklist_core::checklist::{
    ensure_not_default, optional_text, require_title, MSG_ADD_STEP_DEFAULT,
    MSG_CHECKLIST_TITLE_REQUIRED, MSG_CLONE_STEP_DEFAULT, MSG_DELETE_DEFAULT,
    MSG_DELETE_STEP_DEFAULT, MSG_EDIT_DEFAULT, MSG_EDIT_STEP_DEFAULT, MSG_REORDER_DEFAULT,
};
use checklist_core::csv_steps::{parse_steps_csv, steps_to_csv, StepCsvRow};
use checklist_core::error::CoreError;
use checklist_core::export::export_filename;
use checklist_core::ordering::batch_indices;
use checklist_core::patch::Patch;
use checklist_core::stats::compute_stats;
use checklist_core::types::DbId;
use checklist_core::upload::{title_from_filename, validate_csv_upload};
use checklist_db::models::category::Category;
use checklist_db::models::checklist::{
    Checklist, ChecklistDetail, CreateChecklist, UpdateChecklist,
};
use checklist_db::models::step::{NewStep, Step, StepFields};
use checklist_db::repositories::{CategoryRepo, ChecklistRepo, StepRepo};
use checklist_db::DbPool;

use super::input::{CreateChecklistRequest, CreateStepRequest, CsvUpload, ReorderRequest, UpdateStepRequest};
use crate::error::{AppError, AppResult};

/// A rendered CSV export.
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

/// Checklist-level operations over a borrowed pool.
pub struct ChecklistService<'a> {
    pool: &'a DbPool,
}

impl<'a> ChecklistService<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    // -----------------------------------------------------------------------
    // Checklists
    // -----------------------------------------------------------------------

    /// Every checklist with category, steps and stats, most recent first.
    pub async fn list(&self) -> AppResult<Vec<ChecklistDetail>> {
        let checklists = ChecklistRepo::list(self.pool).await?;
        let categories: HashMap<DbId, Category> = CategoryRepo::list(self.pool)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let mut details = Vec::with_capacity(checklists.len());
        for checklist in checklists {
            let category = checklist
                .category_id
                .and_then(|id| categories.get(&id).cloned());
            let steps = StepRepo::list_by_checklist(self.pool, checklist.id).await?;
            details.push(detail(checklist, category, steps));
        }
        Ok(details)
    }

    pub async fn get(&self, id: DbId) -> AppResult<ChecklistDetail> {
        let checklist = self.find_checklist(id).await?;
        self.load_detail(checklist).await
    }

    /// Create a user checklist, optionally with an initial batch of steps.
    pub async fn create(&self, input: CreateChecklistRequest) -> AppResult<ChecklistDetail> {
        let title = require_title(input.title.as_deref(), MSG_CHECKLIST_TITLE_REQUIRED)?;
        self.ensure_category(input.category_id).await?;

        let requested: Vec<Option<i32>> = input.steps.iter().map(|s| s.order_index).collect();
        let steps = input
            .steps
            .iter()
            .zip(batch_indices(&requested))
            .map(|(step, order_index)| {
                Ok(NewStep {
                    order_index,
                    fields: step.to_fields()?,
                })
            })
            .collect::<Result<Vec<_>, CoreError>>()?;

        let create = CreateChecklist {
            title,
            description: optional_text(input.description),
            category_id: input.category_id,
            is_default: false,
        };
        let (checklist, steps) = ChecklistRepo::create_with_steps(self.pool, &create, &steps).await?;

        tracing::info!(checklist_id = checklist.id, steps = steps.len(), "Checklist created");
        self.load_detail(checklist).await
    }

    pub async fn update(&self, id: DbId, mut input: UpdateChecklist) -> AppResult<ChecklistDetail> {
        let existing = self.find_checklist(id).await?;
        ensure_not_default(existing.is_default, MSG_EDIT_DEFAULT)?;

        if let Some(title) = input.title.take() {
            input.title = Some(require_title(Some(&title), MSG_CHECKLIST_TITLE_REQUIRED)?);
        }
        input.description = std::mem::take(&mut input.description).blank_as_null();
        if let Patch::Value(category_id) = input.category_id {
            self.ensure_category(Some(category_id)).await?;
        }

        let checklist = ChecklistRepo::update(self.pool, id, &input)
            .await?
            .ok_or(checklist_not_found(id))?;

        tracing::info!(checklist_id = id, "Checklist updated");
        self.load_detail(checklist).await
    }

    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        let existing = self.find_checklist(id).await?;
        ensure_not_default(existing.is_default, MSG_DELETE_DEFAULT)?;

        if !ChecklistRepo::delete(self.pool, id).await? {
            return Err(checklist_not_found(id));
        }
        tracing::info!(checklist_id = id, "Checklist deleted");
        Ok(())
    }

    /// Copy a checklist with all steps. Default checklists may be cloned;
    /// the copy never is one.
    pub async fn clone_checklist(&self, id: DbId) -> AppResult<ChecklistDetail> {
        let source = self.find_checklist(id).await?;
        let steps = StepRepo::list_by_checklist(self.pool, id).await?;

        let (copy, copied) = ChecklistRepo::clone_with_steps(self.pool, &source, &steps).await?;

        tracing::info!(
            source_id = id,
            checklist_id = copy.id,
            steps = copied.len(),
            "Checklist cloned",
        );
        self.load_detail(copy).await
    }

    // -----------------------------------------------------------------------
    // Steps
    // -----------------------------------------------------------------------

    pub async fn list_steps(&self, checklist_id: DbId) -> AppResult<Vec<Step>> {
        self.find_checklist(checklist_id).await?;
        Ok(StepRepo::list_by_checklist(self.pool, checklist_id).await?)
    }

    pub async fn add_step(&self, checklist_id: DbId, input: CreateStepRequest) -> AppResult<Step> {
        let checklist = self.find_checklist(checklist_id).await?;
        ensure_not_default(checklist.is_default, MSG_ADD_STEP_DEFAULT)?;

        let fields = input.step.to_fields()?;
        let step = StepRepo::create(self.pool, checklist_id, &fields, input.position()).await?;

        tracing::info!(
            checklist_id,
            step_id = step.id,
            order_index = step.order_index,
            "Step added",
        );
        Ok(step)
    }

    pub async fn update_step(&self, step_id: DbId, input: UpdateStepRequest) -> AppResult<Step> {
        let step = self.find_step(step_id).await?;
        self.guard_step(&step, MSG_EDIT_STEP_DEFAULT).await?;

        let fields = input.apply_to(step.fields())?;
        let updated = StepRepo::update(self.pool, step_id, &fields)
            .await?
            .ok_or(step_not_found(step_id))?;

        tracing::info!(step_id, status = %updated.status, "Step updated");
        Ok(updated)
    }

    pub async fn delete_step(&self, step_id: DbId) -> AppResult<()> {
        let step = self.find_step(step_id).await?;
        self.guard_step(&step, MSG_DELETE_STEP_DEFAULT).await?;

        if !StepRepo::delete(self.pool, step_id).await? {
            return Err(step_not_found(step_id));
        }
        tracing::info!(checklist_id = step.checklist_id, step_id, "Step deleted");
        Ok(())
    }

    pub async fn clone_step(&self, step_id: DbId) -> AppResult<Step> {
        let step = self.find_step(step_id).await?;
        self.guard_step(&step, MSG_CLONE_STEP_DEFAULT).await?;

        let copy = StepRepo::clone_after(self.pool, &step).await?;

        tracing::info!(
            checklist_id = step.checklist_id,
            step_id,
            clone_id = copy.id,
            "Step cloned",
        );
        Ok(copy)
    }

    pub async fn reorder_steps(&self, input: ReorderRequest) -> AppResult<Vec<Step>> {
        let checklist = self.find_checklist(input.checklist_id).await?;
        ensure_not_default(checklist.is_default, MSG_REORDER_DEFAULT)?;

        let steps = StepRepo::reorder(self.pool, checklist.id, &input.step_ids).await?;

        tracing::info!(checklist_id = checklist.id, steps = steps.len(), "Steps reordered");
        Ok(steps)
    }

    // -----------------------------------------------------------------------
    // CSV
    // -----------------------------------------------------------------------

    pub async fn export_csv(&self, id: DbId) -> AppResult<CsvExport> {
        let checklist = self.find_checklist(id).await?;
        let steps = StepRepo::list_by_checklist(self.pool, id).await?;

        let rows: Vec<StepCsvRow<'_>> = steps.iter().map(Step::csv_row).collect();
        Ok(CsvExport {
            filename: export_filename(&checklist.title),
            content: steps_to_csv(&rows),
        })
    }

    /// Create a checklist from an uploaded CSV file.
    ///
    /// All-or-nothing: any document or row error rejects the whole upload
    /// and nothing is written.
    pub async fn import_csv(&self, upload: CsvUpload, max_bytes: usize) -> AppResult<ChecklistDetail> {
        validate_csv_upload(
            &upload.filename,
            upload.content_type.as_deref(),
            upload.bytes.len(),
            max_bytes,
        )?;

        let content = std::str::from_utf8(&upload.bytes)
            .map_err(|_| CoreError::Validation("CSV file must be UTF-8 encoded".into()))?;
        let parsed = parse_steps_csv(content.trim_start_matches('\u{feff}'));
        if !parsed.success {
            tracing::info!(
                filename = %upload.filename,
                errors = parsed.errors.len(),
                "CSV import rejected",
            );
            return Err(AppError::CsvRejected {
                message: "CSV validation failed".into(),
                errors: parsed.errors,
            });
        }

        let title = upload
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .or_else(|| title_from_filename(&upload.filename))
            .ok_or_else(|| CoreError::Validation(MSG_CHECKLIST_TITLE_REQUIRED.into()))?;
        self.ensure_category(upload.category_id).await?;

        let requested: Vec<Option<i32>> = parsed.steps.iter().map(|s| s.order_index).collect();
        let steps: Vec<NewStep> = parsed
            .steps
            .into_iter()
            .zip(batch_indices(&requested))
            .map(|(step, order_index)| NewStep {
                order_index,
                fields: StepFields::from(step),
            })
            .collect();

        let create = CreateChecklist {
            title,
            description: optional_text(upload.description),
            category_id: upload.category_id,
            is_default: false,
        };
        let (checklist, steps) = ChecklistRepo::create_with_steps(self.pool, &create, &steps).await?;

        tracing::info!(
            checklist_id = checklist.id,
            steps = steps.len(),
            filename = %upload.filename,
            "Checklist imported from CSV",
        );
        self.load_detail(checklist).await
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn find_checklist(&self, id: DbId) -> AppResult<Checklist> {
        ChecklistRepo::find_by_id(self.pool, id)
            .await?
            .ok_or_else(|| checklist_not_found(id))
    }

    async fn find_step(&self, id: DbId) -> AppResult<Step> {
        StepRepo::find_by_id(self.pool, id)
            .await?
            .ok_or_else(|| step_not_found(id))
    }

    /// Reject the mutation if the step's checklist is a default.
    async fn guard_step(&self, step: &Step, message: &str) -> AppResult<()> {
        let checklist = self.find_checklist(step.checklist_id).await?;
        ensure_not_default(checklist.is_default, message)?;
        Ok(())
    }

    async fn ensure_category(&self, id: Option<DbId>) -> AppResult<()> {
        let Some(id) = id else {
            return Ok(());
        };
        CategoryRepo::find_by_id(self.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Category",
                id,
            }))?;
        Ok(())
    }

    async fn load_detail(&self, checklist: Checklist) -> AppResult<ChecklistDetail> {
        let category = match checklist.category_id {
            Some(id) => CategoryRepo::find_by_id(self.pool, id).await?,
            None => None,
        };
        let steps = StepRepo::list_by_checklist(self.pool, checklist.id).await?;
        Ok(detail(checklist, category, steps))
    }
}

fn detail(checklist: Checklist, category: Option<Category>, steps: Vec<Step>) -> ChecklistDetail {
    let stats = compute_stats(steps.iter().map(Step::facts));
    ChecklistDetail {
        checklist,
        category,
        steps,
        stats,
    }
}

fn checklist_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Checklist",
        id,
    })
}

fn step_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Step", id })
}
