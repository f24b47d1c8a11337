//! Re-seeding of default categories and checklists.
//!
//! This is an administrative operation. It deletes every user-created
//! checklist, so nothing in the server calls it; it runs only from the
//! `checklist-seed` command.

use std::collections::HashMap;

use checklist_core::seed_catalog::{CATEGORIES, DEFAULT_CHECKLISTS};
use checklist_core::types::DbId;
use serde::Serialize;

use crate::models::checklist::CreateChecklist;
use crate::models::step::{NewStep, StepFields};
use crate::repositories::{CategoryRepo, ChecklistRepo, StepRepo};
use crate::DbPool;

/// What a reseed changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub deleted_checklists: u64,
    /// Number of default checklists created; `0` when they already existed.
    pub created_defaults: usize,
}

/// Reset the database to its installed state.
///
/// 1. Delete all non-default checklists (steps cascade).
/// 2. Upsert the default categories by name.
/// 3. Create the default checklists unless at least one already exists.
///
/// Runs in one transaction. Safe to repeat: defaults are never duplicated.
pub async fn reseed(pool: &DbPool) -> Result<SeedReport, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let mut report = SeedReport::default();

    report.deleted_checklists = ChecklistRepo::delete_non_default_inner(&mut tx).await?;
    if report.deleted_checklists > 0 {
        tracing::info!(count = report.deleted_checklists, "Deleted non-default checklists");
    }

    let mut category_ids: HashMap<&str, DbId> = HashMap::with_capacity(CATEGORIES.len());
    for seed in CATEGORIES {
        let category = CategoryRepo::upsert_by_name_inner(&mut tx, seed.name, seed.color).await?;
        category_ids.insert(seed.name, category.id);
    }

    if ChecklistRepo::count_defaults_inner(&mut tx).await? == 0 {
        for seed in DEFAULT_CHECKLISTS {
            let input = CreateChecklist {
                title: seed.title.to_string(),
                description: Some(seed.description.to_string()),
                category_id: category_ids.get(seed.category).copied(),
                is_default: true,
            };
            let checklist = ChecklistRepo::insert_inner(&mut tx, &input).await?;

            let steps: Vec<NewStep> = seed
                .steps
                .iter()
                .enumerate()
                .map(|(position, step)| NewStep {
                    order_index: position as i32,
                    fields: StepFields {
                        title: step.title.to_string(),
                        description: Some(step.description.to_string()),
                        duration_minutes: step.duration_minutes,
                        ..StepFields::default()
                    },
                })
                .collect();
            StepRepo::insert_batch_inner(&mut tx, checklist.id, &steps).await?;

            tracing::info!(
                checklist_id = checklist.id,
                title = seed.title,
                steps = steps.len(),
                "Created default checklist",
            );
            report.created_defaults += 1;
        }
    } else {
        tracing::info!("Default checklists already exist, skipping");
    }

    tx.commit().await?;
    Ok(report)
}
