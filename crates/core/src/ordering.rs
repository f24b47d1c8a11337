//! Step ordering engine.
//!
//! Computes `order_index` assignments for the steps of a single checklist.
//! Nothing here touches storage: each operation returns a plan describing
//! which steps receive which index, and the repository layer applies it
//! inside one transaction.
//!
//! Invariant: once a plan is applied, the checklist's indices are exactly
//! `0..n` with no gaps and no ties.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The ordering-relevant view of a persisted step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPosition {
    pub id: DbId,
    pub order_index: i32,
}

/// A single write: `step_id` moves to `order_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexUpdate {
    pub step_id: DbId,
    pub order_index: i32,
}

/// Where a new step should land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// After the current last step.
    End,
    /// Immediately after the given step.
    After(DbId),
    /// In the given step's slot; the target moves down by one.
    Before(DbId),
    /// At an explicit slot, clamped to `0..=len`.
    At(i32),
}

/// Result of planning an insertion.
///
/// `shifts` must be applied before the new row is written. They are ordered
/// highest index first so that every write lands on a slot that is already
/// free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertPlan {
    pub order_index: i32,
    pub shifts: Vec<IndexUpdate>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderingError {
    #[error("Step {0} not found in checklist")]
    StepNotFound(DbId),

    #[error("{0}")]
    InvalidReorder(String),
}

impl From<OrderingError> for CoreError {
    fn from(err: OrderingError) -> Self {
        match err {
            OrderingError::StepNotFound(id) => CoreError::NotFound { entity: "Step", id },
            OrderingError::InvalidReorder(msg) => CoreError::Validation(msg),
        }
    }
}

// ---------------------------------------------------------------------------
// Insertion
// ---------------------------------------------------------------------------

/// Index for a step appended at the end: `max + 1`, or `0` when empty.
pub fn append_index(steps: &[StepPosition]) -> i32 {
    steps
        .iter()
        .map(|s| s.order_index)
        .max()
        .map_or(0, |max| max + 1)
}

/// Plan the insertion of one new step.
///
/// Every existing step at or after the chosen slot shifts up by one,
/// preserving relative order. `End` never shifts anything.
pub fn plan_insert(
    steps: &[StepPosition],
    position: InsertPosition,
) -> Result<InsertPlan, OrderingError> {
    let slot = match position {
        InsertPosition::End => {
            return Ok(InsertPlan {
                order_index: append_index(steps),
                shifts: Vec::new(),
            })
        }
        InsertPosition::After(target) => find(steps, target)?.order_index + 1,
        InsertPosition::Before(target) => find(steps, target)?.order_index,
        InsertPosition::At(requested) => requested.clamp(0, append_index(steps)),
    };

    Ok(InsertPlan {
        order_index: slot,
        shifts: shift_from(steps, slot),
    })
}

/// Plan a step clone: the copy goes directly after its source.
pub fn plan_clone(steps: &[StepPosition], source: DbId) -> Result<InsertPlan, OrderingError> {
    plan_insert(steps, InsertPosition::After(source))
}

fn find(steps: &[StepPosition], id: DbId) -> Result<&StepPosition, OrderingError> {
    steps
        .iter()
        .find(|s| s.id == id)
        .ok_or(OrderingError::StepNotFound(id))
}

fn shift_from(steps: &[StepPosition], slot: i32) -> Vec<IndexUpdate> {
    let mut shifted: Vec<IndexUpdate> = steps
        .iter()
        .filter(|s| s.order_index >= slot)
        .map(|s| IndexUpdate {
            step_id: s.id,
            order_index: s.order_index + 1,
        })
        .collect();
    shifted.sort_by(|a, b| b.order_index.cmp(&a.order_index));
    shifted
}

// ---------------------------------------------------------------------------
// Removal and compaction
// ---------------------------------------------------------------------------

/// Plan the writes that follow deleting `removed`.
///
/// The survivors are renumbered `0..n-1` in their current relative order.
/// This is a full recompaction, so it also repairs gaps or ties left by
/// earlier failures.
pub fn plan_removal(
    steps: &[StepPosition],
    removed: DbId,
) -> Result<Vec<IndexUpdate>, OrderingError> {
    find(steps, removed)?;
    let survivors: Vec<StepPosition> = steps.iter().filter(|s| s.id != removed).copied().collect();
    Ok(plan_compaction(&survivors))
}

/// Renumber `steps` to `0..n-1` by ascending current index.
///
/// Ties keep their input order. Only steps whose index changes are returned.
pub fn plan_compaction(steps: &[StepPosition]) -> Vec<IndexUpdate> {
    let mut sorted = steps.to_vec();
    sorted.sort_by_key(|s| s.order_index);

    sorted
        .iter()
        .enumerate()
        .filter_map(|(position, step)| {
            let target = position as i32;
            (step.order_index != target).then_some(IndexUpdate {
                step_id: step.id,
                order_index: target,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Bulk reorder
// ---------------------------------------------------------------------------

/// Plan a drag-and-drop reorder: each id gets its position in `ordered_ids`.
///
/// `ordered_ids` must be exactly a permutation of the checklist's current
/// step ids. Anything else is rejected, since a partial list would leave the
/// omitted steps on stale indices that collide with reassigned ones.
pub fn plan_reorder(
    steps: &[StepPosition],
    ordered_ids: &[DbId],
) -> Result<Vec<IndexUpdate>, OrderingError> {
    if ordered_ids.is_empty() {
        return Err(OrderingError::InvalidReorder(
            "step_ids must not be empty".into(),
        ));
    }

    let current: HashMap<DbId, i32> = steps.iter().map(|s| (s.id, s.order_index)).collect();
    let mut seen = HashSet::with_capacity(ordered_ids.len());

    for id in ordered_ids {
        if !seen.insert(*id) {
            return Err(OrderingError::InvalidReorder(format!(
                "Duplicate step id {id} in step_ids"
            )));
        }
        if !current.contains_key(id) {
            return Err(OrderingError::InvalidReorder(format!(
                "Step {id} does not belong to this checklist"
            )));
        }
    }

    if ordered_ids.len() != current.len() {
        return Err(OrderingError::InvalidReorder(format!(
            "step_ids must list all {} steps of the checklist, got {}",
            current.len(),
            ordered_ids.len()
        )));
    }

    Ok(ordered_ids
        .iter()
        .enumerate()
        .filter_map(|(position, id)| {
            let target = position as i32;
            (current[id] != target).then_some(IndexUpdate {
                step_id: *id,
                order_index: target,
            })
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Batches
// ---------------------------------------------------------------------------

/// Final indices for a batch of new steps created together.
///
/// A step without a requested index takes its batch position. The requested
/// keys are then ranked (stable on ties) so the stored indices are always
/// `0..n`, whatever the caller asked for.
pub fn batch_indices(requested: &[Option<i32>]) -> Vec<i32> {
    let mut keyed: Vec<(i32, usize)> = requested
        .iter()
        .enumerate()
        .map(|(position, index)| (index.unwrap_or(position as i32), position))
        .collect();
    keyed.sort();

    let mut result = vec![0; requested.len()];
    for (rank, (_, position)) in keyed.into_iter().enumerate() {
        result[position] = rank as i32;
    }
    result
}

/// `true` when the indices are exactly `0..n` once sorted.
pub fn is_contiguous(indices: impl IntoIterator<Item = i32>) -> bool {
    let mut sorted: Vec<i32> = indices.into_iter().collect();
    sorted.sort_unstable();
    sorted
        .iter()
        .enumerate()
        .all(|(position, index)| *index == position as i32)
}

// ===========================================================================
// Tests
// ===========================================================================
