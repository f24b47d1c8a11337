//! Derived per-checklist statistics.
//!
//! Nothing here is stored; stats are recomputed on every checklist read.

use serde::Serialize;

use crate::step_status::StepStatus;
use crate::types::Timestamp;

/// The fields of a step that feed the statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepFacts {
    pub status: StepStatus,
    pub duration_minutes: i32,
    pub start_datetime: Option<Timestamp>,
    pub end_datetime: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChecklistStats {
    /// Steps that are not rejected.
    pub total_steps: usize,
    pub completed_steps: usize,
    /// `round(completed / total * 100)`, `0` when there are no counted steps.
    pub completion_percentage: u32,
    /// Earliest start across all steps, if any step has one.
    pub start_datetime: Option<Timestamp>,
    /// Latest end across all steps, if any step has one.
    pub end_datetime: Option<Timestamp>,
    /// Sum over every step, rejected ones included.
    pub total_duration_minutes: i64,
}

pub fn compute_stats(steps: impl IntoIterator<Item = StepFacts>) -> ChecklistStats {
    let mut stats = ChecklistStats::default();

    for step in steps {
        if step.status != StepStatus::Rejected {
            stats.total_steps += 1;
        }
        if step.status == StepStatus::Completed {
            stats.completed_steps += 1;
        }
        stats.total_duration_minutes += i64::from(step.duration_minutes);

        if let Some(start) = step.start_datetime {
            stats.start_datetime = Some(stats.start_datetime.map_or(start, |s| s.min(start)));
        }
        if let Some(end) = step.end_datetime {
            stats.end_datetime = Some(stats.end_datetime.map_or(end, |e| e.max(end)));
        }
    }

    stats.completion_percentage = completion_percentage(stats.completed_steps, stats.total_steps);
    stats
}

/// Percentage rounded half up, matching the display convention.
fn completion_percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((200 * completed + total) / (2 * total)) as u32
}
