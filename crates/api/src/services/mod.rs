//! Service layer composing repositories with the core rules.

pub mod checklist;
pub mod input;

pub use checklist::{ChecklistService, CsvExport};
