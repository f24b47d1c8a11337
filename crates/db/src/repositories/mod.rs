//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&DbPool` as the first argument. Multi-row writes open their own
//! transaction; `*_inner` helpers take an open connection so they can be
//! composed inside a caller's transaction.

pub mod category_repo;
pub mod checklist_repo;
pub mod step_repo;

pub use category_repo::CategoryRepo;
pub use checklist_repo::ChecklistRepo;
pub use step_repo::StepRepo;
