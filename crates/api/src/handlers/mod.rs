pub mod category;
pub mod checklist;
pub mod csv;
pub mod step;
