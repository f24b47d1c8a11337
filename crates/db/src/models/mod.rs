//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - Create/update DTOs consumed by the repositories

pub mod category;
pub mod checklist;
pub mod step;
