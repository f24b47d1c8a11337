//! Domain logic for the checklist service.
//!
//! This crate has **zero database dependencies**. Everything here operates on
//! plain values handed in by the `db` and `api` crates, which keeps the
//! ordering and CSV rules testable without a store.

pub mod checklist;
pub mod csv_steps;
pub mod error;
pub mod export;
pub mod ordering;
pub mod patch;
pub mod seed_catalog;
pub mod stats;
pub mod step_status;
pub mod types;
pub mod upload;
