//! Checklist API server library.
//!
//! Exposes config, state, error handling, the service layer and routes so
//! integration tests and the binary entrypoints can share them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
