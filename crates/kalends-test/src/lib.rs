//! Kalends integration test support.
//!
//! Re-exports the workspace crates and provides fixture builders shared by
//! the integration tests.

pub use kalends_core as core;
pub use kalends_service as service;
pub use kalends_store as store;

pub mod fixtures;
