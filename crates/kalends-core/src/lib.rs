//! Core types shared across the kalends workspace.
//!
//! ## Module Organization
//!
//! - `config`: settings loaded from defaults, environment and `config.toml`
//! - `constants`: page names and display defaults
//! - `error`: core error type
//! - `types`: document/space references, location filter and sort order
//! - `util::date`: end-date inference, all-day arithmetic and range overlap

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
pub mod util;
