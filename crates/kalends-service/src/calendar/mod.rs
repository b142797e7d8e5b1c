//! Calendar queries: event instances and the orchestrator producing them.
//!
//! ## Module Organization
//!
//! - `instance`: the `EventInstance` output type, shared decoration and sorting
//! - `settings`: runtime calendar settings derived from configuration
//! - `query`: the `EventQuery` criteria of an instance query
//! - `service`: `CalendarService`, running searches, expansion and access filtering

pub mod instance;
pub mod query;
pub mod service;
pub mod settings;


pub use instance::{Decoration, EventInstance, sort_instances};
pub use query::EventQuery;
pub use service::CalendarService;
pub use settings::CalendarSettings;
