//! Calendar occurrence service.
//!
//! ## Module Organization
//!
//! - `auth`: identities, casbin-backed access filter
//! - `recurrence`: occurrence generators, override index, reconciliation engine
//! - `render`: plain text rendering of titles and descriptions
//! - `calendar`: event instances and the query orchestrator (`CalendarService`)

pub mod auth;
pub mod calendar;
pub mod error;
pub mod recurrence;
pub mod render;

pub use calendar::{CalendarService, CalendarSettings, EventInstance, EventQuery};
pub use error::{ServiceError, ServiceResult};
