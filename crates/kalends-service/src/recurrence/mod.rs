//! Recurrence expansion and override reconciliation.
//!
//! ## Module Organization
//!
//! - `occurrence`: raw and resolved occurrence values
//! - `generator`: the `OccurrenceGenerator` capability and its tag registry
//! - `override_index`: join of modification and deletion records by original start
//! - `modification`: effective occurrence of a single modification record
//! - `engine`: the reconciliation engine merging all of the above

pub mod engine;
pub mod generator;
pub mod modification;
pub mod occurrence;
pub mod override_index;


pub use engine::{Expansion, ExpansionReport, ReconciliationEngine};
pub use generator::{GeneratorRegistry, OccurrenceGenerator, RRuleGenerator};
pub use modification::{create_modified_instance, modification_template};
pub use occurrence::{Occurrence, RawOccurrence};
pub use override_index::{OverrideIndex, modification_index};
