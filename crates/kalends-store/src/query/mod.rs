//! Search predicates evaluated by stores.

pub mod search;


pub use search::{DateSpan, EventSearch};
