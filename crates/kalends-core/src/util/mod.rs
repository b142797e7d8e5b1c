pub mod date;

pub use date::{DateParts, DateRange, EndDatePolicy, overlaps, saturating_add, to_exclusive_end};
