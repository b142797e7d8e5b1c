pub mod calendar;
pub mod document;
pub mod event;

pub use calendar::CalendarData;
pub use document::Document;
pub use event::{EventData, OccurrenceDeletion, OccurrenceModification, RecurrenceInfo};
