use chrono::{DateTime, Utc};

/// An occurrence as produced by a generator, before overrides are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawOccurrence {
    /// Scheduled start; the join key for modifications and deletions.
    pub start: DateTime<Utc>,
    /// Scheduled end, inferred from the start when absent.
    pub end: Option<DateTime<Utc>>,
}

impl RawOccurrence {
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }
}

/// An occurrence with its effective times, before event metadata is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Unmodified start; only set when the occurrence was modified.
    pub original_start: Option<DateTime<Utc>>,
    /// Rendered override title; `None` falls back to the event title.
    pub title: Option<String>,
    /// Rendered override description; `None` falls back to the event description.
    pub description: Option<String>,
}

impl Occurrence {
    /// An occurrence taking every value from its event.
    #[must_use]
    pub const fn scheduled(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            original_start: None,
            title: None,
            description: None,
        }
    }
}
