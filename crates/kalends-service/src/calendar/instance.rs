use chrono::{DateTime, Utc};
use kalends_core::types::{DocumentReference, SortOrder};
use kalends_core::util::date::to_exclusive_end;
use kalends_store::model::EventData;
use serde::Serialize;

use crate::recurrence::Occurrence;

/// A concrete event occurrence ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventInstance {
    /// Event document the instance was derived from.
    pub reference: DocumentReference,
    pub start: DateTime<Utc>,
    /// Effective end; inclusive for all-day events.
    pub end: DateTime<Utc>,
    /// `end`, plus one day for all-day events.
    pub end_exclusive: DateTime<Utc>,
    /// Unmodified start, present only for modified occurrences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_start: Option<DateTime<Utc>>,
    pub all_day: bool,
    pub title: String,
    pub description: Option<String>,
    pub background_color: String,
    pub text_color: String,
    pub recurrent: bool,
}

/// Metadata shared by every instance of one event document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    pub reference: DocumentReference,
    /// Rendered title.
    pub title: String,
    /// Rendered description.
    pub description: Option<String>,
    pub background_color: String,
    pub text_color: String,
}

impl Decoration {
    /// ## Summary
    /// Attaches the shared metadata to `occurrence`.
    ///
    /// Title and description of the occurrence win over the event's.
    #[must_use]
    pub fn apply(
        &self,
        event: &EventData,
        occurrence: Occurrence,
        recurrent: bool,
    ) -> EventInstance {
        EventInstance {
            reference: self.reference.clone(),
            start: occurrence.start,
            end: occurrence.end,
            end_exclusive: to_exclusive_end(occurrence.end, event.all_day),
            original_start: occurrence.original_start,
            all_day: event.all_day,
            title: occurrence.title.unwrap_or_else(|| self.title.clone()),
            description: occurrence.description.or_else(|| self.description.clone()),
            background_color: self.background_color.clone(),
            text_color: self.text_color.clone(),
            recurrent,
        }
    }
}

/// Stable sort by start; instances with equal starts keep their relative order.
pub fn sort_instances(instances: &mut [EventInstance], order: SortOrder) {
    instances.sort_by(|a, b| order.apply(a.start.cmp(&b.start)));
}
