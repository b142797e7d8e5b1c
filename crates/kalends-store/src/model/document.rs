use kalends_core::types::DocumentReference;
use serde::{Deserialize, Serialize};

use super::calendar::CalendarData;
use super::event::{EventData, OccurrenceDeletion, OccurrenceModification, RecurrenceInfo};

/// A page of the content store together with the records attached to it.
///
/// Event documents carry `event` (plus `recurrence` when recurring) and any
/// number of modification and deletion records, joined to generated
/// occurrences purely by their `original_start` key. Calendar documents carry
/// `calendar`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub reference: DocumentReference,
    /// Raw (unrendered) page title.
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub event: Option<EventData>,
    #[serde(default)]
    pub recurrence: Option<RecurrenceInfo>,
    #[serde(default)]
    pub modifications: Vec<OccurrenceModification>,
    #[serde(default)]
    pub deletions: Vec<OccurrenceDeletion>,
    #[serde(default)]
    pub calendar: Option<CalendarData>,
}

impl Document {
    /// Creates an empty document at `reference`.
    #[must_use]
    pub fn new(reference: DocumentReference, title: impl Into<String>) -> Self {
        Self {
            reference,
            title: title.into(),
            event: None,
            recurrence: None,
            modifications: Vec::new(),
            deletions: Vec::new(),
            calendar: None,
        }
    }

    #[must_use]
    pub fn with_event(mut self, event: EventData) -> Self {
        self.event = Some(event);
        self
    }

    #[must_use]
    pub fn with_recurrence(mut self, recurrence: RecurrenceInfo) -> Self {
        self.recurrence = Some(recurrence);
        self
    }

    #[must_use]
    pub fn with_modification(mut self, modification: OccurrenceModification) -> Self {
        self.modifications.push(modification);
        self
    }

    #[must_use]
    pub fn with_deletion(mut self, deletion: OccurrenceDeletion) -> Self {
        self.deletions.push(deletion);
        self
    }

    #[must_use]
    pub fn with_calendar(mut self, calendar: CalendarData) -> Self {
        self.calendar = Some(calendar);
        self
    }

    /// Returns `true` if the document carries a recurring event record.
    #[must_use]
    pub fn is_recurrent(&self) -> bool {
        self.event.as_ref().is_some_and(|event| event.recurrent)
    }
}
