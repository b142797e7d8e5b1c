//! Event search predicate.
//!
//! The date criterion compares calendar dates (year, month, day), not
//! timestamps. The reconciliation engine applies the precise timestamp test
//! afterwards.

use chrono_tz::Tz;
use kalends_core::constants::EVENT_TEMPLATE_PAGE;
use kalends_core::types::{DocumentReference, LocationFilter, SortOrder};
use kalends_core::util::date::{DateParts, overlaps};

use crate::model::Document;

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    pub from: DateParts,
    pub to: DateParts,
}

/// Criteria for an event search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSearch {
    /// Whether to search recurring or one-off event definitions.
    pub recurrent: bool,
    /// Optional date criterion; recurring searches leave it unset.
    pub dates: Option<DateSpan>,
    pub location: LocationFilter,
    /// Calendars to restrict the search to; empty means every calendar.
    pub calendars: Vec<DocumentReference>,
    /// Optional ordering by start date.
    pub order: Option<SortOrder>,
}

impl EventSearch {
    /// Starts a search for one-off (`false`) or recurring (`true`) events.
    #[must_use]
    pub const fn new(recurrent: bool) -> Self {
        Self {
            recurrent,
            dates: None,
            location: LocationFilter::Wiki,
            calendars: Vec::new(),
            order: None,
        }
    }

    /// Restricts the search to events whose dates overlap `[from, to]`.
    #[must_use]
    pub fn with_dates(mut self, from: DateParts, to: DateParts) -> Self {
        self.dates = Some(DateSpan { from, to });
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: LocationFilter) -> Self {
        self.location = location;
        self
    }

    #[must_use]
    pub fn with_calendars(mut self, calendars: Vec<DocumentReference>) -> Self {
        self.calendars = calendars;
        self
    }

    #[must_use]
    pub fn order_by_start(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// ## Summary
    /// Evaluates the predicate against a document.
    ///
    /// Date parts are derived in `tz`. An event without an end is compared by
    /// its start on both sides.
    #[must_use]
    pub fn matches(&self, document: &Document, tz: Tz) -> bool {
        let Some(event) = &document.event else {
            return false;
        };
        if document.reference.name == EVENT_TEMPLATE_PAGE || event.recurrent != self.recurrent {
            return false;
        }

        if let Some(span) = &self.dates {
            let start = DateParts::of(event.start, tz);
            let end = event.end.map_or(start, |end| DateParts::of(end, tz));
            if !overlaps(&start, &end, &span.from, &span.to) {
                return false;
            }
        }

        let space = document.reference.last_space();
        if !self.location.accepts(&space) {
            return false;
        }

        self.calendars.is_empty()
            || self
                .calendars
                .iter()
                .any(|calendar| space.is_strictly_below(&calendar.last_space()))
    }
}
