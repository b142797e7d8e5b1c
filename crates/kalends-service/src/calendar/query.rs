use chrono::NaiveDate;
use chrono_tz::Tz;
use kalends_core::types::{DocumentReference, LocationFilter, SortOrder};
use kalends_core::util::date::DateRange;
use kalends_store::query::EventSearch;

/// Criteria of an instance query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    /// First day of the query.
    pub from: NaiveDate,
    /// Last day of the query; a single-day query when absent.
    pub to: Option<NaiveDate>,
    pub location: LocationFilter,
    /// Calendars to restrict the query to; empty means every calendar.
    pub calendars: Vec<DocumentReference>,
    pub order: SortOrder,
}

impl EventQuery {
    #[must_use]
    pub const fn new(from: NaiveDate) -> Self {
        Self {
            from,
            to: None,
            location: LocationFilter::Wiki,
            calendars: Vec::new(),
            order: SortOrder::Ascending,
        }
    }

    #[must_use]
    pub fn until(mut self, to: NaiveDate) -> Self {
        self.to = Some(to);
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
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn last_day(&self) -> NaiveDate {
        self.to.unwrap_or(self.from)
    }

    /// Timestamp window covering every queried day in `tz`.
    #[must_use]
    pub fn range(&self, tz: Tz) -> DateRange {
        DateRange::days(self.from, self.last_day(), tz)
    }

    /// ## Summary
    /// Builds the store search for one-off (`false`) or recurring (`true`) events.
    ///
    /// Only the one-off search carries the date criterion: the base dates of a
    /// recurring event say nothing about where its occurrences fall, so those
    /// are windowed by the generator instead.
    #[must_use]
    pub fn search(&self, recurrent: bool) -> EventSearch {
        let search = EventSearch::new(recurrent)
            .with_location(self.location.clone())
            .with_calendars(self.calendars.clone());
        if recurrent {
            search
        } else {
            search
                .with_dates(self.from.into(), self.last_day().into())
                .order_by_start(self.order)
        }
    }
}
