//! Date and range helpers shared by the search predicate and the reconciliation engine.
//!
//! All timestamps are `DateTime<Utc>`. All-day events store their end date
//! inclusively; range arithmetic treats it exclusively (`end + 1 day`).

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use crate::constants::DEFAULT_EVENT_DURATION_MINUTES;

/// Policy for events stored without an explicit end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndDatePolicy {
    /// Duration given to timed events lacking an end.
    pub timed_duration: TimeDelta,
}

impl Default for EndDatePolicy {
    fn default() -> Self {
        Self {
            timed_duration: TimeDelta::minutes(DEFAULT_EVENT_DURATION_MINUTES),
        }
    }
}

impl EndDatePolicy {
    #[must_use]
    pub const fn new(timed_duration: TimeDelta) -> Self {
        Self { timed_duration }
    }

    /// ## Summary
    /// Returns `explicit_end` if present, otherwise a guessed end for `start`.
    #[must_use]
    pub fn infer_end(
        &self,
        start: DateTime<Utc>,
        explicit_end: Option<DateTime<Utc>>,
        all_day: bool,
    ) -> DateTime<Utc> {
        explicit_end.unwrap_or_else(|| self.guess_end(start, all_day))
    }

    /// ## Summary
    /// Guesses an end for an event starting at `start`.
    ///
    /// All-day events end on the same day (the stored end is inclusive), timed
    /// events last `timed_duration`.
    #[must_use]
    pub fn guess_end(&self, start: DateTime<Utc>, all_day: bool) -> DateTime<Utc> {
        if all_day {
            start
        } else {
            saturating_add(start, self.timed_duration)
        }
    }
}

/// ## Summary
/// Adds `delta` to `instant`, clamping to the representable range instead of
/// overflowing.
#[must_use]
pub fn saturating_add(instant: DateTime<Utc>, delta: TimeDelta) -> DateTime<Utc> {
    instant.checked_add_signed(delta).unwrap_or(if delta < TimeDelta::zero() {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

/// ## Summary
/// Converts a stored end into the exclusive end used for range computations.
///
/// Adds one calendar day for all-day events and returns `end` unchanged otherwise.
/// Saturates at `end` if the addition would overflow.
#[must_use]
pub fn to_exclusive_end(end: DateTime<Utc>, all_day: bool) -> DateTime<Utc> {
    if !all_day {
        return end;
    }
    end.checked_add_days(Days::new(1)).unwrap_or(end)
}

/// ## Summary
/// Returns `true` unless the span ends strictly before `from` or starts strictly after `to`.
///
/// Generic so that the date-part search predicate and the timestamp based
/// reconciliation apply the very same boundary policy.
pub fn overlaps<T: PartialOrd>(start: &T, end: &T, from: &T, to: &T) -> bool {
    !(end < from || start > to)
}

/// A calendar date as a (year, month, day) triplet.
///
/// Ordering is lexicographic, which matches chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateParts {
    /// Returns the date parts of `instant` as seen in `tz`.
    #[must_use]
    pub fn of(instant: DateTime<Utc>, tz: Tz) -> Self {
        let local = instant.with_timezone(&tz);
        Self {
            year: local.year(),
            month: local.month(),
            day: local.day(),
        }
    }
}

impl From<NaiveDate> for DateParts {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

/// Query window in timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    #[must_use]
    pub const fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    /// ## Summary
    /// Builds a range covering whole days in `tz`: from the start of `first`
    /// to the last second of `last`.
    #[must_use]
    pub fn days(first: NaiveDate, last: NaiveDate, tz: Tz) -> Self {
        Self {
            from: local_to_utc(first.and_time(NaiveTime::MIN), tz),
            to: local_to_utc(
                last.and_hms_opt(23, 59, 59)
                    .unwrap_or(last.and_time(NaiveTime::MIN)),
                tz,
            ),
        }
    }

    /// Returns `true` if the span `[start, end]` touches this range.
    #[must_use]
    pub fn touches(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        overlaps(&start, &end, &self.from, &self.to)
    }
}

/// Resolves a local wall-clock time, taking the earliest instant for ambiguous
/// times and shifting forward an hour for times skipped by a DST gap.
fn local_to_utc(naive: chrono::NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| {
            naive
                .checked_add_signed(TimeDelta::hours(1))
                .and_then(|shifted| tz.from_local_datetime(&shifted).earliest())
        })
        .map_or_else(|| naive.and_utc(), |local| local.with_timezone(&Utc))
}
