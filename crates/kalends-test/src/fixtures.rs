//! Documents and policies used across integration tests.
//!
//! The fixture models a small wiki: a `Team` calendar holding a weekly
//! standup and an offsite, a `Marketing` calendar holding a daily launch
//! countdown, and an uncategorised `Misc` space.

#![expect(clippy::expect_used, reason = "fixtures are static test data")]

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use kalends_core::types::DocumentReference;
use kalends_store::MemoryStore;
use kalends_store::model::{
    CalendarData, Document, EventData, OccurrenceDeletion, OccurrenceModification, RecurrenceInfo,
};

/// Casbin policies granting `alice` the team space and `group:marketing`
/// read access to marketing.
pub const POLICIES: &str = r"
p, user:alice, /wiki/Team/**, owner
p, group:marketing, /wiki/Marketing/**, reader
p, user:mallory, /wiki/Marketing/**, editor
p, all, /wiki/Misc/**, reader

g2, reader, view
g2, editor, view
g2, editor, edit
g2, owner, view
g2, owner, edit
";

#[must_use]
pub fn at(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

#[must_use]
pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[must_use]
pub fn reference(s: &str) -> DocumentReference {
    s.parse().expect("valid reference")
}

#[must_use]
pub fn calendar(page: &str, title: &str, color: &str) -> Document {
    Document::new(reference(page), title).with_calendar(CalendarData {
        color: color.to_string(),
        text_color: "#fff".to_string(),
    })
}

#[must_use]
pub fn event(page: &str, title: &str, start: &str, end: Option<&str>) -> Document {
    Document::new(reference(page), title).with_event(EventData {
        start: at(start),
        end: end.map(at),
        all_day: false,
        description: None,
        recurrent: false,
    })
}

#[must_use]
pub fn recurring(
    page: &str,
    title: &str,
    start: &str,
    end: Option<&str>,
    frequency: &str,
) -> Document {
    let mut document = event(page, title, start, end);
    if let Some(event) = document.event.as_mut() {
        event.recurrent = true;
    }
    document.with_recurrence(RecurrenceInfo::new(frequency))
}

/// Weekly standup, Mondays 09:00 to 10:00 from 2024-01-01.
#[must_use]
pub fn standup() -> Document {
    recurring(
        "Team.Standup.WebHome",
        "Standup",
        "2024-01-01T09:00:00Z",
        Some("2024-01-01T10:00:00Z"),
        "weekly",
    )
}

/// The fixture wiki. The standup skips 2024-01-08 and moves 2024-01-15 to
/// 2024-01-16 14:00.
#[must_use]
pub fn documents() -> Vec<Document> {
    vec![
        calendar("Team.WebHome", "Team", "#0a0"),
        calendar("Marketing.WebHome", "Marketing", "#a00"),
        calendar("Team.CalendarTemplate", "Template", "#000"),
        standup()
            .with_deletion(OccurrenceDeletion::keyed(at("2024-01-08T09:00:00Z")))
            .with_modification(OccurrenceModification {
                start: Some(at("2024-01-16T14:00:00Z")),
                title: Some("Standup (**moved**)".to_string()),
                ..OccurrenceModification::keyed(at("2024-01-15T09:00:00Z"))
            }),
        event(
            "Team.Offsite.WebHome",
            "Offsite",
            "2024-01-10T08:00:00Z",
            Some("2024-01-11T18:00:00Z"),
        ),
        event("Team.EventTemplate", "Template", "2024-01-10T08:00:00Z", None),
        recurring(
            "Marketing.Countdown.WebHome",
            "Countdown",
            "2024-01-18T12:00:00Z",
            Some("2024-01-18T12:15:00Z"),
            "daily",
        ),
        event("Misc.Lunch", "Lunch", "2024-01-05T12:00:00Z", None),
    ]
}

#[must_use]
pub fn store() -> MemoryStore {
    MemoryStore::from_documents(Tz::UTC, documents())
}
