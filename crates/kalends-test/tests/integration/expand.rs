//! Expansion properties observed through full queries.

use chrono::{Days, TimeDelta};
use chrono_tz::Tz;
use kalends_test::fixtures::{recurring, standup};
use kalends_test::service::auth::{AllowAll, Identity};
use kalends_test::service::{CalendarService, CalendarSettings, EventInstance, EventQuery};
use kalends_test::store::MemoryStore;
use kalends_test::store::model::{
    Document, OccurrenceDeletion, OccurrenceModification, RecurrenceInfo,
};

use super::helpers::{at, day};

fn query_january(documents: Vec<Document>) -> Vec<EventInstance> {
    let service = CalendarService::new(
        MemoryStore::from_documents(Tz::UTC, documents),
        AllowAll,
        CalendarSettings::default(),
    );
    service.query_events(
        &Identity::Guest,
        &EventQuery::new(day(2024, 1, 1)).until(day(2024, 1, 22)),
    )
}

#[test_log::test]
fn test_weekly_event_yields_four_plain_instances() {
    let instances = query_january(vec![standup()]);

    assert_eq!(instances.len(), 4);
    for (week, instance) in instances.iter().enumerate() {
        let offset = TimeDelta::weeks(i64::try_from(week).expect("small index"));
        assert_eq!(instance.start, at("2024-01-01T09:00:00Z") + offset);
        assert_eq!(instance.end - instance.start, TimeDelta::hours(1));
        assert_eq!(instance.original_start, None);
    }
}

#[test_log::test]
fn test_deleted_occurrence_never_appears() {
    let key = at("2024-01-08T09:00:00Z");
    let instances = query_january(vec![standup().with_deletion(OccurrenceDeletion::keyed(key))]);

    assert_eq!(instances.len(), 3);
    assert!(instances.iter().all(|i| i.start != key && i.original_start != Some(key)));
}

#[test_log::test]
fn test_modified_occurrence_appears_exactly_once() {
    let key = at("2024-01-15T09:00:00Z");
    let instances = query_january(vec![standup().with_modification(OccurrenceModification {
        start: Some(at("2024-01-16T14:00:00Z")),
        ..OccurrenceModification::keyed(key)
    })]);

    let modified: Vec<_> = instances
        .iter()
        .filter(|i| i.original_start == Some(key))
        .collect();
    assert_eq!(modified.len(), 1);
    assert_eq!(modified[0].start, at("2024-01-16T14:00:00Z"));
    assert_eq!(modified[0].end, at("2024-01-16T15:00:00Z"));
    assert_eq!(instances.len(), 4);
}

#[test_log::test]
fn test_modification_outside_window_does_not_break_query() {
    let instances = query_january(vec![standup().with_modification(OccurrenceModification {
        start: Some(at("2024-02-06T09:00:00Z")),
        ..OccurrenceModification::keyed(at("2024-02-05T09:00:00Z"))
    })]);

    assert_eq!(instances.len(), 4);
    assert!(instances.iter().all(|i| i.original_start.is_none()));
}

#[test_log::test]
fn test_queries_are_repeatable() {
    let documents = vec![
        standup()
            .with_deletion(OccurrenceDeletion::keyed(at("2024-01-08T09:00:00Z")))
            .with_modification(OccurrenceModification {
                title: Some("Retro".into()),
                ..OccurrenceModification::keyed(at("2024-01-22T09:00:00Z"))
            }),
        recurring("Team.Daily.WebHome", "Daily", "2024-01-20T08:00:00Z", None, "daily"),
    ];

    assert_eq!(query_january(documents.clone()), query_january(documents));
}

#[test_log::test]
fn test_all_day_instances_end_exclusively() {
    let mut holiday = recurring(
        "Team.Holiday.WebHome",
        "Holiday",
        "2024-01-06T00:00:00Z",
        Some("2024-01-07T00:00:00Z"),
        "weekly",
    )
    .with_modification(OccurrenceModification {
        end: Some(at("2024-01-14T00:00:00Z")),
        ..OccurrenceModification::keyed(at("2024-01-13T00:00:00Z"))
    });
    if let Some(event) = holiday.event.as_mut() {
        event.all_day = true;
    }

    let instances = query_january(vec![holiday]);

    assert_eq!(instances.len(), 3);
    for instance in &instances {
        assert!(instance.all_day);
        assert_eq!(
            Some(instance.end_exclusive),
            instance.end.checked_add_days(Days::new(1))
        );
    }
}

#[test_log::test]
fn test_single_day_query_of_daily_all_day_event() {
    let mut holiday = recurring(
        "Team.Holiday.WebHome",
        "Holiday",
        "2024-01-01T00:00:00Z",
        Some("2024-01-01T00:00:00Z"),
        "daily",
    );
    if let Some(event) = holiday.event.as_mut() {
        event.all_day = true;
    }
    let renamed = holiday.clone().with_modification(OccurrenceModification {
        title: Some("Renamed".into()),
        ..OccurrenceModification::keyed(at("2024-01-08T00:00:00Z"))
    });

    for document in [holiday, renamed] {
        let service = CalendarService::new(
            MemoryStore::from_documents(Tz::UTC, vec![document]),
            AllowAll,
            CalendarSettings::default(),
        );
        let instances = service.query_events(&Identity::Guest, &EventQuery::new(day(2024, 1, 9)));

        let starts: Vec<_> = instances.iter().map(|i| i.start).collect();
        assert_eq!(starts, vec![at("2024-01-09T00:00:00Z")]);
        assert_eq!(instances[0].title, "Holiday");
    }
}

#[test_log::test]
fn test_until_bound_and_unknown_frequency() {
    let bounded = recurring("Team.Sprint.WebHome", "Sprint", "2024-01-01T10:00:00Z", None, "daily")
        .with_recurrence(RecurrenceInfo {
            frequency: "daily".into(),
            until: Some(at("2024-01-04T10:00:00Z")),
        });
    let unknown = recurring("Team.Odd.WebHome", "Odd", "2024-01-01T10:00:00Z", None, "lunar");

    let instances = query_january(vec![bounded, unknown]);

    assert_eq!(instances.len(), 4);
    assert!(instances.iter().all(|i| i.title == "Sprint"));
    assert_eq!(instances[0].end, at("2024-01-01T11:00:00Z"));
}
