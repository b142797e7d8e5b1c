use std::sync::Arc;

use chrono_tz::Tz;
use kalends_test::core::types::{LocationFilter, SortOrder};
use kalends_test::fixtures::event;
use kalends_test::service::auth::{AllowAll, Identity};
use kalends_test::service::recurrence::{GeneratorRegistry, ReconciliationEngine};
use kalends_test::service::render::VerbatimRenderer;
use kalends_test::service::{CalendarService, CalendarSettings, EventQuery};
use kalends_test::store::MemoryStore;

use super::helpers::{at, day, open_service, reference, store, titles};

fn january() -> EventQuery {
    EventQuery::new(day(2024, 1, 1)).until(day(2024, 1, 22))
}

#[test_log::test]
fn test_query_merges_all_sources_in_start_order() {
    let instances = open_service().query_events(&Identity::Guest, &january());

    assert_eq!(
        titles(&instances),
        vec![
            "Standup",
            "Lunch",
            "Offsite",
            "Standup (moved)",
            "Countdown",
            "Countdown",
            "Countdown",
            "Countdown",
            "Standup",
            "Countdown",
        ]
    );
    assert!(instances.windows(2).all(|w| w[0].start <= w[1].start));
}

#[test_log::test]
fn test_templates_are_never_returned() {
    let instances = open_service().query_events(&Identity::Guest, &january());
    assert!(instances.iter().all(|i| i.title != "Template"));
}

#[test_log::test]
fn test_descending_query() {
    let query = january().with_order(SortOrder::Descending);
    let instances = open_service().query_events(&Identity::Guest, &query);

    assert_eq!(instances.len(), 10);
    assert_eq!(instances[0].start, at("2024-01-22T12:00:00Z"));
    assert_eq!(instances[1].start, at("2024-01-22T09:00:00Z"));
    assert_eq!(instances[9].start, at("2024-01-01T09:00:00Z"));
}

#[test_log::test]
fn test_calendar_filter() {
    let query = january().with_calendars(vec![reference("Marketing.WebHome")]);
    let instances = open_service().query_events(&Identity::Guest, &query);

    assert_eq!(instances.len(), 5);
    assert!(instances.iter().all(|i| i.title == "Countdown"));
    assert!(instances.iter().all(|i| i.background_color == "#a00"));
}

#[test_log::test]
fn test_space_filter() {
    let query = january().with_location(LocationFilter::Space(reference("Team.WebHome")));
    let instances = open_service().query_events(&Identity::Guest, &query);

    assert_eq!(
        titles(&instances),
        vec!["Standup", "Offsite", "Standup (moved)", "Standup"]
    );
}

#[test_log::test]
fn test_single_day_catches_multi_day_event() {
    let query = EventQuery::new(day(2024, 1, 11));
    let instances = open_service().query_events(&Identity::Guest, &query);

    assert_eq!(titles(&instances), vec!["Offsite"]);
    assert_eq!(instances[0].end, at("2024-01-11T18:00:00Z"));
}

#[test_log::test]
fn test_equal_starts_keep_their_relative_order() {
    let store = MemoryStore::from_documents(
        Tz::UTC,
        [
            event("Cal.A.WebHome", "A", "2024-01-03T10:00:00Z", None),
            event("Cal.B.WebHome", "B", "2024-01-03T10:00:00Z", None),
            event("Cal.C.WebHome", "C", "2024-01-02T10:00:00Z", None),
        ],
    );
    let service = CalendarService::new(store, AllowAll, CalendarSettings::default());

    let ascending = service.query_events(&Identity::Guest, &january());
    assert_eq!(titles(&ascending), vec!["C", "A", "B"]);

    let descending =
        service.query_events(&Identity::Guest, &january().with_order(SortOrder::Descending));
    assert_eq!(titles(&descending), vec!["A", "B", "C"]);
}

#[test_log::test]
fn test_custom_engine_renders_verbatim() {
    let settings = CalendarSettings::default();
    let engine = ReconciliationEngine::new(
        GeneratorRegistry::with_defaults(settings.max_occurrences, settings.end_policy),
        settings.end_policy,
        Arc::new(VerbatimRenderer),
    );
    let service = CalendarService::with_engine(store(), AllowAll, settings, engine);

    let query = january().with_calendars(vec![reference("Team.WebHome")]);
    let instances = service.query_events(&Identity::Guest, &query);

    assert_eq!(
        titles(&instances),
        vec!["Standup", "Offsite", "Standup (**moved**)", "Standup"]
    );
}
