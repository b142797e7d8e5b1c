//! Stores loaded from JSON fixtures.

use chrono_tz::Tz;
use kalends_test::service::auth::{AllowAll, Identity};
use kalends_test::service::{CalendarService, CalendarSettings, EventQuery};
use kalends_test::store::{MemoryStore, StoreError};

use super::helpers::{at, day, titles};

const FIXTURE: &str = r##"{
  "documents": [
    {
      "reference": "Home.WebHome",
      "title": "Home",
      "calendar": { "color": "#00f" }
    },
    {
      "reference": "Home.Bins.WebHome",
      "title": "Bins //out//",
      "event": {
        "start": "2024-03-04T07:00:00Z",
        "end": "2024-03-04T07:30:00Z",
        "recurrent": true
      },
      "recurrence": { "frequency": "weekly", "until": "2024-03-25T07:00:00Z" },
      "deletions": [{ "original_start": "2024-03-11T07:00:00Z" }],
      "modifications": [
        { "original_start": "2024-03-18T07:00:00Z", "start": "2024-03-19T07:00:00Z" },
        { "title": "unkeyed" }
      ]
    },
    {
      "reference": "Home.Dentist.WebHome",
      "title": "Dentist",
      "event": { "start": "2024-03-12T00:00:00Z", "all_day": true }
    }
  ]
}"##;

fn service(store: MemoryStore) -> CalendarService<MemoryStore, AllowAll> {
    CalendarService::new(store, AllowAll, CalendarSettings::default())
}

#[test_log::test]
fn test_fixture_round_trip_through_query() {
    let store = MemoryStore::from_json_str(Tz::UTC, FIXTURE).expect("valid fixture");
    assert_eq!(store.len(), 3);

    let query = EventQuery::new(day(2024, 3, 1)).until(day(2024, 3, 31));
    let instances = service(store).query_events(&Identity::Guest, &query);

    assert_eq!(
        titles(&instances),
        vec!["Bins out", "Dentist", "Bins out", "Bins out"]
    );
    assert_eq!(instances[0].background_color, "#00f");

    let dentist = &instances[1];
    assert!(dentist.all_day);
    assert_eq!(dentist.end, at("2024-03-12T00:00:00Z"));
    assert_eq!(dentist.end_exclusive, at("2024-03-13T00:00:00Z"));

    assert_eq!(instances[2].start, at("2024-03-19T07:00:00Z"));
    assert_eq!(instances[2].original_start, Some(at("2024-03-18T07:00:00Z")));
    assert_eq!(instances[3].start, at("2024-03-25T07:00:00Z"));
}

#[test_log::test]
fn test_fixture_file_is_read_from_disk() {
    let path = std::env::temp_dir().join(format!("kalends-fixture-{}.json", std::process::id()));
    std::fs::write(&path, FIXTURE).expect("writes fixture");

    let loaded = MemoryStore::from_fixture_file(Tz::UTC, &path);
    std::fs::remove_file(&path).expect("removes fixture");

    assert_eq!(loaded.expect("valid fixture").len(), 3);
}

#[test_log::test]
fn test_malformed_fixtures_are_rejected() {
    assert!(matches!(
        MemoryStore::from_json_str(Tz::UTC, r#"{"documents": [{"title": "no reference"}]}"#),
        Err(StoreError::FixtureParse(_))
    ));
    assert!(matches!(
        MemoryStore::from_fixture_file(Tz::UTC, "/nonexistent/kalends.json"),
        Err(StoreError::FixtureIo(_))
    ));
}
