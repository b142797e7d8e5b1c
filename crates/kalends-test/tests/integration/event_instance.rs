use kalends_test::service::ServiceError;

use super::helpers::{at, open_service, reference};

#[test_log::test]
fn test_base_instance_of_recurring_event() {
    let instance = open_service()
        .event_instance(&reference("Team.Standup.WebHome"), None)
        .expect("resolves");

    assert_eq!(instance.start, at("2024-01-01T09:00:00Z"));
    assert_eq!(instance.end, at("2024-01-01T10:00:00Z"));
    assert_eq!(instance.title, "Standup");
    assert_eq!(instance.background_color, "#0a0");
    assert!(instance.recurrent);
    assert_eq!(instance.original_start, None);
}

#[test_log::test]
fn test_modified_occurrence_resolves_with_rendered_title() {
    let instance = open_service()
        .event_instance(
            &reference("Team.Standup.WebHome"),
            Some(at("2024-01-15T09:00:00Z")),
        )
        .expect("resolves");

    assert_eq!(instance.title, "Standup (moved)");
    assert_eq!(instance.start, at("2024-01-16T14:00:00Z"));
    assert_eq!(instance.end, at("2024-01-16T15:00:00Z"));
    assert_eq!(instance.original_start, Some(at("2024-01-15T09:00:00Z")));
}

#[test_log::test]
fn test_plain_event_instance() {
    let instance = open_service()
        .event_instance(&reference("Misc.Lunch"), None)
        .expect("resolves");

    assert_eq!(instance.end, at("2024-01-05T13:00:00Z"));
    assert!(!instance.recurrent);
    assert_eq!(instance.background_color, "#888");
}

#[test_log::test]
fn test_missing_event_reports_not_found() {
    assert!(matches!(
        open_service().event_instance(&reference("Team.Retro.WebHome"), None),
        Err(ServiceError::DocumentNotFound(_))
    ));
    assert!(matches!(
        open_service().find_modification_index(
            &reference("Team.Retro.WebHome"),
            at("2024-01-15T09:00:00Z")
        ),
        Err(ServiceError::DocumentNotFound(_))
    ));
}

#[test_log::test]
fn test_calendar_page_is_not_an_event() {
    assert!(matches!(
        open_service().event_instance(&reference("Team.WebHome"), None),
        Err(ServiceError::DataInconsistency { .. })
    ));
}

#[test_log::test]
fn test_modification_index_and_template() {
    let service = open_service();
    let standup = reference("Team.Standup.WebHome");

    assert_eq!(
        service
            .find_modification_index(&standup, at("2024-01-15T09:00:00Z"))
            .expect("loads"),
        Some(0)
    );
    assert_eq!(
        service
            .find_modification_index(&standup, at("2024-01-08T09:00:00Z"))
            .expect("loads"),
        None
    );

    let template = service
        .modification_template(&standup, None)
        .expect("loads");
    assert_eq!(template.original_start, Some(at("2024-01-01T09:00:00Z")));
    assert_eq!(template.end, Some(at("2024-01-01T10:00:00Z")));
    assert_eq!(template.title.as_deref(), Some("Standup"));
}
