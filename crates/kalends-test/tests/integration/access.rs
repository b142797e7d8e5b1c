use kalends_test::service::auth::Identity;
use kalends_test::service::EventQuery;

use super::helpers::{day, guarded_service, reference, titles};

fn january() -> EventQuery {
    EventQuery::new(day(2024, 1, 1)).until(day(2024, 1, 22))
}

#[test_log::test(tokio::test)]
async fn test_owner_sees_own_space_and_public_events() {
    let service = guarded_service().await;

    let instances = service.query_events(&Identity::user("alice"), &january());

    assert_eq!(
        titles(&instances),
        vec!["Standup", "Lunch", "Offsite", "Standup (moved)", "Standup"]
    );
}

#[test_log::test(tokio::test)]
async fn test_group_membership_grants_view() {
    let service = guarded_service().await;
    let carol = Identity::user("carol").with_groups(["marketing"]);

    let instances = service.query_events(&carol, &january());

    assert_eq!(instances.len(), 6);
    assert_eq!(instances[0].title, "Lunch");
    assert!(instances[1..].iter().all(|i| i.title == "Countdown"));
}

#[test_log::test(tokio::test)]
async fn test_guest_sees_public_events_only() {
    let service = guarded_service().await;

    let instances = service.query_events(&Identity::Guest, &january());

    assert_eq!(titles(&instances), vec!["Lunch"]);
}

#[test_log::test(tokio::test)]
async fn test_calendar_listings_follow_rights() {
    let service = guarded_service().await;
    let alice = Identity::user("alice");
    let carol = Identity::user("carol").with_groups(["marketing"]);
    let mallory = Identity::user("mallory");

    assert_eq!(service.all_calendars(&alice), vec![reference("Team.WebHome")]);
    assert_eq!(
        service.all_editable_calendars(&alice),
        vec![reference("Team.WebHome")]
    );

    assert_eq!(
        service.all_calendars(&carol),
        vec![reference("Marketing.WebHome")]
    );
    assert!(service.all_editable_calendars(&carol).is_empty());

    assert_eq!(
        service.all_editable_calendars(&mallory),
        vec![reference("Marketing.WebHome")]
    );

    assert!(service.all_calendars(&Identity::Guest).is_empty());
}
