//! Service construction for integration tests.

use std::sync::Arc;

use kalends_test::service::auth::{AllowAll, Authorizer, CasbinAccessFilter, init_casbin};
use kalends_test::service::{CalendarService, CalendarSettings, EventInstance};
use kalends_test::store::MemoryStore;

pub use kalends_test::fixtures::{POLICIES, at, day, reference, store};

/// Service over the fixture wiki without access restrictions.
pub fn open_service() -> CalendarService<MemoryStore, AllowAll> {
    CalendarService::new(store(), AllowAll, CalendarSettings::default())
}

/// Service over the fixture wiki guarded by `POLICIES`.
pub async fn guarded_service() -> CalendarService<MemoryStore, CasbinAccessFilter> {
    let enforcer = init_casbin(POLICIES)
        .await
        .expect("Failed to create enforcer");
    CalendarService::new(
        store(),
        CasbinAccessFilter::new(Authorizer::new(Arc::new(enforcer))),
        CalendarSettings::default(),
    )
}

/// Titles of `instances`, in order.
pub fn titles(instances: &[EventInstance]) -> Vec<&str> {
    instances.iter().map(|i| i.title.as_str()).collect()
}
