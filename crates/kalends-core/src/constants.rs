/// Name of the page that represents a space (a non-terminal page).
pub const DEFAULT_PAGE_NAME: &str = "WebHome";

/// Pages with these names hold templates and never count as real calendars or events.
pub const CALENDAR_TEMPLATE_PAGE: &str = "CalendarTemplate";
pub const EVENT_TEMPLATE_PAGE: &str = "EventTemplate";

/// Colors used when an event has no resolvable calendar.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#888";
pub const DEFAULT_TEXT_COLOR: &str = "";

/// Duration assumed for timed events stored without an end.
pub const DEFAULT_EVENT_DURATION_MINUTES: i64 = 60;

/// Upper bound on occurrences a single generator call may produce.
pub const DEFAULT_MAX_OCCURRENCES: u16 = 1000;

pub const DEFAULT_TIMEZONE: &str = "UTC";
