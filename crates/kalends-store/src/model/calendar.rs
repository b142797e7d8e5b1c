use serde::{Deserialize, Serialize};

/// Display settings attached to a calendar page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalendarData {
    /// Background color of events in this calendar.
    #[serde(default)]
    pub color: String,
    /// Text color; may be empty.
    #[serde(default)]
    pub text_color: String,
}
