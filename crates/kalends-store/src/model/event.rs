//! Event records as persisted in the content store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Core event record of an event document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventData {
    pub start: DateTime<Utc>,
    /// Stored end; inclusive for all-day events. Inferred when absent.
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub all_day: bool,
    /// Raw (unrendered) description.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub recurrent: bool,
}

/// Recurrence record of a recurring event document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceInfo {
    /// Tag selecting the occurrence generator (`daily`, `weekly`, ...).
    pub frequency: String,
    /// Last instant an occurrence may start at.
    #[serde(default)]
    pub until: Option<DateTime<Utc>>,
}

impl RecurrenceInfo {
    #[must_use]
    pub fn new(frequency: impl Into<String>) -> Self {
        Self {
            frequency: frequency.into(),
            until: None,
        }
    }
}

/// Override of a single occurrence, keyed by the occurrence's unmodified start.
///
/// Every override field is optional: `None` means "keep the scheduled value",
/// which differs from a present value that happens to equal it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OccurrenceModification {
    /// Join key. Records without one cannot be matched to an occurrence.
    #[serde(default)]
    pub original_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl OccurrenceModification {
    #[must_use]
    pub fn keyed(original_start: DateTime<Utc>) -> Self {
        Self {
            original_start: Some(original_start),
            ..Self::default()
        }
    }
}

/// Suppression of a single occurrence, keyed by the occurrence's unmodified start.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OccurrenceDeletion {
    #[serde(default)]
    pub original_start: Option<DateTime<Utc>>,
}

impl OccurrenceDeletion {
    #[must_use]
    pub const fn keyed(original_start: DateTime<Utc>) -> Self {
        Self {
            original_start: Some(original_start),
        }
    }
}
