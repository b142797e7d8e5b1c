//! Join of modification and deletion records by original start.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use kalends_store::model::{Document, OccurrenceDeletion, OccurrenceModification};

/// Modification and deletion records of one event, keyed by original start.
///
/// Records without a key are skipped. For duplicate modification keys the
/// last record wins.
#[derive(Debug, Clone, Default)]
pub struct OverrideIndex<'a> {
    deleted: HashSet<DateTime<Utc>>,
    modified: HashMap<DateTime<Utc>, &'a OccurrenceModification>,
}

impl<'a> OverrideIndex<'a> {
    #[must_use]
    pub fn build(
        modifications: &'a [OccurrenceModification],
        deletions: &[OccurrenceDeletion],
    ) -> Self {
        let deleted: HashSet<_> = deletions
            .iter()
            .filter_map(|deletion| deletion.original_start)
            .collect();

        let mut modified = HashMap::with_capacity(modifications.len());
        for modification in modifications {
            let Some(key) = modification.original_start else {
                tracing::trace!("Skipping modification without original start");
                continue;
            };
            if modified.insert(key, modification).is_some() {
                tracing::debug!(
                    original_start = %key,
                    "Duplicate modification key, keeping the last one"
                );
            }
        }

        Self { deleted, modified }
    }

    /// Builds the index from the records attached to `document`.
    #[must_use]
    pub fn of(document: &'a Document) -> Self {
        Self::build(&document.modifications, &document.deletions)
    }

    #[must_use]
    pub fn is_deleted(&self, original_start: &DateTime<Utc>) -> bool {
        self.deleted.contains(original_start)
    }

    #[must_use]
    pub fn modification(
        &self,
        original_start: &DateTime<Utc>,
    ) -> Option<&'a OccurrenceModification> {
        self.modified.get(original_start).copied()
    }

    /// Hands out a mutable copy of the modification map for consumption.
    #[must_use]
    pub fn pending(&self) -> HashMap<DateTime<Utc>, &'a OccurrenceModification> {
        self.modified.clone()
    }

    #[must_use]
    pub fn deleted_count(&self) -> usize {
        self.deleted.len()
    }

    #[must_use]
    pub fn modified_count(&self) -> usize {
        self.modified.len()
    }
}

/// ## Summary
/// Returns the position of the first modification of `document` keyed at
/// `original_start`.
#[must_use]
pub fn modification_index(document: &Document, original_start: DateTime<Utc>) -> Option<usize> {
    document
        .modifications
        .iter()
        .position(|modification| modification.original_start == Some(original_start))
}
