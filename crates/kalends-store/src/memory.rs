//! In-memory `EventStore` backed by a map of documents.
//!
//! Used by the binary (loaded from a JSON fixture) and by tests.

use std::collections::BTreeMap;
use std::path::Path;

use chrono_tz::Tz;
use kalends_core::constants::CALENDAR_TEMPLATE_PAGE;
use kalends_core::types::DocumentReference;
use serde::Deserialize;

use crate::error::StoreResult;
use crate::model::Document;
use crate::query::EventSearch;
use crate::store::EventStore;

/// On-disk fixture layout.
#[derive(Debug, Deserialize)]
struct Fixture {
    documents: Vec<Document>,
}

/// Store holding every document in memory, keyed by reference.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    documents: BTreeMap<DocumentReference, Document>,
    timezone: Tz,
}

impl MemoryStore {
    /// Creates an empty store deriving date parts in `timezone`.
    #[must_use]
    pub const fn new(timezone: Tz) -> Self {
        Self {
            documents: BTreeMap::new(),
            timezone,
        }
    }

    /// Creates a store holding `documents`. Later duplicates replace earlier ones.
    #[must_use]
    pub fn from_documents(timezone: Tz, documents: impl IntoIterator<Item = Document>) -> Self {
        let mut store = Self::new(timezone);
        for document in documents {
            store.insert(document);
        }
        store
    }

    /// ## Summary
    /// Parses a JSON fixture of the form `{"documents": [...]}`.
    ///
    /// ## Errors
    /// Returns `FixtureParse` if the JSON is malformed or does not describe documents.
    pub fn from_json_str(timezone: Tz, json: &str) -> StoreResult<Self> {
        let fixture: Fixture = serde_json::from_str(json)?;
        tracing::debug!(
            document_count = fixture.documents.len(),
            "Parsed store fixture"
        );
        Ok(Self::from_documents(timezone, fixture.documents))
    }

    /// ## Summary
    /// Reads and parses a JSON fixture file.
    ///
    /// ## Errors
    /// Returns `FixtureIo` if the file cannot be read, `FixtureParse` if it is malformed.
    pub fn from_fixture_file(timezone: Tz, path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "Loading store fixture");
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(timezone, &json)
    }

    /// Inserts or replaces a document, returning the previous one.
    pub fn insert(&mut self, document: Document) -> Option<Document> {
        self.documents.insert(document.reference.clone(), document)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl EventStore for MemoryStore {
    fn search_events(&self, search: &EventSearch) -> StoreResult<Vec<DocumentReference>> {
        tracing::trace!(search = ?search, "Searching events");

        let mut hits: Vec<&Document> = self
            .documents
            .values()
            .filter(|document| search.matches(document, self.timezone))
            .collect();

        if let Some(order) = search.order {
            hits.sort_by(|a, b| {
                let start = |document: &Document| document.event.as_ref().map(|event| event.start);
                order.apply(start(a).cmp(&start(b)))
            });
        }

        Ok(hits
            .into_iter()
            .map(|document| document.reference.clone())
            .collect())
    }

    fn search_calendars(&self) -> StoreResult<Vec<DocumentReference>> {
        let mut calendars: Vec<&Document> = self
            .documents
            .values()
            .filter(|document| {
                document.calendar.is_some() && document.reference.name != CALENDAR_TEMPLATE_PAGE
            })
            .collect();
        calendars.sort_by(|a, b| {
            a.title
                .cmp(&b.title)
                .then_with(|| a.reference.name.cmp(&b.reference.name))
        });
        Ok(calendars
            .into_iter()
            .map(|document| document.reference.clone())
            .collect())
    }

    fn load(&self, reference: &DocumentReference) -> StoreResult<Option<Document>> {
        Ok(self.documents.get(reference).cloned())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}
