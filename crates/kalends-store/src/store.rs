use kalends_core::types::DocumentReference;

use crate::error::StoreResult;
use crate::model::Document;
use crate::query::EventSearch;

/// Read access to the content store holding event and calendar documents.
///
/// Calls are synchronous; callers that need retries or caching wrap the store.
pub trait EventStore {
    /// ## Summary
    /// Returns references of event documents matching `search`, in the order it requests.
    ///
    /// ## Errors
    /// Returns a `StoreError` if the search cannot be executed.
    fn search_events(&self, search: &EventSearch) -> StoreResult<Vec<DocumentReference>>;

    /// ## Summary
    /// Returns references of all calendar documents, ordered by title then page name.
    ///
    /// ## Errors
    /// Returns a `StoreError` if the search cannot be executed.
    fn search_calendars(&self) -> StoreResult<Vec<DocumentReference>>;

    /// ## Summary
    /// Loads a document with all of its attached records.
    ///
    /// Returns `Ok(None)` if no document exists at `reference`.
    ///
    /// ## Errors
    /// Returns a `StoreError` if the document cannot be read.
    fn load(&self, reference: &DocumentReference) -> StoreResult<Option<Document>>;
}

impl<S: EventStore + ?Sized> EventStore for &S {
    fn search_events(&self, search: &EventSearch) -> StoreResult<Vec<DocumentReference>> {
        (**self).search_events(search)
    }

    fn search_calendars(&self) -> StoreResult<Vec<DocumentReference>> {
        (**self).search_calendars()
    }

    fn load(&self, reference: &DocumentReference) -> StoreResult<Option<Document>> {
        (**self).load(reference)
    }
}
