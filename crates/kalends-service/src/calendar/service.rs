use std::sync::Arc;

use chrono::{DateTime, Utc};
use kalends_core::types::DocumentReference;
use kalends_core::util::date::{DateRange, saturating_add};
use kalends_store::EventStore;
use kalends_store::model::{Document, EventData, OccurrenceModification};
use kalends_store::query::EventSearch;

use super::instance::{Decoration, EventInstance, sort_instances};
use super::query::EventQuery;
use super::settings::CalendarSettings;
use crate::auth::{AccessFilter, Identity};
use crate::error::{ServiceError, ServiceResult};
use crate::recurrence::modification::base_duration;
use crate::recurrence::{
    Expansion, GeneratorRegistry, Occurrence, OverrideIndex, ReconciliationEngine,
    create_modified_instance, modification_index, modification_template,
};
use crate::render::PlainTextRenderer;

/// Entry point for calendar queries.
///
/// Runs the store searches, filters definitions by access rights, expands
/// recurring events and merges everything into one sorted list. A failure
/// while processing one definition is logged and that definition is skipped.
pub struct CalendarService<S, A> {
    store: S,
    access: A,
    engine: ReconciliationEngine,
    settings: CalendarSettings,
}

impl<S: EventStore, A: AccessFilter> CalendarService<S, A> {
    /// Creates a service with the bundled generators and plain text rendering.
    #[must_use]
    pub fn new(store: S, access: A, settings: CalendarSettings) -> Self {
        let generators =
            GeneratorRegistry::with_defaults(settings.max_occurrences, settings.end_policy);
        let engine = ReconciliationEngine::new(
            generators,
            settings.end_policy,
            Arc::new(PlainTextRenderer),
        );
        Self::with_engine(store, access, settings, engine)
    }

    #[must_use]
    pub const fn with_engine(
        store: S,
        access: A,
        settings: CalendarSettings,
        engine: ReconciliationEngine,
    ) -> Self {
        Self {
            store,
            access,
            engine,
            settings,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &CalendarSettings {
        &self.settings
    }

    #[must_use]
    pub const fn engine(&self) -> &ReconciliationEngine {
        &self.engine
    }

    /// ## Summary
    /// Returns the instances of every event `identity` may view that falls
    /// into the queried days, sorted by start.
    ///
    /// Never fails: definitions that cannot be processed are logged and
    /// skipped, and a failed search contributes no definitions.
    #[tracing::instrument(
        skip(self, query),
        fields(identity = %identity, from = %query.from, to = %query.last_day())
    )]
    pub fn query_events(&self, identity: &Identity, query: &EventQuery) -> Vec<EventInstance> {
        let range = query.range(self.settings.timezone);
        let mut instances = Vec::new();

        for reference in self.search(identity, &query.search(false)) {
            match self.plain_instance(&reference) {
                Ok(instance) => instances.push(instance),
                Err(err) => log_skipped(&reference, &err),
            }
        }

        for reference in self.search(identity, &query.search(true)) {
            match self.expand(&reference, &range) {
                Ok(expansion) => instances.extend(expansion.instances),
                Err(err) => log_skipped(&reference, &err),
            }
        }

        sort_instances(&mut instances, query.order);
        tracing::debug!(instance_count = instances.len(), "Query completed");
        instances
    }

    /// ## Summary
    /// Returns every calendar `identity` may view, ordered by title.
    #[tracing::instrument(skip(self))]
    pub fn all_calendars(&self, identity: &Identity) -> Vec<DocumentReference> {
        self.access.viewable(identity, self.calendars())
    }

    /// ## Summary
    /// Returns every calendar `identity` may edit, ordered by title.
    #[tracing::instrument(skip(self))]
    pub fn all_editable_calendars(&self, identity: &Identity) -> Vec<DocumentReference> {
        self.access.editable(identity, self.calendars())
    }

    /// ## Summary
    /// Resolves a single occurrence of an event for display or edit-form prefill.
    ///
    /// Without `original_start` the instance at the base dates is returned.
    /// With it, the modification keyed at that start is applied when one
    /// exists; otherwise the occurrence keeps the base duration. Deletions and
    /// the query window are not considered.
    ///
    /// ## Errors
    /// Returns `DocumentNotFound`, `DataInconsistency` if the document holds
    /// no event, or `StoreError` if loading fails.
    #[tracing::instrument(skip(self))]
    pub fn event_instance(
        &self,
        reference: &DocumentReference,
        original_start: Option<DateTime<Utc>>,
    ) -> ServiceResult<EventInstance> {
        let document = self.load(reference)?;
        let event = event_data(&document)?;
        let decoration = self.decorate(&document, event)?;

        let Some(original_start) = original_start else {
            return Ok(self.engine.single(event, &decoration));
        };

        let policy = self.engine.end_policy();
        let occurrence = match OverrideIndex::of(&document).modification(&original_start) {
            Some(modification) => create_modified_instance(
                event,
                modification,
                original_start,
                None,
                policy,
                self.engine.renderer(),
            )
            .ok_or(ServiceError::InvariantViolation(
                "modified instance rejected without a range",
            ))?,
            None => Occurrence::scheduled(
                original_start,
                saturating_add(original_start, base_duration(event, policy)),
            ),
        };

        Ok(decoration.apply(event, occurrence, event.recurrent))
    }

    /// ## Summary
    /// Returns the position of the modification record keyed at `original_start`.
    ///
    /// ## Errors
    /// Returns `DocumentNotFound` or `StoreError` if the document cannot be loaded.
    #[tracing::instrument(skip(self))]
    pub fn find_modification_index(
        &self,
        reference: &DocumentReference,
        original_start: DateTime<Utc>,
    ) -> ServiceResult<Option<usize>> {
        let document = self.load(reference)?;
        Ok(modification_index(&document, original_start))
    }

    /// ## Summary
    /// Builds an unsaved modification of the occurrence at `original_start`
    /// (or of the base dates), prefilled from the event.
    ///
    /// ## Errors
    /// Returns `DocumentNotFound`, `DataInconsistency` if the document holds
    /// no event, or `StoreError` if loading fails.
    #[tracing::instrument(skip(self))]
    pub fn modification_template(
        &self,
        reference: &DocumentReference,
        original_start: Option<DateTime<Utc>>,
    ) -> ServiceResult<OccurrenceModification> {
        let document = self.load(reference)?;
        let event = event_data(&document)?;
        Ok(modification_template(
            event,
            &document.title,
            original_start,
            self.engine.end_policy(),
        ))
    }

    fn search(&self, identity: &Identity, search: &EventSearch) -> Vec<DocumentReference> {
        tracing::debug!(search = ?search, "Searching event definitions");
        match self.store.search_events(search) {
            Ok(references) => {
                let found = references.len();
                let visible = self.access.viewable(identity, references);
                tracing::debug!(
                    recurrent = search.recurrent,
                    found,
                    visible = visible.len(),
                    "Event definitions found"
                );
                visible
            }
            Err(err) => {
                tracing::error!(recurrent = search.recurrent, error = %err, "Event search failed");
                Vec::new()
            }
        }
    }

    fn calendars(&self) -> Vec<DocumentReference> {
        self.store.search_calendars().unwrap_or_else(|err| {
            tracing::error!(error = %err, "Calendar search failed");
            Vec::new()
        })
    }

    fn load(&self, reference: &DocumentReference) -> ServiceResult<Document> {
        self.store
            .load(reference)?
            .ok_or_else(|| ServiceError::DocumentNotFound(reference.clone()))
    }

    fn plain_instance(&self, reference: &DocumentReference) -> ServiceResult<EventInstance> {
        let document = self.load(reference)?;
        let event = event_data(&document)?;
        let decoration = self.decorate(&document, event)?;
        Ok(self.engine.single(event, &decoration))
    }

    fn expand(&self, reference: &DocumentReference, range: &DateRange) -> ServiceResult<Expansion> {
        let document = self.load(reference)?;
        let event = event_data(&document)?;
        let decoration = self.decorate(&document, event)?;
        self.engine.expand(&document, &decoration, range)
    }

    /// Resolves the metadata shared by every instance of `document`.
    fn decorate(&self, document: &Document, event: &EventData) -> ServiceResult<Decoration> {
        let renderer = self.engine.renderer();
        let (background_color, text_color) = self.calendar_colors(&document.reference)?;

        Ok(Decoration {
            reference: document.reference.clone(),
            title: renderer.render(&self.raw_title(document)),
            description: event
                .description
                .as_deref()
                .filter(|description| !description.trim().is_empty())
                .map(|description| renderer.render(description)),
            background_color,
            text_color,
        })
    }

    /// The stored title, or the page name when it is blank.
    ///
    /// For a default page the name of its space stands in for the page name.
    fn raw_title(&self, document: &Document) -> String {
        if !document.title.trim().is_empty() {
            return document.title.clone();
        }
        let reference = &document.reference;
        reference
            .spaces
            .last()
            .filter(|_| reference.is_default_page(&self.settings.default_page_name))
            .unwrap_or(&reference.name)
            .clone()
    }

    /// Colors of the calendar `reference` belongs to, or the configured defaults.
    fn calendar_colors(&self, reference: &DocumentReference) -> ServiceResult<(String, String)> {
        let defaults = || {
            (
                self.settings.default_background_color.clone(),
                self.settings.default_text_color.clone(),
            )
        };

        let Some(calendar_reference) =
            reference.calendar_reference(&self.settings.default_page_name)
        else {
            return Ok(defaults());
        };

        let calendar = self
            .store
            .load(&calendar_reference)?
            .and_then(|document| document.calendar);
        Ok(match calendar {
            Some(calendar) => {
                let background = if calendar.color.trim().is_empty() {
                    self.settings.default_background_color.clone()
                } else {
                    calendar.color
                };
                (background, calendar.text_color)
            }
            None => {
                tracing::trace!(
                    calendar = %calendar_reference,
                    "No calendar data, using default colors"
                );
                defaults()
            }
        })
    }
}

fn event_data(document: &Document) -> ServiceResult<&EventData> {
    document
        .event
        .as_ref()
        .ok_or_else(|| ServiceError::DataInconsistency {
            reference: document.reference.clone(),
            expected: "event data",
        })
}

/// Logs a definition skipped during a query at the level its error warrants.
fn log_skipped(reference: &DocumentReference, err: &ServiceError) {
    match err {
        ServiceError::StoreError(_) => {
            tracing::error!(
                reference = %reference,
                error = %err,
                "Store error, skipping definition"
            );
        }
        ServiceError::DataInconsistency { .. } | ServiceError::DocumentNotFound(_) => {
            tracing::error!(
                reference = %reference,
                error = %err,
                "Inconsistent data, skipping definition"
            );
        }
        ServiceError::UnknownGenerator { .. } => {
            tracing::warn!(reference = %reference, error = %err, "Skipping definition");
        }
        ServiceError::MissingRecurrenceInfo(_) => {
            tracing::info!(
                reference = %reference,
                "Recurrent event has no recurrence information, skipping"
            );
        }
        _ => {
            tracing::warn!(
                reference = %reference,
                error = %err,
                "Failed to process definition, skipping"
            );
        }
    }
}
