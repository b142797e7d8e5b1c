use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use kalends_core::util::date::{DateRange, EndDatePolicy};
use kalends_store::model::{Document, EventData};

use super::generator::GeneratorRegistry;
use super::modification::create_modified_instance;
use super::occurrence::Occurrence;
use super::override_index::OverrideIndex;
use crate::calendar::instance::{Decoration, EventInstance};
use crate::error::{ServiceError, ServiceResult};
use crate::render::Renderer;

/// Counters describing how one recurring event was expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionReport {
    /// Raw occurrences produced by the generator.
    pub generated: usize,
    /// Occurrences suppressed by a deletion.
    pub deleted: usize,
    /// Occurrences replaced by a modification.
    pub modified: usize,
    /// Modifications rejected by the range test; their occurrence is kept as scheduled.
    pub out_of_range: usize,
    /// Original starts of modifications whose occurrence was not generated.
    pub orphaned: Vec<DateTime<Utc>>,
    /// Orphans keyed inside the window, i.e. the schedule no longer yields them.
    pub orphaned_in_window: usize,
}

impl ExpansionReport {
    /// Modifications that did not make it into the output.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.orphaned.len() + self.out_of_range
    }
}

/// Instances of one recurring event plus the diagnostics of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub instances: Vec<EventInstance>,
    pub report: ExpansionReport,
}

/// Merges generated occurrences with the modification and deletion records
/// of an event.
///
/// Expansion is pure with respect to its inputs: calling it twice with the
/// same document and range yields the same instances in the same order.
pub struct ReconciliationEngine {
    generators: GeneratorRegistry,
    end_policy: EndDatePolicy,
    renderer: Arc<dyn Renderer>,
}

impl ReconciliationEngine {
    #[must_use]
    pub fn new(
        generators: GeneratorRegistry,
        end_policy: EndDatePolicy,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            generators,
            end_policy,
            renderer,
        }
    }

    #[must_use]
    pub const fn generators(&self) -> &GeneratorRegistry {
        &self.generators
    }

    #[must_use]
    pub const fn end_policy(&self) -> &EndDatePolicy {
        &self.end_policy
    }

    #[must_use]
    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }

    /// ## Summary
    /// Builds the instance at the base dates of an event; the only instance
    /// of a non-recurring one.
    #[must_use]
    pub fn single(&self, event: &EventData, decoration: &Decoration) -> EventInstance {
        let end = self.end_policy.infer_end(event.start, event.end, event.all_day);
        decoration.apply(event, Occurrence::scheduled(event.start, end), event.recurrent)
    }

    /// ## Summary
    /// Expands a recurring event into its instances overlapping `range`.
    ///
    /// Deleted occurrences are dropped, modified ones are replaced by their
    /// effective occurrence, every other occurrence is kept as scheduled.
    /// Modifications whose occurrence was not generated are reported but
    /// never surfaced.
    ///
    /// ## Errors
    /// - `DataInconsistency` if the document has no event record
    /// - `MissingRecurrenceInfo` if it has no recurrence record
    /// - `UnknownGenerator` if no generator is registered for its frequency
    /// - `RecurrenceError` if the generator fails
    pub fn expand(
        &self,
        document: &Document,
        decoration: &Decoration,
        range: &DateRange,
    ) -> ServiceResult<Expansion> {
        let reference = &document.reference;
        let event = document
            .event
            .as_ref()
            .ok_or_else(|| ServiceError::DataInconsistency {
                reference: reference.clone(),
                expected: "event data",
            })?;
        let recurrence = document
            .recurrence
            .as_ref()
            .ok_or_else(|| ServiceError::MissingRecurrenceInfo(reference.clone()))?;
        let generator = self.generators.get(&recurrence.frequency).ok_or_else(|| {
            ServiceError::UnknownGenerator {
                frequency: recurrence.frequency.clone(),
                reference: reference.clone(),
            }
        })?;

        let raw = generator.generate(event, recurrence, range)?;
        let index = OverrideIndex::of(document);
        let mut pending = index.pending();

        let mut report = ExpansionReport {
            generated: raw.len(),
            ..ExpansionReport::default()
        };
        let mut instances = Vec::with_capacity(raw.len());

        for occurrence in raw {
            let key = occurrence.start;

            if index.is_deleted(&key) {
                tracing::trace!(original_start = %key, "Occurrence deleted");
                report.deleted += 1;
                continue;
            }

            if let Some(modification) = pending.remove(&key) {
                match create_modified_instance(
                    event,
                    modification,
                    key,
                    Some(range),
                    &self.end_policy,
                    self.renderer(),
                ) {
                    Some(modified) => {
                        report.modified += 1;
                        instances.push(decoration.apply(event, modified, true));
                        continue;
                    }
                    None => {
                        tracing::trace!(
                            original_start = %key,
                            "Modification out of range, keeping scheduled occurrence"
                        );
                        report.out_of_range += 1;
                    }
                }
            }

            let end = occurrence
                .end
                .unwrap_or_else(|| self.end_policy.guess_end(key, event.all_day));
            instances.push(decoration.apply(event, Occurrence::scheduled(key, end), true));
        }

        let mut orphaned: Vec<DateTime<Utc>> = pending
            .into_keys()
            .filter(|key| !index.is_deleted(key))
            .collect();
        orphaned.sort_unstable();
        report.orphaned_in_window = orphaned
            .iter()
            .filter(|key| range.touches(**key, **key))
            .count();
        report.orphaned = orphaned;

        log_report(document, &report);

        Ok(Expansion { instances, report })
    }
}

fn log_report(document: &Document, report: &ExpansionReport) {
    tracing::debug!(
        reference = %document.reference,
        generated = report.generated,
        deleted = report.deleted,
        modified = report.modified,
        "Expanded recurring event"
    );

    if report.dropped() > 0 {
        tracing::info!(
            reference = %document.reference,
            dropped = report.dropped(),
            "Dropped modifications"
        );
        tracing::debug!(
            orphaned = ?report.orphaned,
            orphaned_in_window = report.orphaned_in_window,
            out_of_range = report.out_of_range,
            "Dropped modification details"
        );
    }
}

impl fmt::Debug for ReconciliationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReconciliationEngine")
            .field("generators", &self.generators)
            .field("end_policy", &self.end_policy)
            .finish_non_exhaustive()
    }
}
