//! Occurrence generators keyed by recurrence frequency tag.

use std::collections::HashMap;
use std::fmt;

use chrono::{TimeDelta, Utc};
use kalends_core::util::date::{DateRange, EndDatePolicy, saturating_add};
use kalends_store::model::{EventData, RecurrenceInfo};
use rrule::{RRule, Tz as RRuleTz, Unvalidated};

use super::occurrence::RawOccurrence;
use crate::error::{ServiceError, ServiceResult};

pub const DAILY: &str = "daily";
pub const WEEKLY: &str = "weekly";
pub const MONTHLY: &str = "monthly";
pub const YEARLY: &str = "yearly";
pub const WORKDAYS: &str = "workdays";

/// Produces the raw occurrences of a recurring event.
pub trait OccurrenceGenerator: Send + Sync {
    /// ## Summary
    /// Returns the occurrences of `event` that overlap `range`, in chronological order.
    ///
    /// ## Errors
    /// Returns `RecurrenceError` if the schedule cannot be built.
    fn generate(
        &self,
        event: &EventData,
        recurrence: &RecurrenceInfo,
        range: &DateRange,
    ) -> ServiceResult<Vec<RawOccurrence>>;
}

/// Generator driven by an RFC 5545 RRULE body such as `FREQ=WEEKLY`.
///
/// Every occurrence keeps the base duration of the event.
#[derive(Debug, Clone)]
pub struct RRuleGenerator {
    rule: String,
    max_occurrences: u16,
    end_policy: EndDatePolicy,
}

impl RRuleGenerator {
    #[must_use]
    pub fn new(rule: impl Into<String>, max_occurrences: u16, end_policy: EndDatePolicy) -> Self {
        Self {
            rule: rule.into(),
            max_occurrences,
            end_policy,
        }
    }

    fn rule_text(&self, recurrence: &RecurrenceInfo) -> String {
        match recurrence.until {
            Some(until) => format!("{};UNTIL={}", self.rule, until.format("%Y%m%dT%H%M%SZ")),
            None => self.rule.clone(),
        }
    }
}

impl OccurrenceGenerator for RRuleGenerator {
    fn generate(
        &self,
        event: &EventData,
        recurrence: &RecurrenceInfo,
        range: &DateRange,
    ) -> ServiceResult<Vec<RawOccurrence>> {
        if recurrence.until.is_some_and(|until| until < event.start) {
            tracing::trace!("Recurrence ends before it starts");
            return Ok(Vec::new());
        }

        let base_end = self
            .end_policy
            .infer_end(event.start, event.end, event.all_day);
        let duration = (base_end - event.start).max(TimeDelta::zero());

        let rule_text = self.rule_text(recurrence);
        let rrule = rule_text
            .parse::<RRule<Unvalidated>>()
            .map_err(|err| ServiceError::RecurrenceError(err.to_string()))?;
        let rrule_set = rrule
            .build(event.start.with_timezone(&RRuleTz::UTC))
            .map_err(|err| ServiceError::RecurrenceError(err.to_string()))?;

        // Widened by the duration so occurrences still running at `from` are found.
        let after = saturating_add(range.from, -duration - TimeDelta::seconds(1));
        let before = saturating_add(range.to, TimeDelta::seconds(1));
        let result = rrule_set
            .after(after.with_timezone(&RRuleTz::UTC))
            .before(before.with_timezone(&RRuleTz::UTC))
            .all(self.max_occurrences);

        if result.limited {
            tracing::warn!(
                rule = %rule_text,
                limit = self.max_occurrences,
                "Occurrence limit reached, later occurrences are omitted"
            );
        }

        Ok(result
            .dates
            .into_iter()
            .map(|date| date.with_timezone(&Utc))
            .map(|start| RawOccurrence::new(start, Some(saturating_add(start, duration))))
            // Stored (inclusive) end, as for one-off events and modified occurrences.
            .filter(|occurrence| {
                range.touches(occurrence.start, occurrence.end.unwrap_or(occurrence.start))
            })
            .collect())
    }
}

/// Lookup table from frequency tag to generator, populated at start-up.
#[derive(Default)]
pub struct GeneratorRegistry {
    generators: HashMap<String, Box<dyn OccurrenceGenerator>>,
}

impl GeneratorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ## Summary
    /// Creates a registry with the bundled `daily`, `weekly`, `monthly`,
    /// `yearly` and `workdays` generators.
    #[must_use]
    pub fn with_defaults(max_occurrences: u16, end_policy: EndDatePolicy) -> Self {
        let mut registry = Self::new();
        for (tag, rule) in [
            (DAILY, "FREQ=DAILY"),
            (WEEKLY, "FREQ=WEEKLY"),
            (MONTHLY, "FREQ=MONTHLY"),
            (YEARLY, "FREQ=YEARLY"),
            (WORKDAYS, "FREQ=WEEKLY;BYDAY=MO,TU,WE,TH,FR"),
        ] {
            registry.register(tag, RRuleGenerator::new(rule, max_occurrences, end_policy));
        }
        registry
    }

    /// Registers `generator` under `tag`, replacing any previous one.
    pub fn register(
        &mut self,
        tag: impl Into<String>,
        generator: impl OccurrenceGenerator + 'static,
    ) {
        self.generators.insert(tag.into(), Box::new(generator));
    }

    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&dyn OccurrenceGenerator> {
        self.generators.get(tag).map(AsRef::as_ref)
    }

    /// Returns the registered tags in sorted order.
    #[must_use]
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.generators.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}

impl fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}
