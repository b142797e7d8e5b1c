use chrono::{DateTime, TimeDelta, Utc};
use kalends_core::util::date::{DateRange, EndDatePolicy, saturating_add};
use kalends_store::model::{EventData, OccurrenceModification};

use super::occurrence::Occurrence;
use crate::render::Renderer;

/// Duration of the base event, never negative.
pub(crate) fn base_duration(event: &EventData, policy: &EndDatePolicy) -> TimeDelta {
    let end = policy.infer_end(event.start, event.end, event.all_day);
    (end - event.start).max(TimeDelta::zero())
}

/// ## Summary
/// Computes the effective occurrence described by `modification` for the
/// occurrence originally scheduled at `original_start`.
///
/// A changed start without an explicit end gets a freshly inferred end
/// instead of keeping the base duration.
///
/// When `range` is given, the occurrence is rejected only if both its
/// original and its actual position end before the range or both start
/// after it.
#[must_use]
pub fn create_modified_instance(
    event: &EventData,
    modification: &OccurrenceModification,
    original_start: DateTime<Utc>,
    range: Option<&DateRange>,
    policy: &EndDatePolicy,
    renderer: &dyn Renderer,
) -> Option<Occurrence> {
    let original_end = saturating_add(original_start, base_duration(event, policy));
    let start = modification.start.unwrap_or(original_start);
    let end = match modification.end {
        Some(end) => end,
        None if start == original_start => original_end,
        None => policy.guess_end(start, event.all_day),
    };

    if let Some(range) = range {
        let ends_before = end < range.from && original_end < range.from;
        let starts_after = start > range.to && original_start > range.to;
        if ends_before || starts_after {
            tracing::trace!(
                original_start = %original_start,
                start = %start,
                end = %end,
                "Modified occurrence outside of range"
            );
            return None;
        }
    }

    let render = |text: Option<&str>| {
        text.filter(|text| !text.trim().is_empty())
            .map(|text| renderer.render(text))
    };

    Some(Occurrence {
        start,
        end,
        original_start: Some(original_start),
        title: render(modification.title.as_deref()),
        description: render(modification.description.as_deref()),
    })
}

/// ## Summary
/// Builds an unsaved modification prefilled from the base event, used to
/// populate an occurrence edit form.
///
/// The start is `original_start` when given, the base start otherwise. The
/// end keeps the base duration.
#[must_use]
pub fn modification_template(
    event: &EventData,
    title: &str,
    original_start: Option<DateTime<Utc>>,
    policy: &EndDatePolicy,
) -> OccurrenceModification {
    let start = original_start.unwrap_or(event.start);
    OccurrenceModification {
        original_start: Some(start),
        start: Some(start),
        end: Some(saturating_add(start, base_duration(event, policy))),
        title: Some(title.to_owned()),
        description: event.description.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::PlainTextRenderer;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s)
            .expect("valid timestamp")
            .with_timezone(&Utc)
    }

    fn weekly_event() -> EventData {
        EventData {
            start: at("2024-01-01T09:00:00Z"),
            end: Some(at("2024-01-01T10:00:00Z")),
            all_day: false,
            description: Some("Weekly sync".into()),
            recurrent: true,
        }
    }

    fn january() -> DateRange {
        DateRange::new(at("2024-01-01T00:00:00Z"), at("2024-01-22T23:59:59Z"))
    }

    fn modify(
        modification: &OccurrenceModification,
        range: Option<&DateRange>,
    ) -> Option<Occurrence> {
        create_modified_instance(
            &weekly_event(),
            modification,
            at("2024-01-15T09:00:00Z"),
            range,
            &EndDatePolicy::default(),
            &PlainTextRenderer,
        )
    }

    #[test_log::test]
    fn test_moved_start_reinfers_end() {
        let modification = OccurrenceModification {
            start: Some(at("2024-01-16T14:00:00Z")),
            ..OccurrenceModification::keyed(at("2024-01-15T09:00:00Z"))
        };

        let occurrence = modify(&modification, Some(&january())).expect("in range");
        assert_eq!(occurrence.start, at("2024-01-16T14:00:00Z"));
        assert_eq!(occurrence.end, at("2024-01-16T15:00:00Z"));
        assert_eq!(occurrence.original_start, Some(at("2024-01-15T09:00:00Z")));
    }

    #[test]
    fn test_unchanged_start_keeps_base_duration() {
        let event = EventData {
            end: Some(at("2024-01-01T12:30:00Z")),
            ..weekly_event()
        };
        let modification = OccurrenceModification {
            title: Some("Retro".into()),
            ..OccurrenceModification::keyed(at("2024-01-15T09:00:00Z"))
        };

        let occurrence = create_modified_instance(
            &event,
            &modification,
            at("2024-01-15T09:00:00Z"),
            None,
            &EndDatePolicy::default(),
            &PlainTextRenderer,
        )
        .expect("no range check");
        assert_eq!(occurrence.start, at("2024-01-15T09:00:00Z"));
        assert_eq!(occurrence.end, at("2024-01-15T12:30:00Z"));
        assert_eq!(occurrence.title.as_deref(), Some("Retro"));
        assert_eq!(occurrence.description, None);
    }

    #[test]
    fn test_explicit_end_wins() {
        let modification = OccurrenceModification {
            start: Some(at("2024-01-16T14:00:00Z")),
            end: Some(at("2024-01-16T18:00:00Z")),
            ..OccurrenceModification::keyed(at("2024-01-15T09:00:00Z"))
        };

        let occurrence = modify(&modification, None).expect("no range check");
        assert_eq!(occurrence.end, at("2024-01-16T18:00:00Z"));
    }

    #[test]
    fn test_moved_into_range_stays_visible() {
        // Original position is outside, the moved one is inside.
        let modification = OccurrenceModification {
            start: Some(at("2024-01-10T09:00:00Z")),
            ..OccurrenceModification::keyed(at("2024-01-15T09:00:00Z"))
        };
        let range = DateRange::new(at("2024-01-10T00:00:00Z"), at("2024-01-10T23:59:59Z"));

        assert!(modify(&modification, Some(&range)).is_some());
    }

    #[test]
    fn test_moved_out_of_range_stays_visible_at_original_position() {
        let modification = OccurrenceModification {
            start: Some(at("2024-03-01T09:00:00Z")),
            ..OccurrenceModification::keyed(at("2024-01-15T09:00:00Z"))
        };

        assert!(modify(&modification, Some(&january())).is_some());
    }

    #[test]
    fn test_both_positions_outside_is_rejected() {
        let modification = OccurrenceModification {
            start: Some(at("2024-03-01T09:00:00Z")),
            ..OccurrenceModification::keyed(at("2024-01-15T09:00:00Z"))
        };
        let range = DateRange::new(at("2024-01-01T00:00:00Z"), at("2024-01-10T23:59:59Z"));

        assert!(modify(&modification, Some(&range)).is_none());
    }

    #[test]
    fn test_blank_overrides_fall_back() {
        let modification = OccurrenceModification {
            title: Some("   ".into()),
            description: Some("**Moved** to room 2".into()),
            ..OccurrenceModification::keyed(at("2024-01-15T09:00:00Z"))
        };

        let occurrence = modify(&modification, None).expect("no range check");
        assert_eq!(occurrence.title, None);
        assert_eq!(occurrence.description.as_deref(), Some("Moved to room 2"));
    }

    #[test]
    fn test_template_prefills_from_event() {
        let event = weekly_event();
        let template = modification_template(
            &event,
            "Sync",
            Some(at("2024-01-08T09:00:00Z")),
            &EndDatePolicy::default(),
        );
        assert_eq!(template.original_start, Some(at("2024-01-08T09:00:00Z")));
        assert_eq!(template.end, Some(at("2024-01-08T10:00:00Z")));
        assert_eq!(template.title.as_deref(), Some("Sync"));
        assert_eq!(template.description.as_deref(), Some("Weekly sync"));

        let base = modification_template(&event, "Sync", None, &EndDatePolicy::default());
        assert_eq!(base.start, Some(event.start));
    }

    #[test]
    fn test_occurrence_at_the_last_instant_saturates() {
        let last = DateTime::<Utc>::MAX_UTC;
        let modification = OccurrenceModification {
            title: Some("Finale".into()),
            ..OccurrenceModification::keyed(last)
        };

        let occurrence = create_modified_instance(
            &weekly_event(),
            &modification,
            last,
            Some(&january()),
            &EndDatePolicy::default(),
            &PlainTextRenderer,
        );
        assert!(occurrence.is_none());

        let template =
            modification_template(&weekly_event(), "Finale", Some(last), &EndDatePolicy::default());
        assert_eq!(template.end, Some(last));
    }
}
