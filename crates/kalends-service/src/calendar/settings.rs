use chrono_tz::Tz;
use kalends_core::config::CalendarConfig;
use kalends_core::constants::{
    DEFAULT_BACKGROUND_COLOR, DEFAULT_MAX_OCCURRENCES, DEFAULT_PAGE_NAME, DEFAULT_TEXT_COLOR,
};
use kalends_core::error::CoreResult;
use kalends_core::util::date::EndDatePolicy;

/// Calendar behaviour resolved from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarSettings {
    /// Name of the page representing a space, e.g. `WebHome`.
    pub default_page_name: String,
    /// Colors used when an event has no calendar or its calendar sets none.
    pub default_background_color: String,
    pub default_text_color: String,
    /// Timezone the date-part search predicate and query days are evaluated in.
    pub timezone: Tz,
    pub end_policy: EndDatePolicy,
    /// Upper bound of occurrences per generator call.
    pub max_occurrences: u16,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            default_page_name: DEFAULT_PAGE_NAME.to_string(),
            default_background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            default_text_color: DEFAULT_TEXT_COLOR.to_string(),
            timezone: Tz::UTC,
            end_policy: EndDatePolicy::default(),
            max_occurrences: DEFAULT_MAX_OCCURRENCES,
        }
    }
}

impl CalendarSettings {
    /// ## Summary
    /// Resolves the calendar section of the configuration.
    ///
    /// ## Errors
    /// Returns `UnknownTimezone` or `ConfigError` for invalid values.
    pub fn from_config(config: &CalendarConfig) -> CoreResult<Self> {
        Ok(Self {
            default_page_name: config.default_page_name.clone(),
            default_background_color: config.default_background_color.clone(),
            default_text_color: config.default_text_color.clone(),
            timezone: config.timezone()?,
            end_policy: config.end_date_policy()?,
            max_occurrences: config.max_occurrences,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_default_config() {
        let settings =
            CalendarSettings::from_config(&CalendarConfig::default()).expect("valid defaults");
        assert_eq!(settings, CalendarSettings::default());
    }

    #[test]
    fn test_invalid_timezone_is_rejected() {
        let config = CalendarConfig {
            timezone: "Mars/Olympus_Mons".into(),
            ..CalendarConfig::default()
        };
        assert!(CalendarSettings::from_config(&config).is_err());
    }
}
