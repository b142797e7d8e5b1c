use anyhow::Result;
use chrono::TimeDelta;
use chrono_tz::Tz;
use config::Config;
use serde::Deserialize;

use crate::constants::{
    DEFAULT_BACKGROUND_COLOR, DEFAULT_EVENT_DURATION_MINUTES, DEFAULT_MAX_OCCURRENCES,
    DEFAULT_PAGE_NAME, DEFAULT_TEXT_COLOR, DEFAULT_TIMEZONE,
};
use crate::error::{CoreError, CoreResult};
use crate::util::date::EndDatePolicy;


#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub access: AccessConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    pub default_page_name: String,
    pub default_background_color: String,
    pub default_text_color: String,
    pub default_duration_minutes: i64,
    pub timezone: String,
    pub max_occurrences: u16,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            default_page_name: DEFAULT_PAGE_NAME.to_string(),
            default_background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            default_text_color: DEFAULT_TEXT_COLOR.to_string(),
            default_duration_minutes: DEFAULT_EVENT_DURATION_MINUTES,
            timezone: DEFAULT_TIMEZONE.to_string(),
            max_occurrences: DEFAULT_MAX_OCCURRENCES,
        }
    }
}

impl CalendarConfig {
    /// ## Summary
    /// Resolves the configured IANA timezone name.
    ///
    /// ## Errors
    /// Returns `UnknownTimezone` if the name is not in the timezone database.
    pub fn timezone(&self) -> CoreResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_err| CoreError::UnknownTimezone(self.timezone.clone()))
    }

    /// ## Summary
    /// Returns the end-date policy for events stored without an end.
    ///
    /// ## Errors
    /// Returns `ConfigError` if the configured duration is not positive.
    pub fn end_date_policy(&self) -> CoreResult<EndDatePolicy> {
        if self.default_duration_minutes <= 0 {
            return Err(CoreError::ConfigError(format!(
                "calendar.default_duration_minutes must be positive, got {}",
                self.default_duration_minutes
            )));
        }
        Ok(EndDatePolicy::new(TimeDelta::minutes(
            self.default_duration_minutes,
        )))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessConfig {
    /// Casbin policy file; when absent every definition is visible.
    pub policy_file: Option<String>,
    pub default_user: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    /// JSON fixture loaded into the in-memory store.
    pub fixture: Option<String>,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, `KALENDS__*` environment variables and
    /// an optional `config.toml`. Environment variables take precedence over the file.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        let calendar = CalendarConfig::default();
        Ok(Config::builder()
            .set_default("logging.level", "info")?
            .set_default("calendar.default_page_name", calendar.default_page_name)?
            .set_default(
                "calendar.default_background_color",
                calendar.default_background_color,
            )?
            .set_default("calendar.default_text_color", calendar.default_text_color)?
            .set_default(
                "calendar.default_duration_minutes",
                calendar.default_duration_minutes,
            )?
            .set_default("calendar.timezone", calendar.timezone)?
            .set_default(
                "calendar.max_occurrences",
                i64::from(calendar.max_occurrences),
            )?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Env
            .add_source(
                config::Environment::with_prefix("KALENDS")
                    .prefix_separator("__")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
