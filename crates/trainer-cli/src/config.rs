use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Weekday;
use config::{Config, Environment, File};
use serde::Deserialize;
use trainer_engine::rules::{
    parse_weekday, DEFAULT_CLOSE_HOUR, DEFAULT_GRANULARITY_MINUTES, DEFAULT_OPEN_HOUR,
    DEFAULT_TIMEZONE, DEFAULT_WEEKDAYS,
};
use trainer_engine::{RulesError, TimeRules};

/// Looked up in the working directory unless `--config` says otherwise.
pub const CONFIG_FILE: &str = "trainer-slots.toml";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub hours: HoursConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("appointments.json"),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HoursConfig {
    pub timezone: String,
    pub open_hour: u32,
    pub close_hour: u32,
    pub weekdays: Vec<String>,
    pub granularity_minutes: u32,
}

impl Default for HoursConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.name().to_string(),
            open_hour: DEFAULT_OPEN_HOUR,
            close_hour: DEFAULT_CLOSE_HOUR,
            weekdays: DEFAULT_WEEKDAYS.iter().map(|d| d.to_string()).collect(),
            granularity_minutes: DEFAULT_GRANULARITY_MINUTES,
        }
    }
}

impl HoursConfig {
    /// Validate into the engine's calendar rules.
    pub fn to_rules(&self) -> Result<TimeRules, RulesError> {
        let weekdays = self
            .weekdays
            .iter()
            .map(|name| parse_weekday(name))
            .collect::<Result<Vec<Weekday>, _>>()?;
        TimeRules::new(
            &self.timezone,
            self.open_hour,
            self.close_hour,
            &weekdays,
            self.granularity_minutes,
        )
    }
}

impl AppConfig {
    /// Defaults, then `file` if present, then `TRAINER__SECTION__KEY` variables.
    pub fn load_from(file: &Path) -> Result<Self> {
        // Load .env file (silently ignore if not present)
        let _ = dotenvy::dotenv();

        let hours = HoursConfig::default();
        let builder = Config::builder()
            // Store
            .set_default(
                "store.path",
                StoreConfig::default().path.to_string_lossy().into_owned(),
            )?
            // Hours
            .set_default("hours.timezone", hours.timezone)?
            .set_default("hours.open_hour", i64::from(hours.open_hour))?
            .set_default("hours.close_hour", i64::from(hours.close_hour))?
            .set_default("hours.weekdays", hours.weekdays)?
            .set_default(
                "hours.granularity_minutes",
                i64::from(hours.granularity_minutes),
            )?
            .add_source(File::from(file.to_path_buf()).required(false))
            .add_source(
                Environment::with_prefix("TRAINER")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("hours.weekdays")
                    .try_parsing(true),
            );

        let settings = builder
            .build()
            .with_context(|| format!("Failed to read configuration from {}", file.display()))?;
        Ok(settings.try_deserialize()?)
    }
}
