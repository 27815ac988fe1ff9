//! Configuration management for the `whentogo` planner
//!
//! Handles loading configuration from files and environment variables
//! and validates every setting before the planner is built.

use crate::WhenToGoError;
use crate::scrape::cache::Staleness;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WhenToGoConfig {
    /// Remote data source locations
    #[serde(default)]
    pub sources: SourcesConfig,
    /// Live temperature lookup settings
    #[serde(default)]
    pub live: LiveConfig,
    /// Scrape cache settings
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default planner settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Remote data source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Base URL of the monthly historical weather CSV feed
    #[serde(default = "default_historical_base_url")]
    pub historical_base_url: String,
    /// Year of the historical feed to query
    #[serde(default = "default_historical_year")]
    pub historical_year: u16,
    /// Page listing must-see attractions per state
    #[serde(default = "default_attractions_url")]
    pub attractions_url: String,
    /// Page with month-by-month travel advice
    #[serde(default = "default_monthly_guide_url")]
    pub monthly_guide_url: String,
    /// Browser-like identification sent with scrape requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Live temperature lookup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveConfig {
    /// Geocoding API key, required at startup
    pub api_key: Option<String>,
    /// Geocoding endpoint
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    /// Forecast page scraped for the current temperature
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
}

/// How long a cache artifact stays usable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshPolicy {
    /// Once written, an artifact is read forever
    #[default]
    Never,
    /// Artifacts older than `ttl_hours` are re-scraped
    Ttl,
}

/// Cache configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Directory holding the cache artifacts
    #[serde(default = "default_cache_location")]
    pub location: String,
    /// Staleness policy for cache artifacts
    #[serde(default)]
    pub refresh: RefreshPolicy,
    /// Artifact lifetime when `refresh = "ttl"`
    #[serde(default = "default_cache_ttl")]
    pub ttl_hours: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Default planner settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// How many matching states get a detail block
    #[serde(default = "default_sample_states")]
    pub sample_states: u32,
}

// Default value functions
fn default_historical_base_url() -> String {
    "https://files.asmith.ucdavis.edu/weather/daily/state_noweight".to_string()
}

fn default_historical_year() -> u16 {
    2022
}

fn default_attractions_url() -> String {
    "https://www.myjoyfilledlife.com/must-do-attractions-must-see-places-in-all-50-states/"
        .to_string()
}

fn default_monthly_guide_url() -> String {
    "https://www.unmissabletrips.com/guides/the-united-states-a-month-by-month-travel-guide"
        .to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_geocoding_url() -> String {
    "http://api.openweathermap.org/geo/1.0/direct".to_string()
}

fn default_forecast_url() -> String {
    "https://forecast.weather.gov/MapClick.php".to_string()
}

fn default_cache_location() -> String {
    dirs::cache_dir()
        .map(|dir| dir.join("whentogo"))
        .unwrap_or_else(|| PathBuf::from(".whentogo-cache"))
        .to_string_lossy()
        .into_owned()
}

fn default_cache_ttl() -> u32 {
    24
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_sample_states() -> u32 {
    3
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            historical_base_url: default_historical_base_url(),
            historical_year: default_historical_year(),
            attractions_url: default_attractions_url(),
            monthly_guide_url: default_monthly_guide_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            location: default_cache_location(),
            refresh: RefreshPolicy::default(),
            ttl_hours: default_cache_ttl(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            sample_states: default_sample_states(),
        }
    }
}

impl CacheConfig {
    /// Staleness rule handed to the cache artifacts
    #[must_use]
    pub fn staleness(&self) -> Staleness {
        match self.refresh {
            RefreshPolicy::Never => Staleness::NeverRefresh,
            RefreshPolicy::Ttl => {
                Staleness::TimeToLive(Duration::from_secs(u64::from(self.ttl_hours) * 3600))
            }
        }
    }
}

impl WhenToGoConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // WHENTOGO_LIVE__API_KEY -> live.api_key
        builder = builder.add_source(
            Environment::with_prefix("WHENTOGO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: WhenToGoConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("whentogo").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.sources.historical_base_url.is_empty() {
            self.sources.historical_base_url = default_historical_base_url();
        }
        if self.sources.user_agent.is_empty() {
            self.sources.user_agent = default_user_agent();
        }
        if self.sources.timeout_seconds == 0 {
            self.sources.timeout_seconds = default_timeout();
        }
        if self.cache.location.is_empty() {
            self.cache.location = default_cache_location();
        }
        if self.cache.ttl_hours == 0 {
            self.cache.ttl_hours = default_cache_ttl();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.defaults.sample_states == 0 {
            self.defaults.sample_states = default_sample_states();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// The geocoding key must be supplied externally
    pub fn validate_api_keys(&self) -> Result<()> {
        match self.live.api_key.as_deref().map(str::trim) {
            None => Err(WhenToGoError::config(
                "live.api_key is required. Set it in config.toml or via WHENTOGO_LIVE__API_KEY.",
            )
            .into()),
            Some("") => Err(WhenToGoError::config("live.api_key cannot be empty.").into()),
            Some(key) if key.len() > 100 => Err(WhenToGoError::config(
                "live.api_key appears to be invalid (too long). Please check your API key.",
            )
            .into()),
            Some(_) => Ok(()),
        }
    }

    /// The key with its value masked, for diagnostics output
    #[must_use]
    pub fn masked_api_key(&self) -> String {
        match self.live.api_key.as_deref() {
            Some(key) if key.chars().count() > 4 => {
                format!("{}…", key.chars().take(4).collect::<String>())
            }
            Some(_) => "****".to_string(),
            None => "<unset>".to_string(),
        }
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.sources.timeout_seconds > 300 {
            return Err(
                WhenToGoError::config("sources.timeout_seconds cannot exceed 300 seconds").into(),
            );
        }

        if !(1900..=2100).contains(&self.sources.historical_year) {
            return Err(WhenToGoError::config(
                "sources.historical_year must be between 1900 and 2100",
            )
            .into());
        }

        if self.cache.ttl_hours > 8760 {
            return Err(
                WhenToGoError::config("cache.ttl_hours cannot exceed 8760 hours (1 year)").into(),
            );
        }

        if self.defaults.sample_states > 50 {
            return Err(WhenToGoError::config("defaults.sample_states cannot exceed 50").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WhenToGoError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WhenToGoError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let urls = [
            ("sources.historical_base_url", &self.sources.historical_base_url),
            ("sources.attractions_url", &self.sources.attractions_url),
            ("sources.monthly_guide_url", &self.sources.monthly_guide_url),
            ("live.geocoding_url", &self.live.geocoding_url),
            ("live.forecast_url", &self.live.forecast_url),
        ];
        for (key, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(WhenToGoError::config(format!(
                    "{key} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn valid_config() -> WhenToGoConfig {
        let mut config = WhenToGoConfig::default();
        config.live.api_key = Some("valid_api_key_123".to_string());
        config
    }

    #[test]
    fn test_default_config() {
        let config = WhenToGoConfig::default();
        assert_eq!(config.sources.historical_year, 2022);
        assert_eq!(config.sources.timeout_seconds, 30);
        assert_eq!(config.cache.refresh, RefreshPolicy::Never);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.defaults.sample_states, 3);
        assert!(config.live.api_key.is_none());
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        let config = WhenToGoConfig::default();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("live.api_key is required"));
    }

    #[test]
    fn test_blank_api_key_is_rejected() {
        let mut config = WhenToGoConfig::default();
        config.live.api_key = Some("   ".to_string());
        assert!(config.validate_api_keys().is_err());
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = valid_config();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_timeout_range() {
        let mut config = valid_config();
        config.sources.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("timeout_seconds"));
    }

    #[test]
    fn test_non_http_url_rejected() {
        let mut config = valid_config();
        config.live.forecast_url = "ftp://forecast".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("live.forecast_url"));
    }

    #[test]
    fn test_staleness_from_policy() {
        let mut config = valid_config();
        assert_eq!(config.cache.staleness(), Staleness::NeverRefresh);

        config.cache.refresh = RefreshPolicy::Ttl;
        config.cache.ttl_hours = 2;
        assert_eq!(
            config.cache.staleness(),
            Staleness::TimeToLive(Duration::from_secs(7200))
        );
    }

    #[test]
    fn test_masked_api_key_hides_secret() {
        let config = valid_config();
        let masked = config.masked_api_key();
        assert!(masked.starts_with("vali"));
        assert!(!masked.contains("key_123"));
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[live]
api_key = "file_key_12345"

[cache]
location = "/tmp/whentogo-test"
refresh = "ttl"
ttl_hours = 12

[defaults]
sample_states = 5
"#
        )
        .unwrap();

        let config = WhenToGoConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.live.api_key.as_deref(), Some("file_key_12345"));
        assert_eq!(config.cache.location, "/tmp/whentogo-test");
        assert_eq!(config.cache.refresh, RefreshPolicy::Ttl);
        assert_eq!(config.cache.ttl_hours, 12);
        assert_eq!(config.defaults.sample_states, 5);
        assert_eq!(config.sources.historical_year, 2022);
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = WhenToGoConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("whentogo"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
