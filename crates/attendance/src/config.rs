//! Configuration for the attendance client.
//!
//! Loaded with figment from (later sources override earlier): built-in
//! defaults, a TOML file at `~/.config/attendance/config.toml`, then
//! environment variables prefixed with `ATTEND_` (nested keys separated by
//! a double underscore, e.g. `ATTEND_REMOTE__BASE_URL`).

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};
use crate::location::Coordinates;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory name under the platform config/data roots.
const APP_DIR_NAME: &str = "attendance";

/// Default name of the hosted record collection.
const DEFAULT_COLLECTION: &str = "attendance";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hosted service endpoints and credentials.
    pub remote: RemoteConfig,
    /// Admin sign-in defaults.
    pub admin: AdminConfig,
    /// Device position settings.
    pub location: LocationConfig,
    /// CSV export settings.
    pub export: ExportConfig,
}

/// Hosted document store and authentication endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL of the hosted document store.
    pub base_url: Option<Url>,
    /// Base URL of the authentication service; falls back to `base_url`.
    pub auth_url: Option<Url>,
    /// Name of the record collection.
    pub collection: String,
    /// API key sent with every request, if the project requires one.
    pub api_key: Option<String>,
}

/// Admin sign-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Email offered as the default admin identity.
    pub email: Option<String>,
}

/// Device position settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Whether submissions should try to attach a position at all.
    pub enabled: bool,
    /// Provisioned latitude of this terminal, degrees north.
    pub latitude: Option<f64>,
    /// Provisioned longitude of this terminal, degrees east.
    pub longitude: Option<f64>,
    /// Bound on the one-shot position request, in seconds.
    pub timeout_secs: u64,
}

/// CSV export settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory exports are written into.
    /// Defaults to `~/.local/share/attendance/exports`.
    pub output_dir: Option<PathBuf>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            auth_url: None,
            collection: DEFAULT_COLLECTION.to_string(),
            api_key: None,
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            latitude: None,
            longitude: None,
            timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if loading, parsing, or validation fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if loading, parsing, or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("ATTEND_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(APP_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.location.timeout_secs == 0 {
            return Err(Error::config_validation(
                "location.timeout_secs must be greater than 0",
            ));
        }

        match (self.location.latitude, self.location.longitude) {
            (Some(latitude), Some(longitude)) => {
                if !(-90.0..=90.0).contains(&latitude) {
                    return Err(Error::config_validation(format!(
                        "location.latitude {latitude} is outside -90..=90"
                    )));
                }
                if !(-180.0..=180.0).contains(&longitude) {
                    return Err(Error::config_validation(format!(
                        "location.longitude {longitude} is outside -180..=180"
                    )));
                }
            }
            (None, None) => {}
            _ => {
                return Err(Error::config_validation(
                    "location.latitude and location.longitude must be set together",
                ));
            }
        }

        Ok(())
    }

    /// The document store base URL, required for any remote command.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `remote.base_url` is not configured.
    pub fn require_base_url(&self) -> Result<&Url> {
        self.remote
            .base_url
            .as_ref()
            .ok_or_else(|| Error::config_validation("remote.base_url is not configured"))
    }

    /// The authentication base URL, falling back to the store base URL.
    ///
    /// # Errors
    ///
    /// Returns a validation error when neither URL is configured.
    pub fn require_auth_url(&self) -> Result<&Url> {
        match &self.remote.auth_url {
            Some(url) => Ok(url),
            None => self.require_base_url(),
        }
    }

    /// The provisioned terminal position, if location is enabled and both
    /// coordinates are configured.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        if !self.location.enabled {
            return None;
        }
        match (self.location.latitude, self.location.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }

    /// Bound on the position request as a `Duration`.
    #[must_use]
    pub fn location_wait(&self) -> Duration {
        Duration::from_secs(self.location.timeout_secs)
    }

    /// Directory CSV exports are written into.
    #[must_use]
    pub fn export_dir(&self) -> PathBuf {
        self.export
            .output_dir
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join("exports"))
    }
}
