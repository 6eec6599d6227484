//! Application configuration management
//!
//! Handles loading and saving user settings:
//! - Units for place-name search
//! - Refresh interval and history lookback
//! - Location source (fixed coordinates or IP lookup)
//! - OpenWeatherMap key and sound cues

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VisionError};
use crate::weather::model::{Coordinates, Unit};

/// Environment variable that overrides the stored OpenWeatherMap key
pub const OPENWEATHER_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Units used by the place search
    #[serde(default)]
    pub unit: Unit,

    /// Interval between local weather refreshes in the detail view
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Whole calendar months of history shown in the monthly tab
    #[serde(default = "default_history_months")]
    pub history_months: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    /// Resolve the location from the public IP when no coordinates are set
    #[serde(default)]
    pub ip_location: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openweather_api_key: Option<String>,

    /// Sound file played when authorization starts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startup_sound: Option<PathBuf>,

    /// Sound file played shortly after the boot screen appears
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome_sound: Option<PathBuf>,

    /// Player command for sound files (defaults to `afplay` on macOS, `aplay` elsewhere)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_command: Option<String>,
}

fn default_refresh_interval() -> u64 {
    600
}

fn default_history_months() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unit: Unit::default(),
            refresh_interval_secs: default_refresh_interval(),
            history_months: default_history_months(),
            latitude: None,
            longitude: None,
            ip_location: false,
            openweather_api_key: None,
            startup_sound: None,
            welcome_sound: None,
            sound_command: None,
        }
    }
}

impl Config {
    /// Load configuration from file, or return defaults if not exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Get the configuration directory
    pub fn config_dir() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "vision-hud", "vision-hud")
            .ok_or_else(|| VisionError::Config("Could not determine config directory".into()))?;

        Ok(project_dirs.config_dir().to_path_buf())
    }

    /// Log file used while the TUI owns the terminal
    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("vision.log"))
    }

    /// OpenWeatherMap key; the environment takes precedence over the file
    pub fn openweather_api_key(&self) -> Option<String> {
        env::var(OPENWEATHER_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.openweather_api_key.clone())
    }

    /// Configured fixed coordinates, when both halves are present
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    /// Validate and store a latitude in degrees
    pub fn set_latitude(&mut self, value: f64) -> Result<()> {
        if !(-90.0..=90.0).contains(&value) {
            return Err(VisionError::InvalidInput(format!(
                "Latitude must be between -90 and 90, got {}",
                value
            )));
        }
        self.latitude = Some(value);
        Ok(())
    }

    /// Validate and store a longitude in degrees
    pub fn set_longitude(&mut self, value: f64) -> Result<()> {
        if !(-180.0..=180.0).contains(&value) {
            return Err(VisionError::InvalidInput(format!(
                "Longitude must be between -180 and 180, got {}",
                value
            )));
        }
        self.longitude = Some(value);
        Ok(())
    }
}
