//! Custom error types for vision-hud
//!
//! User-friendly error messages for all failure scenarios.

use thiserror::Error;

/// Main error type for the vision-hud application
#[derive(Error, Debug)]
pub enum VisionError {
    /// Location could not be determined (denied, unconfigured or lookup failed)
    #[error("Location unavailable: {0}\n\n  → Set coordinates with 'vision config set latitude <value>' and 'vision config set longitude <value>'.")]
    LocationUnavailable(String),

    /// Weather service answered with an error status or an unusable body
    #[error("Weather service error: {0}")]
    WeatherApi(String),

    /// Place-name search returned nothing
    #[error("No results found")]
    NoResults,

    /// OpenWeatherMap key missing
    #[error("OpenWeatherMap API key is not set up.\n\n  → Get a key from https://openweathermap.org/api\n  → Run 'vision config set openweather-key YOUR_KEY' or export OPENWEATHER_API_KEY.")]
    MissingApiKey,

    /// Sound playback failed
    #[error("Audio playback failed: {0}")]
    Audio(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// Network request error
    #[error("Network request failed: {0}\n\n  → Check your internet connection.")]
    Network(#[from] reqwest::Error),

    /// TOML serialization/deserialization error
    #[error("Configuration file is invalid: {0}")]
    Toml(String),

    /// Terminal/TUI error
    #[error("Terminal error: {0}\n\n  → Try resizing your terminal or restarting it.")]
    Terminal(String),

    /// Invalid input from user
    #[error("{0}")]
    InvalidInput(String),
}

impl From<toml::de::Error> for VisionError {
    fn from(err: toml::de::Error) -> Self {
        VisionError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for VisionError {
    fn from(err: toml::ser::Error) -> Self {
        VisionError::Toml(err.to_string())
    }
}

/// Result type alias using VisionError
pub type Result<T> = std::result::Result<T, VisionError>;
