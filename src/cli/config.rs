//! Configuration CLI command handlers

use std::path::PathBuf;

use crate::cli::commands::{ConfigCommand, ConfigKey};
use crate::core::config::Config;
use crate::error::{Result, VisionError};
use crate::weather::model::Unit;

/// Handle configuration commands
pub fn handle_config(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Set { key, value } => {
            let mut config = Config::load()?;
            let message = set_value(&mut config, key, &value)?;
            config.save()?;
            println!("{}", message);
        }
        ConfigCommand::Get { key } => {
            let config = Config::load()?;
            println!("{}", get_value(&config, key));
        }
        ConfigCommand::Reset { key } => {
            let mut config = Config::load()?;
            reset_value(&mut config, key);
            config.save()?;
            println!("{}", get_value(&config, key));
        }
        ConfigCommand::Path => {
            println!("{}", Config::config_path()?.display());
        }
    }
    Ok(())
}

/// Apply `value` to `key`, returning a confirmation line
pub fn set_value(config: &mut Config, key: ConfigKey, value: &str) -> Result<String> {
    let value = value.trim();
    match key {
        ConfigKey::Unit => {
            config.unit = Unit::from_str(value).ok_or_else(|| {
                VisionError::InvalidInput(format!(
                    "Invalid unit '{}'. Available units: {}",
                    value,
                    Unit::all()
                        .iter()
                        .map(|u| u.api_name())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })?;
        }
        ConfigKey::RefreshInterval => {
            let secs = parse_number::<u64>(key, value)?;
            if secs == 0 {
                return Err(VisionError::InvalidInput(
                    "Refresh interval must be at least 1 second".into(),
                ));
            }
            config.refresh_interval_secs = secs;
        }
        ConfigKey::HistoryMonths => {
            let months = parse_number::<u32>(key, value)?;
            if !(1..=12).contains(&months) {
                return Err(VisionError::InvalidInput(
                    "History must be between 1 and 12 months".into(),
                ));
            }
            config.history_months = months;
        }
        ConfigKey::Latitude => config.set_latitude(parse_number(key, value)?)?,
        ConfigKey::Longitude => config.set_longitude(parse_number(key, value)?)?,
        ConfigKey::IpLocation => {
            config.ip_location = match value.to_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => true,
                "false" | "no" | "off" | "0" => false,
                _ => {
                    return Err(VisionError::InvalidInput(format!(
                        "Invalid value '{}' for ip-location. Use true or false",
                        value
                    )))
                }
            };
        }
        ConfigKey::OpenweatherKey => {
            if value.is_empty() {
                return Err(VisionError::InvalidInput("API key cannot be empty".into()));
            }
            config.openweather_api_key = Some(value.to_string());
            return Ok("OpenWeatherMap API key has been saved.".to_string());
        }
        ConfigKey::StartupSound => config.startup_sound = Some(PathBuf::from(value)),
        ConfigKey::WelcomeSound => config.welcome_sound = Some(PathBuf::from(value)),
        ConfigKey::SoundCommand => config.sound_command = Some(value.to_string()),
    }
    Ok(get_value(config, key))
}

/// Render `key` as a `name: value` line
pub fn get_value(config: &Config, key: ConfigKey) -> String {
    match key {
        ConfigKey::Unit => format!("Unit: {}", config.unit.display_name()),
        ConfigKey::RefreshInterval => {
            format!("Refresh interval: {}s", config.refresh_interval_secs)
        }
        ConfigKey::HistoryMonths => format!("History months: {}", config.history_months),
        ConfigKey::Latitude => format!("Latitude: {}", optional(config.latitude)),
        ConfigKey::Longitude => format!("Longitude: {}", optional(config.longitude)),
        ConfigKey::IpLocation => format!("IP location: {}", config.ip_location),
        ConfigKey::OpenweatherKey => match config.openweather_api_key() {
            Some(key) => format!("OpenWeatherMap API key: {}", mask_key(&key)),
            None => "OpenWeatherMap API key: Not configured".to_string(),
        },
        ConfigKey::StartupSound => format!(
            "Startup sound: {}",
            optional(config.startup_sound.as_ref().map(|p| p.display()))
        ),
        ConfigKey::WelcomeSound => format!(
            "Welcome sound: {}",
            optional(config.welcome_sound.as_ref().map(|p| p.display()))
        ),
        ConfigKey::SoundCommand => format!(
            "Sound command: {}",
            optional(config.sound_command.as_deref())
        ),
    }
}

/// Restore the default for `key`
pub fn reset_value(config: &mut Config, key: ConfigKey) {
    let defaults = Config::default();
    match key {
        ConfigKey::Unit => config.unit = defaults.unit,
        ConfigKey::RefreshInterval => config.refresh_interval_secs = defaults.refresh_interval_secs,
        ConfigKey::HistoryMonths => config.history_months = defaults.history_months,
        ConfigKey::Latitude => config.latitude = None,
        ConfigKey::Longitude => config.longitude = None,
        ConfigKey::IpLocation => config.ip_location = defaults.ip_location,
        ConfigKey::OpenweatherKey => config.openweather_api_key = None,
        ConfigKey::StartupSound => config.startup_sound = None,
        ConfigKey::WelcomeSound => config.welcome_sound = None,
        ConfigKey::SoundCommand => config.sound_command = None,
    }
}

fn parse_number<T: std::str::FromStr>(key: ConfigKey, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        VisionError::InvalidInput(format!("Invalid number '{}' for {:?}", value, key))
    })
}

fn optional<T: std::fmt::Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "Not configured".to_string())
}

/// Mask an API key for display, keeping the last four characters
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_unit() {
        let mut config = Config::default();
        let message = set_value(&mut config, ConfigKey::Unit, "Imperial").unwrap();
        assert_eq!(config.unit, Unit::Imperial);
        assert!(message.starts_with("Unit:"));

        let err = set_value(&mut config, ConfigKey::Unit, "kelvin").unwrap_err();
        assert!(err.to_string().contains("metric, imperial, standard"));
    }

    #[test]
    fn test_set_coordinates() {
        let mut config = Config::default();
        set_value(&mut config, ConfigKey::Latitude, "-33.92").unwrap();
        set_value(&mut config, ConfigKey::Longitude, "18.42").unwrap();
        assert_eq!(config.latitude, Some(-33.92));
        assert!(config.coordinates().is_some());

        assert!(set_value(&mut config, ConfigKey::Latitude, "north").is_err());
        assert!(set_value(&mut config, ConfigKey::Latitude, "120").is_err());
        assert_eq!(config.latitude, Some(-33.92));
    }

    #[test]
    fn test_set_numbers_are_validated() {
        let mut config = Config::default();
        assert!(set_value(&mut config, ConfigKey::RefreshInterval, "0").is_err());
        assert!(set_value(&mut config, ConfigKey::HistoryMonths, "13").is_err());
        set_value(&mut config, ConfigKey::HistoryMonths, "3").unwrap();
        assert_eq!(config.history_months, 3);
    }

    #[test]
    fn test_ip_location_flag() {
        let mut config = Config::default();
        set_value(&mut config, ConfigKey::IpLocation, "yes").unwrap();
        assert!(config.ip_location);
        assert!(set_value(&mut config, ConfigKey::IpLocation, "maybe").is_err());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut config = Config::default();
        set_value(&mut config, ConfigKey::RefreshInterval, "30").unwrap();
        set_value(&mut config, ConfigKey::SoundCommand, "paplay").unwrap();

        reset_value(&mut config, ConfigKey::RefreshInterval);
        reset_value(&mut config, ConfigKey::SoundCommand);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("abcdef123456"), "********3456");
        assert_eq!(mask_key("abc"), "***");
    }
}
