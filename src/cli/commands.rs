//! CLI command definitions using clap
//!
//! Defines the command structure for the `vision` CLI tool.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::weather::model::Unit;

/// vision-hud - assistant boot sequence and weather HUD
///
/// Run without arguments to launch the TUI.
#[derive(Parser, Debug)]
#[command(name = "vision", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub tui: TuiArgs,
}

/// Options for the TUI session
#[derive(Args, Debug, Clone, Default)]
pub struct TuiArgs {
    /// Disable sound cues
    #[arg(long)]
    pub mute: bool,

    /// Latitude of the device (overrides configuration)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude of the device (overrides configuration)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Locate the device by its public IP address
    #[arg(long)]
    pub ip_location: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up weather without launching the TUI
    Weather(WeatherArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Weather Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Weather commands
#[derive(Parser, Debug)]
pub struct WeatherArgs {
    #[command(subcommand)]
    pub command: WeatherCommand,
}

#[derive(Subcommand, Debug)]
pub enum WeatherCommand {
    /// Current conditions at the device location
    Here {
        /// Latitude (defaults to configuration)
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude (defaults to configuration)
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },

    /// Current conditions, forecast and monthly history for a place
    Search {
        /// Place name, e.g. "London" or "Paris,FR"
        place: String,

        /// Units (defaults to configuration)
        #[arg(long, short)]
        unit: Option<UnitArg>,
    },
}

/// Unit selection on the command line
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum UnitArg {
    Metric,
    Imperial,
    Standard,
}

impl From<UnitArg> for Unit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Metric => Unit::Metric,
            UnitArg::Imperial => Unit::Imperial,
            UnitArg::Standard => Unit::Standard,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration commands
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set a configuration value
    Set {
        /// Configuration key
        key: ConfigKey,

        /// Configuration value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key
        key: ConfigKey,
    },

    /// Reset a configuration value to its default
    Reset {
        /// Configuration key
        key: ConfigKey,
    },

    /// Print the configuration file path
    Path,
}

/// Available configuration keys
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigKey {
    /// Units for place search
    #[value(name = "unit")]
    Unit,

    /// Local weather refresh interval in seconds
    #[value(name = "refresh-interval")]
    RefreshInterval,

    /// Months of history in the monthly tab
    #[value(name = "history-months")]
    HistoryMonths,

    /// Fixed latitude
    #[value(name = "latitude")]
    Latitude,

    /// Fixed longitude
    #[value(name = "longitude")]
    Longitude,

    /// Locate by public IP when no coordinates are set
    #[value(name = "ip-location")]
    IpLocation,

    /// OpenWeatherMap API key
    #[value(name = "openweather-key")]
    OpenweatherKey,

    /// Sound file for the startup cue
    #[value(name = "startup-sound")]
    StartupSound,

    /// Sound file for the welcome greeting
    #[value(name = "welcome-sound")]
    WelcomeSound,

    /// Command used to play sound files
    #[value(name = "sound-command")]
    SoundCommand,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_launches_tui() {
        let cli = Cli::try_parse_from(["vision", "--mute", "--lat", "-33.9", "--lon", "18.4"])
            .unwrap();
        assert!(cli.command.is_none());
        assert!(cli.tui.mute);
        assert_eq!(cli.tui.lat, Some(-33.9));
        assert_eq!(cli.tui.lon, Some(18.4));
    }

    #[test]
    fn test_lat_requires_lon() {
        assert!(Cli::try_parse_from(["vision", "--lat", "10"]).is_err());
    }

    #[test]
    fn test_search_with_unit() {
        let cli =
            Cli::try_parse_from(["vision", "weather", "search", "Paris", "--unit", "imperial"])
                .unwrap();
        match cli.command {
            Some(Commands::Weather(WeatherArgs {
                command: WeatherCommand::Search { place, unit },
            })) => {
                assert_eq!(place, "Paris");
                assert_eq!(unit.map(Unit::from), Some(Unit::Imperial));
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn test_config_set_negative_value() {
        let cli = Cli::try_parse_from(["vision", "config", "set", "longitude", "-0.12"]).unwrap();
        match cli.command {
            Some(Commands::Config(ConfigArgs {
                command: ConfigCommand::Set { key, value },
            })) => {
                assert_eq!(key, ConfigKey::Longitude);
                assert_eq!(value, "-0.12");
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }
}
