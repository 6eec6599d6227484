//! Weather display records

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Geographic position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Measurement system for place-name search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Metric,
    Imperial,
    Standard,
}

impl Unit {
    /// Value of the `units` query parameter
    pub fn api_name(&self) -> &'static str {
        match self {
            Unit::Metric => "metric",
            Unit::Imperial => "imperial",
            Unit::Standard => "standard",
        }
    }

    /// Human-readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            Unit::Metric => "Metric (°C, m/s)",
            Unit::Imperial => "Imperial (°F, mph)",
            Unit::Standard => "Standard (K, m/s)",
        }
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Unit::Metric => "°C",
            Unit::Imperial => "°F",
            Unit::Standard => "K",
        }
    }

    pub fn wind_suffix(&self) -> &'static str {
        match self {
            Unit::Imperial => "mph",
            Unit::Metric | Unit::Standard => "m/s",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "metric" => Some(Unit::Metric),
            "imperial" => Some(Unit::Imperial),
            "standard" => Some(Unit::Standard),
            _ => None,
        }
    }

    pub fn all() -> &'static [Unit] {
        &[Unit::Metric, Unit::Imperial, Unit::Standard]
    }

    /// Next unit in selector order
    pub fn next(&self) -> Self {
        match self {
            Unit::Metric => Unit::Imperial,
            Unit::Imperial => Unit::Standard,
            Unit::Standard => Unit::Metric,
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.api_name())
    }
}

/// Normalized current conditions shown by the widget and the detail view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherRecord {
    pub temperature_c: f64,
    pub condition: String,
    pub icon: String,
    pub wind_speed_kmh: f64,
    pub sunrise: Option<NaiveTime>,
    pub sunset: Option<NaiveTime>,
}

impl WeatherRecord {
    /// Record shown when no location is available
    pub fn fallback() -> Self {
        Self {
            temperature_c: 26.0,
            condition: "Sunny".to_string(),
            icon: "☀️".to_string(),
            wind_speed_kmh: 18.0,
            sunrise: NaiveTime::from_hms_opt(6, 15, 0),
            sunset: NaiveTime::from_hms_opt(19, 45, 0),
        }
    }

    pub fn sunrise_display(&self) -> String {
        format_time(self.sunrise)
    }

    pub fn sunset_display(&self) -> String {
        format_time(self.sunset)
    }
}

fn format_time(time: Option<NaiveTime>) -> String {
    time.map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Current conditions for a searched place, in the requested unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub description: String,
    pub wind_speed: f64,
    pub humidity: u8,
}

/// One point of the 3-hourly forecast
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub time: NaiveDateTime,
    pub temperature: f64,
    pub description: String,
    pub wind_speed: f64,
}

/// Aggregate of all forecast points on one calendar day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub min: f64,
    pub max: f64,
    pub description: String,
}

/// Historical extremes of one calendar month (°C)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    /// First day of the month
    pub month: NaiveDate,
    pub min: f64,
    pub max: f64,
}

/// Everything the global search panel shows for a place
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceReport {
    pub place: String,
    pub country: String,
    pub coordinates: Coordinates,
    pub unit: Unit,
    pub current: CurrentConditions,
    /// Next eight forecast points
    pub hourly: Vec<ForecastPoint>,
    pub weekly: Vec<DailySummary>,
    /// Monthly history, or a display-only error
    pub monthly: std::result::Result<Vec<MonthlySummary>, String>,
}
