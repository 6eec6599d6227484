//! Open-Meteo forecast and archive API client

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::{Result, VisionError};
use crate::weather::aggregate::monthly_summary;
use crate::weather::codes;
use crate::weather::model::{Coordinates, MonthlySummary, WeatherRecord};

/// Forecast API endpoint
const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Historical archive endpoint
const ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

/// Open-Meteo API client (no key required)
#[derive(Debug, Clone)]
pub struct OpenMeteo {
    client: Client,
}

impl OpenMeteo {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Current conditions plus today's sunrise and sunset
    pub async fn current(&self, coords: Coordinates) -> Result<WeatherRecord> {
        let url = Url::parse_with_params(
            FORECAST_URL,
            &[
                ("latitude", coords.latitude.to_string()),
                ("longitude", coords.longitude.to_string()),
                (
                    "current",
                    "temperature_2m,wind_speed_10m,weather_code".to_string(),
                ),
                ("daily", "sunrise,sunset".to_string()),
                ("timezone", "auto".to_string()),
            ],
        )
        .map_err(|e| VisionError::WeatherApi(format!("Invalid forecast URL: {}", e)))?;

        debug!(%coords, "fetching Open-Meteo forecast");
        let body: ForecastResponse = self.get_json(url).await?;
        Ok(body.into_record())
    }

    /// Monthly extremes between `start` and `end` (inclusive)
    pub async fn monthly_history(
        &self,
        coords: Coordinates,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<MonthlySummary>> {
        let url = Url::parse_with_params(
            ARCHIVE_URL,
            &[
                ("latitude", coords.latitude.to_string()),
                ("longitude", coords.longitude.to_string()),
                ("start_date", start.format("%Y-%m-%d").to_string()),
                ("end_date", end.format("%Y-%m-%d").to_string()),
                (
                    "daily",
                    "temperature_2m_max,temperature_2m_min".to_string(),
                ),
                ("timezone", "auto".to_string()),
            ],
        )
        .map_err(|e| VisionError::WeatherApi(format!("Invalid archive URL: {}", e)))?;

        debug!(%coords, %start, %end, "fetching Open-Meteo archive");
        let body: ArchiveResponse = self.get_json(url).await?;
        body.into_monthly()
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: Url) -> Result<T> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(VisionError::WeatherApi(format!(
                "Open-Meteo error ({}): {}",
                status, error_text
            )));
        }

        Ok(response.json().await?)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Response types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    current: CurrentBlock,
    #[serde(default)]
    daily: Option<SunBlock>,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: f64,
    wind_speed_10m: f64,
    weather_code: i32,
}

#[derive(Debug, Deserialize)]
struct SunBlock {
    #[serde(default)]
    sunrise: Vec<String>,
    #[serde(default)]
    sunset: Vec<String>,
}

impl ForecastResponse {
    pub(crate) fn into_record(self) -> WeatherRecord {
        let condition = codes::describe(self.current.weather_code);
        let (sunrise, sunset) = match &self.daily {
            Some(daily) => (
                daily.sunrise.first().and_then(|s| parse_local_time(s)),
                daily.sunset.first().and_then(|s| parse_local_time(s)),
            ),
            None => (None, None),
        };

        WeatherRecord {
            temperature_c: self.current.temperature_2m,
            condition: condition.label.to_string(),
            icon: condition.icon.to_string(),
            wind_speed_kmh: self.current.wind_speed_10m,
            sunrise,
            sunset,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArchiveResponse {
    daily: Option<ArchiveDaily>,
}

#[derive(Debug, Deserialize)]
struct ArchiveDaily {
    time: Vec<String>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
}

impl ArchiveResponse {
    pub(crate) fn into_monthly(self) -> Result<Vec<MonthlySummary>> {
        let daily = self
            .daily
            .ok_or_else(|| VisionError::WeatherApi("Archive response has no daily data".into()))?;

        let days: Vec<(NaiveDate, Option<f64>, Option<f64>)> = daily
            .time
            .iter()
            .zip(daily.temperature_2m_max.iter())
            .zip(daily.temperature_2m_min.iter())
            .filter_map(|((day, max), min)| {
                NaiveDate::parse_from_str(day, "%Y-%m-%d")
                    .ok()
                    .map(|date| (date, *max, *min))
            })
            .collect();

        Ok(monthly_summary(&days))
    }
}

/// Parse "2024-05-01T06:15" (local ISO time without zone) into a time of day
fn parse_local_time(s: &str) -> Option<NaiveTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .ok()
        .map(|dt| dt.time())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORECAST: &str = r#"{
        "latitude": 52.52,
        "longitude": 13.41,
        "timezone": "Europe/Berlin",
        "current": {
            "time": "2024-05-01T14:00",
            "interval": 900,
            "temperature_2m": 21.4,
            "wind_speed_10m": 11.9,
            "weather_code": 61
        },
        "daily": {
            "time": ["2024-05-01"],
            "sunrise": ["2024-05-01T05:38"],
            "sunset": ["2024-05-01T20:36"]
        }
    }"#;

    #[test]
    fn test_parse_forecast() {
        let response: ForecastResponse = serde_json::from_str(FORECAST).unwrap();
        let record = response.into_record();
        assert_eq!(record.temperature_c, 21.4);
        assert_eq!(record.wind_speed_kmh, 11.9);
        assert_eq!(record.condition, "Slight Rain");
        assert_eq!(record.icon, "🌧️");
        assert_eq!(record.sunrise_display(), "05:38");
        assert_eq!(record.sunset_display(), "20:36");
    }

    #[test]
    fn test_parse_forecast_without_daily() {
        let json = r#"{"current": {"temperature_2m": 3.0, "wind_speed_10m": 0.0, "weather_code": 999}}"#;
        let record = serde_json::from_str::<ForecastResponse>(json)
            .unwrap()
            .into_record();
        assert_eq!(record.condition, "Unknown");
        assert_eq!(record.sunrise, None);
        assert_eq!(record.sunset_display(), "N/A");
    }

    #[test]
    fn test_parse_archive() {
        let json = r#"{
            "daily": {
                "time": ["2024-04-29", "2024-04-30", "2024-05-01"],
                "temperature_2m_max": [14.2, 17.0, null],
                "temperature_2m_min": [3.1, 6.4, 8.0]
            }
        }"#;
        let months = serde_json::from_str::<ArchiveResponse>(json)
            .unwrap()
            .into_monthly()
            .unwrap();
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].min, 3.1);
        assert_eq!(months[0].max, 17.0);
    }

    #[test]
    fn test_archive_without_daily_is_error() {
        let response: ArchiveResponse = serde_json::from_str(r#"{"error": true}"#).unwrap();
        assert!(response.into_monthly().is_err());
    }
}
