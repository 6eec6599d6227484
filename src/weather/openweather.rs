//! OpenWeatherMap place-name search

use chrono::NaiveDateTime;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::{Result, VisionError};
use crate::weather::model::{Coordinates, CurrentConditions, ForecastPoint, Unit};

/// OpenWeatherMap API base URL
const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org/data/2.5";

/// Number of forecast points shown in the hourly tab
pub const HOURLY_POINTS: usize = 8;

/// Current conditions of a place, as resolved by the search
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlace {
    pub name: String,
    pub country: String,
    pub coordinates: Coordinates,
    pub current: CurrentConditions,
}

/// OpenWeatherMap client
#[derive(Debug, Clone)]
pub struct OpenWeather {
    client: Client,
    api_key: String,
}

impl OpenWeather {
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
        }
    }

    /// Current conditions for a free-text place name
    pub async fn current(&self, place: &str, unit: Unit) -> Result<ResolvedPlace> {
        let body: CurrentResponse = self.get_json("weather", place, unit).await?;
        body.into_place()
    }

    /// 5-day / 3-hour forecast for a free-text place name
    pub async fn forecast(&self, place: &str, unit: Unit) -> Result<Vec<ForecastPoint>> {
        let body: ForecastResponse = self.get_json("forecast", place, unit).await?;
        Ok(body.into_points())
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        place: &str,
        unit: Unit,
    ) -> Result<T> {
        let place = place.trim();
        if place.is_empty() {
            return Err(VisionError::InvalidInput("Enter a place to search".into()));
        }

        let url = Url::parse_with_params(
            &format!("{}/{}", OPENWEATHER_API_BASE, endpoint),
            &[
                ("q", place),
                ("appid", self.api_key.as_str()),
                ("units", unit.api_name()),
            ],
        )
        .map_err(|e| VisionError::WeatherApi(format!("Invalid search URL: {}", e)))?;

        debug!(endpoint, place, %unit, "querying OpenWeatherMap");
        let response = self.client.get(url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(VisionError::NoResults),
            status if !status.is_success() => {
                let error_text = response.text().await.unwrap_or_default();
                Err(VisionError::WeatherApi(format!(
                    "OpenWeatherMap error ({}): {}",
                    status, error_text
                )))
            }
            _ => Ok(response.json().await?),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Response types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentResponse {
    name: String,
    coord: Coord,
    #[serde(default)]
    sys: Option<Sys>,
    main: Main,
    #[serde(default)]
    weather: Vec<Description>,
    wind: Wind,
}

#[derive(Debug, Deserialize)]
struct Coord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct Sys {
    #[serde(default)]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Main {
    temp: f64,
    #[serde(default)]
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct Description {
    description: String,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

impl CurrentResponse {
    pub(crate) fn into_place(self) -> Result<ResolvedPlace> {
        if self.name.is_empty() && self.weather.is_empty() {
            return Err(VisionError::NoResults);
        }

        Ok(ResolvedPlace {
            name: self.name,
            country: self.sys.and_then(|s| s.country).unwrap_or_default(),
            coordinates: Coordinates::new(self.coord.lat, self.coord.lon),
            current: CurrentConditions {
                temperature: self.main.temp,
                description: first_description(&self.weather),
                wind_speed: self.wind.speed,
                humidity: self.main.humidity,
            },
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    #[serde(default)]
    list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt_txt: String,
    main: Main,
    #[serde(default)]
    weather: Vec<Description>,
    wind: Wind,
}

impl ForecastResponse {
    pub(crate) fn into_points(self) -> Vec<ForecastPoint> {
        self.list
            .into_iter()
            .filter_map(|entry| {
                let time = NaiveDateTime::parse_from_str(&entry.dt_txt, "%Y-%m-%d %H:%M:%S").ok()?;
                Some(ForecastPoint {
                    time,
                    temperature: entry.main.temp,
                    description: first_description(&entry.weather),
                    wind_speed: entry.wind.speed,
                })
            })
            .collect()
    }
}

fn first_description(weather: &[Description]) -> String {
    weather
        .first()
        .map(|w| w.description.clone())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_current() {
        let json = r#"{
            "coord": {"lon": -0.1257, "lat": 51.5085},
            "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
            "main": {"temp": 12.3, "feels_like": 11.5, "humidity": 81},
            "wind": {"speed": 4.6, "deg": 240},
            "sys": {"country": "GB"},
            "name": "London",
            "cod": 200
        }"#;
        let place = serde_json::from_str::<CurrentResponse>(json)
            .unwrap()
            .into_place()
            .unwrap();
        assert_eq!(place.name, "London");
        assert_eq!(place.country, "GB");
        assert_eq!(place.coordinates, Coordinates::new(51.5085, -0.1257));
        assert_eq!(place.current.description, "light rain");
        assert_eq!(place.current.humidity, 81);
        assert_eq!(place.current.wind_speed, 4.6);
    }

    #[test]
    fn test_parse_forecast_skips_bad_timestamps() {
        let json = r#"{
            "cod": "200",
            "list": [
                {"dt_txt": "2024-05-01 12:00:00", "main": {"temp": 15.0}, "weather": [{"description": "clear sky"}], "wind": {"speed": 2.0}},
                {"dt_txt": "not a date", "main": {"temp": 16.0}, "weather": [], "wind": {"speed": 2.0}},
                {"dt_txt": "2024-05-01 15:00:00", "main": {"temp": 17.0}, "weather": [], "wind": {"speed": 3.0}}
            ]
        }"#;
        let points = serde_json::from_str::<ForecastResponse>(json)
            .unwrap()
            .into_points();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].description, "clear sky");
        assert_eq!(points[1].description, "unknown");
        assert_eq!(points[1].temperature, 17.0);
    }
}
