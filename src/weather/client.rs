//! Weather client capability
//!
//! [`WeatherClient`] is the narrow seam between the UI and the remote weather
//! services; the App only ever holds an `Arc<dyn WeatherClient>`.

use async_trait::async_trait;
use chrono::Local;
use reqwest::Client;
use tracing::warn;

#[cfg(test)]
use mockall::automock;

use crate::core::config::Config;
use crate::error::{Result, VisionError};
use crate::weather::aggregate::{lookback_window, weekly_summary};
use crate::weather::model::{Coordinates, PlaceReport, Unit, WeatherRecord};
use crate::weather::open_meteo::OpenMeteo;
use crate::weather::openweather::{OpenWeather, HOURLY_POINTS};

/// Message shown when the monthly history cannot be loaded
pub const MONTHLY_ERROR: &str = "Failed to load monthly data.";

/// Source of weather data
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Current conditions at `coords`
    async fn current(&self, coords: Coordinates) -> Result<WeatherRecord>;

    /// Current conditions, forecast and monthly history for a place name
    async fn search(&self, place: &str, unit: Unit) -> Result<PlaceReport>;
}

/// HTTP implementation backed by Open-Meteo and OpenWeatherMap
pub struct HttpWeatherClient {
    open_meteo: OpenMeteo,
    openweather: Option<OpenWeather>,
    history_months: u32,
}

impl HttpWeatherClient {
    pub fn new(openweather_key: Option<String>, history_months: u32) -> Self {
        let client = Client::new();
        Self {
            open_meteo: OpenMeteo::new(client.clone()),
            openweather: openweather_key.map(|key| OpenWeather::new(client, key)),
            history_months,
        }
    }

    /// Build from configuration (`OPENWEATHER_API_KEY` overrides the stored key)
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.openweather_api_key(), config.history_months)
    }
}

#[async_trait]
impl WeatherClient for HttpWeatherClient {
    async fn current(&self, coords: Coordinates) -> Result<WeatherRecord> {
        self.open_meteo.current(coords).await
    }

    async fn search(&self, place: &str, unit: Unit) -> Result<PlaceReport> {
        let openweather = self.openweather.as_ref().ok_or(VisionError::MissingApiKey)?;

        let (resolved, forecast) = tokio::try_join!(
            openweather.current(place, unit),
            openweather.forecast(place, unit)
        )?;

        let (start, end) = lookback_window(Local::now().date_naive(), self.history_months);
        let monthly = match self
            .open_meteo
            .monthly_history(resolved.coordinates, start, end)
            .await
        {
            Ok(months) => Ok(months),
            Err(e) => {
                warn!(error = %e, "monthly history request failed");
                Err(MONTHLY_ERROR.to_string())
            }
        };

        Ok(PlaceReport {
            place: resolved.name,
            country: resolved.country,
            coordinates: resolved.coordinates,
            unit,
            current: resolved.current,
            hourly: forecast.iter().take(HOURLY_POINTS).cloned().collect(),
            weekly: weekly_summary(&forecast),
            monthly,
        })
    }
}
