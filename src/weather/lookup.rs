//! Weather lookup outcomes
//!
//! Turns capability results into terminal, renderable states: location
//! denial becomes fallback data and fetch failures become display-only text.

use tracing::{debug, warn};

use crate::core::location::LocationProvider;
use crate::error::VisionError;
use crate::weather::client::WeatherClient;
use crate::weather::model::{PlaceReport, Unit, WeatherRecord};

/// Result of a local weather lookup
#[derive(Debug, Clone, PartialEq)]
pub enum LocalWeather {
    /// Fresh data for the device location
    Live(WeatherRecord),
    /// Location unavailable; fixed record shown instead
    Fallback(WeatherRecord),
    /// Location known but the fetch failed
    Failed(String),
}

impl LocalWeather {
    /// Record to display, if this outcome carries one
    pub fn record(&self) -> Option<&WeatherRecord> {
        match self {
            LocalWeather::Live(record) | LocalWeather::Fallback(record) => Some(record),
            LocalWeather::Failed(_) => None,
        }
    }
}

/// Locate the device and fetch its current conditions
pub async fn lookup_local(
    location: &dyn LocationProvider,
    client: &dyn WeatherClient,
) -> LocalWeather {
    let coords = match location.locate().await {
        Ok(coords) => coords,
        Err(e) => {
            debug!(error = %e, "location unavailable, using fallback weather");
            return LocalWeather::Fallback(WeatherRecord::fallback());
        }
    };

    match client.current(coords).await {
        Ok(record) => LocalWeather::Live(record),
        Err(e) => {
            warn!(error = %e, "local weather fetch failed");
            LocalWeather::Failed(short_message(&e))
        }
    }
}

/// Search a place; failures become a display string
pub async fn search_place(
    client: &dyn WeatherClient,
    place: &str,
    unit: Unit,
) -> std::result::Result<PlaceReport, String> {
    client.search(place, unit).await.map_err(|e| {
        warn!(error = %e, place, "place search failed");
        match e {
            VisionError::MissingApiKey | VisionError::InvalidInput(_) => short_message(&e),
            _ => "No results found".to_string(),
        }
    })
}

/// First line of an error message, for single-line display
fn short_message(err: &VisionError) -> String {
    err.to_string().lines().next().unwrap_or_default().to_string()
}
