//! Device location capability

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

#[cfg(test)]
use mockall::automock;

use crate::error::{Result, VisionError};
use crate::weather::model::Coordinates;

/// IP geolocation endpoint
const IP_LOCATION_URL: &str = "http://ip-api.com/json/?fields=status,message,lat,lon,city";

/// Single-shot, asynchronous source of the device position
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Resolve the current position, or fail with [`VisionError::LocationUnavailable`]
    async fn locate(&self) -> Result<Coordinates>;
}

/// Fixed coordinates from configuration or the command line
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation {
    coords: Coordinates,
}

impl FixedLocation {
    pub fn new(coords: Coordinates) -> Self {
        Self { coords }
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn locate(&self) -> Result<Coordinates> {
        Ok(self.coords)
    }
}

/// Provider used when no location source is configured; always denies
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationProvider for NoLocation {
    async fn locate(&self) -> Result<Coordinates> {
        Err(VisionError::LocationUnavailable(
            "no location source configured".into(),
        ))
    }
}

/// Approximate location from the public IP address
#[derive(Debug, Clone, Default)]
pub struct IpLocation {
    client: Client,
}

impl IpLocation {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    city: Option<String>,
}

impl IpApiResponse {
    fn into_coordinates(self) -> Result<Coordinates> {
        if self.status != "success" {
            return Err(VisionError::LocationUnavailable(
                self.message.unwrap_or_else(|| "IP lookup failed".into()),
            ));
        }
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => {
                debug!(city = self.city.as_deref().unwrap_or("?"), "located by IP");
                Ok(Coordinates::new(lat, lon))
            }
            _ => Err(VisionError::LocationUnavailable(
                "IP lookup returned no coordinates".into(),
            )),
        }
    }
}

#[async_trait]
impl LocationProvider for IpLocation {
    async fn locate(&self) -> Result<Coordinates> {
        let response = self
            .client
            .get(IP_LOCATION_URL)
            .send()
            .await
            .map_err(|e| VisionError::LocationUnavailable(e.to_string()))?;

        let body: IpApiResponse = response
            .json()
            .await
            .map_err(|e| VisionError::LocationUnavailable(e.to_string()))?;

        body.into_coordinates()
    }
}

/// Pick a provider: fixed coordinates win over IP lookup; neither means denial
pub fn select_provider(coords: Option<Coordinates>, ip_lookup: bool) -> Arc<dyn LocationProvider> {
    match coords {
        Some(coords) => Arc::new(FixedLocation::new(coords)),
        None if ip_lookup => Arc::new(IpLocation::new()),
        None => Arc::new(NoLocation),
    }
}
