//! Weather lookup
//!
//! Current conditions by coordinates (Open-Meteo), place-name search with
//! forecast (OpenWeatherMap) and monthly history (Open-Meteo archive), all
//! normalized into display records.

pub mod aggregate;
pub mod client;
pub mod codes;
pub mod lookup;
pub mod model;
pub mod open_meteo;
pub mod openweather;
pub mod refresh;

pub use client::{HttpWeatherClient, WeatherClient};
pub use lookup::{lookup_local, search_place, LocalWeather};
pub use model::{Coordinates, PlaceReport, Unit, WeatherRecord};
pub use refresh::{spawn_refresh, RefreshHandle};
