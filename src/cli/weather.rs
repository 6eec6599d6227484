//! Weather CLI command handlers

use crate::cli::commands::WeatherCommand;
use crate::core::config::Config;
use crate::core::location::select_provider;
use crate::error::{Result, VisionError};
use crate::weather::client::{HttpWeatherClient, WeatherClient};
use crate::weather::lookup::{lookup_local, LocalWeather};
use crate::weather::model::{Coordinates, PlaceReport, Unit, WeatherRecord};

/// Handle weather commands
pub async fn handle_weather(command: WeatherCommand) -> Result<()> {
    let config = Config::load()?;
    let client = HttpWeatherClient::from_config(&config);

    match command {
        WeatherCommand::Here { lat, lon } => {
            let coords = match (lat, lon) {
                (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
                _ => config.coordinates(),
            };
            let location = select_provider(coords, config.ip_location);

            match lookup_local(location.as_ref(), &client).await {
                LocalWeather::Live(record) => print!("{}", format_record(&record)),
                LocalWeather::Fallback(record) => {
                    println!("Location unavailable; showing default conditions.");
                    println!();
                    print!("{}", format_record(&record));
                }
                LocalWeather::Failed(message) => return Err(VisionError::WeatherApi(message)),
            }
        }
        WeatherCommand::Search { place, unit } => {
            let unit = unit.map(Unit::from).unwrap_or(config.unit);
            let report = client.search(&place, unit).await?;
            print!("{}", format_report(&report));
        }
    }
    Ok(())
}

/// Multi-line rendering of a local weather record
pub fn format_record(record: &WeatherRecord) -> String {
    let lines = [
        format!(
            "{} {}  {:.0}°C",
            record.icon, record.condition, record.temperature_c
        ),
        format!("Wind:    {:.0} km/h", record.wind_speed_kmh),
        format!("Sunrise: {}", record.sunrise_display()),
        format!("Sunset:  {}", record.sunset_display()),
    ];
    lines.iter().map(|line| format!("{}\n", line)).collect()
}

/// Multi-line rendering of a place report
pub fn format_report(report: &PlaceReport) -> String {
    let temp = report.unit.temperature_suffix();
    let wind = report.unit.wind_suffix();
    let mut lines = Vec::new();

    if report.country.is_empty() {
        lines.push(report.place.clone());
    } else {
        lines.push(format!("{}, {}", report.place, report.country));
    }
    lines.push(report.coordinates.to_string());

    let current = &report.current;
    lines.push(String::new());
    lines.push("Current".to_string());
    lines.push(format!(
        "  {:.1}{}  {}  wind {:.1} {}  humidity {}%",
        current.temperature, temp, current.description, current.wind_speed, wind, current.humidity
    ));

    lines.push(String::new());
    lines.push("Hourly".to_string());
    lines.extend(report.hourly.iter().map(|point| {
        format!(
            "  {}  {:>6.1}{}  {}",
            point.time.format("%a %H:%M"),
            point.temperature,
            temp,
            point.description
        )
    }));

    lines.push(String::new());
    lines.push("Weekly".to_string());
    lines.extend(report.weekly.iter().map(|day| {
        format!(
            "  {}  {:>6.1}{} / {:>6.1}{}  {}",
            day.date.format("%a %d %b"),
            day.min,
            temp,
            day.max,
            temp,
            day.description
        )
    }));

    lines.push(String::new());
    lines.push("Monthly (°C)".to_string());
    match &report.monthly {
        Ok(months) if months.is_empty() => lines.push("  No data".to_string()),
        Ok(months) => lines.extend(months.iter().map(|month| {
            format!(
                "  {}  min {:.1}  max {:.1}",
                month.month.format("%B %Y"),
                month.min,
                month.max
            )
        })),
        Err(message) => lines.push(format!("  {}", message)),
    }

    lines.iter().map(|line| format!("{}\n", line)).collect()
}
