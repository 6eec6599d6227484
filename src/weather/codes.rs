//! WMO weather interpretation codes

use std::ops::RangeInclusive;

/// Human label and pictograph for a weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub label: &'static str,
    pub icon: &'static str,
}

/// Pair used for codes missing from the table
pub const UNKNOWN: Condition = Condition {
    label: "Unknown",
    icon: "❓",
};

/// Ordered lookup table; the first matching range wins
const CODE_TABLE: &[(RangeInclusive<i32>, Condition)] = &[
    (0..=0, c("Clear Sky", "☀️")),
    (1..=1, c("Mainly Clear", "🌤️")),
    (2..=2, c("Partly Cloudy", "⛅")),
    (3..=3, c("Overcast", "☁️")),
    (45..=45, c("Fog", "🌫️")),
    (48..=48, c("Depositing Rime Fog", "🌫️")),
    (51..=51, c("Light Drizzle", "🌦️")),
    (53..=53, c("Moderate Drizzle", "🌦️")),
    (55..=55, c("Dense Drizzle", "🌧️")),
    (56..=56, c("Light Freezing Drizzle", "🌧️")),
    (57..=57, c("Dense Freezing Drizzle", "🌧️")),
    (61..=61, c("Slight Rain", "🌧️")),
    (63..=63, c("Moderate Rain", "🌧️")),
    (65..=65, c("Heavy Rain", "🌧️")),
    (66..=66, c("Light Freezing Rain", "🌧️")),
    (67..=67, c("Heavy Freezing Rain", "🌧️")),
    (71..=71, c("Slight Snow Fall", "❄️")),
    (73..=73, c("Moderate Snow Fall", "❄️")),
    (75..=75, c("Heavy Snow Fall", "❄️")),
    (77..=77, c("Snow Grains", "❄️")),
    (80..=80, c("Slight Rain Showers", "🌧️")),
    (81..=81, c("Moderate Rain Showers", "🌧️")),
    (82..=82, c("Violent Rain Showers", "🌧️")),
    (85..=85, c("Slight Snow Showers", "❄️")),
    (86..=86, c("Heavy Snow Showers", "❄️")),
    (95..=95, c("Thunderstorm", "⛈️")),
    (96..=96, c("Thunderstorm with slight hail", "⛈️")),
    (99..=99, c("Thunderstorm with heavy hail", "⛈️")),
];

const fn c(label: &'static str, icon: &'static str) -> Condition {
    Condition { label, icon }
}

/// Map a weather code to its condition, or [`UNKNOWN`]
pub fn describe(code: i32) -> Condition {
    CODE_TABLE
        .iter()
        .find(|(range, _)| range.contains(&code))
        .map(|(_, condition)| *condition)
        .unwrap_or(UNKNOWN)
}
