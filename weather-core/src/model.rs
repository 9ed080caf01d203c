use std::fmt;

use serde::{Deserialize, Serialize};

/// What the provider is asked about: a free-text place or a coordinate pair.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    Text(String),
    Coordinates(Coordinates),
}

impl LocationQuery {
    /// Query-string pairs selecting the location on the provider side.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        match self {
            LocationQuery::Text(text) => vec![("q", text.clone())],
            LocationQuery::Coordinates(c) => vec![
                ("lat", c.latitude.to_string()),
                ("lon", c.longitude.to_string()),
            ],
        }
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationQuery::Text(text) => f.write_str(text),
            LocationQuery::Coordinates(c) => write!(f, "{c}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Weather condition descriptor as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: u32,
    /// Short group code, e.g. "Rain".
    pub main: String,
    pub description: String,
    /// Provider icon code, e.g. "10d".
    pub icon: String,
}

impl Default for Condition {
    fn default() -> Self {
        Self {
            id: 0,
            main: String::new(),
            description: "unknown".to_string(),
            icon: String::new(),
        }
    }
}

/// Snapshot of current conditions. Replaced wholesale on every successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub location_name: String,
    pub country: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed_mps: f64,
    pub condition: Condition,
}

/// One 3-hour forecast slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    /// Epoch seconds.
    pub timestamp: i64,
    /// Provider day stamp, "YYYY-MM-DD HH:MM:SS".
    pub day_stamp: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub condition: Condition,
}

impl ForecastSample {
    /// Calendar-day part of the day stamp.
    pub fn day_key(&self) -> &str {
        match self.day_stamp.split_once(' ') {
            Some((day, _)) => day,
            None => &self.day_stamp,
        }
    }
}

/// Forecast samples in provider order (ascending timestamps).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub samples: Vec<ForecastSample>,
}
