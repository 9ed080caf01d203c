use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// Which provider endpoint a request went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Current,
    Forecast,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Current => "weather",
            Endpoint::Forecast => "forecast",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Current => f.write_str("current conditions"),
            Endpoint::Forecast => f.write_str("forecast"),
        }
    }
}

/// Failure of a single provider request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("OpenWeather {endpoint} request failed with status {status}: {body}")]
    Rejected {
        endpoint: Endpoint,
        status: StatusCode,
        body: String,
    },

    /// Never carries the request URL.
    #[error("Failed to reach OpenWeather: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Failed to parse OpenWeather {endpoint} JSON: {source}")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure of the host geolocation capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("location access denied or unavailable: {0}")]
    Denied(String),
    #[error("no geolocation source available")]
    Unsupported,
}

/// The message shown to the user when an attempt fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Location not found. Please try another search term.")]
    LocationNotFound,

    #[error("Could not fetch weather for your location.")]
    PositionNotFound,

    #[error("Could not fetch forecast data.")]
    ForecastUnavailable,

    #[error(
        "Unable to retrieve your location. Please allow location access or enter a location manually."
    )]
    GeolocationDenied,

    #[error("Geolocation is not supported on this device.")]
    GeolocationUnsupported,

    #[error("{}", unknown_message(.0))]
    Unknown(String),
}

impl FetchError {
    /// Map a provider failure onto the user-facing taxonomy.
    ///
    /// Only a rejected status is classified; transport and decode failures
    /// keep their own message.
    pub fn from_api(err: &ApiError, by_coordinates: bool) -> Self {
        match err {
            ApiError::Rejected { endpoint: Endpoint::Current, .. } if by_coordinates => {
                FetchError::PositionNotFound
            }
            ApiError::Rejected { endpoint: Endpoint::Current, .. } => FetchError::LocationNotFound,
            ApiError::Rejected { endpoint: Endpoint::Forecast, .. } => {
                FetchError::ForecastUnavailable
            }
            other => FetchError::Unknown(other.to_string()),
        }
    }
}

impl From<GeolocationError> for FetchError {
    fn from(err: GeolocationError) -> Self {
        match err {
            GeolocationError::Denied(_) => FetchError::GeolocationDenied,
            GeolocationError::Unsupported => FetchError::GeolocationUnsupported,
        }
    }
}

fn unknown_message(message: &str) -> &str {
    if message.trim().is_empty() { "An unknown error occurred" } else { message }
}
