//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The OpenWeatherMap client behind the [`WeatherProvider`] trait
//! - Daily bucketing of the 3-hour forecast
//! - View state, the events that change it, and the [`Session`] driving fetch attempts
//! - Plain-text rendering
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod forecast;
pub mod geolocation;
pub mod model;
pub mod present;
pub mod provider;
pub mod session;
pub mod state;

pub use config::Config;
pub use error::{ApiError, FetchError, GeolocationError};
pub use forecast::{DailyForecastEntry, daily_forecast};
pub use geolocation::{Geolocator, geolocator_from_config};
pub use model::{Coordinates, CurrentWeather, Forecast, ForecastSample, LocationQuery};
pub use provider::{WeatherProvider, provider_from_config};
pub use session::Session;
pub use state::{AttemptId, Event, ViewState};
