use crate::{
    Config,
    error::ApiError,
    model::{CurrentWeather, Forecast, LocationQuery},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current conditions and the 3-hour forecast.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, query: &LocationQuery) -> Result<CurrentWeather, ApiError>;

    async fn forecast(&self, query: &LocationQuery) -> Result<Forecast, ApiError>;
}

/// Construct the OpenWeatherMap provider from config.
///
/// The credential is not validated here: a missing key is sent as empty and
/// the provider rejects the request.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    let api_key = match config.credential() {
        Some(key) => key.to_owned(),
        None => {
            tracing::warn!(
                "No OpenWeatherMap API key configured; requests will be rejected. \
                 Hint: run `weather configure` or set OPENWEATHERMAP_API_KEY."
            );
            String::new()
        }
    };

    let provider = match config.base_url.as_deref() {
        Some(base_url) => OpenWeatherProvider::with_base_url(api_key, base_url),
        None => OpenWeatherProvider::new(api_key),
    };

    Box::new(provider)
}
