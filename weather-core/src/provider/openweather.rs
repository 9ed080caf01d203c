use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::instrument;

use crate::{
    error::{ApiError, Endpoint},
    model::{Condition, CurrentWeather, Forecast, ForecastSample, LocationQuery},
};

use super::WeatherProvider;

pub const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Unit system requested from the provider. Presentation assumes °C and m/s.
const UNITS: &str = "metric";

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, OPENWEATHER_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        query: &LocationQuery,
    ) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.base_url, endpoint.path());

        let mut params = query.to_params();
        params.push(("units", UNITS.to_string()));
        params.push(("appid", self.api_key.clone()));

        // The request URL carries the credential.
        let res = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.without_url()))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| ApiError::Transport(e.without_url()))?;

        if !status.is_success() {
            tracing::debug!(%endpoint, %status, "OpenWeather rejected request");
            return Err(ApiError::Rejected { endpoint, status, body: truncate_body(&body) });
        }

        serde_json::from_str(&body).map_err(|source| ApiError::Decode { endpoint, source })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self, query), fields(query = %query), level = "debug")]
    async fn current(&self, query: &LocationQuery) -> Result<CurrentWeather, ApiError> {
        let parsed: OwCurrentResponse = self.get(Endpoint::Current, query).await?;
        tracing::debug!(location = %parsed.name, "received current conditions");
        Ok(parsed.into())
    }

    #[instrument(skip(self, query), fields(query = %query), level = "debug")]
    async fn forecast(&self, query: &LocationQuery) -> Result<Forecast, ApiError> {
        let parsed: OwForecastResponse = self.get(Endpoint::Forecast, query).await?;
        tracing::debug!(samples = parsed.list.len(), "received forecast");
        Ok(parsed.into())
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    #[serde(default)]
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: u32,
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    dt_txt: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn first_condition(weather: Vec<OwWeather>) -> Condition {
    weather
        .into_iter()
        .next()
        .map(|w| Condition { id: w.id, main: w.main, description: w.description, icon: w.icon })
        .unwrap_or_default()
}

impl From<OwCurrentResponse> for CurrentWeather {
    fn from(parsed: OwCurrentResponse) -> Self {
        CurrentWeather {
            location_name: parsed.name,
            country: parsed.sys.country,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            pressure_hpa: parsed.main.pressure,
            wind_speed_mps: parsed.wind.speed,
            condition: first_condition(parsed.weather),
        }
    }
}

impl From<OwForecastResponse> for Forecast {
    fn from(parsed: OwForecastResponse) -> Self {
        let samples = parsed
            .list
            .into_iter()
            .map(|entry| ForecastSample {
                timestamp: entry.dt,
                day_stamp: entry.dt_txt,
                temperature_c: entry.main.temp,
                feels_like_c: entry.main.feels_like,
                humidity_pct: entry.main.humidity,
                condition: first_condition(entry.weather),
            })
            .collect();

        Forecast { samples }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
