//! Sources for "use my location".

use std::{fmt::Debug, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{Config, error::GeolocationError, model::Coordinates};

const IP_LOOKUP_URL: &str = "http://ip-api.com/json";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, GeolocationError>;
}

/// A position known up front, from config or the command line.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl Geolocator for FixedLocation {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        Ok(self.0)
    }
}

/// No location capability on this host.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

#[async_trait]
impl Geolocator for NoGeolocation {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

/// Approximate position from the public IP address.
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    url: String,
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl Default for IpGeolocator {
    fn default() -> Self {
        Self::with_url(IP_LOOKUP_URL)
    }
}

impl IpGeolocator {
    pub fn with_url(url: &str) -> Self {
        Self { url: url.to_string() }
    }
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        let denied = |reason: String| {
            tracing::debug!(%reason, "IP geolocation failed");
            GeolocationError::Denied(reason)
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| denied(e.to_string()))?;

        let response = client.get(&self.url).send().await.map_err(|e| denied(e.to_string()))?;

        if !response.status().is_success() {
            return Err(denied(format!("lookup returned status {}", response.status())));
        }

        let body: IpLookupResponse = response.json().await.map_err(|e| denied(e.to_string()))?;

        if let ("success", Some(latitude), Some(longitude)) = (body.status.as_str(), body.lat, body.lon)
        {
            let position = Coordinates { latitude, longitude };
            tracing::info!(%position, "located via IP lookup");
            return Ok(position);
        }

        Err(denied(body.message.unwrap_or(body.status)))
    }
}

/// Pick a source: explicit coordinates win, then config, then IP lookup if enabled.
pub fn geolocator_from_config(
    config: &Config,
    explicit: Option<Coordinates>,
) -> Box<dyn Geolocator> {
    match explicit.or(config.location) {
        Some(position) => Box::new(FixedLocation(position)),
        None if config.ip_geolocation => Box::new(IpGeolocator::default()),
        None => Box::new(NoGeolocation),
    }
}
