//! Current-position lookup.
//!
//! A position is requested once per session. Failure is terminal for the
//! session's map features: the caller reports it and carries on without a
//! map, never retrying.

use super::config::{GeolocationConfig, GeolocationProvider};
use super::workout::Coords;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeolocationError {
    #[error("position request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("position service answered without coordinates: {0}")]
    Rejected(String),
    #[error("no home position configured")]
    NoHome,
}

#[allow(async_fn_in_trait)]
pub trait Geolocator {
    async fn locate(&self) -> Result<Coords, GeolocationError>;
}

/// Looks the position up from the public IP address.
#[derive(Debug)]
pub struct IpGeolocator {
    client: Client,
    url: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct IpLocation {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl IpGeolocator {
    pub fn new(url: &str, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            url: url.to_string(),
            timeout,
        }
    }
}

impl Geolocator for IpGeolocator {
    async fn locate(&self) -> Result<Coords, GeolocationError> {
        let response = self.client.get(&self.url).timeout(self.timeout).send().await?.error_for_status()?;
        let location = response.json::<IpLocation>().await?;

        if location.status.as_deref() == Some("fail") {
            return Err(GeolocationError::Rejected(location.message.unwrap_or_default()));
        }
        match (location.lat, location.lon) {
            (Some(lat), Some(lon)) => Ok(Coords::new(lat, lon)),
            _ => Err(GeolocationError::Rejected(location.message.unwrap_or_default())),
        }
    }
}

/// Always answers with the configured position.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Option<Coords>);

impl Geolocator for FixedLocation {
    async fn locate(&self) -> Result<Coords, GeolocationError> {
        self.0.ok_or(GeolocationError::NoHome)
    }
}

/// The configured geolocation source.
#[derive(Debug)]
pub enum Locator {
    Ip(IpGeolocator),
    Fixed(FixedLocation),
}

impl Locator {
    pub fn from_config(config: &GeolocationConfig) -> Self {
        match config.provider {
            GeolocationProvider::Ip => Locator::Ip(IpGeolocator::new(&config.service_url, Duration::from_secs(config.timeout))),
            GeolocationProvider::Fixed => Locator::Fixed(FixedLocation(config.home)),
        }
    }
}

impl Geolocator for Locator {
    async fn locate(&self) -> Result<Coords, GeolocationError> {
        match self {
            Locator::Ip(locator) => locator.locate().await,
            Locator::Fixed(locator) => locator.locate().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_location() {
        let located = FixedLocation(Some(Coords::new(38.7, -9.1))).locate().await.unwrap();
        assert_eq!(located, Coords::new(38.7, -9.1));

        assert!(matches!(FixedLocation(None).locate().await, Err(GeolocationError::NoHome)));
    }

    #[tokio::test]
    async fn test_locator_from_config() {
        let config = GeolocationConfig {
            provider: GeolocationProvider::Fixed,
            home: Some(Coords::new(1.0, 2.0)),
            ..GeolocationConfig::default()
        };

        let locator = Locator::from_config(&config);

        assert!(matches!(locator, Locator::Fixed(_)));
        assert_eq!(locator.locate().await.unwrap(), Coords::new(1.0, 2.0));
    }

    #[tokio::test]
    async fn test_unreachable_service_fails() {
        // Nothing listens on the local discard port.
        let locator = IpGeolocator::new("http://127.0.0.1:9/json", Duration::from_millis(500));
        assert!(matches!(locator.locate().await, Err(GeolocationError::Request(_))));
    }
}
