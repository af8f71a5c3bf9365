//! IP-based geolocation: resolve the machine's public coordinates.
//! Uses ip-api.com - free, no API key required.

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{error::LocateError, model::Coordinates};

pub const DEFAULT_BASE_URL: &str = "http://ip-api.com";

#[derive(Debug, Clone)]
pub struct IpLocator {
    http: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl Default for IpLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IpLocator {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_owned())
    }

    /// Point the locator at a different endpoint, e.g. a mock server in tests.
    pub fn with_base_url(base_url: String) -> Self {
        Self { http: Client::new(), base_url }
    }

    /// One-shot lookup of the current public coordinates. Every failure mode
    /// maps to the same fixed user-facing error; the detail goes to the log.
    pub async fn locate(&self) -> Result<Coordinates, LocateError> {
        let url = format!("{}/json", self.base_url);

        let res = match self.http.get(&url).send().await {
            Ok(res) => res,
            Err(err) => {
                debug!(error = %err, "geolocation request failed");
                return Err(LocateError::Unavailable);
            }
        };

        if !res.status().is_success() {
            debug!(status = %res.status(), "geolocation service rejected the request");
            return Err(LocateError::Unavailable);
        }

        let parsed: IpApiResponse = match res.json().await {
            Ok(parsed) => parsed,
            Err(err) => {
                debug!(error = %err, "geolocation response could not be decoded");
                return Err(LocateError::Unavailable);
            }
        };

        if parsed.status != "success" {
            debug!(status = %parsed.status, "geolocation lookup unsuccessful");
            return Err(LocateError::Unavailable);
        }

        match (parsed.lat, parsed.lon) {
            (Some(lat), Some(lon)) => Ok(Coordinates { lat, lon }),
            _ => {
                debug!("geolocation response carried no coordinates");
                Err(LocateError::Unavailable)
            }
        }
    }
}
