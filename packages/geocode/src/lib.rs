#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Reverse geocoding client (Nominatim-style `reverse` endpoint).
//!
//! Called from the browser-equivalent position: directly, with public
//! credentials, while a citizen captures a violation or accident
//! location. Failures here are non-fatal by contract — the submission
//! proceeds with blank address fields and usable coordinates. Callers
//! that want that behavior use [`reverse_or_none`]; [`reverse`] exposes
//! the underlying error for callers that care.
//!
//! The public Nominatim instance rate-limits aggressively (1 request per
//! second); rate-limit responses get their own error variant so callers
//! can tell them apart from outages.
//!
//! See <https://nominatim.org/release-docs/develop/api/Reverse/>

use thiserror::Error;

/// A reverse-geocoded street address.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAddress {
    /// Display address for the coordinate pair.
    pub address: String,
    /// Latitude echoed by the geocoder.
    pub latitude: f64,
    /// Longitude echoed by the geocoder.
    pub longitude: f64,
}

/// Errors from reverse geocoding.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,
}

/// Resolves a coordinate pair to a street address.
///
/// # Errors
///
/// Returns [`GeocodeError`] if the HTTP request fails, the service rate
/// limits, or the response cannot be parsed.
pub async fn reverse(
    client: &reqwest::Client,
    base_url: &str,
    latitude: f64,
    longitude: f64,
) -> Result<Option<ResolvedAddress>, GeocodeError> {
    let resp = client
        .get(base_url)
        .query(&[
            ("lat", latitude.to_string().as_str()),
            ("lon", longitude.to_string().as_str()),
            ("format", "jsonv2"),
        ])
        .send()
        .await?;

    if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(GeocodeError::RateLimited);
    }

    let body: serde_json::Value = resp.json().await?;
    parse_response(&body)
}

/// Resolves a coordinate pair, degrading to `None` on any failure.
///
/// This is the submission-flow entry point: a geocoder outage must never
/// block a report, so the failure is logged and swallowed here.
pub async fn reverse_or_none(
    client: &reqwest::Client,
    base_url: &str,
    latitude: f64,
    longitude: f64,
) -> Option<ResolvedAddress> {
    match reverse(client, base_url, latitude, longitude).await {
        Ok(resolved) => resolved,
        Err(e) => {
            log::warn!("Reverse geocoding failed for ({latitude}, {longitude}): {e}");
            None
        }
    }
}

/// A reusable handle bundling an HTTP client with the reverse endpoint.
///
/// Submission flows hold one of these (or `None` when geocoding is not
/// configured — the degraded path and the disabled path look the same to
/// callers).
#[derive(Debug, Clone)]
pub struct ReverseGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl ReverseGeocoder {
    /// Creates a geocoder against the given reverse endpoint.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.to_owned(),
        }
    }

    /// Resolves a coordinate pair to a street address.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] on request, rate-limit, or parse failure.
    pub async fn reverse(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<ResolvedAddress>, GeocodeError> {
        reverse(&self.client, &self.base_url, latitude, longitude).await
    }

    /// Resolves a coordinate pair, degrading to `None` on any failure.
    pub async fn reverse_or_none(&self, latitude: f64, longitude: f64) -> Option<ResolvedAddress> {
        reverse_or_none(&self.client, &self.base_url, latitude, longitude).await
    }
}

/// Parses a Nominatim reverse response.
fn parse_response(body: &serde_json::Value) -> Result<Option<ResolvedAddress>, GeocodeError> {
    // Nominatim reports "unable to geocode" as an error object, not an
    // HTTP failure. Treat it as a miss.
    if body.get("error").is_some() {
        return Ok(None);
    }

    let Some(display_name) = body["display_name"].as_str() else {
        return Err(GeocodeError::Parse {
            message: "Missing display_name in reverse response".to_string(),
        });
    };

    let lat = body["lat"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| GeocodeError::Parse {
            message: "Missing lat in reverse response".to_string(),
        })?;

    let lon = body["lon"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| GeocodeError::Parse {
            message: "Missing lon in reverse response".to_string(),
        })?;

    Ok(Some(ResolvedAddress {
        address: display_name.to_owned(),
        latitude: lat,
        longitude: lon,
    }))
}
