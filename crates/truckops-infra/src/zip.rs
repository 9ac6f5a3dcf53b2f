//! Postal-code lookup against the public Zippopotam service
//!
//! A failed lookup is never fatal: the caller surfaces a transient
//! message and leaves the city/state fields alone. There is no retry.

use serde::Deserialize;
use truckops_types::{Error, Result};

const ZIP_API_BASE: &str = "https://api.zippopotam.us/us";

/// Resolved city and state for a ZIP code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityState {
    pub city: String,
    pub state: String,
}

#[derive(Debug, Deserialize)]
struct ZipResponse {
    places: Vec<ZipPlace>,
}

#[derive(Debug, Deserialize)]
struct ZipPlace {
    #[serde(rename = "place name")]
    place_name: String,
    #[serde(rename = "state abbreviation")]
    state_abbreviation: String,
}

#[derive(Debug, Clone)]
pub struct ZipLookupClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl ZipLookupClient {
    pub fn new() -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;
        Ok(Self {
            http,
            base_url: ZIP_API_BASE.to_string(),
        })
    }

    /// Resolve a 5-digit ZIP to city and state.
    pub fn lookup(&self, zip: &str) -> Result<CityState> {
        let resp = self
            .http
            .get(format!("{}/{}", self.base_url, zip))
            .send()
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(%zip, %status, "ZIP lookup returned non-success");
            return Err(Error::Network(format!("ZIP lookup failed with {status}")));
        }

        let body = resp.text().map_err(|e| Error::Network(e.to_string()))?;
        parse_zip_response(&body)
    }
}

/// Pull the first place out of a lookup response body.
fn parse_zip_response(body: &str) -> Result<CityState> {
    let parsed: ZipResponse = serde_json::from_str(body)
        .map_err(|e| Error::Network(format!("Malformed ZIP response: {e}")))?;
    let place = parsed
        .places
        .into_iter()
        .next()
        .ok_or_else(|| Error::Network("ZIP response carried no places".to_string()))?;
    Ok(CityState {
        city: place.place_name,
        state: place.state_abbreviation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_service_response_shape() {
        let body = r#"{
            "post code": "30301",
            "country": "United States",
            "places": [
                { "place name": "Atlanta", "state": "Georgia", "state abbreviation": "GA" }
            ]
        }"#;
        let resolved = parse_zip_response(body).unwrap();
        assert_eq!(
            resolved,
            CityState {
                city: "Atlanta".to_string(),
                state: "GA".to_string()
            }
        );
    }

    #[test]
    fn empty_places_is_an_error() {
        let err = parse_zip_response(r#"{"places": []}"#).unwrap_err();
        assert!(matches!(err, Error::Network(_)));
    }

    #[test]
    fn malformed_body_is_an_error() {
        let err = parse_zip_response("<html>oops</html>").unwrap_err();
        assert!(matches!(err, Error::Network(_)));
    }
}
