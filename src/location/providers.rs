//! External location providers: Google Geocoding and Places Nearby Search.
//!
//! Both calls degrade to empty data on any failure; the enrichment run
//! never stops because one branch could not be looked up.

use super::types::{GeocodeResult, NearbyPlace};
use crate::error::AtlasError;
use serde::Deserialize;
use std::time::Duration;

/// Default catchment for the nearby search, in metres.
pub const DEFAULT_RADIUS_M: u32 = 1000;

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const NEARBY_URL: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";
const LANGUAGE: &str = "th";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(12);
const USER_AGENT: &str = concat!("BranchAtlas/", env!("CARGO_PKG_VERSION"));

/// The two lookups the pipeline needs per coordinate pair.
pub trait LocationProvider {
    /// Best reverse-geocoding match, or `None` when there is none or the
    /// call failed.
    fn reverse_geocode(&self, lat: &str, lon: &str) -> Option<GeocodeResult>;

    /// Places within `radius_m` of the point. Empty on failure.
    fn nearby_places(&self, lat: &str, lon: &str, radius_m: u32) -> Vec<NearbyPlace>;
}

// ─── Response shapes ────────────────────────────────────────────

#[derive(Deserialize, Debug)]
struct GeocodeResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Deserialize, Debug)]
struct NearbyResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    results: Vec<NearbyPlace>,
    #[serde(default)]
    error_message: Option<String>,
}

/// First result of a geocode response when the status is OK.
fn parse_geocode(body: serde_json::Value) -> Result<Option<GeocodeResult>, AtlasError> {
    let resp: GeocodeResponse = serde_json::from_value(body)
        .map_err(|e| AtlasError::InvalidResponse(e.to_string()))?;

    if resp.status != "OK" {
        if let Some(msg) = resp.error_message {
            log::debug!("Geocoding status={} ({})", resp.status, msg);
        }
        return Ok(None);
    }
    Ok(resp.results.into_iter().next())
}

/// Places from a nearby-search response. Results are kept even when the
/// status is unexpected; the status is only reported.
fn parse_nearby(body: serde_json::Value) -> Result<Vec<NearbyPlace>, AtlasError> {
    let resp: NearbyResponse = serde_json::from_value(body)
        .map_err(|e| AtlasError::InvalidResponse(e.to_string()))?;

    if resp.status != "OK" && resp.status != "ZERO_RESULTS" {
        match resp.error_message {
            Some(msg) => log::warn!("[Places API] status={} ({})", resp.status, msg),
            None => log::warn!("[Places API] status={}", resp.status),
        }
    }
    Ok(resp.results)
}

// ─── Google Maps client ─────────────────────────────────────────

/// Blocking Google Maps client.
pub struct GoogleMaps {
    api_key: String,
}

impl GoogleMaps {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    fn get_json(&self, url: &str, params: &[(&str, &str)]) -> Result<serde_json::Value, AtlasError> {
        let mut request = ureq::get(url)
            .set("User-Agent", USER_AGENT)
            .timeout(REQUEST_TIMEOUT);
        for (key, value) in params {
            request = request.query(key, value);
        }
        let response = request
            .query("language", LANGUAGE)
            .query("key", &self.api_key)
            .call()
            .map_err(|e| AtlasError::Network(e.to_string()))?;

        response
            .into_json()
            .map_err(|e| AtlasError::InvalidResponse(e.to_string()))
    }

    fn try_reverse_geocode(&self, lat: &str, lon: &str) -> Result<Option<GeocodeResult>, AtlasError> {
        let latlng = format!("{},{}", lat.trim(), lon.trim());
        let body = self.get_json(GEOCODE_URL, &[("latlng", &latlng)])?;
        parse_geocode(body)
    }

    fn try_nearby_places(&self, lat: &str, lon: &str, radius_m: u32) -> Result<Vec<NearbyPlace>, AtlasError> {
        let location = format!("{},{}", lat.trim(), lon.trim());
        let radius = radius_m.to_string();
        let body = self.get_json(NEARBY_URL, &[("location", &location), ("radius", &radius)])?;
        parse_nearby(body)
    }
}

impl LocationProvider for GoogleMaps {
    fn reverse_geocode(&self, lat: &str, lon: &str) -> Option<GeocodeResult> {
        match self.try_reverse_geocode(lat, lon) {
            Ok(result) => result,
            Err(e) => {
                log::warn!("[Geocoding API] {},{}: {}", lat.trim(), lon.trim(), e);
                None
            }
        }
    }

    fn nearby_places(&self, lat: &str, lon: &str, radius_m: u32) -> Vec<NearbyPlace> {
        self.try_nearby_places(lat, lon, radius_m).unwrap_or_else(|e| {
            log::warn!("[Places API] error: {}", e);
            Vec::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_geocode_first_result() {
        let body = json!({
            "status": "OK",
            "results": [
                {
                    "formatted_address": "ถนนสุขุมวิท แขวงคลองเตยเหนือ",
                    "address_components": [
                        {"long_name": "31", "short_name": "31", "types": ["street_number"]},
                        {"long_name": "ถนนสุขุมวิท", "short_name": "ถ. สุขุมวิท", "types": ["route"]}
                    ]
                },
                {"address_components": []}
            ]
        });
        let result = parse_geocode(body).unwrap().unwrap();
        assert_eq!(result.road_name(), Some("ถนนสุขุมวิท"));
        assert_eq!(result.address_components.len(), 2);
    }

    #[test]
    fn test_parse_geocode_not_ok() {
        let body = json!({"status": "REQUEST_DENIED", "error_message": "bad key", "results": []});
        assert!(parse_geocode(body).unwrap().is_none());

        let body = json!({"status": "ZERO_RESULTS", "results": []});
        assert!(parse_geocode(body).unwrap().is_none());
    }

    #[test]
    fn test_parse_geocode_malformed() {
        let body = json!({"status": "OK", "results": "nope"});
        assert!(matches!(parse_geocode(body), Err(AtlasError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_nearby() {
        let body = json!({
            "status": "OK",
            "results": [
                {"name": "โรงพยาบาลกรุงเทพ", "types": ["hospital", "point_of_interest"], "vicinity": "ซอยศูนย์วิจัย"},
                {"name": "Café Amazon", "types": ["cafe", "food"]},
                {"types": ["store"]}
            ]
        });
        let places = parse_nearby(body).unwrap();
        assert_eq!(places.len(), 3);
        assert_eq!(places[0].name, "โรงพยาบาลกรุงเทพ");
        assert_eq!(places[0].types, vec!["hospital", "point_of_interest"]);
        assert_eq!(places[2].name, "");
    }

    #[test]
    fn test_parse_nearby_zero_results() {
        let body = json!({"status": "ZERO_RESULTS", "results": []});
        assert!(parse_nearby(body).unwrap().is_empty());

        let body = json!({"status": "OVER_QUERY_LIMIT"});
        assert!(parse_nearby(body).unwrap().is_empty());
    }
}
