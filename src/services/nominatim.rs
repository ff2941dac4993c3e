use crate::constants::{DEFAULT_NOMINATIM_BASE_URL, USER_AGENT};
use crate::error::{AppError, Result};
use crate::models::{Coordinates, Place};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Free-text location lookup
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Place>>;
}

#[derive(Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_NOMINATIM_BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        NominatimClient {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for NominatimClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Place>> {
        let url = format!("{}/search", self.base_url);
        let limit = limit.to_string();

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("limit", limit.as_str()),
                ("addressdetails", "1"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Geocoding(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(status = %status, "Nominatim HTTP error {}", status);
            return Err(AppError::Geocoding(format!("HTTP {}", status)));
        }

        let results: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| AppError::Geocoding(format!("Failed to parse response: {}", e)))?;

        let places: Vec<Place> = results
            .into_iter()
            .filter_map(|result| match result.into_place() {
                Ok(place) => Some(place),
                Err(e) => {
                    tracing::debug!("Skipping geocoding result: {}", e);
                    None
                }
            })
            .collect();

        tracing::debug!(
            results = places.len(),
            "Geocoding '{}' returned {} places",
            query,
            places.len()
        );

        Ok(places)
    }
}

// Nominatim returns coordinates as strings
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    display_name: String,
    lat: String,
    lon: String,
}

impl NominatimPlace {
    fn into_place(self) -> std::result::Result<Place, String> {
        let lat: f64 = self
            .lat
            .parse()
            .map_err(|_| format!("Invalid latitude '{}'", self.lat))?;
        let lng: f64 = self
            .lon
            .parse()
            .map_err(|_| format!("Invalid longitude '{}'", self.lon))?;

        Ok(Place {
            display_name: self.display_name,
            coordinates: Coordinates::new(lat, lng)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_place() {
        let raw: NominatimPlace = serde_json::from_str(
            r#"{"place_id": 1, "display_name": "New York, United States", "lat": "40.7127281", "lon": "-74.0060152"}"#,
        )
        .unwrap();
        let place = raw.into_place().unwrap();

        assert_eq!(place.display_name, "New York, United States");
        assert_eq!(place.coordinates.lat, 40.7127281);
        assert_eq!(place.coordinates.lng, -74.0060152);
    }

    #[test]
    fn test_into_place_rejects_bad_numbers() {
        let raw = NominatimPlace {
            display_name: "Nowhere".to_string(),
            lat: "north".to_string(),
            lon: "0".to_string(),
        };
        assert!(raw.into_place().is_err());
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = NominatimClient::with_base_url("http://localhost:8080/".to_string());
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
