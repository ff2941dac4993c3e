use crate::constants::{DEFAULT_OPENROUTE_BASE_URL, DEFAULT_ORACLE_TIMEOUT_SECONDS};
use crate::error::{AppError, Result};
use crate::models::Coordinates;
use crate::services::routing::{DirectionsResponse, RoutingOracle};
use async_trait::async_trait;
use geojson::{FeatureCollection, Value};
use reqwest::{header, Client};
use serde::Serialize;
use std::time::Duration;

/// Walking profile; loops are for running or walking only
const WALKING_PROFILE: &str = "foot-walking";

/// OpenRouteService caps a directions request at 50 waypoints
const MAX_WAYPOINTS: usize = 50;

/// Path weightings for foot profiles (0 = ignore, 1 = strongest preference)
const GREEN_WEIGHTING: f64 = 0.5;
const QUIET_WEIGHTING: f64 = 0.5;

/// How the client authenticates with the directions API.
#[derive(Clone, Debug)]
pub enum AuthMode {
    /// Default: raw key in the `Authorization` header (direct OpenRouteService).
    ApiKeyHeader,
    /// Proxy mode: send `Authorization: Bearer` header.
    BearerHeader,
}

#[derive(Clone)]
pub struct OpenRouteClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    auth_mode: AuthMode,
    timeout: Duration,
}

impl OpenRouteClient {
    pub fn new(api_key: Option<String>) -> Self {
        OpenRouteClient {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_OPENROUTE_BASE_URL.to_string(),
            auth_mode: AuthMode::ApiKeyHeader,
            timeout: Duration::from_secs(DEFAULT_ORACLE_TIMEOUT_SECONDS),
        }
    }

    pub fn with_config(
        api_key: Option<String>,
        base_url: String,
        auth_mode: AuthMode,
        timeout: Duration,
    ) -> Self {
        OpenRouteClient {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_mode,
            timeout,
        }
    }

    fn directions_url(&self) -> String {
        format!("{}/v2/directions/{}/geojson", self.base_url, WALKING_PROFILE)
    }
}

#[async_trait]
impl RoutingOracle for OpenRouteClient {
    fn ensure_configured(&self) -> Result<()> {
        match self.api_key {
            Some(ref key) if !key.trim().is_empty() => Ok(()),
            _ => Err(AppError::Configuration(
                "OpenRouteService API key is not configured".to_string(),
            )),
        }
    }

    /// Get a walking route through the waypoints, in order.
    /// Returns the full path with elevation and the reported distance.
    async fn get_directions(&self, waypoints: &[Coordinates]) -> Result<DirectionsResponse> {
        self.ensure_configured()?;
        let api_key = self.api_key.as_deref().unwrap_or_default();

        if waypoints.len() < 2 {
            return Err(AppError::InvalidRequest(
                "At least 2 waypoints required".to_string(),
            ));
        }
        if waypoints.len() > MAX_WAYPOINTS {
            return Err(AppError::InvalidRequest(format!(
                "Maximum {} waypoints allowed",
                MAX_WAYPOINTS
            )));
        }

        let body = DirectionsRequest::walking_loop(waypoints);

        tracing::debug!(
            waypoints = waypoints.len(),
            profile = WALKING_PROFILE,
            "OpenRouteService request: {} waypoints, profile {}",
            waypoints.len(),
            WALKING_PROFILE
        );

        let mut request = self
            .client
            .post(self.directions_url())
            .timeout(self.timeout)
            .header(header::ACCEPT, "application/json, application/geo+json")
            .json(&body);

        match self.auth_mode {
            AuthMode::ApiKeyHeader => {
                request = request.header(header::AUTHORIZATION, api_key);
            }
            AuthMode::BearerHeader => {
                request = request.bearer_auth(api_key);
            }
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::RoutingService(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                status = %status,
                waypoints = waypoints.len(),
                "OpenRouteService HTTP error {}: {}",
                status, error_text
            );
            return Err(AppError::RoutingService(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::RoutingService(format!("Failed to read response: {}", e)))?;
        let directions = parse_directions(&text)?;

        tracing::debug!(
            distance_km = %format!("{:.2}", directions.distance_km()),
            path_points = directions.geometry.len(),
            "OpenRouteService response: {:.2}km, {} path points",
            directions.distance_km(),
            directions.geometry.len()
        );

        Ok(directions)
    }

    fn name(&self) -> &'static str {
        "openrouteservice"
    }
}

/// Parse a GeoJSON directions response into our format.
/// Uses the first feature; its LineString positions are `[lng, lat, elevation]`.
pub fn parse_directions(body: &str) -> Result<DirectionsResponse> {
    let collection: FeatureCollection = serde_json::from_str(body)
        .map_err(|e| AppError::RoutingService(format!("Failed to parse response: {}", e)))?;

    let feature = collection
        .features
        .first()
        .ok_or_else(|| AppError::RoutingService("No routes found".to_string()))?;

    let positions = match feature.geometry.as_ref().map(|g| &g.value) {
        Some(Value::LineString(positions)) if !positions.is_empty() => positions,
        _ => {
            return Err(AppError::RoutingService(
                "Response has no path geometry".to_string(),
            ))
        }
    };

    let geometry = positions
        .iter()
        .map(|position| Coordinates::from_position(position))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| AppError::RoutingService(format!("Invalid path coordinate: {}", e)))?;

    // A zero-length route comes back without a distance field
    let distance_meters = feature
        .properties
        .as_ref()
        .and_then(|props| props.get("summary"))
        .and_then(|summary| summary.get("distance"))
        .and_then(|distance| distance.as_f64())
        .unwrap_or(0.0);

    Ok(DirectionsResponse {
        distance_meters,
        geometry,
    })
}

// OpenRouteService request types

#[derive(Debug, Serialize)]
struct DirectionsRequest {
    coordinates: Vec<[f64; 2]>,
    instructions: bool,
    elevation: bool,
    preference: &'static str,
    options: RequestOptions,
}

#[derive(Debug, Serialize)]
struct RequestOptions {
    avoid_features: Vec<&'static str>,
    profile_params: ProfileParams,
}

#[derive(Debug, Serialize)]
struct ProfileParams {
    weightings: Weightings,
}

#[derive(Debug, Serialize)]
struct Weightings {
    green: f64,
    quiet: f64,
}

impl DirectionsRequest {
    fn walking_loop(waypoints: &[Coordinates]) -> Self {
        DirectionsRequest {
            coordinates: waypoints.iter().map(Coordinates::to_lng_lat).collect(),
            instructions: false,
            elevation: true,
            preference: "recommended",
            options: RequestOptions {
                avoid_features: vec!["steps"],
                profile_params: ProfileParams {
                    weightings: Weightings {
                        green: GREEN_WEIGHTING,
                        quiet: QUIET_WEIGHTING,
                    },
                },
            },
        }
    }
}
