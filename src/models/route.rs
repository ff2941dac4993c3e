use crate::constants::{DEFAULT_MAX_RESULTS, MAX_RESULTS_CLAMP};
use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub id: Uuid,
    /// Pattern and direction the route was seeded from, e.g. "Triangle North Route"
    pub name: String,
    /// Full path geometry returned by the routing service
    pub path: Vec<Coordinates>,
    pub distance_km: f64,
    /// Sum of positive elevation deltas along the path (meters)
    pub elevation_gain_m: f64,
    #[serde(default)]
    pub is_favorite: bool,
}

impl Route {
    pub fn new(
        name: String,
        path: Vec<Coordinates>,
        distance_km: f64,
        elevation_gain_m: f64,
    ) -> Self {
        Route {
            id: Uuid::new_v4(),
            name,
            path,
            distance_km: distance_km.max(0.0),
            elevation_gain_m: elevation_gain_m.max(0.0),
            is_favorite: false,
        }
    }

    /// Absolute difference between this route's length and `target_distance_km`
    pub fn distance_deviation(&self, target_distance_km: f64) -> f64 {
        (self.distance_km - target_distance_km).abs()
    }
}

// Request/Response types for API endpoints

#[derive(Debug, Deserialize)]
pub struct LoopRouteRequest {
    pub start_point: Coordinates,
    pub distance_km: f64,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

impl LoopRouteRequest {
    pub fn validate(&self) -> Result<(), String> {
        Coordinates::new(self.start_point.lat, self.start_point.lng)?;
        if !self.distance_km.is_finite() || self.distance_km <= 0.0 {
            return Err("distance_km must be a positive number".to_string());
        }
        if self.max_results == 0 {
            return Err("max_results must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn clamped_max_results(&self) -> usize {
        self.max_results.clamp(1, MAX_RESULTS_CLAMP)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RouteResponse {
    pub routes: Vec<Route>,
}
