use crate::error::Result;
use crate::models::Coordinates;
use async_trait::async_trait;

/// A service that turns an ordered waypoint list into a walkable path.
///
/// Implementations return `AppError::RoutingService` for HTTP failures and for
/// responses without path geometry. Callers generating loops treat those as a
/// dropped candidate, not a failed request.
#[async_trait]
pub trait RoutingOracle: Send + Sync {
    /// Fails with `AppError::Configuration` when credentials or endpoint are missing.
    /// Checked once per generation pass, before any call is made.
    fn ensure_configured(&self) -> Result<()> {
        Ok(())
    }

    async fn get_directions(&self, waypoints: &[Coordinates]) -> Result<DirectionsResponse>;

    fn name(&self) -> &'static str;
}

/// Routing service response normalized to our units
#[derive(Debug, Clone)]
pub struct DirectionsResponse {
    pub distance_meters: f64,
    /// Path geometry; elevation is set when the service reports it
    pub geometry: Vec<Coordinates>,
}

impl DirectionsResponse {
    pub fn distance_km(&self) -> f64 {
        (self.distance_meters / 1000.0).max(0.0)
    }

    /// Total climb along the path in meters.
    /// Sums each positive step between consecutive points; descents are ignored.
    pub fn elevation_gain_m(&self) -> f64 {
        elevation_gain(&self.geometry)
    }

    /// True when the path returns to where it started
    pub fn is_closed_loop(&self, epsilon_deg: f64) -> bool {
        match (self.geometry.first(), self.geometry.last()) {
            (Some(first), Some(last)) if self.geometry.len() >= 2 => {
                first.approx_eq(last, epsilon_deg)
            }
            _ => false,
        }
    }
}

/// Sum of positive consecutive elevation deltas. Points without elevation are skipped.
pub fn elevation_gain(path: &[Coordinates]) -> f64 {
    let elevations: Vec<f64> = path.iter().filter_map(|c| c.elevation).collect();
    elevations
        .windows(2)
        .map(|w| (w[1] - w[0]).max(0.0))
        .sum()
}
