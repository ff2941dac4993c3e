use super::variations::Variation;
use crate::config::RouteGeneratorConfig;
use crate::models::{Coordinates, Route};
use crate::services::routing::{DirectionsResponse, RoutingOracle};
use futures::stream::{self, StreamExt};
use std::fmt;
use std::sync::Arc;

/// Why a routed candidate was dropped
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    NotALoop { gap_m: f64 },
    OutOfTolerance { distance_km: f64, tolerance_km: f64 },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotALoop { gap_m } => {
                write!(f, "path does not return to start ({:.0}m gap)", gap_m)
            }
            Rejection::OutOfTolerance {
                distance_km,
                tolerance_km,
            } => write!(
                f,
                "distance {:.2}km outside ±{:.2}km band",
                distance_km, tolerance_km
            ),
        }
    }
}

/// Routes each variation through the oracle and keeps valid loops near the target
pub struct CandidateEvaluator {
    oracle: Arc<dyn RoutingOracle>,
    config: RouteGeneratorConfig,
}

impl CandidateEvaluator {
    pub fn new(oracle: Arc<dyn RoutingOracle>, config: RouteGeneratorConfig) -> Self {
        Self { oracle, config }
    }

    /// Returns accepted routes in variation order.
    /// Oracle failures drop the candidate; they never fail the pass.
    pub async fn evaluate(
        &self,
        variations: Vec<Variation>,
        target_distance_km: f64,
        start: &Coordinates,
    ) -> Vec<Route> {
        let total = variations.len();
        let concurrency = self.config.max_concurrent_requests.max(1);
        let oracle = &self.oracle;

        // `buffered` yields in input order, so acceptance order matches generation order
        let mut outcomes = stream::iter(variations)
            .map(|variation| async move {
                let outcome = oracle.get_directions(&variation.waypoints).await;
                (variation, outcome)
            })
            .buffered(concurrency);

        let mut accepted = Vec::new();
        let mut failed = 0;
        let mut rejected = 0;

        while let Some((variation, outcome)) = outcomes.next().await {
            let directions = match outcome {
                Ok(directions) => directions,
                Err(e) => {
                    failed += 1;
                    tracing::debug!(
                        variation = %variation.name,
                        error = %e,
                        "Oracle call failed for {}, skipping",
                        variation.name
                    );
                    continue;
                }
            };

            match self.assess(&directions, target_distance_km, start) {
                Ok(()) => {
                    tracing::debug!(
                        variation = %variation.name,
                        distance_km = %format!("{:.2}", directions.distance_km()),
                        "Accepted {}: {:.2}km",
                        variation.name,
                        directions.distance_km()
                    );
                    accepted.push(Route::new(
                        format!("{} Route", variation.name),
                        directions.geometry.clone(),
                        directions.distance_km(),
                        directions.elevation_gain_m(),
                    ));
                }
                Err(rejection) => {
                    rejected += 1;
                    tracing::debug!(
                        variation = %variation.name,
                        "Rejected {}: {}",
                        variation.name,
                        rejection
                    );
                }
            }

            if let Some(cap) = self.config.accept_cap {
                if accepted.len() >= cap {
                    tracing::debug!(cap, "Accept cap reached, skipping remaining variations");
                    break;
                }
            }
        }

        tracing::info!(
            variations = total,
            accepted = accepted.len(),
            rejected,
            failed,
            target_km = %format!("{:.1}", target_distance_km),
            "Evaluated {} variations: {} accepted, {} rejected, {} failed",
            total,
            accepted.len(),
            rejected,
            failed
        );

        accepted
    }

    /// Loop closure first, then distance fit
    pub fn assess(
        &self,
        directions: &DirectionsResponse,
        target_distance_km: f64,
        start: &Coordinates,
    ) -> Result<(), Rejection> {
        if !directions.is_closed_loop(self.config.loop_closure_epsilon_deg) {
            let gap_m = match (directions.geometry.first(), directions.geometry.last()) {
                (Some(first), Some(last)) => first.distance_to(last) * 1000.0,
                _ => 0.0,
            };
            tracing::trace!(
                start_lat = start.lat,
                start_lng = start.lng,
                gap_m,
                "Open path"
            );
            return Err(Rejection::NotALoop { gap_m });
        }

        let tolerance_km = self.config.distance_tolerance_km(target_distance_km);
        let distance_km = directions.distance_km();
        if (distance_km - target_distance_km).abs() > tolerance_km {
            return Err(Rejection::OutOfTolerance {
                distance_km,
                tolerance_km,
            });
        }

        Ok(())
    }
}
