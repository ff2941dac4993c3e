pub mod evaluation;
pub mod geometry;
pub mod patterns;
pub mod selection;
pub mod variations;

use crate::config::RouteGeneratorConfig;
use crate::error::{AppError, Result};
use crate::models::{Coordinates, Route};
use crate::services::routing::RoutingOracle;
use std::sync::Arc;

use evaluation::CandidateEvaluator;
use variations::{random_source, VariationGenerator};

pub struct RouteGenerator {
    oracle: Arc<dyn RoutingOracle>,
    config: RouteGeneratorConfig,
    variation_generator: VariationGenerator,
    evaluator: CandidateEvaluator,
}

impl RouteGenerator {
    pub fn new(oracle: Arc<dyn RoutingOracle>, config: RouteGeneratorConfig) -> Self {
        let variation_generator = VariationGenerator::new(config.clone());
        let evaluator = CandidateEvaluator::new(oracle.clone(), config.clone());

        RouteGenerator {
            oracle,
            config,
            variation_generator,
            evaluator,
        }
    }

    pub fn oracle_name(&self) -> &'static str {
        self.oracle.name()
    }

    pub fn is_configured(&self) -> bool {
        self.oracle.ensure_configured().is_ok()
    }

    /// Target actually generated for a requested distance, after the maximum clamp
    pub fn effective_target_km(&self, target_distance_km: f64) -> f64 {
        target_distance_km.min(self.config.max_target_distance_km)
    }

    /// Generate loop routes starting and ending at `start`, best distance match first.
    /// Fails with `NoRoutesFound` when no candidate passes the loop and distance checks.
    pub async fn generate_loop_routes(
        &self,
        start: Coordinates,
        target_distance_km: f64,
        max_results: usize,
    ) -> Result<Vec<Route>> {
        Coordinates::new(start.lat, start.lng).map_err(AppError::InvalidRequest)?;
        if !target_distance_km.is_finite() || target_distance_km <= 0.0 {
            return Err(AppError::InvalidRequest(
                "distance_km must be a positive number".to_string(),
            ));
        }
        if max_results == 0 {
            return Err(AppError::InvalidRequest(
                "max_results must be at least 1".to_string(),
            ));
        }
        self.oracle.ensure_configured()?;

        let requested_km = target_distance_km;
        let target_distance_km = self.effective_target_km(requested_km);
        if target_distance_km < requested_km {
            tracing::warn!(
                requested_km,
                max_km = target_distance_km,
                "Target {:.1}km above maximum, clamping to {:.1}km",
                requested_km,
                target_distance_km
            );
        }

        tracing::info!(
            lat = start.lat,
            lng = start.lng,
            target_km = %format!("{:.1}", target_distance_km),
            oracle = self.oracle.name(),
            "Generating loop routes from ({:.4}, {:.4}), target {:.1}km",
            start.lat,
            start.lng,
            target_distance_km
        );

        let variations = {
            let mut rng = random_source(self.config.random_seed);
            self.variation_generator
                .generate(start, target_distance_km, &mut rng)
        };

        let candidates = self
            .evaluator
            .evaluate(variations, target_distance_km, &start)
            .await;

        let routes = selection::select(candidates, target_distance_km, max_results)?;

        tracing::info!(
            count = routes.len(),
            best_km = %format!("{:.2}", routes[0].distance_km),
            "Returning {} routes (best: {:.2}km for {:.1}km target)",
            routes.len(),
            routes[0].distance_km,
            target_distance_km
        );

        Ok(routes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::routing::DirectionsResponse;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls and returns each waypoint list as a loop of the given length
    struct CountingOracle {
        calls: AtomicUsize,
        distance_meters: f64,
    }

    #[async_trait]
    impl RoutingOracle for CountingOracle {
        async fn get_directions(&self, waypoints: &[Coordinates]) -> Result<DirectionsResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(DirectionsResponse {
                distance_meters: self.distance_meters,
                geometry: waypoints.to_vec(),
            })
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    struct UnconfiguredOracle;

    #[async_trait]
    impl RoutingOracle for UnconfiguredOracle {
        fn ensure_configured(&self) -> Result<()> {
            Err(AppError::Configuration("no key".to_string()))
        }

        async fn get_directions(&self, _waypoints: &[Coordinates]) -> Result<DirectionsResponse> {
            panic!("must not be called without configuration");
        }

        fn name(&self) -> &'static str {
            "unconfigured"
        }
    }

    fn seeded() -> RouteGeneratorConfig {
        RouteGeneratorConfig {
            random_seed: Some(42),
            ..RouteGeneratorConfig::default()
        }
    }

    fn counting(distance_meters: f64) -> Arc<CountingOracle> {
        Arc::new(CountingOracle {
            calls: AtomicUsize::new(0),
            distance_meters,
        })
    }

    fn start() -> Coordinates {
        Coordinates::new(40.7128, -74.0060).unwrap()
    }

    #[tokio::test]
    async fn test_invalid_input_rejected_before_calls() {
        let oracle = counting(5000.0);
        let generator = RouteGenerator::new(oracle.clone(), seeded());

        for distance in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = generator.generate_loop_routes(start(), distance, 3).await;
            assert!(matches!(result, Err(AppError::InvalidRequest(_))));
        }

        let bad_start = Coordinates {
            lat: 95.0,
            lng: 0.0,
            elevation: None,
        };
        let result = generator.generate_loop_routes(bad_start, 5.0, 3).await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));

        let result = generator.generate_loop_routes(start(), 5.0, 0).await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));

        assert_eq!(oracle.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unconfigured_oracle_is_fatal() {
        let generator = RouteGenerator::new(Arc::new(UnconfiguredOracle), seeded());
        assert!(!generator.is_configured());

        let result = generator.generate_loop_routes(start(), 5.0, 3).await;
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_long_target_clamped() {
        // 20km loops are accepted for a 30km request once the target is clamped
        let oracle = counting(20_000.0);
        let generator = RouteGenerator::new(oracle.clone(), seeded());

        let routes = generator.generate_loop_routes(start(), 30.0, 3).await.unwrap();
        assert_eq!(routes.len(), 3);
        assert_eq!(generator.effective_target_km(30.0), 20.0);
        assert_eq!(generator.effective_target_km(7.5), 7.5);
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 10);
    }

    #[tokio::test]
    async fn test_full_scan_by_default() {
        let oracle = counting(5000.0);
        let generator = RouteGenerator::new(oracle.clone(), seeded());

        let routes = generator.generate_loop_routes(start(), 5.0, 3).await.unwrap();
        assert_eq!(routes.len(), 3);
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 10);
        assert_eq!(generator.oracle_name(), "counting");
    }
}
