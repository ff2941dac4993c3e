use async_trait::async_trait;
use runpath::cache::RouteCache;
use runpath::config::RouteGeneratorConfig;
use runpath::error::{AppError, Result};
use runpath::models::{Coordinates, Place};
use runpath::services::nominatim::Geocoder;
use runpath::services::route_generator::RouteGenerator;
use runpath::services::routing::{DirectionsResponse, RoutingOracle};
use runpath::AppState;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

type Responder = Box<dyn Fn(&[Coordinates]) -> Result<DirectionsResponse> + Send + Sync>;

/// Routing oracle driven by a closure, counting every call
pub struct MockOracle {
    responder: Responder,
    configured: bool,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl MockOracle {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&[Coordinates]) -> Result<DirectionsResponse> + Send + Sync + 'static,
    {
        MockOracle {
            responder: Box::new(responder),
            configured: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// Returns the waypoints themselves as a closed path of the given length
    pub fn perfect_loops(distance_meters: f64) -> Self {
        Self::new(move |waypoints| {
            Ok(DirectionsResponse {
                distance_meters,
                geometry: waypoints.to_vec(),
            })
        })
    }

    pub fn unconfigured() -> Self {
        MockOracle {
            configured: false,
            ..Self::perfect_loops(5000.0)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoutingOracle for MockOracle {
    fn ensure_configured(&self) -> Result<()> {
        if self.configured {
            Ok(())
        } else {
            Err(AppError::Configuration(
                "OPENROUTE_API_KEY is not set".to_string(),
            ))
        }
    }

    async fn get_directions(&self, waypoints: &[Coordinates]) -> Result<DirectionsResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.responder)(waypoints)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Geocoder returning a fixed list of places
pub struct FixedGeocoder {
    pub places: Vec<Place>,
}

#[async_trait]
impl Geocoder for FixedGeocoder {
    async fn search(&self, _query: &str, limit: usize) -> Result<Vec<Place>> {
        Ok(self.places.iter().take(limit).cloned().collect())
    }
}

/// Lower Manhattan, the start point used throughout the suite
#[allow(dead_code)]
pub fn new_york() -> Coordinates {
    Coordinates::new(40.7128, -74.0060).unwrap()
}

/// Seeded so variation output is reproducible
#[allow(dead_code)]
pub fn test_generator_config() -> RouteGeneratorConfig {
    RouteGeneratorConfig {
        random_seed: Some(2024),
        ..RouteGeneratorConfig::default()
    }
}

#[allow(dead_code)]
pub fn test_state(
    oracle: Arc<MockOracle>,
    cache: Option<Arc<dyn RouteCache>>,
) -> Arc<AppState> {
    let geocoder = FixedGeocoder {
        places: vec![
            Place {
                display_name: "City Hall Park, New York".to_string(),
                coordinates: new_york(),
            },
            Place {
                display_name: "Battery Park, New York".to_string(),
                coordinates: Coordinates::new(40.7033, -74.0170).unwrap(),
            },
        ],
    };

    Arc::new(AppState {
        route_generator: RouteGenerator::new(oracle, test_generator_config()),
        geocoder: Arc::new(geocoder),
        cache,
    })
}
