mod memory;

pub use memory::MemoryCacheService;

use crate::models::{Coordinates, Route};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Backend for caching generated loop routes
#[async_trait]
pub trait RouteCache: Send + Sync {
    async fn get_cached_routes(&self, key: &str) -> Option<Vec<Route>>;

    async fn cache_routes(&self, key: &str, routes: &[Route]);

    async fn get_stats(&self) -> CacheStats;

    async fn health_check(&self) -> bool;

    fn backend_name(&self) -> &'static str;
}

/// Cache key for a loop route request.
/// Start rounded to 3 decimals (~100m); the target is kept exact because
/// acceptance and ranking both depend on it.
pub fn loop_route_cache_key(
    start: &Coordinates,
    target_distance_km: f64,
    max_results: usize,
) -> String {
    let start = start.round(3);

    format!(
        "route:loop:{:.3}:{:.3}:{}:{}",
        start.lat, start.lng, target_distance_km, max_results
    )
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Percentage of lookups served from cache
    pub hit_rate: f64,
    pub entries: u64,
    pub connected: bool,
}

impl CacheStats {
    pub fn from_counts(hits: u64, misses: u64, entries: u64) -> Self {
        let lookups = hits + misses;
        let hit_rate = if lookups > 0 {
            hits as f64 / lookups as f64 * 100.0
        } else {
            0.0
        };

        CacheStats {
            hits,
            misses,
            hit_rate,
            entries,
            connected: true,
        }
    }
}
