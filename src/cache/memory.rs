use crate::cache::{CacheStats, RouteCache};
use crate::models::Route;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// In-memory route cache backed by moka with TTL and bounded capacity
pub struct MemoryCacheService {
    routes: Cache<String, Arc<Vec<Route>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryCacheService {
    pub fn new(route_ttl_seconds: u64, max_capacity: u64) -> Self {
        tracing::debug!(
            ttl_secs = route_ttl_seconds,
            max_capacity,
            "Building in-memory route cache"
        );

        MemoryCacheService {
            routes: Cache::builder()
                .time_to_live(Duration::from_secs(route_ttl_seconds))
                .max_capacity(max_capacity)
                .build(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl RouteCache for MemoryCacheService {
    async fn get_cached_routes(&self, key: &str) -> Option<Vec<Route>> {
        let cached = self.routes.get(key).await;
        let counter = if cached.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(key, hit = cached.is_some(), "Route cache lookup");
        cached.map(|routes| routes.as_ref().clone())
    }

    async fn cache_routes(&self, key: &str, routes: &[Route]) {
        self.routes
            .insert(key.to_string(), Arc::new(routes.to_vec()))
            .await;
        tracing::debug!(key, count = routes.len(), "Cached {} routes", routes.len());
    }

    async fn get_stats(&self) -> CacheStats {
        CacheStats::from_counts(
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
            self.routes.entry_count(),
        )
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
