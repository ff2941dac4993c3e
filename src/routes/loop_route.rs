use crate::cache;
use crate::error::{AppError, Result};
use crate::models::route::{LoopRouteRequest, RouteResponse};
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// POST /routes/loop
/// Generate loop routes that start and end at the same point
pub async fn create_loop_route(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoopRouteRequest>,
) -> Result<Json<RouteResponse>> {
    request.validate().map_err(AppError::InvalidRequest)?;
    let max_results = request.clamped_max_results();

    tracing::info!(
        lat = request.start_point.lat,
        lng = request.start_point.lng,
        distance_km = request.distance_km,
        max_results,
        "Loop route request: ({:.4}, {:.4}), {:.1}km, max_results={}",
        request.start_point.lat,
        request.start_point.lng,
        request.distance_km,
        max_results
    );

    let target_km = state.route_generator.effective_target_km(request.distance_km);
    let cache_key = cache::loop_route_cache_key(&request.start_point, target_km, max_results);

    if let Some(ref cache) = state.cache {
        if let Some(cached_routes) = cache.get_cached_routes(&cache_key).await {
            tracing::info!(
                "Cache hit for loop route: {} routes returned",
                cached_routes.len()
            );
            return Ok(Json(RouteResponse {
                routes: cached_routes,
            }));
        }
    }

    let routes = state
        .route_generator
        .generate_loop_routes(request.start_point, request.distance_km, max_results)
        .await?;

    if let Some(ref cache) = state.cache {
        cache.cache_routes(&cache_key, &routes).await;
    }

    Ok(Json(RouteResponse { routes }))
}
