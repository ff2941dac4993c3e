use axum::Router;
use runpath::cache::{MemoryCacheService, RouteCache};
use runpath::config::Config;
use runpath::constants::{DEFAULT_MEMORY_CACHE_MAX_ENTRIES, DEFAULT_OPENROUTE_BASE_URL};
use runpath::services::nominatim::{Geocoder, NominatimClient};
use runpath::services::openroute::{AuthMode, OpenRouteClient};
use runpath::services::route_generator::RouteGenerator;
use runpath::services::routing::RoutingOracle;
use runpath::AppState;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "runpath=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting RunPath API server");

    if config.openroute_api_key.is_none() {
        tracing::warn!("OPENROUTE_API_KEY not set. Route generation requests will fail.");
    }

    // Direct OpenRouteService takes the raw key; anything else is treated as a proxy
    let auth_mode = if config.openroute_base_url.trim_end_matches('/') == DEFAULT_OPENROUTE_BASE_URL
    {
        AuthMode::ApiKeyHeader
    } else {
        AuthMode::BearerHeader
    };
    let oracle: Arc<dyn RoutingOracle> = Arc::new(OpenRouteClient::with_config(
        config.openroute_api_key.clone(),
        config.openroute_base_url.clone(),
        auth_mode,
        Duration::from_secs(config.oracle_timeout_secs),
    ));
    let geocoder: Arc<dyn Geocoder> =
        Arc::new(NominatimClient::with_base_url(config.nominatim_base_url.clone()));
    let cache: Arc<dyn RouteCache> = Arc::new(MemoryCacheService::new(
        config.route_cache_ttl,
        DEFAULT_MEMORY_CACHE_MAX_ENTRIES,
    ));

    let route_generator = RouteGenerator::new(oracle, config.route_generator.clone());

    let state = Arc::new(AppState {
        route_generator,
        geocoder,
        cache: Some(cache),
    });

    // Build router with CORS and tracing
    let app = Router::new()
        .nest("/api/v1", runpath::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
