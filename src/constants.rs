//! Stable application-wide constants.
//!
//! Values here are structural invariants, algorithm coefficients, and default
//! fallbacks for env-var-based configuration. They should rarely change.
//! For tuning knobs of the loop generator, see
//! [`RouteGeneratorConfig`](crate::config::RouteGeneratorConfig) instead.

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "3000";

// --- External services ---

/// OpenRouteService API root. Overridden by `OPENROUTE_BASE_URL`.
pub const DEFAULT_OPENROUTE_BASE_URL: &str = "https://api.openrouteservice.org";
/// Nominatim search API root. Overridden by `NOMINATIM_BASE_URL`.
pub const DEFAULT_NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";
/// Nominatim rejects requests without an identifying user agent.
pub const USER_AGENT: &str = "RunPath/0.1";
/// Per-call timeout for routing oracle requests. Overridden by `ORACLE_TIMEOUT_SECS`.
pub const DEFAULT_ORACLE_TIMEOUT_SECONDS: u64 = 15;
/// Maximum number of places returned by a geocoding search.
pub const GEOCODE_RESULT_LIMIT: usize = 5;
/// Shortest free-text query forwarded to the geocoder.
pub const GEOCODE_MIN_QUERY_LEN: usize = 3;

// --- Cache defaults ---

/// Default route cache TTL: 1 hour. Overridden by `ROUTE_CACHE_TTL`.
pub const DEFAULT_ROUTE_CACHE_TTL_SECONDS: u64 = 3_600;
/// Maximum entries for the in-memory route cache.
pub const DEFAULT_MEMORY_CACHE_MAX_ENTRIES: u64 = 1_000;

// --- Local planar approximation ---

/// Kilometers per degree of latitude (treated as constant).
pub const KM_PER_DEGREE_LATITUDE: f64 = 111.0;

// --- Result limits ---

/// Number of routes returned when the caller does not say otherwise.
pub const DEFAULT_MAX_RESULTS: usize = 3;
/// Hard upper bound on routes returned, regardless of the request.
pub const MAX_RESULTS_CLAMP: usize = 5;

/// Shown to the user when every candidate was rejected.
pub const NO_ROUTES_MESSAGE: &str =
    "Could not generate valid routes. Try a shorter distance or different location.";
