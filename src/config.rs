use crate::constants::*;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Optional so the server can still geocode; route requests fail with a
    /// configuration error until it is set.
    pub openroute_api_key: Option<String>,
    pub openroute_base_url: String,
    pub nominatim_base_url: String,
    pub route_cache_ttl: u64,
    pub oracle_timeout_secs: u64,
    pub route_generator: RouteGeneratorConfig,
}

#[derive(Debug, Clone)]
pub struct RouteGeneratorConfig {
    /// Upper bound on a pattern's nominal radius (km)
    pub max_radius_km: f64,

    /// Targets above this distance (km) use the medium radius scale
    pub medium_route_threshold_km: f64,

    /// Targets above this distance (km) use the long radius scale
    pub long_route_threshold_km: f64,

    /// Radius factor multiplier for medium targets
    pub radius_scale_medium: f64,

    /// Radius factor multiplier for long targets
    pub radius_scale_long: f64,

    /// Maximum random offset (degrees) applied to each polygon vertex axis
    pub perturbation_deg: f64,

    /// Max first/last coordinate difference (degrees) for a path to count as a loop
    pub loop_closure_epsilon_deg: f64,

    /// Floor of the accepted distance band (km)
    pub min_tolerance_km: f64,

    /// Accepted distance band as a fraction of the target, e.g. 0.5 = ±50%
    pub tolerance_fraction: f64,

    /// Stop calling the oracle once this many candidates are accepted.
    /// `None` evaluates every variation.
    pub accept_cap: Option<usize>,

    /// Oracle calls allowed in flight at once
    pub max_concurrent_requests: usize,

    /// Longer targets are clamped to this distance (km)
    pub max_target_distance_km: f64,

    /// Fixed seed for the variation generator; `None` seeds from the OS
    pub random_seed: Option<u64>,
}

impl Default for RouteGeneratorConfig {
    fn default() -> Self {
        Self {
            max_radius_km: 0.5,
            medium_route_threshold_km: 5.0,
            long_route_threshold_km: 10.0,
            radius_scale_medium: 0.8,
            radius_scale_long: 0.6,
            perturbation_deg: 0.0003, // ~30m
            loop_closure_epsilon_deg: 1e-4,
            min_tolerance_km: 1.0,
            tolerance_fraction: 0.5,
            accept_cap: None,
            max_concurrent_requests: 4,
            max_target_distance_km: 20.0,
            random_seed: None,
        }
    }
}

impl RouteGeneratorConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let config = Self {
            max_radius_km: env::var("ROUTE_MAX_RADIUS_KM")
                .unwrap_or_else(|_| defaults.max_radius_km.to_string())
                .parse()
                .map_err(|_| "Invalid ROUTE_MAX_RADIUS_KM")?,

            medium_route_threshold_km: env::var("ROUTE_MEDIUM_THRESHOLD_KM")
                .unwrap_or_else(|_| defaults.medium_route_threshold_km.to_string())
                .parse()
                .map_err(|_| "Invalid ROUTE_MEDIUM_THRESHOLD_KM")?,

            long_route_threshold_km: env::var("ROUTE_LONG_THRESHOLD_KM")
                .unwrap_or_else(|_| defaults.long_route_threshold_km.to_string())
                .parse()
                .map_err(|_| "Invalid ROUTE_LONG_THRESHOLD_KM")?,

            radius_scale_medium: env::var("ROUTE_RADIUS_SCALE_MEDIUM")
                .unwrap_or_else(|_| defaults.radius_scale_medium.to_string())
                .parse()
                .map_err(|_| "Invalid ROUTE_RADIUS_SCALE_MEDIUM")?,

            radius_scale_long: env::var("ROUTE_RADIUS_SCALE_LONG")
                .unwrap_or_else(|_| defaults.radius_scale_long.to_string())
                .parse()
                .map_err(|_| "Invalid ROUTE_RADIUS_SCALE_LONG")?,

            perturbation_deg: env::var("ROUTE_PERTURBATION_DEG")
                .unwrap_or_else(|_| defaults.perturbation_deg.to_string())
                .parse()
                .map_err(|_| "Invalid ROUTE_PERTURBATION_DEG")?,

            loop_closure_epsilon_deg: env::var("ROUTE_LOOP_EPSILON_DEG")
                .unwrap_or_else(|_| defaults.loop_closure_epsilon_deg.to_string())
                .parse()
                .map_err(|_| "Invalid ROUTE_LOOP_EPSILON_DEG")?,

            min_tolerance_km: env::var("ROUTE_MIN_TOLERANCE_KM")
                .unwrap_or_else(|_| defaults.min_tolerance_km.to_string())
                .parse()
                .map_err(|_| "Invalid ROUTE_MIN_TOLERANCE_KM")?,

            tolerance_fraction: env::var("ROUTE_TOLERANCE_FRACTION")
                .unwrap_or_else(|_| defaults.tolerance_fraction.to_string())
                .parse()
                .map_err(|_| "Invalid ROUTE_TOLERANCE_FRACTION")?,

            accept_cap: match env::var("ROUTE_ACCEPT_CAP") {
                Ok(value) => Some(value.parse().map_err(|_| "Invalid ROUTE_ACCEPT_CAP")?),
                Err(_) => defaults.accept_cap,
            },

            max_concurrent_requests: env::var("ROUTE_MAX_CONCURRENT_REQUESTS")
                .unwrap_or_else(|_| defaults.max_concurrent_requests.to_string())
                .parse()
                .map_err(|_| "Invalid ROUTE_MAX_CONCURRENT_REQUESTS")?,

            max_target_distance_km: env::var("ROUTE_MAX_TARGET_DISTANCE_KM")
                .unwrap_or_else(|_| defaults.max_target_distance_km.to_string())
                .parse()
                .map_err(|_| "Invalid ROUTE_MAX_TARGET_DISTANCE_KM")?,

            random_seed: match env::var("ROUTE_RANDOM_SEED") {
                Ok(value) => Some(value.parse().map_err(|_| "Invalid ROUTE_RANDOM_SEED")?),
                Err(_) => defaults.random_seed,
            },
        };

        if config.max_concurrent_requests == 0 {
            return Err("ROUTE_MAX_CONCURRENT_REQUESTS must be at least 1".to_string());
        }
        if config.accept_cap == Some(0) {
            return Err("ROUTE_ACCEPT_CAP must be at least 1".to_string());
        }
        if config.max_radius_km <= 0.0 || config.max_target_distance_km <= 0.0 {
            return Err(
                "ROUTE_MAX_RADIUS_KM and ROUTE_MAX_TARGET_DISTANCE_KM must be positive"
                    .to_string(),
            );
        }

        Ok(config)
    }

    /// Radius factor multiplier for the tier `target_distance_km` falls in
    pub fn radius_scale(&self, target_distance_km: f64) -> f64 {
        if target_distance_km > self.long_route_threshold_km {
            self.radius_scale_long
        } else if target_distance_km > self.medium_route_threshold_km {
            self.radius_scale_medium
        } else {
            1.0
        }
    }

    /// Half-width of the accepted distance band around the target
    pub fn distance_tolerance_km(&self, target_distance_km: f64) -> f64 {
        self.min_tolerance_km
            .max(target_distance_km * self.tolerance_fraction)
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            openroute_api_key: env::var("OPENROUTE_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            openroute_base_url: env::var("OPENROUTE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENROUTE_BASE_URL.to_string()),
            nominatim_base_url: env::var("NOMINATIM_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_NOMINATIM_BASE_URL.to_string()),
            route_cache_ttl: env::var("ROUTE_CACHE_TTL")
                .unwrap_or_else(|_| DEFAULT_ROUTE_CACHE_TTL_SECONDS.to_string())
                .parse()
                .map_err(|_| "Invalid ROUTE_CACHE_TTL")?,
            oracle_timeout_secs: env::var("ORACLE_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_ORACLE_TIMEOUT_SECONDS.to_string())
                .parse()
                .map_err(|_| "Invalid ORACLE_TIMEOUT_SECS")?,
            route_generator: RouteGeneratorConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
