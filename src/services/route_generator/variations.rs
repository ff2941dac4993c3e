use super::geometry::{offset_point, rotate_bearing, wrap_longitude, CompassDirection};
use super::patterns::{Pattern, CATALOG, ROTATIONS_DEG};
use crate::config::RouteGeneratorConfig;
use crate::models::Coordinates;
use rand::distr::{Distribution, StandardUniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Source of uniform samples for waypoint jitter and out-and-back bearings
pub trait RandomSource: Send {
    /// Uniform sample in [0, 1)
    fn next_unit(&mut self) -> f64;
}

impl RandomSource for StdRng {
    fn next_unit(&mut self) -> f64 {
        StandardUniform.sample(self)
    }
}

/// Seeded when `seed` is set, otherwise drawn from the thread RNG
pub fn random_source(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(|| StandardUniform.sample(&mut rand::rng()));
    StdRng::seed_from_u64(seed)
}

/// One candidate waypoint sequence; starts and ends at the requested start point
#[derive(Debug, Clone)]
pub struct Variation {
    pub name: String,
    pub pattern: Pattern,
    pub rotation_deg: f64,
    pub waypoints: Vec<Coordinates>,
}

pub struct VariationGenerator {
    config: RouteGeneratorConfig,
}

impl VariationGenerator {
    pub fn new(config: RouteGeneratorConfig) -> Self {
        Self { config }
    }

    /// Expand the pattern catalog into concrete waypoint sequences around `start`.
    /// Output order follows the catalog, then the rotation set.
    pub fn generate(
        &self,
        start: Coordinates,
        target_distance_km: f64,
        rng: &mut dyn RandomSource,
    ) -> Vec<Variation> {
        let start = Coordinates {
            elevation: None,
            ..start
        };
        let mut variations = Vec::new();

        for pattern in CATALOG {
            let radius_km = pattern.radius_km(target_distance_km, &self.config);

            if pattern.is_out_and_back() {
                variations.push(self.out_and_back(start, pattern, radius_km, rng));
                continue;
            }

            for rotation_deg in ROTATIONS_DEG {
                variations.push(self.polygon(start, pattern, rotation_deg, radius_km, rng));
            }
        }

        tracing::debug!(
            count = variations.len(),
            target_km = %format!("{:.1}", target_distance_km),
            "Generated {} waypoint variations",
            variations.len()
        );

        variations
    }

    fn polygon(
        &self,
        start: Coordinates,
        pattern: Pattern,
        rotation_deg: f64,
        radius_km: f64,
        rng: &mut dyn RandomSource,
    ) -> Variation {
        let mut waypoints = Vec::with_capacity(pattern.point_count + 2);
        waypoints.push(start);

        for angle in pattern.angles() {
            let vertex = offset_point(&start, radius_km, rotate_bearing(angle, rotation_deg));
            waypoints.push(self.perturb(vertex, rng));
        }

        waypoints.push(start);

        Variation {
            name: format!(
                "{} {}",
                pattern.name,
                CompassDirection::from_bearing(rotation_deg)
            ),
            pattern,
            rotation_deg,
            waypoints,
        }
    }

    /// Single outward point on a random bearing, then back
    fn out_and_back(
        &self,
        start: Coordinates,
        pattern: Pattern,
        radius_km: f64,
        rng: &mut dyn RandomSource,
    ) -> Variation {
        let bearing = rng.next_unit() * 360.0;
        let turnaround = offset_point(&start, radius_km, bearing);

        Variation {
            name: format!(
                "{} {}",
                pattern.name,
                CompassDirection::from_bearing(bearing)
            ),
            pattern,
            rotation_deg: bearing,
            waypoints: vec![start, turnaround, start],
        }
    }

    /// Shift both axes by up to ±`perturbation_deg`
    fn perturb(&self, point: Coordinates, rng: &mut dyn RandomSource) -> Coordinates {
        let magnitude = self.config.perturbation_deg;
        if magnitude <= 0.0 {
            return point;
        }

        let lat_jitter = (rng.next_unit() * 2.0 - 1.0) * magnitude;
        let lng_jitter = (rng.next_unit() * 2.0 - 1.0) * magnitude;

        Coordinates {
            lat: (point.lat + lat_jitter).clamp(-90.0, 90.0),
            lng: wrap_longitude(point.lng + lng_jitter),
            elevation: None,
        }
    }
}
