use crate::config::RouteGeneratorConfig;

/// Polygon template used to seed candidate waypoints around the start point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pattern {
    pub name: &'static str,
    /// Vertices excluding the shared start/end point
    pub point_count: usize,
    /// Fraction of the target distance used as the polygon radius
    pub radius_factor: f64,
    /// Explicit vertex bearings; evenly spaced when `None`
    pub vertex_angles: Option<&'static [f64]>,
}

impl Pattern {
    pub fn is_out_and_back(&self) -> bool {
        self.point_count == 2
    }

    /// Vertex bearings before rotation
    pub fn angles(&self) -> Vec<f64> {
        match self.vertex_angles {
            Some(angles) => angles.to_vec(),
            None => (0..self.point_count)
                .map(|i| 360.0 / self.point_count as f64 * i as f64)
                .collect(),
        }
    }

    /// Nominal polygon radius (km) for a target distance, capped by `max_radius_km`
    pub fn radius_km(&self, target_distance_km: f64, config: &RouteGeneratorConfig) -> f64 {
        let factor = self.radius_factor * config.radius_scale(target_distance_km);
        (target_distance_km * factor).min(config.max_radius_km)
    }
}

pub const TRIANGLE: Pattern = Pattern {
    name: "Triangle",
    point_count: 3,
    radius_factor: 0.12,
    vertex_angles: Some(&[0.0, 120.0, 240.0]),
};

pub const SQUARE: Pattern = Pattern {
    name: "Square",
    point_count: 4,
    radius_factor: 0.10,
    vertex_angles: None,
};

pub const PENTAGON: Pattern = Pattern {
    name: "Pentagon",
    point_count: 5,
    radius_factor: 0.08,
    vertex_angles: None,
};

pub const OUT_AND_BACK: Pattern = Pattern {
    name: "Out-and-Back",
    point_count: 2,
    radius_factor: 0.15,
    vertex_angles: None,
};

/// Generation order of the catalog. Ties in ranking favor earlier patterns.
pub const CATALOG: [Pattern; 4] = [TRIANGLE, SQUARE, PENTAGON, OUT_AND_BACK];

/// Rotation offsets applied to every polygon pattern
pub const ROTATIONS_DEG: [f64; 3] = [0.0, 120.0, 240.0];
