use serde::{Deserialize, Serialize};

/// A WGS84 position, optionally carrying an elevation in meters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self, String> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(format!(
                "Invalid latitude: {} (must be between -90 and 90)",
                lat
            ));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(format!(
                "Invalid longitude: {} (must be between -180 and 180)",
                lng
            ));
        }
        Ok(Coordinates {
            lat,
            lng,
            elevation: None,
        })
    }

    /// Build from a GeoJSON-style `[lng, lat, elevation?]` position
    pub fn from_position(position: &[f64]) -> Result<Self, String> {
        match position {
            [lng, lat] => Coordinates::new(*lat, *lng),
            [lng, lat, elevation, ..] => {
                Ok(Coordinates::new(*lat, *lng)?.with_elevation(*elevation))
            }
            _ => Err(format!(
                "Position needs at least 2 values, got {}",
                position.len()
            )),
        }
    }

    pub fn with_elevation(mut self, elevation_m: f64) -> Self {
        self.elevation = Some(elevation_m);
        self
    }

    /// `[lng, lat]` pair in the order routing services expect
    pub fn to_lng_lat(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    /// True when both axes differ by at most `epsilon_deg`
    pub fn approx_eq(&self, other: &Coordinates, epsilon_deg: f64) -> bool {
        (self.lat - other.lat).abs() <= epsilon_deg && (self.lng - other.lng).abs() <= epsilon_deg
    }

    /// Calculate distance between two coordinates using Haversine formula
    /// Returns distance in kilometers
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        const EARTH_RADIUS_KM: f64 = 6371.0;

        let lat1_rad = self.lat.to_radians();
        let lat2_rad = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }

    /// Round coordinates to specified decimal places for caching
    pub fn round(&self, decimal_places: u32) -> Self {
        let multiplier = 10_f64.powi(decimal_places as i32);
        Coordinates {
            lat: (self.lat * multiplier).round() / multiplier,
            lng: (self.lng * multiplier).round() / multiplier,
            elevation: None,
        }
    }
}
