//! Local planar approximation around a start point.
//!
//! Bearings are degrees clockwise from north: 0° = north, 90° = east,
//! 180° = south, 270° = west. Every offset in one generation pass is computed
//! from the start point, so the longitude scale is the start latitude's.

use crate::constants::KM_PER_DEGREE_LATITUDE;
use crate::models::Coordinates;
use std::fmt;

pub fn km_per_degree_longitude(at_latitude: f64) -> f64 {
    KM_PER_DEGREE_LATITUDE * at_latitude.to_radians().cos()
}

/// Map any angle onto [0, 360)
pub fn normalize_bearing(bearing_deg: f64) -> f64 {
    bearing_deg.rem_euclid(360.0)
}

pub fn rotate_bearing(bearing_deg: f64, rotation_deg: f64) -> f64 {
    normalize_bearing(bearing_deg + rotation_deg)
}

/// Point `radius_km` away from `origin` along `bearing_deg`
pub fn offset_point(origin: &Coordinates, radius_km: f64, bearing_deg: f64) -> Coordinates {
    let bearing = bearing_deg.to_radians();
    let lat_offset = radius_km * bearing.cos() / KM_PER_DEGREE_LATITUDE;
    let lng_offset = radius_km * bearing.sin() / km_per_degree_longitude(origin.lat);

    Coordinates {
        lat: (origin.lat + lat_offset).clamp(-90.0, 90.0),
        lng: wrap_longitude(origin.lng + lng_offset),
        elevation: None,
    }
}

/// Wrap a longitude into [-180, 180]
pub fn wrap_longitude(lng: f64) -> f64 {
    if (-180.0..=180.0).contains(&lng) {
        lng
    } else {
        (lng + 180.0).rem_euclid(360.0) - 180.0
    }
}

/// Coarse direction a pattern's rotation points to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompassDirection {
    North,
    East,
    South,
    West,
}

impl CompassDirection {
    /// Quadrant boundaries sit at 45°, 135°, 225° and 315°
    pub fn from_bearing(bearing_deg: f64) -> Self {
        let bearing = normalize_bearing(bearing_deg);
        if !(45.0..315.0).contains(&bearing) {
            CompassDirection::North
        } else if bearing < 135.0 {
            CompassDirection::East
        } else if bearing < 225.0 {
            CompassDirection::South
        } else {
            CompassDirection::West
        }
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompassDirection::North => write!(f, "North"),
            CompassDirection::East => write!(f, "East"),
            CompassDirection::South => write!(f, "South"),
            CompassDirection::West => write!(f, "West"),
        }
    }
}
