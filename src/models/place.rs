use crate::models::Coordinates;
use serde::{Deserialize, Serialize};

/// A geocoding match the user can pick as a start point
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Place {
    pub display_name: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    pub q: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeocodeResponse {
    pub places: Vec<Place>,
}
