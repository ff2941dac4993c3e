pub mod gpx;
pub mod nominatim;
pub mod openroute;
pub mod route_generator;
pub mod routing;
