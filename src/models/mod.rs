pub mod coordinates;
pub mod place;
pub mod route;

pub use coordinates::Coordinates;
pub use place::Place;
pub use route::{Route, RouteResponse};
