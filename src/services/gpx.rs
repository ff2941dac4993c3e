use crate::error::{AppError, Result};
use crate::models::{Coordinates, Route};
use geo_types::Point;
use gpx::{Gpx, GpxVersion, Metadata, Track, TrackSegment, Waypoint};
use time::OffsetDateTime;

const GPX_CREATOR: &str = "RunPath";

/// Render a route as a GPX 1.1 track with one `trkpt` per path coordinate
pub fn to_gpx(route: &Route, created: OffsetDateTime) -> Result<String> {
    let mut segment = TrackSegment::new();
    segment.points = route.path.iter().map(track_point).collect();

    let mut track = Track::new();
    track.name = Some(route.name.clone());
    track.segments.push(segment);

    let document = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some(GPX_CREATOR.to_string()),
        metadata: Some(Metadata {
            name: Some(route.name.clone()),
            time: Some(created.into()),
            ..Metadata::default()
        }),
        tracks: vec![track],
        ..Gpx::default()
    };

    let mut buffer = Vec::new();
    gpx::write(&document, &mut buffer)
        .map_err(|e| AppError::Internal(format!("Failed to write GPX: {}", e)))?;

    String::from_utf8(buffer)
        .map_err(|e| AppError::Internal(format!("GPX output is not UTF-8: {}", e)))
}

/// Download filename for a route's GPX export
pub fn gpx_filename(route: &Route) -> String {
    format!("running-route-{}.gpx", route.id)
}

fn track_point(coordinates: &Coordinates) -> Waypoint {
    let mut point = Waypoint::new(Point::new(coordinates.lng, coordinates.lat));
    point.elevation = coordinates.elevation;
    point
}
