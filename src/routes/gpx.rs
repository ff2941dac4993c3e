use crate::error::{AppError, Result};
use crate::models::Route;
use crate::services::gpx::{gpx_filename, to_gpx};
use axum::{
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
    Json,
};
use time::OffsetDateTime;

const GPX_CONTENT_TYPE: &str = "application/gpx+xml";

/// POST /routes/gpx
/// Export a previously generated route as a GPX download
pub async fn export_gpx(Json(route): Json<Route>) -> Result<impl IntoResponse> {
    if route.path.is_empty() {
        return Err(AppError::InvalidRequest(
            "route path must not be empty".to_string(),
        ));
    }

    let body = to_gpx(&route, OffsetDateTime::now_utc())?;
    let disposition = format!("attachment; filename=\"{}\"", gpx_filename(&route));

    tracing::debug!(route_id = %route.id, points = route.path.len(), "Exporting GPX");

    Ok((
        [
            (CONTENT_TYPE, GPX_CONTENT_TYPE.to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
