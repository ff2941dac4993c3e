use crate::constants::{GEOCODE_MIN_QUERY_LEN, GEOCODE_RESULT_LIMIT};
use crate::error::{AppError, Result};
use crate::models::place::{GeocodeQuery, GeocodeResponse};
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

/// GET /geocode?q=<text>
pub async fn search_places(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GeocodeQuery>,
) -> Result<Json<GeocodeResponse>> {
    let query = params.q.trim();
    if query.chars().count() < GEOCODE_MIN_QUERY_LEN {
        return Err(AppError::InvalidRequest(format!(
            "q must be at least {} characters",
            GEOCODE_MIN_QUERY_LEN
        )));
    }

    let places = state.geocoder.search(query, GEOCODE_RESULT_LIMIT).await?;
    tracing::debug!(query, count = places.len(), "Geocode lookup");

    Ok(Json(GeocodeResponse { places }))
}
