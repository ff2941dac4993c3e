use crate::constants::NO_ROUTES_MESSAGE;
use crate::error::{AppError, Result};
use crate::models::Route;

/// Rank candidates by closeness to the target and keep the best `max_results`.
/// The sort is stable, so equal deviations keep generation order.
pub fn select(
    mut candidates: Vec<Route>,
    target_distance_km: f64,
    max_results: usize,
) -> Result<Vec<Route>> {
    if candidates.is_empty() {
        return Err(AppError::NoRoutesFound(NO_ROUTES_MESSAGE.to_string()));
    }

    candidates.sort_by(|a, b| {
        a.distance_deviation(target_distance_km)
            .total_cmp(&b.distance_deviation(target_distance_km))
    });
    candidates.truncate(max_results);

    Ok(candidates)
}
