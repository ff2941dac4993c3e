use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Routing service error: {0}")]
    RoutingService(String),

    #[error("Geocoding service error: {0}")]
    Geocoding(String),

    #[error("No routes found: {0}")]
    NoRoutesFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

// Convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Configuration(ref e) => {
                tracing::error!("Configuration error: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Routing service is not configured",
                )
            }
            AppError::InvalidRequest(ref e) => (StatusCode::BAD_REQUEST, e.as_str()),
            AppError::RoutingService(ref e) => {
                tracing::error!("Routing service error: {}", e);
                (StatusCode::BAD_GATEWAY, "Routing service error")
            }
            AppError::Geocoding(ref e) => {
                tracing::error!("Geocoding service error: {}", e);
                (StatusCode::BAD_GATEWAY, "Geocoding service error")
            }
            AppError::NoRoutesFound(ref e) => {
                tracing::info!("No routes found: {}", e);
                (StatusCode::UNPROCESSABLE_ENTITY, e.as_str())
            }
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("Unknown error"),
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
