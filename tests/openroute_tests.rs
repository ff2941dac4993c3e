use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use runpath::error::AppError;
use runpath::models::Coordinates;
use runpath::services::nominatim::{Geocoder, NominatimClient};
use runpath::services::openroute::{AuthMode, OpenRouteClient};
use runpath::services::routing::RoutingOracle;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the fake upstream saw on its last request
#[derive(Default)]
struct Captured {
    authorization: Option<String>,
    user_agent: Option<String>,
    body: Option<Value>,
    query: HashMap<String, String>,
}

type Shared = Arc<Mutex<Captured>>;

async fn directions(
    State(captured): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let coordinates = body["coordinates"].clone();
    {
        let mut captured = captured.lock().unwrap();
        captured.authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        captured.body = Some(body);
    }

    if coordinates.as_array().map(|c| c.len()) == Some(4) {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"error": {"code": 2010, "message": "Could not find routable point"}})),
        );
    }

    // Echo the waypoints back as the path, with a made-up elevation profile
    let path: Vec<Value> = coordinates
        .as_array()
        .unwrap()
        .iter()
        .enumerate()
        .map(|(i, c)| json!([c[0], c[1], 10.0 + (i % 2) as f64 * 5.0]))
        .collect();

    (
        StatusCode::OK,
        Json(json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"summary": {"distance": 4987.6, "duration": 3591.1}},
                "geometry": {"type": "LineString", "coordinates": path}
            }]
        })),
    )
}

async fn search(
    State(captured): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let mut captured = captured.lock().unwrap();
    captured.user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    captured.query = query;

    Json(json!([
        {"display_name": "City Hall Park, New York", "lat": "40.7127", "lon": "-74.0059"},
        {"display_name": "Broken", "lat": "not-a-number", "lon": "-74.0"}
    ]))
}

async fn spawn_upstream() -> (String, Shared) {
    let captured: Shared = Arc::new(Mutex::new(Captured::default()));
    let app = Router::new()
        .route("/v2/directions/foot-walking/geojson", post(directions))
        .route("/search", get(search))
        .with_state(captured.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), captured)
}

fn triangle() -> Vec<Coordinates> {
    let start = Coordinates::new(40.7128, -74.0060).unwrap();
    vec![
        start,
        Coordinates::new(40.7158, -74.0060).unwrap(),
        Coordinates::new(40.7113, -74.0025).unwrap(),
        start,
    ]
}

fn client(base_url: String, api_key: Option<&str>, auth_mode: AuthMode) -> OpenRouteClient {
    OpenRouteClient::with_config(
        api_key.map(str::to_string),
        base_url,
        auth_mode,
        Duration::from_secs(5),
    )
}

#[tokio::test]
async fn test_directions_request_and_response() {
    let (base_url, captured) = spawn_upstream().await;
    let oracle = client(format!("{}/", base_url), Some("ors-key"), AuthMode::ApiKeyHeader);

    let waypoints = vec![
        Coordinates::new(40.7128, -74.0060).unwrap(),
        Coordinates::new(40.7158, -74.0060).unwrap(),
        Coordinates::new(40.7128, -74.0060).unwrap(),
    ];
    let directions = oracle.get_directions(&waypoints).await.unwrap();

    assert!((directions.distance_km() - 4.9876).abs() < 1e-9);
    assert_eq!(directions.geometry.len(), 3);
    assert_eq!(directions.geometry[0].lat, 40.7128);
    assert_eq!(directions.geometry[0].lng, -74.0060);
    assert_eq!(directions.geometry[1].elevation, Some(15.0));
    assert_eq!(directions.elevation_gain_m(), 5.0);

    let captured = captured.lock().unwrap();
    assert_eq!(captured.authorization.as_deref(), Some("ors-key"));

    let body = captured.body.as_ref().unwrap();
    assert_eq!(body["coordinates"][0], json!([-74.006, 40.7128]));
    assert_eq!(body["elevation"], true);
    assert_eq!(body["instructions"], false);
}

#[tokio::test]
async fn test_bearer_auth_mode() {
    let (base_url, captured) = spawn_upstream().await;
    let oracle = client(base_url, Some("proxy-token"), AuthMode::BearerHeader);

    let waypoints = vec![
        Coordinates::new(40.7128, -74.0060).unwrap(),
        Coordinates::new(40.7158, -74.0060).unwrap(),
        Coordinates::new(40.7128, -74.0060).unwrap(),
    ];
    oracle.get_directions(&waypoints).await.unwrap();

    let captured = captured.lock().unwrap();
    assert_eq!(
        captured.authorization.as_deref(),
        Some("Bearer proxy-token")
    );
}

#[tokio::test]
async fn test_upstream_error_is_routing_service_error() {
    let (base_url, _captured) = spawn_upstream().await;
    let oracle = client(base_url, Some("ors-key"), AuthMode::ApiKeyHeader);

    match oracle.get_directions(&triangle()).await {
        Err(AppError::RoutingService(message)) => assert!(message.contains("404")),
        other => panic!("expected RoutingService error, got {:?}", other.map(|d| d.distance_meters)),
    }
}

#[tokio::test]
async fn test_missing_key_never_reaches_upstream() {
    let (base_url, captured) = spawn_upstream().await;
    let oracle = client(base_url, None, AuthMode::ApiKeyHeader);

    assert!(matches!(
        oracle.ensure_configured(),
        Err(AppError::Configuration(_))
    ));
    assert!(matches!(
        oracle.get_directions(&triangle()).await,
        Err(AppError::Configuration(_))
    ));
    assert!(captured.lock().unwrap().body.is_none());
}

#[tokio::test]
async fn test_unreachable_upstream() {
    // Nothing listens on port 9 locally
    let oracle = client(
        "http://127.0.0.1:9".to_string(),
        Some("ors-key"),
        AuthMode::ApiKeyHeader,
    );

    assert!(matches!(
        oracle.get_directions(&triangle()).await,
        Err(AppError::RoutingService(_))
    ));
}

#[tokio::test]
async fn test_nominatim_search() {
    let (base_url, captured) = spawn_upstream().await;
    let geocoder = NominatimClient::with_base_url(base_url);

    let places = geocoder.search("city hall park", 5).await.unwrap();

    assert_eq!(places.len(), 1);
    assert_eq!(places[0].display_name, "City Hall Park, New York");
    assert_eq!(places[0].coordinates.lat, 40.7127);
    assert_eq!(places[0].coordinates.lng, -74.0059);

    let captured = captured.lock().unwrap();
    assert_eq!(captured.query.get("q").map(String::as_str), Some("city hall park"));
    assert_eq!(captured.query.get("format").map(String::as_str), Some("json"));
    assert_eq!(captured.query.get("limit").map(String::as_str), Some("5"));
    assert!(captured
        .user_agent
        .as_deref()
        .is_some_and(|ua| ua.starts_with("RunPath")));
}

#[tokio::test]
async fn test_nominatim_unreachable() {
    let geocoder = NominatimClient::with_base_url("http://127.0.0.1:9".to_string());

    assert!(matches!(
        geocoder.search("city hall park", 5).await,
        Err(AppError::Geocoding(_))
    ));
}
