use std::env;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use posti_rs::services::{self, CARRIER_CODE};
use posti_rs::{ClientConfig, Error, LocationClient, LocationQuery, ShipmentParams};

/// Server configuration
struct ServerConfig {
    port: u16,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        }
    }
}

/// Application state shared across all requests
#[derive(Clone)]
struct AppState {
    client: LocationClient,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,posti_rs=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    let client_config = ClientConfig::from_env();
    tracing::info!("Location service endpoint: {}", client_config.endpoint);

    let client =
        LocationClient::with_config(client_config).context("Failed to build location client")?;

    let app = build_app(client);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

fn build_app(client: LocationClient) -> Router {
    let state = AppState { client };

    Router::new()
        .route("/health", get(health_check))
        .route("/api/services", get(list_services))
        .route("/api/locations", get(query_locations))
        .route("/api/shipments", post(build_shipment))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Deserialize)]
struct ServicesParams {
    #[serde(default)]
    national: bool,
}

#[derive(Serialize)]
struct ServiceData {
    code: &'static str,
    description: &'static str,
    national: bool,
}

#[derive(Serialize)]
struct ServicesResponse {
    carrier: &'static str,
    data: Vec<ServiceData>,
}

async fn list_services(Query(params): Query<ServicesParams>) -> Json<ServicesResponse> {
    let data = services::services()
        .filter(|(code, _)| !params.national || services::is_national_service(code))
        .map(|(code, description)| ServiceData {
            code,
            description,
            national: services::is_national_service(code),
        })
        .collect();

    Json(ServicesResponse {
        carrier: CARRIER_CODE,
        data,
    })
}

/// Proxy a location lookup. Query parameters use the location service's own names.
async fn query_locations(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<LocationsResponse>, ApiError> {
    let query =
        LocationQuery::from_params(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;

    tracing::info!("Querying locations with {} filter(s)", params.len());

    let locations = state.client.get_locations(&query).await?;

    Ok(Json(LocationsResponse {
        success: true,
        count: locations.len(),
        data: locations.into_inner(),
    }))
}

#[derive(Serialize)]
struct LocationsResponse {
    success: bool,
    count: usize,
    data: Vec<Value>,
}

/// Validate and assemble a shipment request without submitting it
async fn build_shipment(
    Json(params): Json<ShipmentParams>,
) -> Result<Json<ShipmentResponse>, ApiError> {
    tracing::info!(
        "Building shipment for service {} ({} parcel(s))",
        params.service_code,
        params.parcels.len()
    );

    let shipment = params.build()?;

    Ok(Json(ShipmentResponse {
        success: true,
        data: shipment.to_json()?,
    }))
}

#[derive(Serialize)]
struct ShipmentResponse {
    success: bool,
    data: Value,
}

/// API error types
enum ApiError {
    BadRequest(String),
    BadGateway(String),
    InternalError(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidArgument(_) | Error::Validation(_) => {
                ApiError::BadRequest(err.to_string())
            }
            Error::Http(_) | Error::UnexpectedResponse(_) => {
                tracing::error!("Location service error: {}", err);
                ApiError::BadGateway(err.to_string())
            }
            Error::Json(_) => {
                tracing::error!("Serialization error: {}", err);
                ApiError::InternalError(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "success": false,
            "error": message
        }));

        (status, body).into_response()
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down gracefully...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down gracefully...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::json;
    use tower::ServiceExt;

    /// Nothing listens on port 1, so any upstream call fails to connect.
    fn unreachable_client() -> LocationClient {
        let config = ClientConfig::default().with_endpoint("http://127.0.0.1:1/location");
        LocationClient::with_config(config).unwrap()
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = build_app(unreachable_client()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn shipment_body(service_code: &str, sender: Value) -> Value {
        json!({
            "customer_number": "12345",
            "service_code": service_code,
            "receiver": {"quickId": "2"},
            "sender": sender,
            "parcels": [{"copies": 1}]
        })
    }

    #[tokio::test]
    async fn test_national_services_filter() {
        let (status, body) = send(get("/api/services?national=true")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["carrier"], "POSTI");
        assert_eq!(body["data"].as_array().unwrap().len(), 8);

        let (_, body) = send(get("/api/services")).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 15);
    }

    #[tokio::test]
    async fn test_unknown_location_param_is_bad_request() {
        let (status, body) = send(get("/api/locations?foo=1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("foo"));
    }

    #[tokio::test]
    async fn test_unreachable_location_service_is_bad_gateway() {
        let (status, body) = send(get("/api/locations?countryCode=FI")).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_build_shipment() {
        let request = post_json("/api/shipments", shipment_body("PO2102", json!({"quickId": "1"})));
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["service"], json!({"id": "PO2102"}));
        assert_eq!(body["data"]["receiver"], json!({"quickId": "2"}));
    }

    #[tokio::test]
    async fn test_invalid_shipment_is_bad_request() {
        let request = post_json("/api/shipments", shipment_body("PO2102", json!({"name": "X"})));
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Sender"));

        let request = post_json("/api/shipments", shipment_body("XX0000", json!({"quickId": "1"})));
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (Error::InvalidArgument("x".into()), StatusCode::BAD_REQUEST),
            (Error::UnexpectedResponse("x".into()), StatusCode::BAD_GATEWAY),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), expected);
        }

        let json_err = serde_json::from_str::<Value>("{").unwrap_err();
        let response = ApiError::from(Error::Json(json_err)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
