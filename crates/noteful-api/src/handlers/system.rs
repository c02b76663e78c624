use axum::response::IntoResponse;
use axum::Json;

/// Authenticated liveness probe.
pub async fn hello() -> &'static str {
    "Hello, world!"
}

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
