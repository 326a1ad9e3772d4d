//! Telemetry HTTP endpoint
//!
//! `GET /metrics` serves the collector registry in Prometheus text format,
//! `GET /health` answers liveness checks.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

use super::CollectorMetrics;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Build the telemetry router
pub fn router(metrics: CollectorMetrics) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<CollectorMetrics>) -> impl IntoResponse {
    match metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Serve telemetry on `addr` until `shutdown` flips to true
///
/// # Errors
///
/// Returns an error if the address cannot be bound or serving fails
pub async fn serve(
    addr: SocketAddr,
    metrics: CollectorMetrics,
    mut shutdown: watch::Receiver<bool>,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(address = %addr, "Telemetry server listening");

    axum::serve(listener, router(metrics))
        .with_graceful_shutdown(async move {
            while !*shutdown.borrow() {
                if shutdown.changed().await.is_err() {
                    break;
                }
            }
        })
        .await?;

    tracing::info!("Telemetry server stopped");
    Ok(())
}
