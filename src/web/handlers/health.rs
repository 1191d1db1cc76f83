//! Health check HTTP handlers
//!
//! Health check endpoints for monitoring the application's status and its
//! database dependency.

use axum::{extract::State, response::IntoResponse};

use crate::database::Database;
use crate::web::{
    AppState,
    extractors::RequestContext,
    responses::{HealthResponse, ok},
    utils::log_request,
};

/// Health check endpoint
///
/// Returns basic application health status including database connectivity
pub async fn health_check(
    State(state): State<AppState>,
    context: RequestContext,
) -> impl IntoResponse {
    log_request(
        &axum::http::Method::GET,
        &"/health".parse().unwrap(),
        &context,
    );

    let response = if database_reachable(&state.database).await {
        HealthResponse::healthy()
    } else {
        HealthResponse::unhealthy("Database connection failed".to_string())
    };

    ok(response)
}

/// Readiness check (for Kubernetes probes)
pub async fn readiness_check(
    State(state): State<AppState>,
    context: RequestContext,
) -> impl IntoResponse {
    log_request(
        &axum::http::Method::GET,
        &"/ready".parse().unwrap(),
        &context,
    );

    if database_reachable(&state.database).await {
        ok(serde_json::json!({
            "status": "ready",
            "timestamp": chrono::Utc::now()
        }))
        .into_response()
    } else {
        axum::http::StatusCode::SERVICE_UNAVAILABLE.into_response()
    }
}

/// Liveness check (for Kubernetes probes)
pub async fn liveness_check(context: RequestContext) -> impl IntoResponse {
    log_request(&axum::http::Method::GET, &"/live".parse().unwrap(), &context);

    // If we can respond, we're alive
    ok(serde_json::json!({
        "status": "alive",
        "timestamp": chrono::Utc::now()
    }))
}

async fn database_reachable(database: &Database) -> bool {
    database.connection().ping().await.is_ok()
}
