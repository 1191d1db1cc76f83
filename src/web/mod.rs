//! Web layer module
//!
//! This module provides the HTTP interface for the leaderboard service.
//! Handlers are thin and delegate to the service layer for business logic.
//!
//! # Architecture
//!
//! - **Handlers**: HTTP request handlers organized by domain
//! - **Responses**: Standardized response types and error handling
//! - **Extractors**: Request validation and client identity extraction
//! - **Middleware**: Cross-cutting concerns like logging and security

use anyhow::Result;
use axum::{Router, routing::get};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;

use crate::{
    config::Config, database::Database,
    database::repositories::PlayerScoreSeaOrmRepository, services::LeaderboardService,
};

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod utils;

// Re-export commonly used types
pub use extractors::{ClientIdentity, RequestContext, ValidatedJson};
pub use responses::{ErrorResponse, handle_error, handle_result};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub config: Config,
    /// Leaderboard service owning the snapshot cache; constructed once at
    /// service start and shared, never ambient global state
    pub leaderboard: LeaderboardService,
    /// Application start time for uptime calculation
    pub start_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(config: Config, database: Database) -> Self {
        let repository = PlayerScoreSeaOrmRepository::new(database.connection());
        let leaderboard = LeaderboardService::new(repository, &config.leaderboard);

        Self {
            database,
            config,
            leaderboard,
            start_time: chrono::Utc::now(),
        }
    }
}

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    /// Create a new web server
    pub fn new(config: Config, database: Database) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;
        let state = AppState::new(config, database);
        let app = Self::create_router(state);

        Ok(Self { app, addr })
    }

    /// Create the router with all routes and middleware
    pub fn create_router(state: AppState) -> Router {
        Router::new()
            // Health check endpoints (no auth required)
            .route("/health", get(handlers::health::health_check))
            .route("/ready", get(handlers::health::readiness_check))
            .route("/live", get(handlers::health::liveness_check))
            // OpenAPI documentation
            .merge(Self::openapi_routes())
            // API v1 routes
            .nest("/api/v1", Self::api_v1_routes())
            // Middleware (applied in reverse order)
            .layer(CorsLayer::permissive())
            .layer(axum::middleware::from_fn(
                middleware::security_headers_middleware,
            ))
            .layer(axum::middleware::from_fn(
                middleware::request_logging_middleware,
            ))
            // Shared state
            .with_state(state)
    }

    /// OpenAPI documentation routes
    fn openapi_routes() -> Router<AppState> {
        use utoipa_swagger_ui::SwaggerUi;

        Router::new().merge(
            SwaggerUi::new("/docs").url("/api/openapi.json", openapi::openapi_spec()),
        )
    }

    /// API v1 routes
    fn api_v1_routes() -> Router<AppState> {
        Router::new().route(
            "/leaderboard",
            get(handlers::leaderboard::get_leaderboard)
                .post(handlers::leaderboard::submit_score),
        )
    }

    /// Start the web server
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        axum::serve(listener, self.app).await?;
        Ok(())
    }

    /// Serve with a notification when the server is actually listening or
    /// fails to bind, shutting down gracefully on SIGTERM/SIGINT
    pub async fn serve_with_signal(
        self,
        ready_signal: tokio::sync::oneshot::Sender<Result<()>>,
    ) -> Result<()> {
        match tokio::net::TcpListener::bind(&self.addr).await {
            Ok(listener) => {
                // Signal that we're now actually listening on the port
                let _ = ready_signal.send(Ok(()));

                let shutdown_signal = async move {
                    #[cfg(unix)]
                    {
                        use tokio::signal::unix::{SignalKind, signal};
                        let mut sigterm = signal(SignalKind::terminate())
                            .expect("failed to install SIGTERM handler");
                        let mut sigint = signal(SignalKind::interrupt())
                            .expect("failed to install SIGINT handler");

                        tokio::select! {
                            _ = sigterm.recv() => {
                                tracing::info!("Received SIGTERM, shutting down gracefully");
                            }
                            _ = sigint.recv() => {
                                tracing::info!("Received SIGINT (Ctrl+C), shutting down gracefully");
                            }
                        }
                    }

                    #[cfg(not(unix))]
                    {
                        use tokio::signal;
                        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
                        tracing::info!("Received Ctrl+C, shutting down gracefully");
                    }
                };

                axum::serve(listener, self.app)
                    .with_graceful_shutdown(shutdown_signal)
                    .await?;
                Ok(())
            }
            Err(bind_error) => {
                // Signal the bind failure immediately
                let bind_err_msg = format!("Failed to bind to {}: {}", self.addr, bind_error);
                let _ = ready_signal.send(Err(anyhow::anyhow!("{}", bind_err_msg)));
                Err(anyhow::anyhow!("{}", bind_err_msg))
            }
        }
    }

    /// Get the host address
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Get the port number
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}
