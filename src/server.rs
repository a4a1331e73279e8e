// ABOUTME: Router assembly and HTTP server lifecycle for the back-office service
// ABOUTME: Wires routes, CORS, request IDs, and tracing; serves until Ctrl-C or SIGTERM
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

//! Server assembly
//!
//! Layer order, outermost first: request-id assignment, request-id
//! propagation, tracing, CORS. CORS sits innermost so that preflights and
//! error responses are still traced and carry a request ID.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::config::ServerConfig;
use crate::errors::{AppError, AppResult};
use crate::middleware::{cors_middleware, create_request_span, CorsPolicy};
use crate::routes::{HealthRoutes, PasswordResetRoutes};
use crate::services::PasswordResetService;

/// Shared state handed to the router
#[derive(Clone)]
pub struct AppState {
    /// Password reset procedure
    pub password_reset: Arc<PasswordResetService>,
    /// Resolved CORS policy
    pub cors: Arc<CorsPolicy>,
}

impl AppState {
    /// Build state from configuration and a constructed service
    #[must_use]
    pub fn new(config: &ServerConfig, password_reset: PasswordResetService) -> Self {
        Self {
            password_reset: Arc::new(password_reset),
            cors: Arc::new(CorsPolicy::from_config(&config.cors)),
        }
    }
}

/// Build the complete application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(PasswordResetRoutes::routes(state.password_reset))
        .merge(HealthRoutes::routes())
        .layer(middleware::from_fn_with_state(state.cors, cors_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(create_request_span))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Bind the configured address and serve until a shutdown signal arrives
///
/// # Errors
///
/// Returns `ConfigInvalid` for an unparseable bind address and
/// `InternalError` if the listener cannot be bound or the server fails.
pub async fn run(config: &ServerConfig, password_reset: PasswordResetService) -> AppResult<()> {
    let address: SocketAddr = format!("{}:{}", config.host, config.http_port)
        .parse()
        .map_err(|e| {
            AppError::config_invalid(format!(
                "Invalid bind address {}:{}: {e}",
                config.host, config.http_port
            ))
        })?;

    let app = build_router(AppState::new(config, password_reset));

    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {address}: {e}")).with_source(e))?;
    info!("Back-office server listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")).with_source(e))?;

    info!("Back-office server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
