// ABOUTME: HTTP server assembly: route groups, middleware layers, static media, and shutdown
// ABOUTME: Exposes the router for tests and a run loop with graceful shutdown for the binary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

//! # Server
//!
//! [`build_app`] merges every route group, applies CORS, request ids,
//! tracing, and trailing-slash normalization. [`run`] binds the listener and
//! serves until Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{body::Body, extract::Request, Router, ServiceExt};
use http::HeaderName;
use tokio::net::TcpListener;
use tower_http::{
    normalize_path::{NormalizePath, NormalizePathLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tower::Layer;
use tracing::{error, info};

use crate::constants::defaults::MEDIA_URL_PATH;
use crate::middleware::{create_request_span, setup_cors, RequestIdMaker, REQUEST_ID_HEADER};
use crate::resources::ServerResources;
use crate::routes::{
    AuthRoutes, HealthRoutes, IngredientRoutes, RecipeRoutes, ShortLinkRoutes, UserRoutes,
};

/// Router with every route group and middleware layer, without path normalization
pub fn build_router(resources: &Arc<ServerResources>) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(AuthRoutes::routes(resources.clone()))
        .merge(UserRoutes::routes(resources.clone()))
        .merge(IngredientRoutes::routes(resources.clone()))
        .merge(RecipeRoutes::routes(resources.clone()))
        .merge(ShortLinkRoutes::routes(resources.clone()))
        .nest_service(MEDIA_URL_PATH, ServeDir::new(resources.images.root()))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(TraceLayer::new_for_http().make_span_with(create_request_span))
        .layer(SetRequestIdLayer::new(request_id_header, RequestIdMaker))
        .layer(setup_cors(&resources.config))
}

/// Complete application; `/api/recipes/` and `/api/recipes` route identically
pub fn build_app(resources: &Arc<ServerResources>) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(resources))
}

/// Serve the application until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let address = SocketAddr::from(([0, 0, 0, 0], resources.config.http_port));
    let app = build_app(&resources);

    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Foodgram API listening on http://{address}");

    axum::serve(listener, ServiceExt::<Request<Body>>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
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
