// ABOUTME: Token login and logout route handlers
// ABOUTME: Exchanges email and password for an API token and revokes it on logout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::extract::ApiJson;
use crate::errors::AppError;
use crate::resources::ServerResources;

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

/// Login response with the issued token
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Token to send as `Authorization: Token <auth_token>`
    pub auth_token: String,
}

/// Authentication routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/token/login", post(Self::handle_login))
            .route("/api/auth/token/logout", post(Self::handle_logout))
            .with_state(resources)
    }

    /// Handle POST /api/auth/token/login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        ApiJson(request): ApiJson<LoginRequest>,
    ) -> Result<Response, AppError> {
        info!("Login attempt for {}", request.email);

        let auth_token = resources
            .auth_manager
            .login(request.email.trim(), &request.password)
            .await?;

        Ok((StatusCode::OK, Json(LoginResponse { auth_token })).into_response())
    }

    /// Handle POST /api/auth/token/logout
    async fn handle_logout(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        resources.auth_manager.logout(&headers).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
