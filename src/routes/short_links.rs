// ABOUTME: Short-link redirect handler
// ABOUTME: Resolves /s/:code to the recipe's front-end page with a 302
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tracing::debug;

use super::extract::ApiPath;
use crate::constants::short_links::PATH_PREFIX;
use crate::errors::AppError;
use crate::resources::ServerResources;

/// Short-link routes
pub struct ShortLinkRoutes;

impl ShortLinkRoutes {
    /// Create the redirect route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(&format!("{PATH_PREFIX}/:code"), get(Self::handle_redirect))
            .with_state(resources)
    }

    /// Handle GET /s/:code
    async fn handle_redirect(
        State(resources): State<Arc<ServerResources>>,
        ApiPath(code): ApiPath<String>,
    ) -> Result<Response, AppError> {
        let recipe_id = resources
            .database
            .short_links()
            .resolve(&code)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Short link '{code}'")))?;

        let location = format!(
            "{}/recipes/{recipe_id}",
            resources.config.urls.frontend_url
        );
        debug!("Short link {code} -> {location}");

        Ok((StatusCode::FOUND, [(LOCATION, location)]).into_response())
    }
}
