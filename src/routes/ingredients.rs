// ABOUTME: Ingredient catalogue route handlers
// ABOUTME: Unpaginated name-filtered listing and lookup by id, both anonymous
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::extract::{ApiPath, ApiQuery};
use crate::errors::AppError;
use crate::resources::ServerResources;

/// Query for ingredient search
#[derive(Debug, Default, Deserialize)]
pub struct IngredientQuery {
    /// Case-insensitive substring of the ingredient name
    pub name: Option<String>,
}

/// Ingredient routes
pub struct IngredientRoutes;

impl IngredientRoutes {
    /// Create all ingredient routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/ingredients", get(Self::handle_list))
            .route("/api/ingredients/:id", get(Self::handle_get))
            .with_state(resources)
    }

    /// Handle GET /api/ingredients
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        ApiQuery(query): ApiQuery<IngredientQuery>,
    ) -> Result<Response, AppError> {
        let ingredients = resources
            .database
            .ingredients()
            .list(query.name.as_deref())
            .await?;

        Ok((StatusCode::OK, Json(ingredients)).into_response())
    }

    /// Handle GET /api/ingredients/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        ApiPath(ingredient_id): ApiPath<i64>,
    ) -> Result<Response, AppError> {
        let ingredient = resources
            .database
            .ingredients()
            .get(ingredient_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Ingredient {ingredient_id}")))?;

        Ok((StatusCode::OK, Json(ingredient)).into_response())
    }
}
