// ABOUTME: Recipe route handlers: CRUD, favorites, shopping cart, downloads, and short links
// ABOUTME: Reads are anonymous; writes require a token and edits are restricted to the author
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

//! Recipe routes
//!
//! Besides plain CRUD this module exposes the per-user collections
//! (favorites and shopping cart), the aggregated shopping-list download,
//! the cooking-time buckets, and short-link creation.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::responses::{recipe_response, recipe_short_response, RecipeResponse};
use crate::auth::AuthResult;
use crate::constants::{shopping_list::FILE_NAME, short_links::PATH_PREFIX};
use crate::errors::AppError;
use crate::models::{IngredientAmount, NewRecipe, Recipe, RecipeCollection, RecipeFilter, RecipeUpdate};
use crate::pagination::{Page, PageParams};
use crate::resources::ServerResources;
use crate::services::{cooking_time, images::RECIPE_IMAGES_DIR, shopping_list, validation};

// ============================================================================
// Request / Response Types
// ============================================================================

/// Ingredient line in a recipe payload
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct IngredientLine {
    /// Ingredient id
    pub id: i64,
    /// Amount used
    pub amount: i64,
}

impl From<IngredientLine> for IngredientAmount {
    fn from(line: IngredientLine) -> Self {
        Self {
            ingredient_id: line.id,
            amount: line.amount,
        }
    }
}

/// Payload for publishing a recipe
#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    /// Ingredient lines
    pub ingredients: Vec<IngredientLine>,
    /// `data:image/<ext>;base64,...` payload
    pub image: String,
    /// Title
    pub name: String,
    /// Instructions
    pub text: String,
    /// Cooking time in minutes
    pub cooking_time: i64,
}

/// Payload for editing a recipe; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRecipeRequest {
    /// Replacement ingredient lines
    pub ingredients: Option<Vec<IngredientLine>>,
    /// Replacement image
    pub image: Option<String>,
    /// New title
    pub name: Option<String>,
    /// New instructions
    pub text: Option<String>,
    /// New cooking time
    pub cooking_time: Option<i64>,
}

/// Query for recipe listings
#[derive(Debug, Default, Deserialize)]
pub struct RecipeListQuery {
    /// 1-based page number
    pub page: Option<i64>,
    /// Page size
    pub limit: Option<i64>,
    /// Author id
    pub author: Option<i64>,
    /// `1` for favorited only, `0` for not favorited
    pub is_favorited: Option<String>,
    /// `1` for in the cart only, `0` for not in the cart
    pub is_in_shopping_cart: Option<String>,
    /// Minimum cooking time, inclusive
    pub cooking_time_min: Option<i64>,
    /// Maximum cooking time, inclusive
    pub cooking_time_max: Option<i64>,
}

/// Short link response
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortLinkResponse {
    /// Absolute short URL
    #[serde(rename = "short-link")]
    pub short_link: String,
}

fn parse_flag(field: &str, value: Option<&str>) -> Result<Option<bool>, AppError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some("1" | "true") => Ok(Some(true)),
        Some("0" | "false") => Ok(Some(false)),
        Some(other) => Err(AppError::invalid_input(format!(
            "{field} must be 0 or 1, got '{other}'"
        ))),
    }
}

impl RecipeListQuery {
    fn filter(&self) -> Result<RecipeFilter, AppError> {
        Ok(RecipeFilter {
            author_id: self.author,
            is_favorited: parse_flag("is_favorited", self.is_favorited.as_deref())?,
            is_in_shopping_cart: parse_flag(
                "is_in_shopping_cart",
                self.is_in_shopping_cart.as_deref(),
            )?,
            cooking_time_min: self.cooking_time_min,
            cooking_time_max: self.cooking_time_max,
        })
    }

    /// Active filters rendered back into a query string for page links
    fn filter_query(filter: &RecipeFilter) -> String {
        let flag = |value: bool| u8::from(value);
        let mut params = Vec::new();
        if let Some(author) = filter.author_id {
            params.push(format!("author={author}"));
        }
        if let Some(value) = filter.is_favorited {
            params.push(format!("is_favorited={}", flag(value)));
        }
        if let Some(value) = filter.is_in_shopping_cart {
            params.push(format!("is_in_shopping_cart={}", flag(value)));
        }
        if let Some(min) = filter.cooking_time_min {
            params.push(format!("cooking_time_min={min}"));
        }
        if let Some(max) = filter.cooking_time_max {
            params.push(format!("cooking_time_max={max}"));
        }
        params.join("&")
    }
}

/// Recipe routes
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/recipes",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/recipes/download_shopping_cart",
                get(Self::handle_download_shopping_cart),
            )
            .route(
                "/api/recipes/cooking-time-buckets",
                get(Self::handle_cooking_time_buckets),
            )
            .route(
                "/api/recipes/:id",
                get(Self::handle_get)
                    .patch(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .route(
                "/api/recipes/:id/favorite",
                post(Self::handle_add_favorite).delete(Self::handle_remove_favorite),
            )
            .route(
                "/api/recipes/:id/shopping_cart",
                post(Self::handle_add_to_cart).delete(Self::handle_remove_from_cart),
            )
            .route("/api/recipes/:id/get-link", get(Self::handle_get_link))
            .with_state(resources)
    }

    async fn authenticate(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<AuthResult, AppError> {
        resources.auth_manager.authenticate(headers).await
    }

    async fn viewer_id(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<Option<i64>, AppError> {
        Ok(resources
            .auth_manager
            .authenticate_optional(headers)
            .await?
            .map(|auth| auth.user_id()))
    }

    /// Load a recipe and make sure the caller wrote it
    async fn authored_recipe(
        resources: &Arc<ServerResources>,
        auth: &AuthResult,
        recipe_id: i64,
    ) -> Result<Recipe, AppError> {
        let recipe = resources.database.recipes().get_required(recipe_id).await?;
        if recipe.author_id != auth.user_id() {
            warn!(
                user.id = auth.user_id(),
                recipe.id = recipe_id,
                "Rejected change to another author's recipe"
            );
            return Err(AppError::permission_denied(
                "Only the author can change this recipe",
            ));
        }
        Ok(recipe)
    }

    async fn full_response(
        resources: &Arc<ServerResources>,
        recipe_id: i64,
        viewer_id: Option<i64>,
    ) -> Result<RecipeResponse, AppError> {
        let detail = resources
            .database
            .recipes()
            .detail(recipe_id, viewer_id)
            .await?;
        recipe_response(resources, detail, viewer_id).await
    }

    // ========================================================================
    // CRUD
    // ========================================================================

    /// Handle GET /api/recipes
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        ApiQuery(query): ApiQuery<RecipeListQuery>,
    ) -> Result<Response, AppError> {
        let viewer_id = Self::viewer_id(&headers, &resources).await?;
        let filter = query.filter()?;
        let window = PageParams {
            page: query.page,
            limit: query.limit,
        }
        .resolve(resources.config.page_size);

        let (details, count) = resources
            .database
            .recipes()
            .list(&filter, viewer_id, window)
            .await?;

        let mut results = Vec::with_capacity(details.len());
        for detail in details {
            results.push(recipe_response(&resources, detail, viewer_id).await?);
        }

        let filter_query = RecipeListQuery::filter_query(&filter);
        let base_url = if filter_query.is_empty() {
            resources.api_url("/api/recipes")
        } else {
            resources.api_url(&format!("/api/recipes?{filter_query}"))
        };

        let page = Page::new(results, count, window, &base_url);
        Ok((StatusCode::OK, Json(page)).into_response())
    }

    /// Handle GET /api/recipes/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        ApiPath(recipe_id): ApiPath<i64>,
    ) -> Result<Response, AppError> {
        let viewer_id = Self::viewer_id(&headers, &resources).await?;
        let response = Self::full_response(&resources, recipe_id, viewer_id).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/recipes
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        ApiJson(request): ApiJson<CreateRecipeRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let ingredients: Vec<IngredientAmount> =
            request.ingredients.iter().copied().map(Into::into).collect();
        validation::validate_recipe_name(&request.name)?;
        validation::validate_recipe_text(&request.text)?;
        validation::validate_cooking_time(request.cooking_time)?;
        validation::validate_ingredient_amounts(&ingredients)?;

        let image = resources
            .images
            .save_data_url(RECIPE_IMAGES_DIR, &request.image)
            .await?;

        let created = resources
            .database
            .recipes()
            .create(&NewRecipe {
                author_id: auth.user_id(),
                name: request.name.trim().to_owned(),
                image: image.clone(),
                text: request.text,
                cooking_time: request.cooking_time,
                ingredients,
            })
            .await;

        let recipe_id = match created {
            Ok(recipe_id) => recipe_id,
            Err(error) => {
                resources.images.delete(&image).await?;
                return Err(error);
            }
        };

        info!(user.id = auth.user_id(), recipe.id = recipe_id, "Recipe published");

        let response = Self::full_response(&resources, recipe_id, Some(auth.user_id())).await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle PATCH /api/recipes/:id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        ApiPath(recipe_id): ApiPath<i64>,
        ApiJson(request): ApiJson<UpdateRecipeRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;
        let existing = Self::authored_recipe(&resources, &auth, recipe_id).await?;

        if let Some(name) = &request.name {
            validation::validate_recipe_name(name)?;
        }
        if let Some(text) = &request.text {
            validation::validate_recipe_text(text)?;
        }
        if let Some(minutes) = request.cooking_time {
            validation::validate_cooking_time(minutes)?;
        }
        let ingredients: Option<Vec<IngredientAmount>> = request
            .ingredients
            .map(|lines| lines.into_iter().map(Into::into).collect());
        if let Some(lines) = &ingredients {
            validation::validate_ingredient_amounts(lines)?;
        }

        let new_image = match request.image.as_deref() {
            Some(data_url) => Some(
                resources
                    .images
                    .save_data_url(RECIPE_IMAGES_DIR, data_url)
                    .await?,
            ),
            None => None,
        };

        let update = RecipeUpdate {
            name: request.name.map(|name| name.trim().to_owned()),
            image: new_image.clone(),
            text: request.text,
            cooking_time: request.cooking_time,
            ingredients,
        };

        if let Err(error) = resources.database.recipes().update(recipe_id, &update).await {
            if let Some(image) = &new_image {
                resources.images.delete(image).await?;
            }
            return Err(error);
        }

        if new_image.is_some() {
            resources.images.delete(&existing.image).await?;
        }

        let response = Self::full_response(&resources, recipe_id, Some(auth.user_id())).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle DELETE /api/recipes/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        ApiPath(recipe_id): ApiPath<i64>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;
        let recipe = Self::authored_recipe(&resources, &auth, recipe_id).await?;

        resources.database.recipes().delete(recipe.id).await?;
        resources.images.delete(&recipe.image).await?;

        info!(user.id = auth.user_id(), recipe.id = recipe_id, "Recipe deleted");
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    // ========================================================================
    // Favorites and shopping cart
    // ========================================================================

    async fn add_to(
        resources: &Arc<ServerResources>,
        headers: &HeaderMap,
        recipe_id: i64,
        collection: RecipeCollection,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(headers, resources).await?;
        let recipe = resources.database.recipes().get_required(recipe_id).await?;

        resources
            .database
            .recipes()
            .add_to_collection(collection, auth.user_id(), recipe.id)
            .await?;

        let response = recipe_short_response(resources, &recipe);
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    async fn remove_from(
        resources: &Arc<ServerResources>,
        headers: &HeaderMap,
        recipe_id: i64,
        collection: RecipeCollection,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(headers, resources).await?;
        let recipe = resources.database.recipes().get_required(recipe_id).await?;

        resources
            .database
            .recipes()
            .remove_from_collection(collection, auth.user_id(), recipe.id)
            .await?;

        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle POST /api/recipes/:id/favorite
    async fn handle_add_favorite(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        ApiPath(recipe_id): ApiPath<i64>,
    ) -> Result<Response, AppError> {
        Self::add_to(&resources, &headers, recipe_id, RecipeCollection::Favorites).await
    }

    /// Handle DELETE /api/recipes/:id/favorite
    async fn handle_remove_favorite(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        ApiPath(recipe_id): ApiPath<i64>,
    ) -> Result<Response, AppError> {
        Self::remove_from(&resources, &headers, recipe_id, RecipeCollection::Favorites).await
    }

    /// Handle POST /api/recipes/:id/shopping_cart
    async fn handle_add_to_cart(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        ApiPath(recipe_id): ApiPath<i64>,
    ) -> Result<Response, AppError> {
        Self::add_to(&resources, &headers, recipe_id, RecipeCollection::ShoppingCart).await
    }

    /// Handle DELETE /api/recipes/:id/shopping_cart
    async fn handle_remove_from_cart(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        ApiPath(recipe_id): ApiPath<i64>,
    ) -> Result<Response, AppError> {
        Self::remove_from(&resources, &headers, recipe_id, RecipeCollection::ShoppingCart).await
    }

    /// Handle GET /api/recipes/download_shopping_cart
    async fn handle_download_shopping_cart(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;
        let list = resources
            .database
            .recipes()
            .shopping_list(auth.user_id())
            .await?;

        let document = shopping_list::render(&list, Utc::now());

        Ok((
            StatusCode::OK,
            [
                (CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()),
                (
                    CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{FILE_NAME}\""),
                ),
            ],
            document,
        )
            .into_response())
    }

    // ========================================================================
    // Extras
    // ========================================================================

    /// Handle GET /api/recipes/cooking-time-buckets
    async fn handle_cooking_time_buckets(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let times = resources
            .database
            .recipes()
            .distinct_cooking_times()
            .await?;

        Ok((StatusCode::OK, Json(cooking_time::buckets(&times))).into_response())
    }

    /// Handle GET /api/recipes/:id/get-link
    async fn handle_get_link(
        State(resources): State<Arc<ServerResources>>,
        ApiPath(recipe_id): ApiPath<i64>,
    ) -> Result<Response, AppError> {
        let recipe = resources.database.recipes().get_required(recipe_id).await?;
        let code = resources
            .database
            .short_links()
            .get_or_create(recipe.id)
            .await?;

        let response = ShortLinkResponse {
            short_link: format!(
                "{}{PATH_PREFIX}/{code}",
                resources.config.urls.public_base_url
            ),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("f", None).unwrap(), None);
        assert_eq!(parse_flag("f", Some("1")).unwrap(), Some(true));
        assert_eq!(parse_flag("f", Some("0")).unwrap(), Some(false));
        assert!(parse_flag("f", Some("yes")).is_err());
    }

    #[test]
    fn test_filter_query_round_trip() {
        let query = RecipeListQuery {
            author: Some(4),
            is_favorited: Some("1".into()),
            cooking_time_max: Some(30),
            ..RecipeListQuery::default()
        };
        let filter = query.filter().unwrap();
        assert_eq!(
            RecipeListQuery::filter_query(&filter),
            "author=4&is_favorited=1&cooking_time_max=30"
        );
    }
}
