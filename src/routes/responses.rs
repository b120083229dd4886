// ABOUTME: JSON representations of users and recipes as seen by a particular viewer
// ABOUTME: Shared by the user, subscription, and recipe route groups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

use serde::{Deserialize, Serialize};

use crate::errors::AppResult;
use crate::models::{Recipe, RecipeDetail, RecipeIngredient, User};
use crate::resources::ServerResources;

/// Public view of a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// Email address
    pub email: String,
    /// User id
    pub id: i64,
    /// Username
    pub username: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Whether the viewer follows this user
    pub is_subscribed: bool,
    /// Absolute avatar URL
    pub avatar: Option<String>,
}

/// Compact recipe used in collections and subscription listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeShortResponse {
    /// Recipe id
    pub id: i64,
    /// Title
    pub name: String,
    /// Absolute image URL
    pub image: String,
    /// Cooking time in minutes
    pub cooking_time: i64,
}

/// Full recipe view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeResponse {
    /// Recipe id
    pub id: i64,
    /// Author
    pub author: UserResponse,
    /// Ingredient lines
    pub ingredients: Vec<RecipeIngredient>,
    /// Whether the viewer favorited it
    pub is_favorited: bool,
    /// Whether it is in the viewer's shopping cart
    pub is_in_shopping_cart: bool,
    /// Title
    pub name: String,
    /// Absolute image URL
    pub image: String,
    /// Instructions
    pub text: String,
    /// Cooking time in minutes
    pub cooking_time: i64,
}

/// Followed author with a preview of their recipes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorWithRecipesResponse {
    /// The author
    #[serde(flatten)]
    pub user: UserResponse,
    /// Latest recipes, possibly truncated by `recipes_limit`
    pub recipes: Vec<RecipeShortResponse>,
    /// Total number of recipes by this author
    pub recipes_count: i64,
}

/// Build the viewer-specific representation of a user
///
/// # Errors
///
/// Returns an error if the subscription lookup fails
pub async fn user_response(
    resources: &ServerResources,
    user: &User,
    viewer_id: Option<i64>,
) -> AppResult<UserResponse> {
    let is_subscribed = match viewer_id {
        Some(viewer_id) if viewer_id != user.id => {
            resources
                .database
                .subscriptions()
                .is_subscribed(viewer_id, user.id)
                .await?
        }
        _ => false,
    };

    Ok(UserResponse {
        email: user.email.clone(),
        id: user.id,
        username: user.username.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        is_subscribed,
        avatar: user.avatar.as_deref().map(|path| resources.images.url(path)),
    })
}

/// Build the compact representation of a recipe
#[must_use]
pub fn recipe_short_response(resources: &ServerResources, recipe: &Recipe) -> RecipeShortResponse {
    RecipeShortResponse {
        id: recipe.id,
        name: recipe.name.clone(),
        image: resources.images.url(&recipe.image),
        cooking_time: recipe.cooking_time,
    }
}

/// Build the full representation of a recipe
///
/// # Errors
///
/// Returns an error if the author's subscription lookup fails
pub async fn recipe_response(
    resources: &ServerResources,
    detail: RecipeDetail,
    viewer_id: Option<i64>,
) -> AppResult<RecipeResponse> {
    let author = user_response(resources, &detail.author, viewer_id).await?;
    let recipe = detail.recipe;

    Ok(RecipeResponse {
        id: recipe.id,
        author,
        ingredients: detail.ingredients,
        is_favorited: detail.is_favorited,
        is_in_shopping_cart: detail.is_in_shopping_cart,
        image: resources.images.url(&recipe.image),
        name: recipe.name,
        text: recipe.text,
        cooking_time: recipe.cooking_time,
    })
}

/// Build an author entry for subscription responses
///
/// # Errors
///
/// Returns an error if a recipe or subscription query fails
pub async fn author_with_recipes(
    resources: &ServerResources,
    author: &User,
    viewer_id: Option<i64>,
    recipes_limit: Option<i64>,
) -> AppResult<AuthorWithRecipesResponse> {
    let user = user_response(resources, author, viewer_id).await?;
    let recipes = resources
        .database
        .recipes()
        .list_by_author(author.id, recipes_limit)
        .await?;
    let recipes_count = resources.database.recipes().count_by_author(author.id).await?;

    Ok(AuthorWithRecipesResponse {
        user,
        recipes: recipes
            .iter()
            .map(|recipe| recipe_short_response(resources, recipe))
            .collect(),
        recipes_count,
    })
}
