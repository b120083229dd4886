// ABOUTME: Recipe models, ingredient amounts, per-user collections, and list filters
// ABOUTME: Shared by the recipe manager, shopping-list aggregation, and recipe routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::User;
use crate::errors::AppError;

/// A published recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique identifier
    pub id: i64,
    /// Author's user id
    pub author_id: i64,
    /// Title
    pub name: String,
    /// Image path relative to the media root
    pub image: String,
    /// Preparation instructions
    pub text: String,
    /// Cooking time in minutes
    pub cooking_time: i64,
    /// Publication time
    pub created_at: DateTime<Utc>,
}

/// An ingredient line of a recipe, joined with the catalogue entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Ingredient id
    pub id: i64,
    /// Ingredient name
    pub name: String,
    /// Measurement unit
    pub measurement_unit: String,
    /// Amount used by the recipe
    pub amount: i64,
}

/// Ingredient reference supplied when creating or editing a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientAmount {
    /// Ingredient id
    pub ingredient_id: i64,
    /// Amount used by the recipe
    pub amount: i64,
}

/// Data required to publish a recipe
#[derive(Debug, Clone)]
pub struct NewRecipe {
    /// Author's user id
    pub author_id: i64,
    /// Title
    pub name: String,
    /// Stored image path
    pub image: String,
    /// Preparation instructions
    pub text: String,
    /// Cooking time in minutes
    pub cooking_time: i64,
    /// Ingredient lines
    pub ingredients: Vec<IngredientAmount>,
}

/// Partial update of a recipe; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct RecipeUpdate {
    /// New title
    pub name: Option<String>,
    /// New stored image path
    pub image: Option<String>,
    /// New instructions
    pub text: Option<String>,
    /// New cooking time
    pub cooking_time: Option<i64>,
    /// Replacement ingredient list
    pub ingredients: Option<Vec<IngredientAmount>>,
}

/// A recipe with everything needed to render it for a viewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDetail {
    /// The recipe row
    pub recipe: Recipe,
    /// The author
    pub author: User,
    /// Ingredient lines, ordered by ingredient name
    pub ingredients: Vec<RecipeIngredient>,
    /// Whether the viewer favorited this recipe
    pub is_favorited: bool,
    /// Whether the recipe is in the viewer's shopping cart
    pub is_in_shopping_cart: bool,
}

/// Filters for recipe listings
#[derive(Debug, Clone, Copy, Default)]
pub struct RecipeFilter {
    /// Only recipes by this author
    pub author_id: Option<i64>,
    /// Only recipes the viewer did (true) or did not (false) favorite
    pub is_favorited: Option<bool>,
    /// Only recipes the viewer does (true) or does not (false) have in the cart
    pub is_in_shopping_cart: Option<bool>,
    /// Minimum cooking time, inclusive
    pub cooking_time_min: Option<i64>,
    /// Maximum cooking time, inclusive
    pub cooking_time_max: Option<i64>,
}

/// Per-user recipe collections with identical semantics
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecipeCollection {
    /// Favorite recipes
    Favorites,
    /// Recipes the user intends to shop for
    ShoppingCart,
}

impl RecipeCollection {
    /// Backing table name
    #[must_use]
    pub const fn table(&self) -> &'static str {
        match self {
            Self::Favorites => "favorites",
            Self::ShoppingCart => "shopping_cart",
        }
    }

    /// Database and URL string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Favorites => "favorite",
            Self::ShoppingCart => "shopping_cart",
        }
    }

    /// Human-readable name used in error messages
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Favorites => "favorites",
            Self::ShoppingCart => "shopping cart",
        }
    }
}

impl Display for RecipeCollection {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecipeCollection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "favorite" | "favorites" => Ok(Self::Favorites),
            "shopping_cart" | "cart" => Ok(Self::ShoppingCart),
            _ => Err(AppError::invalid_input(format!(
                "Invalid recipe collection: {s}"
            ))),
        }
    }
}
