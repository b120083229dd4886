// ABOUTME: Aggregated shopping-list rows
// ABOUTME: Output of grouping a user's cart ingredients by name and unit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

use serde::{Deserialize, Serialize};

/// One consolidated line of a shopping list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    /// Ingredient name
    pub name: String,
    /// Measurement unit
    pub measurement_unit: String,
    /// Sum of the amounts across all recipes in the cart
    pub total_amount: i64,
}

/// A recipe contributing to the shopping list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListRecipe {
    /// Recipe name
    pub name: String,
    /// Username of the recipe's author
    pub author_username: String,
}

/// A user's consolidated shopping list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingList {
    /// Ingredient totals, sorted by name
    pub items: Vec<ShoppingListItem>,
    /// Recipes in the cart, sorted by name
    pub recipes: Vec<ShoppingListRecipe>,
}

impl ShoppingList {
    /// Whether the cart had no ingredients at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
