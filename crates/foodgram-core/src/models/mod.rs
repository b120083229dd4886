// ABOUTME: Domain models shared by the database layer and HTTP routes
// ABOUTME: Users, ingredients, recipes, recipe collections, and shopping-list rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

mod ingredient;
mod recipe;
mod shopping;
mod user;

pub use ingredient::{Ingredient, NewIngredient};
pub use recipe::{
    IngredientAmount, NewRecipe, Recipe, RecipeCollection, RecipeDetail, RecipeFilter,
    RecipeIngredient, RecipeUpdate,
};
pub use shopping::{ShoppingList, ShoppingListItem, ShoppingListRecipe};
pub use user::{NewUser, User};
