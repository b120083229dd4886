// ABOUTME: Route module organization for the Foodgram HTTP API
// ABOUTME: One route group per domain, each built from shared ServerResources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

//! Route module for the Foodgram server
//!
//! Each domain module contains route definitions and thin handlers that
//! delegate to the database managers and services.

/// Token login and logout
pub mod auth;
/// Health check and readiness routes
pub mod health;
/// Extractors that report rejections through `AppError`
pub mod extract;
/// Ingredient catalogue routes
pub mod ingredients;
/// Recipe CRUD, collections, downloads, and short-link creation
pub mod recipes;
/// Viewer-specific JSON representations
pub mod responses;
/// Short-link redirects
pub mod short_links;
/// Users, avatars, passwords, and subscriptions
pub mod users;

/// Authentication route handlers
pub use auth::AuthRoutes;
/// Health route handlers
pub use health::HealthRoutes;
/// Ingredient route handlers
pub use ingredients::IngredientRoutes;
/// Recipe route handlers
pub use recipes::RecipeRoutes;
/// Short-link route handlers
pub use short_links::ShortLinkRoutes;
/// User route handlers
pub use users::UserRoutes;
