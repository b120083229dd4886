// ABOUTME: Core types and constants for the Foodgram recipe-sharing server
// ABOUTME: Foundation crate with error handling, domain models, pagination, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

#![deny(unsafe_code)]

//! # Foodgram Core
//!
//! Foundation crate providing shared types and constants for the Foodgram
//! server. It changes rarely, which keeps incremental builds of the server
//! crate fast.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Field limits, defaults, and validation rules
//! - **pagination**: Page-number pagination for list endpoints
//! - **models**: Users, ingredients, recipes, and shopping-list rows

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants and limits organized by domain
pub mod constants;

/// Page-number pagination for list endpoints
pub mod pagination;

/// Core data models (User, Ingredient, Recipe, shopping list)
pub mod models;
