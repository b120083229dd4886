// ABOUTME: Main library entry point for the Foodgram recipe-sharing API
// ABOUTME: Wires configuration, storage, authentication, services, and HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

#![deny(unsafe_code)]

//! # Foodgram Server
//!
//! A recipe-sharing backend. Users publish recipes with images and
//! ingredient amounts, follow authors, keep favorites, and collect recipes
//! into a shopping cart that downloads as an aggregated grocery list.
//!
//! ## Architecture
//!
//! - **Config**: environment-driven [`config::ServerConfig`]
//! - **Database**: `SQLite` through `sqlx`, one manager per table group
//! - **Auth**: bcrypt passwords and opaque, hashed API tokens
//! - **Services**: validation, image storage, cooking-time buckets, and the
//!   shopping-list document
//! - **Routes**: `axum` handlers grouped per domain
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use foodgram_server::config::ServerConfig;
//! use foodgram_server::database::Database;
//! use foodgram_server::resources::ServerResources;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let database = Database::new(&config.database.url).await?;
//!     let resources = Arc::new(ServerResources::new(database, config));
//!     foodgram_server::server::run(resources).await
//! }
//! ```

/// Token authentication and password hashing
pub mod auth;

/// Configuration loaded from the environment
pub mod config;

/// Shared constants
pub mod constants;

/// `SQLite` storage and per-table managers
pub mod database;

/// Error types and HTTP mapping
pub mod errors;

/// Structured logging setup
pub mod logging;

/// HTTP middleware layers
pub mod middleware;

/// Domain models
pub mod models;

/// Page-number pagination
pub mod pagination;

/// Shared state handed to every route group
pub mod resources;

/// HTTP route groups
pub mod routes;

/// Router assembly and the serve loop
pub mod server;

/// Domain services independent of HTTP
pub mod services;
