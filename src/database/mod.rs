// ABOUTME: SQLite connection pool, schema migrations, and per-domain database managers
// ABOUTME: Every table is created with CREATE TABLE IF NOT EXISTS at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

//! # Database Management
//!
//! [`Database`] owns the connection pool and the schema. Queries live in the
//! per-domain managers ([`UserManager`], [`RecipeManager`], ...), each of which
//! wraps a clone of the pool.

mod ingredients;
mod recipes;
mod short_links;
mod subscriptions;
mod tokens;
mod users;

pub use ingredients::IngredientManager;
pub use recipes::RecipeManager;
pub use short_links::ShortLinkManager;
pub use subscriptions::SubscriptionManager;
pub use tokens::TokenManager;
pub use users::UserManager;

use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::config::DatabaseUrl;
use crate::errors::{AppError, AppResult};

/// Database handle shared by all managers
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the database and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created, the connection fails,
    /// or a migration statement fails
    pub async fn new(url: &DatabaseUrl) -> Result<Self> {
        if let DatabaseUrl::SQLite { path } = url {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory {}", parent.display())
                })?;
            }
        }

        let options = SqliteConnectOptions::from_str(&url.to_connection_string())?
            .create_if_missing(true)
            .foreign_keys(true);

        // Each in-memory connection is its own database
        let max_connections = if url.is_memory() { 1 } else { 5 };

        let mut pool_options = SqlitePoolOptions::new().max_connections(max_connections);
        if url.is_memory() {
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to {url}"))?;

        let db = Self { pool };
        db.migrate().await?;

        info!("Database ready at {url}");
        Ok(db)
    }

    /// Get a reference to the connection pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Users and tokens
    #[must_use]
    pub fn users(&self) -> UserManager {
        UserManager::new(self.pool.clone())
    }

    /// API tokens
    #[must_use]
    pub fn tokens(&self) -> TokenManager {
        TokenManager::new(self.pool.clone())
    }

    /// Ingredient catalogue
    #[must_use]
    pub fn ingredients(&self) -> IngredientManager {
        IngredientManager::new(self.pool.clone())
    }

    /// Recipes, favorites, and shopping carts
    #[must_use]
    pub fn recipes(&self) -> RecipeManager {
        RecipeManager::new(self.pool.clone())
    }

    /// Author subscriptions
    #[must_use]
    pub fn subscriptions(&self) -> SubscriptionManager {
        SubscriptionManager::new(self.pool.clone())
    }

    /// Recipe short links
    #[must_use]
    pub fn short_links(&self) -> ShortLinkManager {
        ShortLinkManager::new(self.pool.clone())
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index cannot be created
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_users().await?;
        self.migrate_tokens().await?;
        self.migrate_ingredients().await?;
        self.migrate_recipes().await?;
        self.migrate_subscriptions().await?;
        self.migrate_short_links().await?;
        Ok(())
    }
}

/// Parse an RFC3339 timestamp column
pub(crate) fn parse_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid timestamp '{raw}': {e}")))
}
