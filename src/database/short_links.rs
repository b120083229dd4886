// ABOUTME: Short-link storage mapping opaque codes to recipes
// ABOUTME: Codes are created lazily, once per recipe, and resolved by the redirect route
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

use anyhow::Result;
use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use sqlx::SqlitePool;
use tracing::debug;

use super::Database;
use crate::constants::short_links::{CODE_LENGTH, MAX_GENERATION_ATTEMPTS};
use crate::errors::{AppError, AppResult, ErrorCode};

impl Database {
    pub(super) async fn migrate_short_links(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS short_links (
                code TEXT PRIMARY KEY,
                recipe_id INTEGER UNIQUE NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Short-link database operations manager
pub struct ShortLinkManager {
    pool: SqlitePool,
}

impl ShortLinkManager {
    /// Create a new short-link manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Generate a random alphanumeric code
    #[must_use]
    pub fn generate_code() -> String {
        thread_rng()
            .sample_iter(&Alphanumeric)
            .take(CODE_LENGTH)
            .map(char::from)
            .collect()
    }

    /// Return the recipe's code, creating one on first use
    ///
    /// # Errors
    ///
    /// Returns an error if no free code was found or a query fails
    pub async fn get_or_create(&self, recipe_id: i64) -> AppResult<String> {
        if let Some(code) = self.code_for(recipe_id).await? {
            return Ok(code);
        }

        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let code = Self::generate_code();
            let inserted = sqlx::query(
                "INSERT INTO short_links (code, recipe_id, created_at) VALUES ($1, $2, $3)",
            )
            .bind(&code)
            .bind(recipe_id)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await;

            match inserted {
                Ok(_) => return Ok(code),
                Err(e) => {
                    let error = AppError::from(e);
                    if error.code != ErrorCode::ResourceAlreadyExists {
                        return Err(error);
                    }
                    // Another request may have linked this recipe concurrently
                    if let Some(existing) = self.code_for(recipe_id).await? {
                        return Ok(existing);
                    }
                    debug!("Short code {code} collided, retrying");
                }
            }
        }

        Err(AppError::internal(format!(
            "Could not allocate a short link for recipe {recipe_id}"
        )))
    }

    /// Resolve a code to its recipe id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn resolve(&self, code: &str) -> AppResult<Option<i64>> {
        sqlx::query_scalar("SELECT recipe_id FROM short_links WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to resolve short link: {e}")))
    }

    async fn code_for(&self, recipe_id: i64) -> AppResult<Option<String>> {
        sqlx::query_scalar("SELECT code FROM short_links WHERE recipe_id = $1")
            .bind(recipe_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load short link: {e}")))
    }
}
