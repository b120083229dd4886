// ABOUTME: API token storage for login sessions
// ABOUTME: Stores SHA-256 hashes of issued tokens and resolves them back to users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use super::{Database, UserManager};
use crate::errors::{AppError, AppResult};
use crate::models::User;

impl Database {
    pub(super) async fn migrate_tokens(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS auth_tokens (
                key_hash TEXT PRIMARY KEY,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_auth_tokens_user_id ON auth_tokens(user_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// Token database operations manager
pub struct TokenManager {
    pool: SqlitePool,
}

impl TokenManager {
    /// Create a new token manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store the hash of a freshly issued token
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails
    pub async fn store(&self, key_hash: &str, user_id: i64) -> AppResult<()> {
        sqlx::query("INSERT INTO auth_tokens (key_hash, user_id, created_at) VALUES ($1, $2, $3)")
            .bind(key_hash)
            .bind(user_id)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to store token: {e}")))?;

        Ok(())
    }

    /// Find the user a token hash belongs to
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn find_user(&self, key_hash: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(
            r"
            SELECT u.id, u.email, u.username, u.first_name, u.last_name,
                   u.password_hash, u.avatar, u.created_at
            FROM auth_tokens t
            JOIN users u ON u.id = t.user_id
            WHERE t.key_hash = $1
            ",
        )
        .bind(key_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to look up token: {e}")))?;

        row.map(|r| UserManager::row_to_user(&r)).transpose()
    }

    /// Revoke a token; returns whether it existed
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails
    pub async fn revoke(&self, key_hash: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM auth_tokens WHERE key_hash = $1")
            .bind(key_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to revoke token: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}
