// ABOUTME: Author subscription database operations
// ABOUTME: Subscribe, unsubscribe, membership checks, and paginated followed-author listing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use super::{Database, UserManager};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::User;
use crate::pagination::PageWindow;

impl Database {
    pub(super) async fn migrate_subscriptions(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS subscriptions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                author_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                UNIQUE (user_id, author_id),
                CHECK (user_id <> author_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Subscription database operations manager
pub struct SubscriptionManager {
    pool: SqlitePool,
}

impl SubscriptionManager {
    /// Create a new subscription manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Subscribe `user_id` to `author_id`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for self-subscription and
    /// `ResourceAlreadyExists` when already subscribed
    pub async fn subscribe(&self, user_id: i64, author_id: i64) -> AppResult<()> {
        if user_id == author_id {
            return Err(AppError::invalid_input("You cannot subscribe to yourself"));
        }

        sqlx::query(
            "INSERT INTO subscriptions (user_id, author_id, created_at) VALUES ($1, $2, $3)",
        )
        .bind(user_id)
        .bind(author_id)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let error = AppError::from(e);
            if error.code == ErrorCode::ResourceAlreadyExists {
                AppError::already_exists("You are already subscribed to this author")
            } else {
                error
            }
        })?;

        Ok(())
    }

    /// Remove a subscription
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when unsubscribing from yourself and
    /// `ResourceNotFound` if no such subscription exists
    pub async fn unsubscribe(&self, user_id: i64, author_id: i64) -> AppResult<()> {
        if user_id == author_id {
            return Err(AppError::invalid_input("You cannot unsubscribe from yourself"));
        }

        let result = sqlx::query("DELETE FROM subscriptions WHERE user_id = $1 AND author_id = $2")
            .bind(user_id)
            .bind(author_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to unsubscribe: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Subscription"));
        }

        Ok(())
    }

    /// Whether `user_id` follows `author_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn is_subscribed(&self, user_id: i64, author_id: i64) -> AppResult<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM subscriptions WHERE user_id = $1 AND author_id = $2)",
        )
        .bind(user_id)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to check subscription: {e}")))
    }

    /// Authors followed by a user, most recent subscription first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_authors(
        &self,
        user_id: i64,
        window: PageWindow,
    ) -> AppResult<(Vec<User>, i64)> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subscriptions WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count subscriptions: {e}")))?;

        let rows = sqlx::query(
            r"
            SELECT u.id, u.email, u.username, u.first_name, u.last_name,
                   u.password_hash, u.avatar, u.created_at
            FROM subscriptions s
            JOIN users u ON u.id = s.author_id
            WHERE s.user_id = $1
            ORDER BY s.id DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(user_id)
        .bind(window.limit)
        .bind(window.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list subscriptions: {e}")))?;

        let authors = rows
            .iter()
            .map(UserManager::row_to_user)
            .collect::<AppResult<Vec<_>>>()?;

        Ok((authors, count))
    }
}
