// ABOUTME: Ingredient catalogue database operations
// ABOUTME: Name-filtered listing, lookup by id, and bulk loading with duplicate skipping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{Ingredient, NewIngredient};

impl Database {
    pub(super) async fn migrate_ingredients(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                measurement_unit TEXT NOT NULL,
                UNIQUE (name, measurement_unit)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_ingredients_name ON ingredients(name)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// Ingredient catalogue database operations manager
pub struct IngredientManager {
    pool: SqlitePool,
}

impl IngredientManager {
    /// Create a new ingredient manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List ingredients ordered by name, optionally filtered by a
    /// case-insensitive name substring
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list(&self, name_filter: Option<&str>) -> AppResult<Vec<Ingredient>> {
        let pattern = name_filter
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| format!("%{}%", name.to_lowercase()));

        let rows = sqlx::query(
            r"
            SELECT id, name, measurement_unit
            FROM ingredients
            WHERE $1 IS NULL OR lower(name) LIKE $1
            ORDER BY name, id
            ",
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list ingredients: {e}")))?;

        rows.iter().map(Self::row_to_ingredient).collect()
    }

    /// Get an ingredient by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get(&self, ingredient_id: i64) -> AppResult<Option<Ingredient>> {
        let row = sqlx::query("SELECT id, name, measurement_unit FROM ingredients WHERE id = $1")
            .bind(ingredient_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get ingredient: {e}")))?;

        row.map(|r| Self::row_to_ingredient(&r)).transpose()
    }

    /// Insert ingredients, skipping any (name, unit) pair already present.
    /// Returns the number of rows actually inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails
    pub async fn insert_many(&self, ingredients: &[NewIngredient]) -> AppResult<u64> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let mut inserted = 0;
        for ingredient in ingredients {
            let result = sqlx::query(
                "INSERT OR IGNORE INTO ingredients (name, measurement_unit) VALUES ($1, $2)",
            )
            .bind(ingredient.name.trim())
            .bind(ingredient.measurement_unit.trim())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to insert ingredient: {e}")))?;
            inserted += result.rows_affected();
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit ingredients: {e}")))?;

        Ok(inserted)
    }

    fn row_to_ingredient(row: &SqliteRow) -> AppResult<Ingredient> {
        Ok(Ingredient {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            measurement_unit: row.try_get("measurement_unit")?,
        })
    }
}
