// ABOUTME: Recipe database operations including favorites, shopping carts, and aggregation
// ABOUTME: Multi-row writes run in one transaction; list filters are built with QueryBuilder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

use std::collections::HashSet;

use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool, Transaction};

use super::{parse_timestamp, Database, UserManager};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{
    IngredientAmount, NewRecipe, Recipe, RecipeCollection, RecipeDetail, RecipeFilter,
    RecipeIngredient, RecipeUpdate, ShoppingList, ShoppingListItem, ShoppingListRecipe,
};
use crate::pagination::PageWindow;

const RECIPE_COLUMNS: &str = "r.id, r.author_id, r.name, r.image, r.text, r.cooking_time, r.created_at";

impl Database {
    pub(super) async fn migrate_recipes(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                author_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                image TEXT NOT NULL,
                text TEXT NOT NULL,
                cooking_time INTEGER NOT NULL CHECK (cooking_time >= 1),
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipe_ingredients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                ingredient_id INTEGER NOT NULL REFERENCES ingredients(id) ON DELETE CASCADE,
                amount INTEGER NOT NULL CHECK (amount >= 1),
                UNIQUE (recipe_id, ingredient_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        for collection in [RecipeCollection::Favorites, RecipeCollection::ShoppingCart] {
            let table = collection.table();
            sqlx::query(&format!(
                r"
                CREATE TABLE IF NOT EXISTS {table} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                    recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                    created_at TEXT NOT NULL,
                    UNIQUE (user_id, recipe_id)
                )
                "
            ))
            .execute(&self.pool)
            .await?;
        }

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_author_id ON recipes(author_id)")
            .execute(&self.pool)
            .await?;
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_recipes_created_at ON recipes(created_at DESC, id DESC)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Recipe database operations manager
pub struct RecipeManager {
    pool: SqlitePool,
}

impl RecipeManager {
    /// Create a new recipe manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // Recipes
    // ========================================================================

    /// Publish a recipe together with its ingredient lines
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if an ingredient is missing or repeated,
    /// or an error if the transaction fails
    pub async fn create(&self, recipe: &NewRecipe) -> AppResult<i64> {
        let mut tx = self.begin().await?;

        let result = sqlx::query(
            r"
            INSERT INTO recipes (author_id, name, image, text, cooking_time, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(recipe.author_id)
        .bind(&recipe.name)
        .bind(&recipe.image)
        .bind(&recipe.text)
        .bind(recipe.cooking_time)
        // Fixed-width timestamps keep text ordering chronological
        .bind(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipe: {e}")))?;

        let recipe_id = result.last_insert_rowid();
        Self::insert_ingredients(&mut tx, recipe_id, &recipe.ingredients).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit recipe: {e}")))?;

        Ok(recipe_id)
    }

    /// Apply a partial update; a present ingredient list replaces the old one
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for bad ingredient lists, or an error if the
    /// transaction fails
    pub async fn update(&self, recipe_id: i64, update: &RecipeUpdate) -> AppResult<()> {
        let mut tx = self.begin().await?;

        sqlx::query(
            r"
            UPDATE recipes SET
                name = COALESCE($1, name),
                image = COALESCE($2, image),
                text = COALESCE($3, text),
                cooking_time = COALESCE($4, cooking_time)
            WHERE id = $5
            ",
        )
        .bind(update.name.as_deref())
        .bind(update.image.as_deref())
        .bind(update.text.as_deref())
        .bind(update.cooking_time)
        .bind(recipe_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to update recipe: {e}")))?;

        if let Some(ingredients) = &update.ingredients {
            sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
                .bind(recipe_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::database(format!("Failed to clear recipe ingredients: {e}"))
                })?;
            Self::insert_ingredients(&mut tx, recipe_id, ingredients).await?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit recipe update: {e}")))?;

        Ok(())
    }

    /// Delete a recipe; child rows cascade. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails
    pub async fn delete(&self, recipe_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(recipe_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete recipe: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Get a bare recipe row by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get(&self, recipe_id: i64) -> AppResult<Option<Recipe>> {
        let row = sqlx::query(&format!("SELECT {RECIPE_COLUMNS} FROM recipes r WHERE r.id = $1"))
            .bind(recipe_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?;

        row.map(|r| Self::row_to_recipe(&r)).transpose()
    }

    /// Get a recipe by id, failing with `ResourceNotFound` when absent
    ///
    /// # Errors
    ///
    /// Returns an error if the recipe does not exist or the query fails
    pub async fn get_required(&self, recipe_id: i64) -> AppResult<Recipe> {
        self.get(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {recipe_id}")))
    }

    /// Load a recipe with author, ingredients, and the viewer's flags
    ///
    /// # Errors
    ///
    /// Returns an error if the recipe does not exist or a query fails
    pub async fn detail(&self, recipe_id: i64, viewer_id: Option<i64>) -> AppResult<RecipeDetail> {
        let recipe = self.get_required(recipe_id).await?;
        self.expand(recipe, viewer_id).await
    }

    /// List recipes newest first, applying filters, returning the page and the
    /// total number of matches
    ///
    /// Collection filters only apply when a viewer is given.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails
    pub async fn list(
        &self,
        filter: &RecipeFilter,
        viewer_id: Option<i64>,
        window: PageWindow,
    ) -> AppResult<(Vec<RecipeDetail>, i64)> {
        let mut count_query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM recipes r");
        Self::push_filters(&mut count_query, filter, viewer_id);
        let count = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count recipes: {e}")))?;

        let mut query =
            QueryBuilder::<Sqlite>::new(format!("SELECT {RECIPE_COLUMNS} FROM recipes r"));
        Self::push_filters(&mut query, filter, viewer_id);
        query
            .push(" ORDER BY r.created_at DESC, r.id DESC LIMIT ")
            .push_bind(window.limit)
            .push(" OFFSET ")
            .push_bind(window.offset());

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list recipes: {e}")))?;

        let mut details = Vec::with_capacity(rows.len());
        for row in &rows {
            let recipe = Self::row_to_recipe(row)?;
            details.push(self.expand(recipe, viewer_id).await?);
        }

        Ok((details, count))
    }

    /// Recipes by one author, newest first, optionally limited
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_by_author(&self, author_id: i64, limit: Option<i64>) -> AppResult<Vec<Recipe>> {
        // SQLite treats a negative LIMIT as "no limit"
        let limit = limit.filter(|l| *l >= 0).unwrap_or(-1);

        let rows = sqlx::query(&format!(
            r"
            SELECT {RECIPE_COLUMNS} FROM recipes r
            WHERE r.author_id = $1
            ORDER BY r.created_at DESC, r.id DESC
            LIMIT $2
            "
        ))
        .bind(author_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list author recipes: {e}")))?;

        rows.iter().map(Self::row_to_recipe).collect()
    }

    /// Number of recipes published by an author
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn count_by_author(&self, author_id: i64) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM recipes WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count author recipes: {e}")))
    }

    /// Distinct cooking times across all recipes, ascending
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn distinct_cooking_times(&self) -> AppResult<Vec<i64>> {
        sqlx::query_scalar("SELECT DISTINCT cooking_time FROM recipes ORDER BY cooking_time")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load cooking times: {e}")))
    }

    // ========================================================================
    // Favorites and shopping cart
    // ========================================================================

    /// Add a recipe to one of the user's collections
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the recipe is already there
    pub async fn add_to_collection(
        &self,
        collection: RecipeCollection,
        user_id: i64,
        recipe_id: i64,
    ) -> AppResult<()> {
        sqlx::query(&format!(
            "INSERT INTO {} (user_id, recipe_id, created_at) VALUES ($1, $2, $3)",
            collection.table()
        ))
        .bind(user_id)
        .bind(recipe_id)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let error = AppError::from(e);
            if error.code == ErrorCode::ResourceAlreadyExists {
                AppError::already_exists(format!("Recipe is already in {}", collection.label()))
            } else {
                error
            }
        })?;

        Ok(())
    }

    /// Remove a recipe from one of the user's collections
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the recipe was not in the collection
    pub async fn remove_from_collection(
        &self,
        collection: RecipeCollection,
        user_id: i64,
        recipe_id: i64,
    ) -> AppResult<()> {
        let result = sqlx::query(&format!(
            "DELETE FROM {} WHERE user_id = $1 AND recipe_id = $2",
            collection.table()
        ))
        .bind(user_id)
        .bind(recipe_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update {}: {e}", collection.label())))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Recipe in {}",
                collection.label()
            )));
        }

        Ok(())
    }

    /// Whether a recipe is in one of the user's collections
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn in_collection(
        &self,
        collection: RecipeCollection,
        user_id: i64,
        recipe_id: i64,
    ) -> AppResult<bool> {
        sqlx::query_scalar(&format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE user_id = $1 AND recipe_id = $2)",
            collection.table()
        ))
        .bind(user_id)
        .bind(recipe_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to check {}: {e}", collection.label())))
    }

    /// Aggregate the ingredients of every recipe in the user's cart
    ///
    /// Amounts are summed per (ingredient name, unit) and sorted by name;
    /// recipes are listed by name with their author's username.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails
    pub async fn shopping_list(&self, user_id: i64) -> AppResult<ShoppingList> {
        let item_rows = sqlx::query(
            r"
            SELECT i.name AS name, i.measurement_unit AS measurement_unit,
                   SUM(ri.amount) AS total_amount
            FROM shopping_cart sc
            JOIN recipe_ingredients ri ON ri.recipe_id = sc.recipe_id
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE sc.user_id = $1
            GROUP BY i.name, i.measurement_unit
            ORDER BY i.name, i.measurement_unit
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to aggregate shopping cart: {e}")))?;

        let items = item_rows
            .iter()
            .map(|row| {
                Ok(ShoppingListItem {
                    name: row.try_get("name")?,
                    measurement_unit: row.try_get("measurement_unit")?,
                    total_amount: row.try_get("total_amount")?,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        let recipe_rows = sqlx::query(
            r"
            SELECT r.name AS name, u.username AS author_username
            FROM shopping_cart sc
            JOIN recipes r ON r.id = sc.recipe_id
            JOIN users u ON u.id = r.author_id
            WHERE sc.user_id = $1
            ORDER BY r.name, r.id
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list cart recipes: {e}")))?;

        let recipes = recipe_rows
            .iter()
            .map(|row| {
                Ok(ShoppingListRecipe {
                    name: row.try_get("name")?,
                    author_username: row.try_get("author_username")?,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(ShoppingList { items, recipes })
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn begin(&self) -> AppResult<Transaction<'static, Sqlite>> {
        self.pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))
    }

    async fn insert_ingredients(
        tx: &mut Transaction<'static, Sqlite>,
        recipe_id: i64,
        ingredients: &[IngredientAmount],
    ) -> AppResult<()> {
        if ingredients.is_empty() {
            return Err(AppError::invalid_input(
                "A recipe needs at least one ingredient",
            ));
        }

        let mut seen = HashSet::with_capacity(ingredients.len());
        for line in ingredients {
            if !seen.insert(line.ingredient_id) {
                return Err(AppError::invalid_input(format!(
                    "Ingredient {} is listed more than once",
                    line.ingredient_id
                )));
            }

            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM ingredients WHERE id = $1)")
                    .bind(line.ingredient_id)
                    .fetch_one(&mut **tx)
                    .await
                    .map_err(|e| AppError::database(format!("Failed to check ingredient: {e}")))?;
            if !exists {
                return Err(AppError::invalid_input(format!(
                    "Ingredient {} does not exist",
                    line.ingredient_id
                )));
            }

            sqlx::query(
                "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount) VALUES ($1, $2, $3)",
            )
            .bind(recipe_id)
            .bind(line.ingredient_id)
            .bind(line.amount)
            .execute(&mut **tx)
            .await
            .map_err(AppError::from)?;
        }

        Ok(())
    }

    fn push_filters(
        query: &mut QueryBuilder<'_, Sqlite>,
        filter: &RecipeFilter,
        viewer_id: Option<i64>,
    ) {
        query.push(" WHERE 1 = 1");

        if let Some(author_id) = filter.author_id {
            query.push(" AND r.author_id = ").push_bind(author_id);
        }
        if let Some(min) = filter.cooking_time_min {
            query.push(" AND r.cooking_time >= ").push_bind(min);
        }
        if let Some(max) = filter.cooking_time_max {
            query.push(" AND r.cooking_time <= ").push_bind(max);
        }

        if let Some(viewer_id) = viewer_id {
            let collections = [
                (RecipeCollection::Favorites, filter.is_favorited),
                (RecipeCollection::ShoppingCart, filter.is_in_shopping_cart),
            ];
            for (collection, wanted) in collections {
                let Some(wanted) = wanted else { continue };
                let negation = if wanted { "" } else { "NOT " };
                query
                    .push(format!(
                        " AND {negation}EXISTS (SELECT 1 FROM {} c WHERE c.recipe_id = r.id AND c.user_id = ",
                        collection.table()
                    ))
                    .push_bind(viewer_id)
                    .push(")");
            }
        }
    }

    async fn expand(&self, recipe: Recipe, viewer_id: Option<i64>) -> AppResult<RecipeDetail> {
        let author_row = sqlx::query(
            r"
            SELECT id, email, username, first_name, last_name, password_hash, avatar, created_at
            FROM users WHERE id = $1
            ",
        )
        .bind(recipe.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load recipe author: {e}")))?;
        let author = UserManager::row_to_user(&author_row)?;

        let ingredient_rows = sqlx::query(
            r"
            SELECT i.id AS id, i.name AS name, i.measurement_unit AS measurement_unit,
                   ri.amount AS amount
            FROM recipe_ingredients ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id = $1
            ORDER BY i.name, i.id
            ",
        )
        .bind(recipe.id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load recipe ingredients: {e}")))?;

        let ingredients = ingredient_rows
            .iter()
            .map(|row| {
                Ok(RecipeIngredient {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                    measurement_unit: row.try_get("measurement_unit")?,
                    amount: row.try_get("amount")?,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        let (is_favorited, is_in_shopping_cart) = match viewer_id {
            Some(viewer_id) => (
                self.in_collection(RecipeCollection::Favorites, viewer_id, recipe.id)
                    .await?,
                self.in_collection(RecipeCollection::ShoppingCart, viewer_id, recipe.id)
                    .await?,
            ),
            None => (false, false),
        };

        Ok(RecipeDetail {
            recipe,
            author,
            ingredients,
            is_favorited,
            is_in_shopping_cart,
        })
    }

    pub(super) fn row_to_recipe(row: &SqliteRow) -> AppResult<Recipe> {
        let created_at: String = row.try_get("created_at")?;

        Ok(Recipe {
            id: row.try_get("id")?,
            author_id: row.try_get("author_id")?,
            name: row.try_get("name")?,
            image: row.try_get("image")?,
            text: row.try_get("text")?,
            cooking_time: row.try_get("cooking_time")?,
            created_at: parse_timestamp(&created_at)?,
        })
    }
}
