// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides an in-memory application plus user, ingredient, and recipe fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `foodgram_server`

use std::sync::{Arc, Once};

use axum::Router;
use foodgram_server::{
    config::{AuthConfig, DatabaseConfig, DatabaseUrl, Environment, MediaConfig, ServerConfig},
    database::Database,
    models::{IngredientAmount, NewIngredient, NewRecipe, NewUser, User},
    resources::ServerResources,
    server::build_app,
};
use tempfile::TempDir;
use tower_http::normalize_path::NormalizePath;

/// Password every fixture user is created with
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// A 1x1 transparent PNG
pub const PNG_DATA_URL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Application backed by an in-memory database and a temporary media root
pub struct TestApp {
    pub resources: Arc<ServerResources>,
    _media: TempDir,
}

impl TestApp {
    /// Fully layered application, as served in production
    pub fn app(&self) -> NormalizePath<Router> {
        build_app(&self.resources)
    }

    pub fn media_root(&self) -> &std::path::Path {
        self.resources.images.root()
    }
}

/// Test configuration: cheap bcrypt and media under `media_root`
pub fn test_config(media_root: &std::path::Path) -> ServerConfig {
    ServerConfig {
        environment: Environment::Testing,
        database: DatabaseConfig {
            url: DatabaseUrl::Memory,
        },
        auth: AuthConfig { bcrypt_cost: 4 },
        media: MediaConfig {
            root: media_root.to_path_buf(),
        },
        ..ServerConfig::default()
    }
}

/// Standard application setup
pub async fn create_test_app() -> TestApp {
    init_test_logging();
    let media = TempDir::new().expect("Failed to create media dir");
    let config = test_config(media.path());
    let database = Database::new(&config.database.url)
        .await
        .expect("Failed to open test database");

    TestApp {
        resources: Arc::new(ServerResources::new(database, config)),
        _media: media,
    }
}

/// Create a user whose email is `<username>@example.com`
pub async fn create_test_user(resources: &ServerResources, username: &str) -> User {
    let password_hash = resources
        .auth_manager
        .hash_password(TEST_PASSWORD)
        .await
        .expect("Failed to hash password");

    resources
        .database
        .users()
        .create(&NewUser {
            email: format!("{username}@example.com"),
            username: username.to_owned(),
            first_name: "Test".to_owned(),
            last_name: "User".to_owned(),
            password_hash,
        })
        .await
        .expect("Failed to create user")
}

/// Log a fixture user in and return the raw token
pub async fn login(resources: &ServerResources, user: &User) -> String {
    resources
        .auth_manager
        .login(&user.email, TEST_PASSWORD)
        .await
        .expect("Failed to log in")
}

/// Create a user and a token for them
pub async fn create_user_with_token(resources: &ServerResources, username: &str) -> (User, String) {
    let user = create_test_user(resources, username).await;
    let token = login(resources, &user).await;
    (user, token)
}

/// Insert an ingredient and return its id
pub async fn create_ingredient(resources: &ServerResources, name: &str, unit: &str) -> i64 {
    resources
        .database
        .ingredients()
        .insert_many(&[NewIngredient {
            name: name.to_owned(),
            measurement_unit: unit.to_owned(),
        }])
        .await
        .expect("Failed to insert ingredient");

    resources
        .database
        .ingredients()
        .list(Some(name))
        .await
        .expect("Failed to list ingredients")
        .into_iter()
        .find(|ingredient| ingredient.name == name && ingredient.measurement_unit == unit)
        .expect("Inserted ingredient not found")
        .id
}

/// Insert a recipe directly, bypassing image upload
pub async fn create_recipe(
    resources: &ServerResources,
    author_id: i64,
    name: &str,
    cooking_time: i64,
    ingredients: &[(i64, i64)],
) -> i64 {
    resources
        .database
        .recipes()
        .create(&NewRecipe {
            author_id,
            name: name.to_owned(),
            image: "recipes/images/fixture.png".to_owned(),
            text: format!("How to make {name}"),
            cooking_time,
            ingredients: ingredients
                .iter()
                .map(|&(ingredient_id, amount)| IngredientAmount {
                    ingredient_id,
                    amount,
                })
                .collect(),
        })
        .await
        .expect("Failed to create recipe")
}

/// Lines of a shopping-list document that list products
pub fn product_lines(document: &str) -> Vec<&str> {
    document
        .lines()
        .skip_while(|line| *line != "Products:")
        .skip(1)
        .take_while(|line| !line.is_empty())
        .collect()
}
