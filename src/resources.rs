// ABOUTME: Shared server resources handed to every route group
// ABOUTME: Built once at startup and shared behind an Arc
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::services::images::ImageStore;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Database handle
    pub database: Database,
    /// Password and token authentication
    pub auth_manager: AuthManager,
    /// Uploaded image storage
    pub images: ImageStore,
    /// Runtime configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Wire up resources around an opened database
    #[must_use]
    pub fn new(database: Database, config: ServerConfig) -> Self {
        let auth_manager = AuthManager::new(database.clone(), config.auth.bcrypt_cost);
        let images = ImageStore::new(
            config.media.root.clone(),
            config.urls.public_base_url.clone(),
        );

        Self {
            database,
            auth_manager,
            images,
            config: Arc::new(config),
        }
    }

    /// Absolute URL of an API path, used for pagination links
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{path}", self.config.urls.public_base_url)
    }
}
