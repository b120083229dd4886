// ABOUTME: User account route handlers: registration, profiles, passwords, avatars, subscriptions
// ABOUTME: Listing and profile reads are anonymous; everything under /me requires a token
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

//! User routes
//!
//! Mirrors the user endpoints the web client expects: registration, public
//! profiles, the authenticated user's own profile, password change, avatar
//! upload, and author subscriptions.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::responses::{author_with_recipes, user_response, AuthorWithRecipesResponse, UserResponse};
use crate::auth::AuthResult;
use crate::errors::AppError;
use crate::models::NewUser;
use crate::pagination::{Page, PageParams};
use crate::resources::ServerResources;
use crate::services::images::AVATARS_DIR;
use crate::services::validation;

// ============================================================================
// Request / Response Types
// ============================================================================

/// Registration payload
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Login email
    pub email: String,
    /// Public handle
    pub username: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Plain-text password
    pub password: String,
}

/// Registration response (no subscription flag or avatar yet)
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Login email
    pub email: String,
    /// New user id
    pub id: i64,
    /// Public handle
    pub username: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
}

/// Password change payload
#[derive(Debug, Deserialize)]
pub struct SetPasswordRequest {
    /// Replacement password
    pub new_password: String,
    /// Password currently in use
    pub current_password: String,
}

/// Avatar upload payload
#[derive(Debug, Deserialize)]
pub struct AvatarRequest {
    /// `data:image/<ext>;base64,...` payload
    pub avatar: Option<String>,
}

/// Avatar upload response
#[derive(Debug, Serialize, Deserialize)]
pub struct AvatarResponse {
    /// Absolute URL of the stored avatar
    pub avatar: String,
}

/// Pagination query for user listings
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    /// 1-based page number
    pub page: Option<i64>,
    /// Page size
    pub limit: Option<i64>,
}

/// Query for subscription endpoints
#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionQuery {
    /// 1-based page number
    pub page: Option<i64>,
    /// Page size
    pub limit: Option<i64>,
    /// Maximum number of recipes shown per author
    pub recipes_limit: Option<i64>,
}

/// User routes
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/users",
                get(Self::handle_list_users).post(Self::handle_register),
            )
            .route("/api/users/me", get(Self::handle_me))
            .route(
                "/api/users/me/avatar",
                put(Self::handle_set_avatar).delete(Self::handle_delete_avatar),
            )
            .route("/api/users/set_password", post(Self::handle_set_password))
            .route("/api/users/subscriptions", get(Self::handle_subscriptions))
            .route("/api/users/:id", get(Self::handle_get_user))
            .route(
                "/api/users/:id/subscribe",
                post(Self::handle_subscribe).delete(Self::handle_unsubscribe),
            )
            .with_state(resources)
    }

    async fn authenticate(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<AuthResult, AppError> {
        resources.auth_manager.authenticate(headers).await
    }

    async fn viewer_id(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<Option<i64>, AppError> {
        Ok(resources
            .auth_manager
            .authenticate_optional(headers)
            .await?
            .map(|auth| auth.user_id()))
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    /// Handle GET /api/users
    async fn handle_list_users(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        ApiQuery(query): ApiQuery<ListUsersQuery>,
    ) -> Result<Response, AppError> {
        let viewer_id = Self::viewer_id(&headers, &resources).await?;
        let window = PageParams {
            page: query.page,
            limit: query.limit,
        }
        .resolve(resources.config.page_size);

        let (users, count) = resources.database.users().list(window).await?;

        let mut results = Vec::with_capacity(users.len());
        for user in &users {
            results.push(user_response(&resources, user, viewer_id).await?);
        }

        let page = Page::new(results, count, window, &resources.api_url("/api/users"));
        Ok((StatusCode::OK, Json(page)).into_response())
    }

    /// Handle POST /api/users
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        ApiJson(request): ApiJson<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let email = request.email.trim();
        let username = request.username.trim();

        validation::validate_email(email)?;
        validation::validate_username(username)?;
        validation::validate_person_name("first_name", &request.first_name)?;
        validation::validate_person_name("last_name", &request.last_name)?;
        validation::validate_password(&request.password)?;

        let password_hash = resources
            .auth_manager
            .hash_password(&request.password)
            .await?;

        let user = resources
            .database
            .users()
            .create(&NewUser {
                email: email.to_owned(),
                username: username.to_owned(),
                first_name: request.first_name.trim().to_owned(),
                last_name: request.last_name.trim().to_owned(),
                password_hash,
            })
            .await?;

        info!(user.id = user.id, "Registered user {}", user.username);

        let response = RegisterResponse {
            email: user.email,
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        };
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle GET /api/users/me
    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;
        let response: UserResponse =
            user_response(&resources, &auth.user, Some(auth.user_id())).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/users/:id
    async fn handle_get_user(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        ApiPath(user_id): ApiPath<i64>,
    ) -> Result<Response, AppError> {
        let viewer_id = Self::viewer_id(&headers, &resources).await?;
        let user = resources.database.users().get_required(user_id).await?;
        let response = user_response(&resources, &user, viewer_id).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/users/set_password
    async fn handle_set_password(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        ApiJson(request): ApiJson<SetPasswordRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let current_ok = resources
            .auth_manager
            .verify_password(&request.current_password, &auth.user.password_hash)
            .await?;
        if !current_ok {
            return Err(AppError::invalid_input("current_password is incorrect"));
        }

        validation::validate_password(&request.new_password)?;

        let password_hash = resources
            .auth_manager
            .hash_password(&request.new_password)
            .await?;
        resources
            .database
            .users()
            .update_password(auth.user_id(), &password_hash)
            .await?;

        info!(user.id = auth.user_id(), "Password changed");
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    // ========================================================================
    // Avatar
    // ========================================================================

    /// Handle PUT /api/users/me/avatar
    async fn handle_set_avatar(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        ApiJson(request): ApiJson<AvatarRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;
        let data_url = request
            .avatar
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| AppError::missing_field("avatar"))?;

        let stored = resources
            .images
            .save_data_url(AVATARS_DIR, &data_url)
            .await?;
        resources
            .database
            .users()
            .set_avatar(auth.user_id(), Some(&stored))
            .await?;

        if let Some(previous) = auth.user.avatar.as_deref() {
            resources.images.delete(previous).await?;
        }

        let response = AvatarResponse {
            avatar: resources.images.url(&stored),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle DELETE /api/users/me/avatar
    async fn handle_delete_avatar(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;
        let Some(current) = auth.user.avatar.as_deref() else {
            return Err(AppError::invalid_input("No avatar is set"));
        };

        resources
            .database
            .users()
            .set_avatar(auth.user_id(), None)
            .await?;
        resources.images.delete(current).await?;

        Ok(StatusCode::NO_CONTENT.into_response())
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// Handle GET /api/users/subscriptions
    async fn handle_subscriptions(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        ApiQuery(query): ApiQuery<SubscriptionQuery>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;
        let window = PageParams {
            page: query.page,
            limit: query.limit,
        }
        .resolve(resources.config.page_size);

        let (authors, count) = resources
            .database
            .subscriptions()
            .list_authors(auth.user_id(), window)
            .await?;

        let mut results: Vec<AuthorWithRecipesResponse> = Vec::with_capacity(authors.len());
        for author in &authors {
            results.push(
                author_with_recipes(&resources, author, Some(auth.user_id()), query.recipes_limit)
                    .await?,
            );
        }

        let base_url = query.recipes_limit.map_or_else(
            || resources.api_url("/api/users/subscriptions"),
            |limit| resources.api_url(&format!("/api/users/subscriptions?recipes_limit={limit}")),
        );
        let page = Page::new(results, count, window, &base_url);
        Ok((StatusCode::OK, Json(page)).into_response())
    }

    /// Handle POST /api/users/:id/subscribe
    async fn handle_subscribe(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        ApiPath(author_id): ApiPath<i64>,
        ApiQuery(query): ApiQuery<SubscriptionQuery>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;
        let author = resources.database.users().get_required(author_id).await?;

        resources
            .database
            .subscriptions()
            .subscribe(auth.user_id(), author.id)
            .await?;

        info!(user.id = auth.user_id(), author.id = author.id, "Subscribed");

        let response =
            author_with_recipes(&resources, &author, Some(auth.user_id()), query.recipes_limit)
                .await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle DELETE /api/users/:id/subscribe
    async fn handle_unsubscribe(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        ApiPath(author_id): ApiPath<i64>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;
        let author = resources.database.users().get_required(author_id).await?;

        resources
            .database
            .subscriptions()
            .unsubscribe(auth.user_id(), author.id)
            .await?;

        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
