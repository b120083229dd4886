// ABOUTME: Password hashing and API token authentication
// ABOUTME: bcrypt runs on the blocking pool; tokens are random strings stored as SHA-256 hashes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

//! # Authentication
//!
//! Clients log in with email and password and receive an opaque token. The
//! token is sent back as `Authorization: Token <key>` (or `Bearer <key>`).
//! Only its SHA-256 digest is persisted, so a leaked database does not leak
//! usable credentials.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::constants::tokens::{BEARER_SCHEME, TOKEN_LENGTH, TOKEN_SCHEME};
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::User;

/// Result of authenticating a request
#[derive(Debug, Clone)]
pub struct AuthResult {
    /// The authenticated user
    pub user: User,
}

impl AuthResult {
    /// Id of the authenticated user
    #[must_use]
    pub const fn user_id(&self) -> i64 {
        self.user.id
    }
}

/// Issues, checks, and revokes API tokens
#[derive(Clone)]
pub struct AuthManager {
    database: Database,
    bcrypt_cost: u32,
}

impl AuthManager {
    /// Create a new auth manager
    #[must_use]
    pub const fn new(database: Database, bcrypt_cost: u32) -> Self {
        Self {
            database,
            bcrypt_cost,
        }
    }

    /// Hash a password with bcrypt on the blocking pool
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails or the task panics
    pub async fn hash_password(&self, password: &str) -> AppResult<String> {
        let password = password.to_owned();
        let cost = self.bcrypt_cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
            .map_err(|e| AppError::internal(format!("Password hashing error: {e}")))
    }

    /// Check a password against a stored bcrypt hash on the blocking pool
    ///
    /// # Errors
    ///
    /// Returns an error if the task panics or the hash is malformed
    pub async fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || bcrypt::verify(&password, &hash))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
            .map_err(|e| AppError::internal(format!("Password verification error: {e}")))
    }

    /// Generate a new random token
    #[must_use]
    pub fn generate_token() -> String {
        thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect()
    }

    /// Hash a token for storage and lookup
    #[must_use]
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Verify credentials and issue a token
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for unknown email or wrong password
    pub async fn login(&self, email: &str, password: &str) -> AppResult<String> {
        let Some(user) = self.database.users().get_by_email(email).await? else {
            AppLogger::log_auth_event(None, "login", false);
            return Err(AppError::invalid_input(
                "Unable to log in with provided credentials",
            ));
        };

        if !self.verify_password(password, &user.password_hash).await? {
            AppLogger::log_auth_event(Some(user.id), "login", false);
            return Err(AppError::invalid_input(
                "Unable to log in with provided credentials",
            ));
        }

        let token = Self::generate_token();
        self.database
            .tokens()
            .store(&Self::hash_token(&token), user.id)
            .await?;

        AppLogger::log_auth_event(Some(user.id), "login", true);
        Ok(token)
    }

    /// Revoke the token presented in the request headers
    ///
    /// # Errors
    ///
    /// Returns an auth error if no valid token is present
    pub async fn logout(&self, headers: &HeaderMap) -> AppResult<()> {
        let auth = self.authenticate(headers).await?;
        let token = extract_token(headers)?.ok_or_else(AppError::auth_required)?;

        self.database.tokens().revoke(&Self::hash_token(token)).await?;
        AppLogger::log_auth_event(Some(auth.user_id()), "logout", true);

        Ok(())
    }

    /// Authenticate a request that requires a user
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a token and `AuthInvalid` for an
    /// unknown or malformed one
    pub async fn authenticate(&self, headers: &HeaderMap) -> AppResult<AuthResult> {
        self.authenticate_optional(headers)
            .await?
            .ok_or_else(AppError::auth_required)
    }

    /// Authenticate a request where anonymous access is allowed
    ///
    /// A missing header yields `None`; a present but invalid one is an error.
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` for an unknown or malformed token
    pub async fn authenticate_optional(&self, headers: &HeaderMap) -> AppResult<Option<AuthResult>> {
        let Some(token) = extract_token(headers)? else {
            return Ok(None);
        };

        match self.database.tokens().find_user(&Self::hash_token(token)).await? {
            Some(user) => Ok(Some(AuthResult { user })),
            None => {
                AppLogger::log_security_event("invalid_token", "Unknown API token presented", None);
                Err(AppError::auth_invalid("Invalid token"))
            }
        }
    }
}

/// Pull the raw token out of the `Authorization` header
///
/// # Errors
///
/// Returns `AuthInvalid` if the header is present but malformed
pub fn extract_token(headers: &HeaderMap) -> AppResult<Option<&str>> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| AppError::auth_invalid("Authorization header is not valid UTF-8"))?;

    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or_else(|| AppError::auth_invalid("Malformed authorization header"))?;

    if !scheme.eq_ignore_ascii_case(TOKEN_SCHEME) && !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        warn!("Rejected authorization scheme: {scheme}");
        return Err(AppError::auth_invalid(format!(
            "Unsupported authorization scheme: {scheme}"
        )));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AppError::auth_invalid("Empty token"));
    }

    Ok(Some(token))
}
