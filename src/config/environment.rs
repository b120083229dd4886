// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses environment variables into a strongly typed ServerConfig
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

//! Environment-based configuration management for production deployment

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::{defaults, limits};

/// Minimum bcrypt cost accepted by the `bcrypt` crate (private there as `MIN_COST`)
const BCRYPT_MIN_COST: u32 = 4;
/// Maximum bcrypt cost accepted by the `bcrypt` crate (private there as `MAX_COST`)
const BCRYPT_MAX_COST: u32 = 31;

/// Environment type for logging and security configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    /// Local development
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error for non-SQLite URLs
    pub fn parse_url(s: &str) -> Result<Self> {
        if let Some(path_str) = s.strip_prefix("sqlite:") {
            let path_str = path_str.trim_start_matches("//");
            if path_str == ":memory:" || path_str.is_empty() {
                Ok(Self::Memory)
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path_str),
                })
            }
        } else if s.contains("://") {
            bail!("Unsupported database URL scheme: {s}");
        } else {
            // Fallback: treat as SQLite file path
            Ok(Self::SQLite {
                path: PathBuf::from(s),
            })
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/foodgram.db"),
        }
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Server configuration assembled from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Public URLs used when building links
    pub urls: UrlConfig,
    /// Uploaded media storage
    pub media: MediaConfig,
    /// Cross-origin settings
    pub cors: CorsConfig,
    /// Default page size for list endpoints
    pub page_size: i64,
}

/// Database configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// bcrypt cost factor for password hashing
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: defaults::BCRYPT_COST,
        }
    }
}

/// Public URLs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Absolute URL this API is reachable at (no trailing slash)
    pub public_base_url: String,
    /// Absolute URL of the web front-end (no trailing slash)
    pub frontend_url: String,
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            public_base_url: defaults::PUBLIC_BASE_URL.to_owned(),
            frontend_url: defaults::FRONTEND_URL.to_owned(),
        }
    }
}

/// Media storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Directory uploaded images are written to
    pub root: PathBuf,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(defaults::MEDIA_ROOT),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins, or `*`
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".to_owned(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: defaults::HTTP_PORT,
            environment: Environment::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            urls: UrlConfig::default(),
            media: MediaConfig::default(),
            cors: CorsConfig::default(),
            page_size: defaults::PAGE_SIZE,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed
    pub fn from_env() -> Result<Self> {
        let http_port = parse_env("HTTP_PORT", defaults::HTTP_PORT)?;
        let database_url =
            DatabaseUrl::parse_url(&env_var_or("DATABASE_URL", defaults::DATABASE_URL))?;
        let bcrypt_cost = parse_env("BCRYPT_COST", defaults::BCRYPT_COST)?;
        if !(BCRYPT_MIN_COST..=BCRYPT_MAX_COST).contains(&bcrypt_cost) {
            bail!(
                "BCRYPT_COST must be between {} and {}",
                BCRYPT_MIN_COST,
                BCRYPT_MAX_COST
            );
        }

        let page_size = parse_env("PAGE_SIZE", defaults::PAGE_SIZE)?;
        let page_size = if (1..=limits::MAX_PAGE_SIZE).contains(&page_size) {
            page_size
        } else {
            warn!("PAGE_SIZE {page_size} out of range, using {}", defaults::PAGE_SIZE);
            defaults::PAGE_SIZE
        };

        Ok(Self {
            http_port,
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            database: DatabaseConfig { url: database_url },
            auth: AuthConfig { bcrypt_cost },
            urls: UrlConfig {
                public_base_url: trim_url(&env_var_or(
                    "PUBLIC_BASE_URL",
                    defaults::PUBLIC_BASE_URL,
                )),
                frontend_url: trim_url(&env_var_or("FRONTEND_URL", defaults::FRONTEND_URL)),
            },
            media: MediaConfig {
                root: PathBuf::from(env_var_or("MEDIA_ROOT", defaults::MEDIA_ROOT)),
            },
            cors: CorsConfig {
                allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", "*"),
            },
            page_size,
        })
    }

    /// One-line summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Foodgram configuration: environment={}, http_port={}, database={}, public_url={}, frontend_url={}, media_root={}, page_size={}",
            self.environment,
            self.http_port,
            self.database.url,
            self.urls.public_base_url,
            self.urls.frontend_url,
            self.media.root.display(),
            self.page_size,
        )
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {key}: {raw}")),
        Err(_) => Ok(default),
    }
}

fn trim_url(url: &str) -> String {
    url.trim_end_matches('/').to_owned()
}
