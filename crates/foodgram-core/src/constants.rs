// ABOUTME: Application-wide constants for field limits, defaults, and service names
// ABOUTME: Shared between validation, storage, and configuration code
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

//! # Constants Module
//!
//! Hardcoded limits and defaults. Runtime overrides live in the server's
//! `config` module.

/// Service identification
pub mod service_names {
    /// Name used in logs and health responses
    pub const FOODGRAM_SERVER: &str = "foodgram-server";
}

/// Maximum field lengths, mirroring the database schema
pub mod limits {
    /// Maximum length of a user's email address
    pub const EMAIL_MAX_LENGTH: usize = 254;
    /// Maximum length of a username
    pub const USERNAME_MAX_LENGTH: usize = 150;
    /// Maximum length of first and last names
    pub const PERSON_NAME_MAX_LENGTH: usize = 150;
    /// Minimum password length
    pub const PASSWORD_MIN_LENGTH: usize = 8;
    /// Maximum length of an ingredient name
    pub const INGREDIENT_NAME_MAX_LENGTH: usize = 128;
    /// Maximum length of a measurement unit
    pub const MEASUREMENT_UNIT_MAX_LENGTH: usize = 64;
    /// Maximum length of a recipe name
    pub const RECIPE_NAME_MAX_LENGTH: usize = 256;
    /// Minimum cooking time in minutes
    pub const MIN_COOKING_TIME: i64 = 1;
    /// Maximum cooking time in minutes, the range of a 32-bit column
    pub const MAX_COOKING_TIME: i64 = 2_147_483_647;
    /// Minimum ingredient amount in a recipe
    pub const MIN_INGREDIENT_AMOUNT: i64 = 1;
    /// Maximum ingredient amount; keeps shopping-list sums inside `i64`
    pub const MAX_INGREDIENT_AMOUNT: i64 = 2_147_483_647;
    /// Upper bound on the page size a client may request
    pub const MAX_PAGE_SIZE: i64 = 100;
}

/// Defaults used when no environment override is present
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8000;
    /// Default database location
    pub const DATABASE_URL: &str = "sqlite:./data/foodgram.db";
    /// Default public base URL of this API (used to build absolute links)
    pub const PUBLIC_BASE_URL: &str = "http://localhost:8000";
    /// Default front-end URL that short links redirect to
    pub const FRONTEND_URL: &str = "http://localhost";
    /// Default directory for uploaded images
    pub const MEDIA_ROOT: &str = "./media";
    /// URL prefix under which media files are served
    pub const MEDIA_URL_PATH: &str = "/media";
    /// Default page size for paginated endpoints
    pub const PAGE_SIZE: i64 = 6;
    /// Default bcrypt cost factor
    pub const BCRYPT_COST: u32 = 12;
}

/// Short-link generation
pub mod short_links {
    /// Number of characters in a generated short code
    pub const CODE_LENGTH: usize = 6;
    /// Attempts made before giving up on a colliding code
    pub const MAX_GENERATION_ATTEMPTS: usize = 5;
    /// Path prefix that short links are served under
    pub const PATH_PREFIX: &str = "/s";
}

/// API token format
pub mod tokens {
    /// Length of the random token handed to clients
    pub const TOKEN_LENGTH: usize = 40;
    /// Authorization scheme used by the web client
    pub const TOKEN_SCHEME: &str = "Token";
    /// Alternative authorization scheme
    pub const BEARER_SCHEME: &str = "Bearer";
}

/// Shopping-list download
pub mod shopping_list {
    /// File name offered to the browser
    pub const FILE_NAME: &str = "shopping_cart.txt";
    /// Timestamp format used in the document header
    pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";
}
