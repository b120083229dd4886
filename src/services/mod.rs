// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Shopping-list rendering, cooking-time buckets, image storage, and input validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

//! Domain service layer
//!
//! Logic here is independent of HTTP so it can be unit tested without a
//! router and reused by the command-line tools.

/// Cooking-time histogram used to suggest recipe filters
pub mod cooking_time;

/// Base64 image decoding and media-root storage
pub mod images;

/// Plain-text rendering of an aggregated shopping list
pub mod shopping_list;

/// Registration and password rules
pub mod validation;
