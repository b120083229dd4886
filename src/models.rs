// ABOUTME: Domain models re-exported from foodgram-core
// ABOUTME: Users, ingredients, recipes, and shopping-list rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

pub use foodgram_core::models::*;
