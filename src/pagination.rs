// ABOUTME: Page-number pagination re-exported from foodgram-core
// ABOUTME: Used by the users, subscriptions, and recipes list endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

pub use foodgram_core::pagination::*;
