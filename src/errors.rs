// ABOUTME: Unified error types re-exported from foodgram-core
// ABOUTME: Provides AppError, ErrorCode, and AppResult to the server crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

pub use foodgram_core::errors::*;
