// ABOUTME: Application constants re-exported from foodgram-core
// ABOUTME: Keeps `crate::constants::...` paths stable inside the server crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

pub use foodgram_core::constants::*;
