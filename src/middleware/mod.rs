// ABOUTME: HTTP middleware for CORS, request ids, and request tracing
// ABOUTME: Layers are applied to the assembled router in the server module
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

pub mod cors;
pub mod tracing;

// CORS configuration
pub use cors::setup_cors;

// Request tracing and id propagation
pub use tracing::{create_request_span, RequestIdMaker, REQUEST_ID_HEADER};
