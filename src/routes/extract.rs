// ABOUTME: Request extractors that report malformed input through AppError
// ABOUTME: Wrap axum's Json, Query, and Path so rejections use the JSON error envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

use axum::extract::{FromRequest, FromRequestParts};

use crate::errors::AppError;

/// JSON request body; a malformed or incomplete body is a 400
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Query-string parameters; unparsable values are a 400
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// Path parameters; a non-numeric id is a 400
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);
