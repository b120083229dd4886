// ABOUTME: Page-number pagination for list endpoints
// ABOUTME: Provides query parameters, offset math, and the count/next/previous/results envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

use serde::{Deserialize, Serialize};

use crate::constants::limits::MAX_PAGE_SIZE;

/// Pagination parameters accepted from the query string
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PageParams {
    /// 1-based page number
    pub page: Option<i64>,
    /// Page size requested by the client
    pub limit: Option<i64>,
}

impl PageParams {
    /// Create parameters for an explicit page and size
    #[must_use]
    pub const fn new(page: i64, limit: i64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    /// Resolve the requested page and size, applying defaults and bounds
    #[must_use]
    pub fn resolve(&self, default_limit: i64) -> PageWindow {
        let limit = self
            .limit
            .filter(|limit| *limit > 0)
            .unwrap_or(default_limit)
            .min(MAX_PAGE_SIZE);
        let page = self.page.filter(|page| *page > 0).unwrap_or(1);

        PageWindow { page, limit }
    }
}

/// A resolved page: always has a positive page number and size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based page number
    pub page: i64,
    /// Page size
    pub limit: i64,
}

impl PageWindow {
    /// Row offset for SQL `LIMIT ... OFFSET ...`
    ///
    /// Saturates for page numbers past the end of any table, which yields an
    /// empty page instead of overflowing.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Number of rows covered by this page and every page before it
    #[must_use]
    pub const fn end(&self) -> i64 {
        self.page.saturating_mul(self.limit)
    }
}

/// Paginated response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of items across all pages
    pub count: i64,
    /// Link to the next page, if any
    pub next: Option<String>,
    /// Link to the previous page, if any
    pub previous: Option<String>,
    /// Items on this page
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Build a page and its navigation links
    ///
    /// `base_url` is the absolute URL of the list endpoint. It may already carry
    /// a query string (active filters), in which case the page parameters are
    /// appended to it.
    #[must_use]
    pub fn new(results: Vec<T>, count: i64, window: PageWindow, base_url: &str) -> Self {
        let separator = if base_url.contains('?') { '&' } else { '?' };
        let link = |page: i64| format!("{base_url}{separator}page={page}&limit={}", window.limit);

        let next = (window.end() < count).then(|| link(window.page + 1));
        let previous = (window.page > 1).then(|| link(window.page - 1));

        Self {
            count,
            next,
            previous,
            results,
        }
    }
}
