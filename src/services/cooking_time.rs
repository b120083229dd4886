// ABOUTME: Splits the observed cooking times into fast, medium, and slow buckets
// ABOUTME: Three equal-width bins over [min, max]; no buckets below three distinct values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

use std::collections::BTreeSet;

use serde::Serialize;

/// Minimum number of distinct cooking times needed to build buckets
pub const MIN_DISTINCT_TIMES: usize = 3;

/// Bucket identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketKind {
    /// Quickest third
    Fast,
    /// Middle third
    Medium,
    /// Slowest third, open-ended
    Slow,
}

/// One cooking-time range, usable as `cooking_time_min` / `cooking_time_max` filters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CookingTimeBucket {
    /// Which third this is
    pub kind: BucketKind,
    /// Lower edge in minutes
    pub min: f64,
    /// Upper edge in minutes; `None` for the open-ended slow bucket
    pub max: Option<f64>,
    /// Human-readable label using the integer part of the edges
    pub label: String,
}

/// Build the three buckets for a set of cooking times
///
/// Duplicates are ignored. Returns an empty list when fewer than
/// [`MIN_DISTINCT_TIMES`] distinct values are present.
#[must_use]
pub fn buckets(times: &[i64]) -> Vec<CookingTimeBucket> {
    let distinct: BTreeSet<i64> = times.iter().copied().collect();
    if distinct.len() < MIN_DISTINCT_TIMES {
        return Vec::new();
    }

    let (Some(&min), Some(&max)) = (distinct.first(), distinct.last()) else {
        return Vec::new();
    };

    let min = min as f64;
    let width = (max as f64 - min) / 3.0;
    let fast_edge = min + width;
    let slow_edge = min + 2.0 * width;

    vec![
        CookingTimeBucket {
            kind: BucketKind::Fast,
            min: 0.0,
            max: Some(fast_edge),
            label: format!("faster than {} min", fast_edge.trunc()),
        },
        CookingTimeBucket {
            kind: BucketKind::Medium,
            min: fast_edge,
            max: Some(slow_edge),
            label: format!("{}-{} min", fast_edge.trunc(), slow_edge.trunc()),
        },
        CookingTimeBucket {
            kind: BucketKind::Slow,
            min: slow_edge,
            max: None,
            label: format!("slower than {} min", slow_edge.trunc()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fewer_than_three_distinct_times_yield_no_buckets() {
        assert!(buckets(&[]).is_empty());
        assert!(buckets(&[10]).is_empty());
        assert!(buckets(&[10, 20, 20, 10]).is_empty());
    }

    #[test]
    fn test_equal_width_edges() {
        let result = buckets(&[10, 25, 40]);
        assert_eq!(result.len(), 3);

        assert_eq!(result[0].kind, BucketKind::Fast);
        assert!((result[0].max.unwrap() - 20.0).abs() < f64::EPSILON);
        assert!((result[1].min - 20.0).abs() < f64::EPSILON);
        assert!((result[1].max.unwrap() - 30.0).abs() < f64::EPSILON);
        assert!(result[2].max.is_none());
        assert_eq!(result[2].label, "slower than 30 min");
    }

    #[test]
    fn test_labels_use_integer_part() {
        let result = buckets(&[1, 2, 3, 5]);
        // width 4/3: edges 2.33 and 3.67
        assert_eq!(result[0].label, "faster than 2 min");
        assert_eq!(result[1].label, "2-3 min");
    }
}
