// ABOUTME: Ingredient catalogue model
// ABOUTME: Ingredients are shared across recipes and identified by name and unit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// An ingredient from the catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Unique identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Unit the amount is measured in (g, ml, pcs, ...)
    pub measurement_unit: String,
}

impl Display for Ingredient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} ({})", self.name, self.measurement_unit)
    }
}

/// Catalogue entry to import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIngredient {
    /// Display name
    pub name: String,
    /// Unit the amount is measured in
    pub measurement_unit: String,
}
