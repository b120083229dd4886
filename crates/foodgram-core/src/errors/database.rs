// ABOUTME: Conversion of sqlx errors into AppError values
// ABOUTME: Maps constraint violations to client errors and everything else to DATABASE_ERROR
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

use super::{AppError, ErrorCode};

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::RowNotFound => Self::new(ErrorCode::ResourceNotFound, "Record not found"),
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                Self::already_exists("Record already exists")
            }
            sqlx::Error::Database(db_error) if db_error.is_foreign_key_violation() => {
                Self::invalid_input("Referenced record does not exist")
            }
            _ => Self::database(error.to_string()),
        }
        .with_source(error)
    }
}
