// ABOUTME: Input validation for registration, passwords, and recipe fields
// ABOUTME: Returns AppError::invalid_input with a message naming the offending field
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::limits::{
    EMAIL_MAX_LENGTH, MAX_COOKING_TIME, MAX_INGREDIENT_AMOUNT, MIN_COOKING_TIME,
    MIN_INGREDIENT_AMOUNT, PASSWORD_MIN_LENGTH, PERSON_NAME_MAX_LENGTH, RECIPE_NAME_MAX_LENGTH,
    USERNAME_MAX_LENGTH,
};
use crate::errors::{AppError, AppResult};
use crate::models::IngredientAmount;

static USERNAME_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").ok());

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

/// Usernames that would shadow fixed routes under `/api/users/`
const RESERVED_USERNAMES: &[&str] = &["me", "subscriptions", "set_password"];

fn matches(pattern: &LazyLock<Option<Regex>>, value: &str) -> AppResult<bool> {
    pattern
        .as_ref()
        .map(|regex| regex.is_match(value))
        .ok_or_else(|| AppError::internal("Validation pattern failed to compile"))
}

fn require_text(field: &str, value: &str, max_length: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::missing_field(field));
    }
    if value.chars().count() > max_length {
        return Err(AppError::invalid_input(format!(
            "{field} must be at most {max_length} characters"
        )));
    }
    Ok(())
}

/// Validate an email address
///
/// # Errors
///
/// Returns an error if the address is empty, too long, or malformed
pub fn validate_email(email: &str) -> AppResult<()> {
    require_text("email", email, EMAIL_MAX_LENGTH)?;
    if !matches(&EMAIL_PATTERN, email)? {
        return Err(AppError::invalid_input("email is not a valid address"));
    }
    Ok(())
}

/// Validate a username
///
/// # Errors
///
/// Returns an error for empty, overlong, reserved, or badly formed names
pub fn validate_username(username: &str) -> AppResult<()> {
    require_text("username", username, USERNAME_MAX_LENGTH)?;
    if !matches(&USERNAME_PATTERN, username)? {
        return Err(AppError::invalid_input(
            "username may only contain letters, digits and @/./+/-/_",
        ));
    }
    if RESERVED_USERNAMES.contains(&username.to_lowercase().as_str()) {
        return Err(AppError::invalid_input(format!(
            "username '{username}' is reserved"
        )));
    }
    Ok(())
}

/// Validate a first or last name
///
/// # Errors
///
/// Returns an error if the name is empty or too long
pub fn validate_person_name(field: &str, value: &str) -> AppResult<()> {
    require_text(field, value, PERSON_NAME_MAX_LENGTH)
}

/// Validate a new password
///
/// # Errors
///
/// Returns an error if the password is too short or entirely numeric
pub fn validate_password(password: &str) -> AppResult<()> {
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(AppError::invalid_input(format!(
            "password must be at least {PASSWORD_MIN_LENGTH} characters"
        )));
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::invalid_input("password cannot be entirely numeric"));
    }
    Ok(())
}

/// Validate a recipe title
///
/// # Errors
///
/// Returns an error if the name is empty or too long
pub fn validate_recipe_name(name: &str) -> AppResult<()> {
    require_text("name", name, RECIPE_NAME_MAX_LENGTH)
}

/// Validate recipe instructions
///
/// # Errors
///
/// Returns an error if the text is empty
pub fn validate_recipe_text(text: &str) -> AppResult<()> {
    if text.trim().is_empty() {
        return Err(AppError::missing_field("text"));
    }
    Ok(())
}

/// Validate a cooking time in minutes
///
/// # Errors
///
/// Returns an error if the time is outside `MIN_COOKING_TIME..=MAX_COOKING_TIME`
pub fn validate_cooking_time(minutes: i64) -> AppResult<()> {
    if !(MIN_COOKING_TIME..=MAX_COOKING_TIME).contains(&minutes) {
        return Err(AppError::invalid_input(format!(
            "cooking_time must be between {MIN_COOKING_TIME} and {MAX_COOKING_TIME}"
        )));
    }
    Ok(())
}

/// Validate a recipe's ingredient lines
///
/// Existence of the ingredient ids is checked by the database layer.
///
/// # Errors
///
/// Returns an error for an empty list, a duplicate id, or an amount out of range
pub fn validate_ingredient_amounts(lines: &[IngredientAmount]) -> AppResult<()> {
    if lines.is_empty() {
        return Err(AppError::invalid_input(
            "A recipe needs at least one ingredient",
        ));
    }

    for (index, line) in lines.iter().enumerate() {
        if !(MIN_INGREDIENT_AMOUNT..=MAX_INGREDIENT_AMOUNT).contains(&line.amount) {
            return Err(AppError::invalid_input(format!(
                "amount of ingredient {} must be between {MIN_INGREDIENT_AMOUNT} and {MAX_INGREDIENT_AMOUNT}",
                line.ingredient_id
            )));
        }
        if lines[..index]
            .iter()
            .any(|earlier| earlier.ingredient_id == line.ingredient_id)
        {
            return Err(AppError::invalid_input(format!(
                "Ingredient {} is listed more than once",
                line.ingredient_id
            )));
        }
    }

    Ok(())
}
