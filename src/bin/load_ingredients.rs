// ABOUTME: Bulk loader for the ingredient catalogue
// ABOUTME: Reads a JSON array of {name, measurement_unit} objects and inserts new rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

//! Ingredient loader for the Foodgram server.
//!
//! Usage:
//! ```bash
//! cargo run --bin load-ingredients -- data/ingredients.json
//!
//! # Against a specific database
//! cargo run --bin load-ingredients -- data/ingredients.json --database-url sqlite:./data/foodgram.db
//! ```
//!
//! Entries that already exist with the same name and unit are skipped, so
//! the loader can be rerun safely.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use foodgram_server::{
    config::{DatabaseUrl, ServerConfig},
    database::Database,
    models::NewIngredient,
};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "load-ingredients",
    about = "Foodgram ingredient catalogue loader",
    long_about = "Insert ingredients from a JSON file, skipping ones that already exist"
)]
struct LoadArgs {
    /// JSON file with an array of {"name", "measurement_unit"} objects
    file: PathBuf,

    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = LoadArgs::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    let database_url = match args.database_url {
        Some(url) => DatabaseUrl::parse_url(&url)?,
        None => ServerConfig::from_env()?.database.url,
    };

    let raw = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let ingredients: Vec<NewIngredient> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid ingredient JSON in {}", args.file.display()))?;
    info!(
        "Read {} ingredients from {}",
        ingredients.len(),
        args.file.display()
    );

    let database = Database::new(&database_url).await?;
    let inserted = database.ingredients().insert_many(&ingredients).await?;

    info!(
        "Loaded {inserted} new ingredients ({} already present)",
        (ingredients.len() as u64).saturating_sub(inserted)
    );
    Ok(())
}
