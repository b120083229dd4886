// ABOUTME: Stores uploaded images sent as base64 data URLs under the media root
// ABOUTME: Files get random names; stored paths are relative and turned into public URLs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram Contributors

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::constants::defaults::MEDIA_URL_PATH;
use crate::errors::{AppError, AppResult};

/// Image extensions accepted from clients
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Media subdirectory for recipe images
pub const RECIPE_IMAGES_DIR: &str = "recipes/images";

/// Media subdirectory for user avatars
pub const AVATARS_DIR: &str = "avatars";

/// A decoded image upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// File extension without the dot
    pub extension: String,
    /// Raw image bytes
    pub bytes: Vec<u8>,
}

/// Decode a `data:image/<ext>;base64,<payload>` string
///
/// # Errors
///
/// Returns `InvalidInput` for anything that is not a base64 image data URL
/// with a supported extension
pub fn decode_data_url(data_url: &str) -> AppResult<DecodedImage> {
    let rest = data_url
        .trim()
        .strip_prefix("data:image/")
        .ok_or_else(|| AppError::invalid_input("Image must be a data:image/...;base64 URL"))?;

    let (mime_subtype, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| AppError::invalid_input("Image data URL must be base64 encoded"))?;

    let extension = mime_subtype.to_lowercase();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::invalid_input(format!(
            "Unsupported image type: {mime_subtype}"
        )));
    }

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| AppError::invalid_input(format!("Invalid base64 image data: {e}")))?;

    if bytes.is_empty() {
        return Err(AppError::invalid_input("Image is empty"));
    }

    Ok(DecodedImage { extension, bytes })
}

/// Filesystem-backed image storage
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
    public_base_url: String,
}

impl ImageStore {
    /// Create a store writing under `root`, with URLs built on `public_base_url`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    /// Directory files are written to
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Decode and persist a data URL, returning the relative stored path
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a bad payload or `StorageError` if the
    /// file cannot be written
    pub async fn save_data_url(&self, subdir: &str, data_url: &str) -> AppResult<String> {
        let image = decode_data_url(data_url)?;
        let relative = format!("{subdir}/{}.{}", Uuid::new_v4(), image.extension);
        let path = self.root.join(&relative);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::storage(format!("Failed to create media directory: {e}")))?;
        }

        tokio::fs::write(&path, &image.bytes)
            .await
            .map_err(|e| AppError::storage(format!("Failed to write image: {e}")))?;

        debug!("Stored image {relative} ({} bytes)", image.bytes.len());
        Ok(relative)
    }

    /// Remove a stored file; a missing file is not an error
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file exists but cannot be removed
    pub async fn delete(&self, relative: &str) -> AppResult<()> {
        let Some(path) = self.resolve(relative) else {
            warn!("Refusing to delete media path outside the root: {relative}");
            return Ok(());
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::storage(format!("Failed to delete image: {e}"))),
        }
    }

    /// Public URL for a stored relative path
    #[must_use]
    pub fn url(&self, relative: &str) -> String {
        format!("{}{MEDIA_URL_PATH}/{relative}", self.public_base_url)
    }

    fn resolve(&self, relative: &str) -> Option<PathBuf> {
        let relative = Path::new(relative);
        relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
            .then(|| self.root.join(relative))
    }
}
