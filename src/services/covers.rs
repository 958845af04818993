// SPDX-License-Identifier: MIT

//! Static cover-image catalog.
//!
//! Loaded once at startup and passed to the story service as a read-only
//! value. Loading failure is surfaced as a `Result` so the caller decides
//! whether to fall back to an empty catalog.

use crate::error::AppError;
use ring::rand::{SecureRandom, SystemRandom};
use serde::Deserialize;
use std::path::Path;

/// One selectable cover image.
#[derive(Debug, Clone, Deserialize)]
pub struct CoverImage {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct CoverImagesFile {
    images: Vec<CoverImage>,
}

/// Read-only catalog of cover image URLs.
#[derive(Debug, Clone, Default)]
pub struct CoverCatalog {
    images: Vec<CoverImage>,
}

impl CoverCatalog {
    /// Load the catalog from a JSON file of the form `{"images": [...]}`.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Internal(anyhow::anyhow!(
                "Failed to read cover catalog {}: {}",
                path.display(),
                e
            ))
        })?;

        let file: CoverImagesFile = serde_json::from_str(&contents).map_err(|e| {
            AppError::Internal(anyhow::anyhow!(
                "Failed to parse cover catalog {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(Self {
            images: file.images,
        })
    }

    /// Build a catalog from an in-memory list.
    pub fn from_images(images: Vec<CoverImage>) -> Self {
        Self { images }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Pick a cover image URL uniformly at random.
    ///
    /// Returns an empty string when the catalog is empty.
    pub fn random_url(&self) -> String {
        if self.images.is_empty() {
            return String::new();
        }

        let mut buf = [0u8; 8];
        let index = match SystemRandom::new().fill(&mut buf) {
            Ok(()) => (u64::from_le_bytes(buf) % self.images.len() as u64) as usize,
            Err(_) => 0,
        };

        self.images[index].url.clone()
    }
}
