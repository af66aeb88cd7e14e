//! Persistent memo of natural image sizes keyed by source

use crate::io::error::{Result, file_system_error};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Natural pixel dimensions of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageSize {
    /// Natural width
    #[serde(rename = "w")]
    pub width: u32,
    /// Natural height
    #[serde(rename = "h")]
    pub height: u32,
}

impl ImageSize {
    /// Create an image size
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Performance metrics for cache effectiveness
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of lookups answered from the cache
    pub hits: usize,
    /// Number of lookups that needed a resolution
    pub misses: usize,
}

/// Source to natural size map, serialized as `{ "<src>": { "w": .., "h": .. } }`
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SizeCache {
    sizes: HashMap<String, ImageSize>,
}

impl SizeCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a cache file; a missing or unreadable file gives an empty cache
    pub fn load(path: &Path) -> Self {
        let Ok(text) = std::fs::read_to_string(path) else {
            return Self::new();
        };
        serde_json::from_str(&text).unwrap_or_else(|error| {
            tracing::warn!(path = %path.display(), %error, "discarding unreadable size cache");
            Self::new()
        })
    }

    /// Write the cache as JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string(self)?;
        std::fs::write(path, text).map_err(|e| file_system_error(path, "write size cache", e))
    }

    /// Cached size of a source
    pub fn get(&self, src: &str) -> Option<ImageSize> {
        self.sizes.get(src).copied()
    }

    /// Remember a measured size
    pub fn insert(&mut self, src: impl Into<String>, size: ImageSize) {
        self.sizes.insert(src.into(), size);
    }

    /// Number of cached sources
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Whether nothing is cached
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}
