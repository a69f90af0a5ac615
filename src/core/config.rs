// src/core/config.rs

use crate::core::common::IndexError;
use crate::core::indexing::vector::antipole::builder::DEFAULT_MIN_LEAF_SIZE;
use crate::core::indexing::vector::antipole::metric::DEFAULT_TOURNAMENT_SIZE;
use crate::core::vector::ConversionMethod;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Smallest tournament window for which a window median means anything.
const MIN_TOURNAMENT_SIZE: usize = 3;

/// Thumbnail edge lengths used by the mosaic database: a scaling factor of 3
/// over a 16x12 grid.
pub const MOSAIC_THUMBNAIL_WIDTH: u32 = 48;
pub const MOSAIC_THUMBNAIL_HEIGHT: u32 = 36;

/// Configuration for an antipole index.
///
/// Every field can be omitted from a TOML file; missing fields take their
/// default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IndexConfig {
    pub conversion_method: ConversionMethod,
    pub min_leaf_size: usize,
    pub tournament_size: usize,
    /// When set, thumbnails of any other width are rejected.
    pub thumbnail_width: Option<u32>,
    /// When set, thumbnails of any other height are rejected.
    pub thumbnail_height: Option<u32>,
}

/// Builder for `IndexConfig`.
#[derive(Debug, Clone, Default)]
pub struct IndexConfigBuilder {
    conversion_method: Option<ConversionMethod>,
    min_leaf_size: Option<usize>,
    tournament_size: Option<usize>,
    thumbnail_width: Option<u32>,
    thumbnail_height: Option<u32>,
}

impl IndexConfigBuilder {
    /// Creates a new IndexConfigBuilder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the thumbnail conversion method
    pub fn conversion_method(mut self, method: ConversionMethod) -> Self {
        self.conversion_method = Some(method);
        self
    }

    /// Sets the leaf threshold
    pub fn min_leaf_size(mut self, size: usize) -> Self {
        self.min_leaf_size = Some(size);
        self
    }

    /// Sets the antipole tournament window
    pub fn tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = Some(size);
        self
    }

    /// Requires thumbnails of exactly `width` x `height` pixels
    pub fn thumbnail_size(mut self, width: u32, height: u32) -> Self {
        self.thumbnail_width = Some(width);
        self.thumbnail_height = Some(height);
        self
    }

    /// Builds the IndexConfig instance with validation
    pub fn build(self) -> Result<IndexConfig, IndexError> {
        let defaults = IndexConfig::default();
        let config = IndexConfig {
            conversion_method: self.conversion_method.unwrap_or(defaults.conversion_method),
            min_leaf_size: self.min_leaf_size.unwrap_or(defaults.min_leaf_size),
            tournament_size: self.tournament_size.unwrap_or(defaults.tournament_size),
            thumbnail_width: self.thumbnail_width.or(defaults.thumbnail_width),
            thumbnail_height: self.thumbnail_height.or(defaults.thumbnail_height),
        };

        config.validate()?;
        Ok(config)
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            conversion_method: ConversionMethod::Rgb,
            min_leaf_size: DEFAULT_MIN_LEAF_SIZE,
            tournament_size: DEFAULT_TOURNAMENT_SIZE,
            thumbnail_width: None,
            thumbnail_height: None,
        }
    }
}

impl IndexConfig {
    /// Creates a new IndexConfigBuilder for fluent configuration
    pub fn builder() -> IndexConfigBuilder {
        IndexConfigBuilder::new()
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), IndexError> {
        if self.min_leaf_size == 0 {
            return Err(IndexError::Configuration(
                "min_leaf_size must be greater than 0".to_string(),
            ));
        }

        if self.tournament_size < MIN_TOURNAMENT_SIZE {
            return Err(IndexError::Configuration(format!(
                "tournament_size must be at least {}",
                MIN_TOURNAMENT_SIZE
            )));
        }

        if self.thumbnail_width == Some(0) || self.thumbnail_height == Some(0) {
            return Err(IndexError::Configuration(
                "thumbnail dimensions must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::Configuration` if the file cannot be parsed or fails
    /// validation, and `IndexError::Io` if it exists but cannot be read.
    pub fn load_from_file(path: &Path) -> Result<Self, IndexError> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                let config: Self = toml::from_str(&contents).map_err(|e| {
                    IndexError::Configuration(format!(
                        "Failed to parse config file '{}': {}",
                        path.display(),
                        e
                    ))
                })?;

                config.validate()?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(IndexError::Io(e)),
        }
    }

    /// Loads configuration from an optional TOML file path.
    ///
    /// `None` and a missing file both yield the default configuration.
    pub fn load_or_default(optional_path: Option<&Path>) -> Result<Self, IndexError> {
        match optional_path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Configuration matching the mosaic thumbnail database
    pub fn for_mosaic(method: ConversionMethod) -> Result<Self, IndexError> {
        Self::builder()
            .conversion_method(method)
            .thumbnail_size(MOSAIC_THUMBNAIL_WIDTH, MOSAIC_THUMBNAIL_HEIGHT)
            .build()
    }

    /// Creates a configuration for testing: tiny leaves force deep trees
    pub fn for_testing() -> Result<Self, IndexError> {
        Self::builder().min_leaf_size(1).build()
    }
}
