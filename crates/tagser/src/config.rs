// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec limits.
//!
//! With the `config-loaders` feature, limits can be read from YAML:
//!
//! ```yaml
//! # codec.yaml
//! max_depth: 64
//! max_collection_len: 1048576
//! ```
//!
//! Missing keys keep their defaults.

use crate::error::{Error, Result};

/// Default nesting bound.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Largest accepted `max_depth`.
///
/// Encode and decode keep their nesting on the heap, but dropping, cloning
/// and comparing a [`crate::Value`] still recurse once per level, so values
/// this deep stay well inside a 2 MiB thread stack.
pub const MAX_DEPTH_CEILING: usize = 1024;

/// Limits applied by the encoder and decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "config-loaders", derive(serde::Deserialize))]
#[cfg_attr(feature = "config-loaders", serde(default, deny_unknown_fields))]
pub struct CodecConfig {
    /// Deepest nesting level accepted; the top-level value is level 0.
    pub max_depth: usize,
    /// Largest declared string, array, slice or map length accepted when
    /// decoding. `None` leaves lengths bounded only by the input size.
    pub max_collection_len: Option<usize>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_collection_len: None,
        }
    }
}

impl CodecConfig {
    /// Start from the defaults.
    pub fn builder() -> CodecConfigBuilder {
        CodecConfigBuilder::default()
    }

    /// Check that the limits are usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 || self.max_depth > MAX_DEPTH_CEILING {
            return Err(Error::Config(format!(
                "max_depth must be within 1..={}, got {}",
                MAX_DEPTH_CEILING, self.max_depth
            )));
        }
        Ok(())
    }

    /// Parse limits from a YAML document.
    #[cfg(feature = "config-loaders")]
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::Config(format!("invalid codec YAML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read limits from a YAML file.
    #[cfg(feature = "config-loaders")]
    pub fn from_yaml_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        let config = Self::from_yaml_str(&yaml)?;
        log::debug!(
            "[CodecConfig::from_yaml_file] loaded {} (max_depth={}, max_collection_len={:?})",
            path.display(),
            config.max_depth,
            config.max_collection_len
        );
        Ok(config)
    }
}

/// Consuming builder for [`CodecConfig`].
///
/// ```rust
/// use tagser::CodecConfig;
///
/// let config = CodecConfig::builder()
///     .max_depth(32)
///     .max_collection_len(1024)
///     .build()
///     .expect("valid limits");
/// assert_eq!(config.max_depth, 32);
/// ```
#[derive(Debug, Default)]
pub struct CodecConfigBuilder {
    config: CodecConfig,
}

impl CodecConfigBuilder {
    /// Set the nesting bound.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Set the largest accepted declared length.
    pub fn max_collection_len(mut self, len: usize) -> Self {
        self.config.max_collection_len = Some(len);
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<CodecConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
