// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec error type.

use crate::kind::describe_tag;
use thiserror::Error;

/// Errors returned by encode, decode and registry operations.
///
/// Every recursive step returns the first failure unchanged, so the error a
/// caller sees describes the first problem met along a depth-first walk.
///
/// # Example
///
/// ```rust
/// use tagser::{Codec, Error, TypeRegistry};
/// use std::sync::Arc;
///
/// let codec = Codec::new(Arc::new(TypeRegistry::new()));
/// match codec.unmarshal(&[]) {
///     Err(Error::TruncatedInput { what, .. }) => assert_eq!(what, "kind"),
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
#[derive(Debug, Error)]
pub enum Error {
    /// Shape cannot be represented (channel, function, raw address, or a tag
    /// outside the kind table).
    #[error("unsupported kind: {}", describe_tag(.tag))]
    UnsupportedKind { tag: u8 },

    /// Record type, or record id found on the wire, unknown to the registry.
    #[error("type {0} is not registered")]
    UnregisteredType(String),

    /// Not enough bytes for a fixed field, length prefix or nested metadata.
    #[error("cannot read {what}: need {need} bytes, have {have}")]
    TruncatedInput {
        what: &'static str,
        need: usize,
        have: usize,
    },

    /// Bytes remain after a complete top-level value.
    #[error("{remaining} trailing bytes after value")]
    TrailingData { remaining: usize },

    /// Timestamp payload is not text or not RFC3339.
    #[error("malformed timestamp: {0}")]
    MalformedTimestamp(String),

    /// A decoded value cannot be converted into its target type.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// String payload is not valid UTF-8.
    #[error("invalid text: {0}")]
    InvalidText(#[from] std::str::Utf8Error),

    /// Nesting deeper than the configured maximum.
    #[error("nesting depth exceeds limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    /// Declared length above the configured maximum.
    #[error("{what} of {declared} exceeds limit of {limit}")]
    LimitExceeded {
        what: &'static str,
        declared: u64,
        limit: usize,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn truncated(what: &'static str, need: usize, have: usize) -> Self {
        Self::TruncatedInput { what, need, have }
    }

    pub(crate) fn mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

/// Convenient alias for codec results.
pub type Result<T> = core::result::Result<T, Error>;
