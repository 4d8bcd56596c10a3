// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec facade: a registry plus limits.

use crate::config::CodecConfig;
use crate::convert::{Decode, Encode, Record};
use crate::decode::{decode_one, decode_value};
use crate::encode::encode_value;
use crate::error::Result;
use crate::registry::{Registration, TypeRegistry};
use crate::value::Value;
use std::sync::Arc;

/// Marshals and unmarshals values against a shared [`TypeRegistry`].
///
/// # Example
///
/// ```rust
/// use tagser::{Codec, Record, TypeRegistry, Value};
/// use std::sync::Arc;
///
/// #[derive(Debug, PartialEq, Record)]
/// struct Sample {
///     x: i32,
///     label: String,
/// }
///
/// let codec = Codec::new(Arc::new(TypeRegistry::new()));
/// codec.register::<Sample>();
///
/// let bytes = codec.marshal(&Sample { x: 5, label: "hi".into() }).unwrap();
/// let back: Sample = codec.unmarshal_as(&bytes).unwrap();
/// assert_eq!(back, Sample { x: 5, label: "hi".into() });
///
/// let value = codec.unmarshal(&bytes).unwrap();
/// assert_eq!(value.get_field("x"), Some(&Value::Int32(5)));
/// ```
#[derive(Debug, Clone)]
pub struct Codec {
    registry: Arc<TypeRegistry>,
    config: CodecConfig,
}

impl Codec {
    /// Codec with default limits.
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self {
            registry,
            config: CodecConfig::default(),
        }
    }

    /// Codec with explicit limits.
    pub fn with_config(registry: Arc<TypeRegistry>, config: CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { registry, config })
    }

    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Register a record type with the shared registry.
    pub fn register<T: Record>(&self) -> Registration {
        self.registry.register::<T>()
    }

    /// Encode any [`Encode`] value.
    ///
    /// A record that contains itself through a slice, array or map (for
    /// example `struct Tree { children: Vec<Tree> }`) cannot be encoded: its
    /// element marker never bottoms out and the call fails with
    /// [`Error::DepthLimitExceeded`](crate::Error::DepthLimitExceeded).
    /// Recursion through `Option<Box<Self>>` is encoded normally.
    pub fn marshal<T: Encode + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        self.marshal_value(&value.to_value())
    }

    /// Encode a dynamic value.
    pub fn marshal_value(&self, value: &Value) -> Result<Vec<u8>> {
        encode_value(value, &self.registry, &self.config)
    }

    /// Decode a buffer holding exactly one value.
    pub fn unmarshal(&self, bytes: &[u8]) -> Result<Value> {
        decode_value(bytes, &self.registry, &self.config)
    }

    /// Decode a buffer holding exactly one value into `T`.
    pub fn unmarshal_as<T: Decode>(&self, bytes: &[u8]) -> Result<T> {
        T::from_value(self.unmarshal(bytes)?)
    }

    /// Decode the first value of `bytes`, returning the rest.
    pub fn decode_one<'a>(&self, bytes: &'a [u8]) -> Result<(Value, &'a [u8])> {
        decode_one(bytes, &self.registry, &self.config)
    }
}
