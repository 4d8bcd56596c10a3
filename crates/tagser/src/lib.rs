// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # tagser - self-describing binary serialization
//!
//! Turns structured runtime values into a portable byte sequence and back,
//! without hand-written per-type codecs. Every value is prefixed with a
//! one-byte kind tag; record types are identified on the wire by the 32-bit
//! FNV-1a hash of their canonical name, resolved through a [`TypeRegistry`].
//!
//! ## Quick Start
//!
//! ```rust
//! use tagser::{Codec, Record, Result, TypeRegistry};
//! use std::sync::Arc;
//!
//! #[derive(Debug, PartialEq, Record)]
//! struct Reading {
//!     sensor: String,
//!     values: Vec<f32>,
//!     previous: Option<Box<Reading>>,
//! }
//!
//! fn main() -> Result<()> {
//!     let codec = Codec::new(Arc::new(TypeRegistry::new()));
//!     codec.register::<Reading>();
//!
//!     let reading = Reading {
//!         sensor: "t1".into(),
//!         values: vec![20.5, 21.0],
//!         previous: None,
//!     };
//!     let bytes = codec.marshal(&reading)?;
//!     assert_eq!(codec.unmarshal_as::<Reading>(&bytes)?, reading);
//!     Ok(())
//! }
//! ```
//!
//! ## Wire layout
//!
//! ```text
//! value   := kind:u8 payload
//! string  := len:u64le bytes
//! pointer := 0 | 1 value
//! array   := len:u64le zero(elem) value*      (same for slice)
//! map     := len:u64le zero(key) zero(val) (value value)*
//! struct  := "time" string | id:u32le value*
//! ```
//!
//! ## Modules Overview
//!
//! - [`kind`] - wire tags
//! - [`registry`] - record ids and descriptors
//! - [`encode`] / [`decode`] - the recursive codec
//! - [`convert`] - `Encode` / `Decode` for Rust types
//! - [`codec`] - facade bundling a registry and limits

// Allow the derive macro to work inside this crate's tests
extern crate self as tagser;

pub mod codec;
pub mod config;
pub mod convert;
pub mod decode;
pub mod descriptor;
pub mod encode;
pub mod error;
pub mod kind;
pub mod registry;
pub mod shape;
pub mod timefmt;
pub mod value;

pub use codec::Codec;
pub use config::{CodecConfig, CodecConfigBuilder};
pub use convert::{Decode, Encode, Record, RegisterSample, Uintptr};
pub use descriptor::{FieldDescriptor, TypeDescriptor, TypeDescriptorBuilder};
pub use error::{Error, Result};
pub use kind::Kind;
pub use registry::{fnv1a_32, Registration, TypeId, TypeRegistry};
pub use shape::Shape;
pub use value::{Complex, MapValue, RecordValue, SequenceValue, Value};

// Derive macro (for #[derive(tagser::Record)])
pub use tagser_codegen::Record;

/// Items used by `#[derive(Record)]` expansions.
#[doc(hidden)]
pub mod __private {
    pub use crate::convert::record_fields;
    pub use std::sync::{Arc, OnceLock};
}
