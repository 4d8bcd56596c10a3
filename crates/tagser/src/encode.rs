// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Value encoder.
//!
//! Every value is written as its kind tag followed by a kind-specific
//! payload. Integers are little-endian, floats are written as their raw bit
//! patterns. Containers write the zero value of their element shape before
//! the elements, so the decoder can rebuild the element type from the bytes
//! alone.

use crate::config::CodecConfig;
use crate::error::{Error, Result};
use crate::kind::Kind;
use crate::registry::TypeRegistry;
use crate::shape::Shape;
use crate::timefmt::{format_rfc3339_nano, TIME_TAG};
use crate::value::{RecordValue, Value};

/// Encode `value` into a fresh buffer.
pub fn encode_value(value: &Value, registry: &TypeRegistry, config: &CodecConfig) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode_into(value, registry, config, &mut out)?;
    Ok(out)
}

/// Append the encoding of `value` to `out`.
///
/// On error `out` is left as it was before the call.
pub fn encode_into(
    value: &Value,
    registry: &TypeRegistry,
    config: &CodecConfig,
    out: &mut Vec<u8>,
) -> Result<()> {
    let start = out.len();
    let mut encoder = Encoder {
        buffer: out,
        registry,
        config,
    };
    if let Err(e) = encoder.encode(value, 0) {
        log::trace!("[encode] failed after {} bytes: {}", encoder.buffer.len() - start, e);
        out.truncate(start);
        return Err(e);
    }
    Ok(())
}

struct Encoder<'a> {
    buffer: &'a mut Vec<u8>,
    registry: &'a TypeRegistry,
    config: &'a CodecConfig,
}

/// Value waiting to be written, with the shape its container declares.
type Pending<'v> = (&'v Value, usize, Option<&'v Shape>);

impl Encoder<'_> {
    fn put_tag(&mut self, kind: Kind) {
        self.buffer.push(kind.as_u8());
    }

    fn put_len(&mut self, len: usize) {
        self.buffer.extend_from_slice(&(len as u64).to_le_bytes());
    }

    fn put_text(&mut self, text: &str) {
        self.put_len(text.len());
        self.buffer.extend_from_slice(text.as_bytes());
    }

    /// Write `root` and everything below it, depth first.
    ///
    /// Nesting is tracked on a heap work list, so deep values cost no native
    /// stack. Only marker generation recurses, and markers nest as deep as
    /// the declared shapes, not the data.
    fn encode(&mut self, root: &Value, depth: usize) -> Result<()> {
        let mut pending: Vec<Pending<'_>> = vec![(root, depth, None)];
        while let Some((value, depth, expected)) = pending.pop() {
            if depth > self.config.max_depth {
                return Err(Error::DepthLimitExceeded {
                    limit: self.config.max_depth,
                });
            }
            if let Some(expected) = expected {
                check_shape(expected, value)?;
            }
            self.encode_head(value, depth, &mut pending)?;
        }
        Ok(())
    }

    /// Write the tag and everything up to the first child, queueing the
    /// children in wire order.
    fn encode_head<'v>(
        &mut self,
        value: &'v Value,
        depth: usize,
        pending: &mut Vec<Pending<'v>>,
    ) -> Result<()> {
        let kind = value.kind();
        if kind.is_rejected() {
            return Err(Error::UnsupportedKind { tag: kind.as_u8() });
        }
        self.put_tag(kind);

        match value {
            Value::Bool(v) => self.buffer.push(u8::from(*v)),
            Value::Int8(v) => self.buffer.push(*v as u8),
            Value::Uint8(v) => self.buffer.push(*v),
            Value::Int16(v) => self.buffer.extend_from_slice(&v.to_le_bytes()),
            Value::Uint16(v) => self.buffer.extend_from_slice(&v.to_le_bytes()),
            Value::Int32(v) => self.buffer.extend_from_slice(&v.to_le_bytes()),
            Value::Uint32(v) => self.buffer.extend_from_slice(&v.to_le_bytes()),
            Value::Int(v) | Value::Int64(v) => self.buffer.extend_from_slice(&v.to_le_bytes()),
            Value::Uint(v) | Value::Uint64(v) | Value::Uintptr(v) => {
                self.buffer.extend_from_slice(&v.to_le_bytes())
            }
            Value::Float32(v) => self.buffer.extend_from_slice(&v.to_bits().to_le_bytes()),
            Value::Float64(v) => self.buffer.extend_from_slice(&v.to_bits().to_le_bytes()),
            Value::Complex64(c) => {
                self.buffer.extend_from_slice(&c.re.to_bits().to_le_bytes());
                self.buffer.extend_from_slice(&c.im.to_bits().to_le_bytes());
            }
            Value::Complex128(c) => {
                self.buffer.extend_from_slice(&c.re.to_bits().to_le_bytes());
                self.buffer.extend_from_slice(&c.im.to_bits().to_le_bytes());
            }
            Value::String(s) => self.put_text(s),
            Value::Pointer(None) => self.buffer.push(0),
            Value::Pointer(Some(inner)) => {
                self.buffer.push(1);
                pending.push((&**inner, depth + 1, None));
            }
            Value::Array(seq) | Value::Slice(seq) => {
                self.put_len(seq.items.len());
                self.encode_marker(&seq.element, depth + 1)?;
                for item in seq.items.iter().rev() {
                    pending.push((item, depth + 1, Some(&seq.element)));
                }
            }
            Value::Map(map) => {
                self.put_len(map.len());
                self.encode_marker(&map.key, depth + 1)?;
                self.encode_marker(&map.value, depth + 1)?;
                for (key, item) in map.entries().iter().rev() {
                    pending.push((item, depth + 1, Some(&map.value)));
                    pending.push((key, depth + 1, Some(&map.key)));
                }
            }
            Value::Record(rec) => self.encode_record_head(rec, depth, pending)?,
            Value::Time(time) => {
                self.buffer.extend_from_slice(TIME_TAG);
                let text = format_rfc3339_nano(time)?;
                self.put_tag(Kind::String);
                self.put_text(&text);
            }
            Value::Opaque(_) => {
                return Err(Error::UnsupportedKind { tag: kind.as_u8() });
            }
        }
        Ok(())
    }

    /// Zero value of `shape`, written as a type marker.
    fn encode_marker(&mut self, shape: &Shape, depth: usize) -> Result<()> {
        let remaining = self.config.max_depth.saturating_sub(depth);
        let zero = self.registry.zero_value_bounded(shape, remaining)?;
        self.encode(&zero, depth)
    }

    fn encode_record_head<'v>(
        &mut self,
        rec: &'v RecordValue,
        depth: usize,
        pending: &mut Vec<Pending<'v>>,
    ) -> Result<()> {
        let descriptor = &rec.descriptor;
        let id = self
            .registry
            .id_of(&descriptor.name)
            .ok_or_else(|| Error::UnregisteredType(descriptor.name.to_string()))?;
        if rec.fields.len() != descriptor.len() {
            return Err(Error::mismatch(
                format!("{} fields of {}", descriptor.len(), descriptor.name),
                format!("{} values", rec.fields.len()),
            ));
        }

        self.buffer.extend_from_slice(&id.to_le_bytes());
        for (field, value) in descriptor.fields.iter().zip(&rec.fields).rev() {
            pending.push((value, depth + 1, Some(&field.shape)));
        }
        Ok(())
    }
}

fn check_shape(expected: &Shape, value: &Value) -> Result<()> {
    let found = value.shape();
    if expected.matches(&found) {
        Ok(())
    } else {
        Err(Error::mismatch(expected.to_string(), found.to_string()))
    }
}
