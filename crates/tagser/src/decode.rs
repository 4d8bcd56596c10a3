// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Value decoder.
//!
//! Mirrors [`crate::encode`]. Container element shapes are inferred from the
//! zero-value markers; record layouts come from the registry.

use crate::config::CodecConfig;
use crate::descriptor::TypeDescriptor;
use crate::error::{Error, Result};
use crate::kind::Kind;
use crate::registry::{TypeId, TypeRegistry};
use crate::shape::Shape;
use crate::timefmt::{parse_rfc3339_nano, TIME_TAG};
use crate::value::{Complex, MapValue, RecordValue, SequenceValue, Value};
use std::sync::Arc;

/// Decode one value from the front of `bytes`, returning it with the
/// unconsumed suffix.
pub fn decode_one<'a>(
    bytes: &'a [u8],
    registry: &TypeRegistry,
    config: &CodecConfig,
) -> Result<(Value, &'a [u8])> {
    let mut decoder = Decoder {
        buffer: bytes,
        offset: 0,
        registry,
        config,
    };
    match decoder.decode() {
        Ok(value) => Ok((value, &bytes[decoder.offset..])),
        Err(e) => {
            log::trace!("[decode] failed at offset {}: {}", decoder.offset, e);
            Err(e)
        }
    }
}

/// Decode exactly one value spanning all of `bytes`.
pub fn decode_value(bytes: &[u8], registry: &TypeRegistry, config: &CodecConfig) -> Result<Value> {
    let (value, rest) = decode_one(bytes, registry, config)?;
    if !rest.is_empty() {
        return Err(Error::TrailingData {
            remaining: rest.len(),
        });
    }
    Ok(value)
}

/// Container whose children are still being read.
enum Frame {
    /// Non-null pointer waiting for its pointee.
    Pointer,
    /// Array or slice: the element marker, then `remaining` items.
    Sequence {
        kind: Kind,
        remaining: usize,
        marker_read: bool,
        seq: SequenceValue,
    },
    /// Map: key and value markers, then alternating keys and values.
    Map {
        remaining: usize,
        markers_read: u8,
        map: MapValue,
        key: Option<Value>,
    },
    /// `"time"` header read, text payload pending.
    Time,
    Record {
        descriptor: Arc<TypeDescriptor>,
        fields: Vec<Value>,
    },
}

enum Step {
    Done(Value),
    Open(Frame),
}

struct Decoder<'a> {
    buffer: &'a [u8],
    offset: usize,
    registry: &'a TypeRegistry,
    config: &'a CodecConfig,
}

impl<'a> Decoder<'a> {
    fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    fn read_bytes(&mut self, count: usize, what: &'static str) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(Error::truncated(what, count, self.remaining()));
        }
        let slice = &self.buffer[self.offset..self.offset + count];
        self.offset += count;
        Ok(slice)
    }

    fn read_array<const N: usize>(&mut self, what: &'static str) -> Result<[u8; N]> {
        let bytes = self.read_bytes(N, what)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    fn read_u8(&mut self, what: &'static str) -> Result<u8> {
        Ok(self.read_array::<1>(what)?[0])
    }

    /// Declared length, checked against the configured limit.
    fn read_len(&mut self, what: &'static str) -> Result<usize> {
        let declared = u64::from_le_bytes(self.read_array(what)?);
        if let Some(limit) = self.config.max_collection_len {
            if declared > limit as u64 {
                return Err(Error::LimitExceeded {
                    what,
                    declared,
                    limit,
                });
            }
        }
        // Anything that does not fit in usize cannot be backed by the input.
        usize::try_from(declared).map_err(|_| Error::truncated(what, usize::MAX, self.remaining()))
    }

    /// Decode one complete value.
    ///
    /// Open containers live on a heap stack instead of the call stack, so
    /// nesting is bounded only by `max_depth`.
    fn decode(&mut self) -> Result<Value> {
        let mut stack: Vec<Frame> = Vec::new();
        loop {
            let mut step = self.open(stack.len())?;
            loop {
                let value = match step {
                    Step::Open(frame) => {
                        stack.push(frame);
                        break;
                    }
                    Step::Done(value) => value,
                };
                let depth = stack.len();
                let Some(frame) = stack.last_mut() else {
                    return Ok(value);
                };
                match self.accept(frame, value, depth)? {
                    Some(done) => {
                        stack.pop();
                        step = Step::Done(done);
                    }
                    None => break,
                }
            }
        }
    }

    /// Read the tag and header of the value at `depth`.
    fn open(&mut self, depth: usize) -> Result<Step> {
        if depth > self.config.max_depth {
            return Err(Error::DepthLimitExceeded {
                limit: self.config.max_depth,
            });
        }

        let tag = self.read_u8("kind")?;
        let kind = match Kind::from_u8(tag) {
            Some(kind) if !kind.is_rejected() => kind,
            _ => return Err(Error::UnsupportedKind { tag }),
        };

        let step = match kind {
            Kind::Pointer => {
                if self.read_u8("pointer flag")? == 1 {
                    Step::Open(Frame::Pointer)
                } else {
                    Step::Done(Value::NULL)
                }
            }
            Kind::Array | Kind::Slice => {
                let what = if kind == Kind::Array {
                    "array length"
                } else {
                    "slice length"
                };
                let len = self.read_len(what)?;
                // Every element takes at least two bytes.
                let capacity = len.min(self.remaining() / 2);
                Step::Open(Frame::Sequence {
                    kind,
                    remaining: len,
                    marker_read: false,
                    seq: SequenceValue::new(Shape::Any, Vec::with_capacity(capacity)),
                })
            }
            Kind::Map => {
                let len = self.read_len("map length")?;
                let capacity = len.min(self.remaining() / 4);
                Step::Open(Frame::Map {
                    remaining: len,
                    markers_read: 0,
                    map: MapValue::with_capacity(Shape::Any, Shape::Any, capacity),
                    key: None,
                })
            }
            Kind::Struct => self.open_struct()?,
            Kind::String => Step::Done(Value::String(self.read_text()?)),
            _ => Step::Done(self.read_scalar(kind)?),
        };
        Ok(step)
    }

    fn read_scalar(&mut self, kind: Kind) -> Result<Value> {
        let what = kind.name();
        let value = match kind {
            Kind::Bool => Value::Bool(self.read_u8(what)? == 1),
            Kind::Int8 => Value::Int8(self.read_u8(what)? as i8),
            Kind::Uint8 => Value::Uint8(self.read_u8(what)?),
            Kind::Int16 => Value::Int16(i16::from_le_bytes(self.read_array(what)?)),
            Kind::Uint16 => Value::Uint16(u16::from_le_bytes(self.read_array(what)?)),
            Kind::Int32 => Value::Int32(i32::from_le_bytes(self.read_array(what)?)),
            Kind::Uint32 => Value::Uint32(u32::from_le_bytes(self.read_array(what)?)),
            Kind::Int => Value::Int(i64::from_le_bytes(self.read_array(what)?)),
            Kind::Int64 => Value::Int64(i64::from_le_bytes(self.read_array(what)?)),
            Kind::Uint => Value::Uint(u64::from_le_bytes(self.read_array(what)?)),
            Kind::Uint64 => Value::Uint64(u64::from_le_bytes(self.read_array(what)?)),
            Kind::Uintptr => Value::Uintptr(u64::from_le_bytes(self.read_array(what)?)),
            Kind::Float32 => Value::Float32(f32::from_bits(u32::from_le_bytes(self.read_array(what)?))),
            Kind::Float64 => Value::Float64(f64::from_bits(u64::from_le_bytes(self.read_array(what)?))),
            Kind::Complex64 => {
                let bytes: [u8; 8] = self.read_array(what)?;
                let (re, im) = bytes.split_at(4);
                let re = f32::from_bits(u32::from_le_bytes(to_array(re)));
                let im = f32::from_bits(u32::from_le_bytes(to_array(im)));
                Value::Complex64(Complex::new(re, im))
            }
            Kind::Complex128 => {
                let bytes: [u8; 16] = self.read_array(what)?;
                let (re, im) = bytes.split_at(8);
                let re = f64::from_bits(u64::from_le_bytes(to_array(re)));
                let im = f64::from_bits(u64::from_le_bytes(to_array(im)));
                Value::Complex128(Complex::new(re, im))
            }
            _ => return Err(Error::UnsupportedKind { tag: kind.as_u8() }),
        };
        Ok(value)
    }

    fn read_text(&mut self) -> Result<String> {
        let len = self.read_len("string length")?;
        let bytes = self.read_bytes(len, "string")?;
        Ok(std::str::from_utf8(bytes)?.to_owned())
    }

    fn open_struct(&mut self) -> Result<Step> {
        let header: [u8; 4] = self.read_array("struct type id")?;
        if &header == TIME_TAG {
            return Ok(Step::Open(Frame::Time));
        }

        let id = TypeId(u32::from_le_bytes(header));
        let descriptor = self
            .registry
            .resolve(id)
            .ok_or_else(|| Error::UnregisteredType(format!("id {}", id)))?;
        if descriptor.fields.is_empty() {
            return Ok(Step::Done(Value::Record(RecordValue::new(descriptor, Vec::new()))));
        }
        let fields = Vec::with_capacity(descriptor.len());
        Ok(Step::Open(Frame::Record { descriptor, fields }))
    }

    /// Hand a finished child to its container. Returns the container once
    /// its last child has arrived.
    fn accept(&self, frame: &mut Frame, child: Value, depth: usize) -> Result<Option<Value>> {
        match frame {
            Frame::Pointer => Ok(Some(Value::pointer(child))),
            Frame::Time => match child {
                Value::String(text) => Ok(Some(Value::Time(parse_rfc3339_nano(&text)?))),
                other => Err(Error::MalformedTimestamp(format!(
                    "expected string payload, found {}",
                    other.shape()
                ))),
            },
            Frame::Sequence {
                kind,
                remaining,
                marker_read,
                seq,
            } => {
                if *marker_read {
                    expect_shape(&seq.element, &child)?;
                    seq.items.push(child);
                    *remaining -= 1;
                } else {
                    seq.element = marker_shape(&child);
                    *marker_read = true;
                }
                if *remaining > 0 {
                    return Ok(None);
                }
                let seq = std::mem::replace(seq, SequenceValue::new(Shape::Any, Vec::new()));
                Ok(Some(if *kind == Kind::Array {
                    Value::Array(seq)
                } else {
                    Value::Slice(seq)
                }))
            }
            Frame::Map {
                remaining,
                markers_read,
                map,
                key,
            } => {
                match *markers_read {
                    0 => {
                        map.key = marker_shape(&child);
                        *markers_read = 1;
                        return Ok(None);
                    }
                    1 => {
                        map.value = marker_shape(&child);
                        *markers_read = 2;
                    }
                    _ => match key.take() {
                        None => {
                            expect_shape(&map.key, &child)?;
                            *key = Some(child);
                            return Ok(None);
                        }
                        Some(k) => {
                            expect_shape(&map.value, &child)?;
                            map.insert(k, child);
                            *remaining -= 1;
                        }
                    },
                }
                if *remaining > 0 {
                    return Ok(None);
                }
                let map = std::mem::replace(map, MapValue::new(Shape::Any, Shape::Any));
                Ok(Some(Value::Map(map)))
            }
            Frame::Record { descriptor, fields } => {
                let field = &descriptor.fields[fields.len()];
                let value = if child.is_null() {
                    let remaining = self.config.max_depth.saturating_sub(depth);
                    self.registry.zero_value_bounded(&field.shape, remaining)?
                } else {
                    coerce_field(child, &field.shape).map_err(|e| {
                        log::trace!(
                            "[decode] field '{}' of '{}': {}",
                            field.name,
                            descriptor.name,
                            e
                        );
                        e
                    })?
                };
                fields.push(value);
                if fields.len() < descriptor.len() {
                    return Ok(None);
                }
                Ok(Some(Value::Record(RecordValue::new(
                    Arc::clone(descriptor),
                    std::mem::take(fields),
                ))))
            }
        }
    }
}

fn to_array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    out
}

/// Element shape carried by a decoded zero-value marker. A null marker
/// leaves the shape open.
fn marker_shape(marker: &Value) -> Shape {
    if marker.is_null() {
        Shape::Any
    } else {
        marker.shape()
    }
}

fn expect_shape(expected: &Shape, value: &Value) -> Result<()> {
    let found = value.shape();
    if expected.matches(&found) {
        Ok(())
    } else {
        Err(Error::mismatch(expected.to_string(), found.to_string()))
    }
}

/// Fit a decoded value into a record field of shape `target`.
///
/// A number converts into any other numeric field shape. Anything else must
/// conform to the declared shape.
fn coerce_field(value: Value, target: &Shape) -> Result<Value> {
    let found = value.shape();
    if target.is_numeric() && found.is_numeric() && found != *target {
        return value
            .convert_numeric(target)
            .ok_or_else(|| Error::mismatch(target.to_string(), found.to_string()));
    }
    conform(value, target)
}

/// Check `value` against `target` and relabel its containers with the
/// declared element shapes.
///
/// Items of a container whose marker was null were only checked against
/// `any`; they are checked against the declared element shape here. The
/// walk follows `target`, so it goes no deeper than the declared shape.
fn conform(value: Value, target: &Shape) -> Result<Value> {
    let found = value.shape();
    if !target.matches(&found) {
        return Err(Error::mismatch(target.to_string(), found.to_string()));
    }
    Ok(match (value, target) {
        (Value::Pointer(Some(inner)), Shape::Pointer(pointee)) => {
            Value::pointer(conform(*inner, pointee)?)
        }
        (Value::Slice(seq), Shape::Slice(element)) => Value::Slice(conform_items(seq, element)?),
        (Value::Array(seq), Shape::Array(element, _)) => {
            Value::Array(conform_items(seq, element)?)
        }
        (Value::Map(map), Shape::Map(key, value)) => Value::Map(conform_entries(map, key, value)?),
        (value, _) => value,
    })
}

fn conform_items(seq: SequenceValue, element: &Shape) -> Result<SequenceValue> {
    if seq.element == *element {
        return Ok(seq);
    }
    let items = seq
        .items
        .into_iter()
        .map(|item| conform(item, element))
        .collect::<Result<Vec<_>>>()?;
    Ok(SequenceValue::new(element.clone(), items))
}

fn conform_entries(map: MapValue, key: &Shape, value: &Shape) -> Result<MapValue> {
    if map.key == *key && map.value == *value {
        return Ok(map);
    }
    let mut typed = MapValue::with_capacity(key.clone(), value.clone(), map.len());
    for (k, v) in map.into_entries() {
        typed.insert(conform(k, key)?, conform(v, value)?);
    }
    Ok(typed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::TypeDescriptorBuilder;

    fn decode(bytes: &[u8]) -> Result<Value> {
        decode_value(bytes, &TypeRegistry::new(), &CodecConfig::default())
    }

    #[test]
    fn test_primitives() {
        assert_eq!(decode(&[1, 1]).unwrap(), Value::Bool(true));
        assert_eq!(decode(&[3, 0xFF]).unwrap(), Value::Int8(-1));
        assert_eq!(decode(&[5, 42, 0, 0, 0]).unwrap(), Value::Int32(42));
        assert_eq!(decode(&[22, 0]).unwrap(), Value::NULL);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            decode(&[]),
            Err(Error::TruncatedInput { what: "kind", need: 1, have: 0 })
        ));
    }

    #[test]
    fn test_truncated_names_field() {
        assert!(matches!(
            decode(&[5, 42, 0, 0]),
            Err(Error::TruncatedInput { what: "int32", need: 4, have: 3 })
        ));
        assert!(matches!(
            decode(&[24, 3, 0, 0, 0, 0, 0, 0, 0, b'a']),
            Err(Error::TruncatedInput { what: "string", need: 3, have: 1 })
        ));
        assert!(matches!(
            decode(&[22]),
            Err(Error::TruncatedInput { what: "pointer flag", .. })
        ));
        assert!(matches!(
            decode(&[25, 1, 2]),
            Err(Error::TruncatedInput { what: "struct type id", .. })
        ));
    }

    #[test]
    fn test_trailing_data() {
        assert!(matches!(
            decode(&[1, 1, 0]),
            Err(Error::TrailingData { remaining: 1 })
        ));
    }

    #[test]
    fn test_decode_one_returns_rest() {
        let registry = TypeRegistry::new();
        let (value, rest) = decode_one(&[8, 9, 1, 0], &registry, &CodecConfig::default()).unwrap();
        assert_eq!(value, Value::Uint8(9));
        assert_eq!(rest, [1, 0]);
    }

    #[test]
    fn test_unsupported_tags() {
        for tag in [0u8, 18, 19, 20, 26, 27, 0xFF] {
            assert!(matches!(
                decode(&[tag]),
                Err(Error::UnsupportedKind { tag: t }) if t == tag
            ));
        }
    }

    #[test]
    fn test_invalid_utf8() {
        assert!(matches!(
            decode(&[24, 1, 0, 0, 0, 0, 0, 0, 0, 0xFF]),
            Err(Error::InvalidText(_))
        ));
    }

    #[test]
    fn test_huge_length_fails_without_allocating() {
        let mut bytes = vec![23];
        bytes.extend_from_slice(&u64::MAX.to_le_bytes());
        bytes.extend_from_slice(&[8, 0]);
        assert!(matches!(
            decode(&bytes),
            Err(Error::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_collection_limit() {
        let config = CodecConfig::builder().max_collection_len(2).build().unwrap();
        let bytes = [23, 3, 0, 0, 0, 0, 0, 0, 0, 8, 0, 8, 1, 8, 2, 8, 3];
        assert!(matches!(
            decode_value(&bytes, &TypeRegistry::new(), &config),
            Err(Error::LimitExceeded { what: "slice length", declared: 3, limit: 2 })
        ));
    }

    #[test]
    fn test_element_must_match_marker() {
        // []uint8 marker followed by a bool element.
        let bytes = [23, 1, 0, 0, 0, 0, 0, 0, 0, 8, 0, 1, 1];
        assert!(matches!(decode(&bytes), Err(Error::TypeMismatch { .. })));

        // Null marker accepts anything.
        let bytes = [23, 2, 0, 0, 0, 0, 0, 0, 0, 22, 0, 1, 1, 8, 7];
        let value = decode(&bytes).unwrap();
        assert_eq!(value.as_sequence().map(|s| s.len()), Some(2));
    }

    #[test]
    fn test_duplicate_map_key_overwrites() {
        let bytes = [
            21, 2, 0, 0, 0, 0, 0, 0, 0, // two entries
            8, 0, 1, 0, // uint8 -> bool markers
            8, 1, 1, 0, // 1 -> false
            8, 1, 1, 1, // 1 -> true
        ];
        let value = decode(&bytes).unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&Value::Uint8(1)), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_time_payload_must_be_text() {
        let mut bytes = vec![25];
        bytes.extend_from_slice(b"time");
        bytes.extend_from_slice(&[1, 1]);
        assert!(matches!(decode(&bytes), Err(Error::MalformedTimestamp(_))));

        let mut bytes = vec![25];
        bytes.extend_from_slice(b"time");
        bytes.push(18);
        assert!(matches!(decode(&bytes), Err(Error::UnsupportedKind { tag: 18 })));
    }

    #[test]
    fn test_unknown_record_id() {
        assert!(matches!(
            decode(&[25, 1, 2, 3, 4]),
            Err(Error::UnregisteredType(_))
        ));
    }

    #[test]
    fn test_record_field_conversion() {
        let registry = TypeRegistry::new();
        let desc = TypeDescriptorBuilder::new("Reading")
            .field("level", Shape::Uint8)
            .field("label", Shape::String)
            .field("next", Shape::pointer(Shape::Int))
            .build();
        let id = registry.register_descriptor(desc).id();

        let mut bytes = vec![25];
        bytes.extend_from_slice(&id.to_le_bytes());
        bytes.extend_from_slice(&[4, 0x2C, 0x01]); // int16 300
        bytes.extend_from_slice(&[22, 0]); // null keeps ""
        bytes.extend_from_slice(&[22, 0]);

        let value = decode_value(&bytes, &registry, &CodecConfig::default()).unwrap();
        assert_eq!(value.get_field("level"), Some(&Value::Uint8(44)));
        assert_eq!(value.get_field("label"), Some(&Value::String(String::new())));
        assert!(value.get_field("next").is_some_and(Value::is_null));

        // Bool into a uint8 field does not convert.
        let mut bytes = vec![25];
        bytes.extend_from_slice(&id.to_le_bytes());
        bytes.extend_from_slice(&[1, 1, 22, 0, 22, 0]);
        assert!(matches!(
            decode_value(&bytes, &registry, &CodecConfig::default()),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_untyped_items_checked_against_field_shape() {
        let registry = TypeRegistry::new();
        let desc = TypeDescriptorBuilder::new("p::R")
            .field("v", Shape::slice(Shape::pointer(Shape::Int32)))
            .build();
        let id = registry.register_descriptor(desc).id();
        let header = |bytes: &mut Vec<u8>| {
            bytes.push(25);
            bytes.extend_from_slice(&id.to_le_bytes());
            bytes.extend_from_slice(&[23, 1, 0, 0, 0, 0, 0, 0, 0, 22, 0]);
        };

        // Null marker, then a string where *int32 is declared.
        let mut bytes = Vec::new();
        header(&mut bytes);
        bytes.extend_from_slice(&[24, 1, 0, 0, 0, 0, 0, 0, 0, b'x']);
        assert!(matches!(
            decode_value(&bytes, &registry, &CodecConfig::default()),
            Err(Error::TypeMismatch { expected, found }) if expected == "*int32" && found == "string"
        ));

        // Pointer to the wrong scalar.
        let mut bytes = Vec::new();
        header(&mut bytes);
        bytes.extend_from_slice(&[22, 1, 1, 1]);
        assert!(matches!(
            decode_value(&bytes, &registry, &CodecConfig::default()),
            Err(Error::TypeMismatch { .. })
        ));

        // Matching items take the declared element shape.
        let mut bytes = Vec::new();
        header(&mut bytes);
        bytes.extend_from_slice(&[22, 1, 5, 7, 0, 0, 0]);
        let value = decode_value(&bytes, &registry, &CodecConfig::default()).unwrap();
        let field = value.get_field("v").unwrap();
        assert_eq!(field.shape(), Shape::slice(Shape::pointer(Shape::Int32)));
        assert_eq!(field.as_sequence(), Some(&[Value::pointer(Value::Int32(7))][..]));
    }

    #[test]
    fn test_untyped_map_entries_checked_against_field_shape() {
        let registry = TypeRegistry::new();
        let desc = TypeDescriptorBuilder::new("p::M")
            .field("m", Shape::map(Shape::String, Shape::pointer(Shape::Uint8)))
            .build();
        let id = registry.register_descriptor(desc).id();

        let mut bytes = vec![25];
        bytes.extend_from_slice(&id.to_le_bytes());
        bytes.extend_from_slice(&[21, 1, 0, 0, 0, 0, 0, 0, 0]);
        bytes.extend_from_slice(&[24, 0, 0, 0, 0, 0, 0, 0, 0, 22, 0]); // "" key, null value marker
        bytes.extend_from_slice(&[24, 1, 0, 0, 0, 0, 0, 0, 0, b'k']);
        bytes.extend_from_slice(&[1, 1]); // bool where *uint8 is declared
        assert!(matches!(
            decode_value(&bytes, &registry, &CodecConfig::default()),
            Err(Error::TypeMismatch { .. })
        ));

        let last = bytes.len() - 2;
        bytes.truncate(last);
        bytes.extend_from_slice(&[22, 1, 8, 9]);
        let value = decode_value(&bytes, &registry, &CodecConfig::default()).unwrap();
        let map = value.get_field("m").and_then(Value::as_map).unwrap();
        assert_eq!(map.value, Shape::pointer(Shape::Uint8));
        assert_eq!(map.get(&Value::from("k")), Some(&Value::pointer(Value::Uint8(9))));
    }

    #[test]
    fn test_depth_limit() {
        let config = CodecConfig::builder().max_depth(2).build().unwrap();
        let registry = TypeRegistry::new();
        assert!(decode_value(&[22, 1, 22, 1, 1, 1], &registry, &config).is_ok());
        assert!(matches!(
            decode_value(&[22, 1, 22, 1, 22, 1, 1, 1], &registry, &config),
            Err(Error::DepthLimitExceeded { limit: 2 })
        ));
    }
}
