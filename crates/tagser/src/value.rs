// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic value types.

use crate::descriptor::TypeDescriptor;
use crate::kind::Kind;
use crate::shape::Shape;
use chrono::{DateTime, FixedOffset};
use std::collections::hash_map::{DefaultHasher, Entry};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Complex number stored as (real, imaginary).
#[derive(Debug, Clone, Copy, Default)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T> Complex<T> {
    pub const fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

impl PartialEq for Complex<f32> {
    fn eq(&self, other: &Self) -> bool {
        self.re.to_bits() == other.re.to_bits() && self.im.to_bits() == other.im.to_bits()
    }
}

impl PartialEq for Complex<f64> {
    fn eq(&self, other: &Self) -> bool {
        self.re.to_bits() == other.re.to_bits() && self.im.to_bits() == other.im.to_bits()
    }
}

impl Hash for Complex<f32> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.re.to_bits().hash(state);
        self.im.to_bits().hash(state);
    }
}

impl Hash for Complex<f64> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.re.to_bits().hash(state);
        self.im.to_bits().hash(state);
    }
}

/// Elements of an array or slice, with the element shape learned from the
/// zero-value marker.
#[derive(Debug, Clone)]
pub struct SequenceValue {
    pub element: Shape,
    pub items: Vec<Value>,
}

impl SequenceValue {
    pub fn new(element: Shape, items: Vec<Value>) -> Self {
        Self { element, items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl PartialEq for SequenceValue {
    fn eq(&self, other: &Self) -> bool {
        self.element.matches(&other.element) && self.items == other.items
    }
}

impl Hash for SequenceValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.items.hash(state);
    }
}

/// Map entries in insertion order. Keys are unique.
///
/// Entries are indexed by key, so `insert` and `get` are constant time on
/// average.
#[derive(Clone)]
pub struct MapValue {
    pub key: Shape,
    pub value: Shape,
    entries: Vec<(Value, Value)>,
    index: HashMap<Value, usize>,
}

impl MapValue {
    pub fn new(key: Shape, value: Shape) -> Self {
        Self::with_capacity(key, value, 0)
    }

    /// Empty map with room for `capacity` entries.
    pub fn with_capacity(key: Shape, value: Shape, capacity: usize) -> Self {
        Self {
            key,
            value,
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Insert an entry, replacing the value of an equal key.
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        match self.index.entry(key) {
            Entry::Occupied(slot) => {
                let position = *slot.get();
                Some(std::mem::replace(&mut self.entries[position].1, value))
            }
            Entry::Vacant(slot) => {
                let key = slot.key().clone();
                slot.insert(self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    pub fn entries(&self) -> &[(Value, Value)] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<(Value, Value)> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for MapValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapValue")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("entries", &self.entries)
            .finish()
    }
}

// Same key/value pairs, in any order.
impl PartialEq for MapValue {
    fn eq(&self, other: &Self) -> bool {
        self.key.matches(&other.key)
            && self.value.matches(&other.value)
            && self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|ov| ov == v))
    }
}

// Shapes compare as wildcards, so only the entries are hashed, and in an
// order-independent way.
impl Hash for MapValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let combined = self.entries.iter().fold(0u64, |acc, entry| {
            let mut hasher = DefaultHasher::new();
            entry.hash(&mut hasher);
            acc.wrapping_add(hasher.finish())
        });
        state.write_usize(self.len());
        state.write_u64(combined);
    }
}

/// Record instance: its descriptor plus one value per field.
#[derive(Debug, Clone)]
pub struct RecordValue {
    pub descriptor: Arc<TypeDescriptor>,
    pub fields: Vec<Value>,
}

impl RecordValue {
    pub fn new(descriptor: Arc<TypeDescriptor>, fields: Vec<Value>) -> Self {
        Self { descriptor, fields }
    }

    /// Canonical type name.
    pub fn type_name(&self) -> &str {
        &self.descriptor.name
    }

    /// Field value by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.descriptor
            .field_index(name)
            .and_then(|idx| self.fields.get(idx))
    }
}

impl PartialEq for RecordValue {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor.name == other.descriptor.name && self.fields == other.fields
    }
}

impl Hash for RecordValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.descriptor.name.hash(state);
        self.fields.hash(state);
    }
}

/// A dynamic value that can hold anything the codec can see.
///
/// Floating values compare by bit pattern, so a NaN equals itself and `Value`
/// is `Eq`.
#[derive(Debug, Clone)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint(u64),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Uintptr(u64),
    Float32(f32),
    Float64(f64),
    Complex64(Complex<f32>),
    Complex128(Complex<f64>),
    String(String),
    /// Pointer or optional; `None` is null.
    Pointer(Option<Box<Value>>),
    Array(SequenceValue),
    Slice(SequenceValue),
    Map(MapValue),
    Record(RecordValue),
    /// Wall-clock time, encoded through the `"time"` tag.
    Time(DateTime<FixedOffset>),
    /// Runtime value of a kind that cannot be serialized (channel, function,
    /// raw address).
    Opaque(Kind),
}

impl Value {
    /// Null pointer, also what an untyped empty slot decodes to.
    pub const NULL: Value = Value::Pointer(None);

    /// Wrap a value behind a non-null pointer.
    pub fn pointer(inner: Value) -> Self {
        Self::Pointer(Some(Box::new(inner)))
    }

    /// Check if value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Pointer(None))
    }

    /// Wire kind.
    pub fn kind(&self) -> Kind {
        match self {
            Self::Bool(_) => Kind::Bool,
            Self::Int(_) => Kind::Int,
            Self::Int8(_) => Kind::Int8,
            Self::Int16(_) => Kind::Int16,
            Self::Int32(_) => Kind::Int32,
            Self::Int64(_) => Kind::Int64,
            Self::Uint(_) => Kind::Uint,
            Self::Uint8(_) => Kind::Uint8,
            Self::Uint16(_) => Kind::Uint16,
            Self::Uint32(_) => Kind::Uint32,
            Self::Uint64(_) => Kind::Uint64,
            Self::Uintptr(_) => Kind::Uintptr,
            Self::Float32(_) => Kind::Float32,
            Self::Float64(_) => Kind::Float64,
            Self::Complex64(_) => Kind::Complex64,
            Self::Complex128(_) => Kind::Complex128,
            Self::String(_) => Kind::String,
            Self::Pointer(_) => Kind::Pointer,
            Self::Array(_) => Kind::Array,
            Self::Slice(_) => Kind::Slice,
            Self::Map(_) => Kind::Map,
            Self::Record(_) | Self::Time(_) => Kind::Struct,
            Self::Opaque(kind) => *kind,
        }
    }

    /// Shape of this value. A null pointer has shape `*any`.
    pub fn shape(&self) -> Shape {
        match self {
            Self::Bool(_) => Shape::Bool,
            Self::Int(_) => Shape::Int,
            Self::Int8(_) => Shape::Int8,
            Self::Int16(_) => Shape::Int16,
            Self::Int32(_) => Shape::Int32,
            Self::Int64(_) => Shape::Int64,
            Self::Uint(_) => Shape::Uint,
            Self::Uint8(_) => Shape::Uint8,
            Self::Uint16(_) => Shape::Uint16,
            Self::Uint32(_) => Shape::Uint32,
            Self::Uint64(_) => Shape::Uint64,
            Self::Uintptr(_) => Shape::Uintptr,
            Self::Float32(_) => Shape::Float32,
            Self::Float64(_) => Shape::Float64,
            Self::Complex64(_) => Shape::Complex64,
            Self::Complex128(_) => Shape::Complex128,
            Self::String(_) => Shape::String,
            Self::Pointer(None) => Shape::pointer(Shape::Any),
            Self::Pointer(Some(inner)) => Shape::pointer(inner.shape()),
            Self::Array(seq) => Shape::Array(Box::new(seq.element.clone()), seq.len()),
            Self::Slice(seq) => Shape::slice(seq.element.clone()),
            Self::Map(map) => Shape::map(map.key.clone(), map.value.clone()),
            Self::Record(rec) => Shape::Record(rec.descriptor.name.clone()),
            Self::Time(_) => Shape::Time,
            Self::Opaque(kind) => Shape::Opaque(*kind),
        }
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Any signed integer kind, widened.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) | Self::Int64(v) => Some(*v),
            Self::Int8(v) => Some(i64::from(*v)),
            Self::Int16(v) => Some(i64::from(*v)),
            Self::Int32(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    /// Any unsigned integer kind, widened.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Uint(v) | Self::Uint64(v) | Self::Uintptr(v) => Some(*v),
            Self::Uint8(v) => Some(u64::from(*v)),
            Self::Uint16(v) => Some(u64::from(*v)),
            Self::Uint32(v) => Some(u64::from(*v)),
            _ => None,
        }
    }

    /// Either floating kind, widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float32(v) => Some(f64::from(*v)),
            Self::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Referent of a non-null pointer.
    pub fn as_pointee(&self) -> Option<&Value> {
        match self {
            Self::Pointer(Some(inner)) => Some(inner),
            _ => None,
        }
    }

    /// Elements of an array or slice.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Array(seq) | Self::Slice(seq) => Some(&seq.items),
            _ => None,
        }
    }

    /// Try to get as map.
    pub fn as_map(&self) -> Option<&MapValue> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Try to get as record.
    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Self::Record(rec) => Some(rec),
            _ => None,
        }
    }

    /// Try to get as timestamp.
    pub fn as_time(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Self::Time(t) => Some(t),
            _ => None,
        }
    }

    /// Record field by name.
    pub fn get_field(&self, name: &str) -> Option<&Value> {
        self.as_record().and_then(|rec| rec.field(name))
    }

    /// Convert an integer or floating value to another numeric shape.
    ///
    /// Integer narrowing wraps, floats truncate toward zero. Returns `None`
    /// when either side is not numeric.
    pub fn convert_numeric(&self, target: &Shape) -> Option<Value> {
        let num = match self {
            Self::Int8(_) | Self::Int16(_) | Self::Int32(_) | Self::Int64(_) | Self::Int(_) => {
                Numeric::Int(i128::from(self.as_i64()?))
            }
            Self::Uint8(_)
            | Self::Uint16(_)
            | Self::Uint32(_)
            | Self::Uint64(_)
            | Self::Uint(_)
            | Self::Uintptr(_) => Numeric::Int(i128::from(self.as_u64()?)),
            Self::Float32(_) | Self::Float64(_) => Numeric::Float(self.as_f64()?),
            _ => return None,
        };
        let int = match num {
            Numeric::Int(v) => v,
            Numeric::Float(v) => v as i128,
        };
        let value = match target {
            Shape::Int => Self::Int(int as i64),
            Shape::Int8 => Self::Int8(int as i8),
            Shape::Int16 => Self::Int16(int as i16),
            Shape::Int32 => Self::Int32(int as i32),
            Shape::Int64 => Self::Int64(int as i64),
            Shape::Uint => Self::Uint(int as u64),
            Shape::Uint8 => Self::Uint8(int as u8),
            Shape::Uint16 => Self::Uint16(int as u16),
            Shape::Uint32 => Self::Uint32(int as u32),
            Shape::Uint64 => Self::Uint64(int as u64),
            Shape::Uintptr => Self::Uintptr(int as u64),
            Shape::Float32 => Self::Float32(match num {
                Numeric::Int(v) => v as f32,
                Numeric::Float(v) => v as f32,
            }),
            Shape::Float64 => Self::Float64(match num {
                Numeric::Int(v) => v as f64,
                Numeric::Float(v) => v,
            }),
            _ => return None,
        };
        Some(value)
    }
}

#[derive(Clone, Copy)]
enum Numeric {
    Int(i128),
    Float(f64),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) | (Self::Int64(a), Self::Int64(b)) => a == b,
            (Self::Int8(a), Self::Int8(b)) => a == b,
            (Self::Int16(a), Self::Int16(b)) => a == b,
            (Self::Int32(a), Self::Int32(b)) => a == b,
            (Self::Uint(a), Self::Uint(b))
            | (Self::Uint64(a), Self::Uint64(b))
            | (Self::Uintptr(a), Self::Uintptr(b)) => a == b,
            (Self::Uint8(a), Self::Uint8(b)) => a == b,
            (Self::Uint16(a), Self::Uint16(b)) => a == b,
            (Self::Uint32(a), Self::Uint32(b)) => a == b,
            (Self::Float32(a), Self::Float32(b)) => a.to_bits() == b.to_bits(),
            (Self::Float64(a), Self::Float64(b)) => a.to_bits() == b.to_bits(),
            (Self::Complex64(a), Self::Complex64(b)) => a == b,
            (Self::Complex128(a), Self::Complex128(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Pointer(a), Self::Pointer(b)) => a == b,
            (Self::Array(a), Self::Array(b)) | (Self::Slice(a), Self::Slice(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => a == b,
            (Self::Time(a), Self::Time(b)) => a == b,
            (Self::Opaque(a), Self::Opaque(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

// Consistent with the bitwise equality above.
impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Bool(v) => v.hash(state),
            Self::Int(v) | Self::Int64(v) => v.hash(state),
            Self::Int8(v) => v.hash(state),
            Self::Int16(v) => v.hash(state),
            Self::Int32(v) => v.hash(state),
            Self::Uint(v) | Self::Uint64(v) | Self::Uintptr(v) => v.hash(state),
            Self::Uint8(v) => v.hash(state),
            Self::Uint16(v) => v.hash(state),
            Self::Uint32(v) => v.hash(state),
            Self::Float32(v) => v.to_bits().hash(state),
            Self::Float64(v) => v.to_bits().hash(state),
            Self::Complex64(v) => v.hash(state),
            Self::Complex128(v) => v.hash(state),
            Self::String(v) => v.hash(state),
            Self::Pointer(v) => v.hash(state),
            Self::Array(v) | Self::Slice(v) => v.hash(state),
            Self::Map(v) => v.hash(state),
            Self::Record(v) => v.hash(state),
            Self::Time(v) => v.hash(state),
            Self::Opaque(v) => v.hash(state),
        }
    }
}

// Conversion traits
macro_rules! impl_from_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

impl_from_primitive!(
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    f32 => Float32,
    f64 => Float64,
    Complex<f32> => Complex64,
    Complex<f64> => Complex128,
    String => String,
    DateTime<FixedOffset> => Time,
);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::TypeDescriptorBuilder;

    #[test]
    fn test_primitive_values() {
        let v = Value::from(42u32);
        assert_eq!(v.as_u64(), Some(42));
        assert_eq!(v.as_i64(), None);
        assert_eq!(v.kind(), Kind::Uint32);

        let v = Value::from(std::f64::consts::PI);
        assert_eq!(v.as_f64(), Some(std::f64::consts::PI));

        let v = Value::from("hello");
        assert_eq!(v.as_str(), Some("hello"));
    }

    #[test]
    fn test_nan_equals_itself_by_bits() {
        let nan = f64::from_bits(0x7FF8_0000_0000_0001);
        assert_eq!(Value::Float64(nan), Value::Float64(nan));
        assert_ne!(
            Value::Float64(nan),
            Value::Float64(f64::from_bits(0x7FF8_0000_0000_0002))
        );
        assert_ne!(Value::Float32(0.0), Value::Float32(-0.0));
    }

    #[test]
    fn test_null_pointer() {
        assert!(Value::NULL.is_null());
        assert!(!Value::pointer(Value::Bool(true)).is_null());
        assert_eq!(Value::NULL.shape(), Shape::pointer(Shape::Any));
        assert_eq!(
            Value::pointer(Value::Int8(1)).shape(),
            Shape::pointer(Shape::Int8)
        );
    }

    #[test]
    fn test_map_insert_replaces() {
        let mut map = MapValue::new(Shape::String, Shape::Int);
        assert!(map.insert("a".into(), Value::Int(1)).is_none());
        assert_eq!(map.insert("a".into(), Value::Int(2)), Some(Value::Int(1)));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&"a".into()), Some(&Value::Int(2)));
    }

    #[test]
    fn test_map_equality_ignores_order() {
        let mut a = MapValue::new(Shape::String, Shape::Int);
        a.insert("x".into(), Value::Int(1));
        a.insert("y".into(), Value::Int(2));
        let mut b = MapValue::new(Shape::String, Shape::Int);
        b.insert("y".into(), Value::Int(2));
        b.insert("x".into(), Value::Int(1));
        assert_eq!(a, b);

        b.insert("x".into(), Value::Int(3));
        assert_ne!(a, b);
    }

    #[test]
    fn test_map_keys_hash_like_they_compare() {
        let mut inner_a = MapValue::new(Shape::String, Shape::Int);
        inner_a.insert("x".into(), Value::Int(1));
        inner_a.insert("y".into(), Value::Int(2));
        let mut inner_b = MapValue::new(Shape::Any, Shape::Int);
        inner_b.insert("y".into(), Value::Int(2));
        inner_b.insert("x".into(), Value::Int(1));

        let mut map = MapValue::new(Shape::Any, Shape::Int);
        map.insert(Value::Float64(f64::NAN), Value::Int(1));
        map.insert(Value::Float64(f64::NAN), Value::Int(2));
        map.insert(Value::Map(inner_a), Value::Int(3));
        map.insert(Value::Map(inner_b.clone()), Value::Int(4));
        map.insert(Value::Float64(0.0), Value::Int(5));
        map.insert(Value::Float64(-0.0), Value::Int(6));

        assert_eq!(map.len(), 4);
        assert_eq!(map.get(&Value::Float64(f64::NAN)), Some(&Value::Int(2)));
        assert_eq!(map.get(&Value::Map(inner_b)), Some(&Value::Int(4)));
        assert_eq!(map.get(&Value::Float64(0.0)), Some(&Value::Int(5)));
        assert_eq!(map.get(&Value::Float32(0.0)), None);
    }

    #[test]
    fn test_sequence_equality_tolerates_untyped_element() {
        let typed = SequenceValue::new(Shape::pointer(Shape::Int), vec![]);
        let untyped = SequenceValue::new(Shape::Any, vec![]);
        assert_eq!(Value::Slice(typed.clone()), Value::Slice(untyped));
        assert_ne!(
            Value::Slice(typed),
            Value::Slice(SequenceValue::new(Shape::String, vec![]))
        );
    }

    #[test]
    fn test_numeric_conversion_wraps() {
        assert_eq!(
            Value::Int64(300).convert_numeric(&Shape::Uint8),
            Some(Value::Uint8(44))
        );
        assert_eq!(
            Value::Int8(-1).convert_numeric(&Shape::Uint16),
            Some(Value::Uint16(0xFFFF))
        );
        assert_eq!(
            Value::Uint64(u64::MAX).convert_numeric(&Shape::Int64),
            Some(Value::Int64(-1))
        );
        assert_eq!(
            Value::Float64(-2.75).convert_numeric(&Shape::Int32),
            Some(Value::Int32(-2))
        );
        assert_eq!(
            Value::Int32(7).convert_numeric(&Shape::Float32),
            Some(Value::Float32(7.0))
        );
        assert_eq!(Value::Bool(true).convert_numeric(&Shape::Int), None);
        assert_eq!(Value::Int(1).convert_numeric(&Shape::String), None);
    }

    #[test]
    fn test_record_field_access() {
        let desc = Arc::new(
            TypeDescriptorBuilder::new("Point")
                .field("x", Shape::Int32)
                .field("y", Shape::Int32)
                .build(),
        );
        let rec = Value::Record(RecordValue::new(
            desc,
            vec![Value::Int32(10), Value::Int32(20)],
        ));
        assert_eq!(rec.get_field("y"), Some(&Value::Int32(20)));
        assert!(rec.get_field("z").is_none());
        assert_eq!(rec.shape(), Shape::Record("Point".into()));
    }
}
