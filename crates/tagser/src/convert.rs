// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bridge between Rust types and [`Value`].
//!
//! [`Encode`] gives a type its [`Shape`] and turns an instance into a
//! [`Value`]; [`Decode`] goes the other way. Record types get both (plus
//! [`Record`]) from `#[derive(Record)]`.

use crate::descriptor::TypeDescriptor;
use crate::error::{Error, Result};
use crate::kind::Kind;
use crate::shape::Shape;
use crate::value::{Complex, MapValue, SequenceValue, Value};
use chrono::{DateTime, FixedOffset, Utc};
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::sync::mpsc::{Receiver, Sender, SyncSender};

/// Types that can be turned into a [`Value`].
pub trait Encode {
    /// Shape shared by every value of this type.
    fn shape() -> Shape;

    fn to_value(&self) -> Value;
}

/// Types that can be rebuilt from a [`Value`].
pub trait Decode: Sized {
    fn from_value(value: Value) -> Result<Self>;
}

/// Named-field struct registered with the codec.
///
/// Implemented by `#[derive(Record)]`.
pub trait Record: Encode + Decode {
    /// Canonical name, hashed into the wire id.
    const TYPE_NAME: &'static str;

    /// Field layout in declaration order.
    fn descriptor() -> TypeDescriptor;
}

/// Sample values accepted by [`crate::TypeRegistry::register_sample`].
///
/// Implemented by `#[derive(Record)]` for the record itself, and here for
/// `Box<T>`, which registers `T` through one pointer indirection.
pub trait RegisterSample {
    /// Register through the pointer marker.
    const POINTER: bool;

    fn descriptor() -> TypeDescriptor;
}

impl<T: Record> RegisterSample for Box<T> {
    const POINTER: bool = true;

    fn descriptor() -> TypeDescriptor {
        T::descriptor()
    }
}

/// Pointer-sized unsigned integer, encoded with the `uintptr` kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Uintptr(pub u64);

fn mismatch_for<T: Encode>(found: &Value) -> Error {
    Error::mismatch(T::shape().to_string(), found.shape().to_string())
}

macro_rules! impl_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Encode for $ty {
                fn shape() -> Shape {
                    Shape::$variant
                }

                fn to_value(&self) -> Value {
                    Value::$variant(*self)
                }
            }

            impl Decode for $ty {
                fn from_value(value: Value) -> Result<Self> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(mismatch_for::<Self>(&other)),
                    }
                }
            }
        )*
    };
}

impl_primitive!(
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
);

impl Encode for isize {
    fn shape() -> Shape {
        Shape::Int
    }

    fn to_value(&self) -> Value {
        Value::Int(*self as i64)
    }
}

impl Decode for isize {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Int(v) => isize::try_from(v)
                .map_err(|_| Error::mismatch("int", format!("out-of-range int {}", v))),
            other => Err(mismatch_for::<Self>(&other)),
        }
    }
}

impl Encode for usize {
    fn shape() -> Shape {
        Shape::Uint
    }

    fn to_value(&self) -> Value {
        Value::Uint(*self as u64)
    }
}

impl Decode for usize {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Uint(v) => usize::try_from(v)
                .map_err(|_| Error::mismatch("uint", format!("out-of-range uint {}", v))),
            other => Err(mismatch_for::<Self>(&other)),
        }
    }
}

impl Encode for Uintptr {
    fn shape() -> Shape {
        Shape::Uintptr
    }

    fn to_value(&self) -> Value {
        Value::Uintptr(self.0)
    }
}

impl Decode for Uintptr {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Uintptr(v) => Ok(Uintptr(v)),
            other => Err(mismatch_for::<Self>(&other)),
        }
    }
}

impl Encode for String {
    fn shape() -> Shape {
        Shape::String
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl Decode for String {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(v) => Ok(v),
            other => Err(mismatch_for::<Self>(&other)),
        }
    }
}

impl Encode for str {
    fn shape() -> Shape {
        Shape::String
    }

    fn to_value(&self) -> Value {
        Value::String(self.to_owned())
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn shape() -> Shape {
        T::shape()
    }

    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

// Option is the nullable pointer.
impl<T: Encode> Encode for Option<T> {
    fn shape() -> Shape {
        Shape::pointer(T::shape())
    }

    fn to_value(&self) -> Value {
        match self {
            Some(inner) => Value::pointer(inner.to_value()),
            None => Value::NULL,
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Pointer(None) => Ok(None),
            Value::Pointer(Some(inner)) => T::from_value(*inner).map(Some),
            other => Err(Error::mismatch("pointer", other.shape().to_string())),
        }
    }
}

// Box only owns; `Option<Box<T>>` is a single nullable pointer on the wire.
impl<T: Encode> Encode for Box<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: Decode> Decode for Box<T> {
    fn from_value(value: Value) -> Result<Self> {
        T::from_value(value).map(Box::new)
    }
}

fn decode_items<T: Decode>(items: Vec<Value>) -> Result<Vec<T>> {
    items.into_iter().map(T::from_value).collect()
}

impl<T: Encode> Encode for Vec<T> {
    fn shape() -> Shape {
        Shape::slice(T::shape())
    }

    fn to_value(&self) -> Value {
        Value::Slice(SequenceValue::new(
            T::shape(),
            self.iter().map(Encode::to_value).collect(),
        ))
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Slice(seq) | Value::Array(seq) => decode_items(seq.items),
            other => Err(Error::mismatch("slice", other.shape().to_string())),
        }
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn shape() -> Shape {
        Shape::Array(Box::new(T::shape()), N)
    }

    fn to_value(&self) -> Value {
        Value::Array(SequenceValue::new(
            T::shape(),
            self.iter().map(Encode::to_value).collect(),
        ))
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(seq) => {
                let len = seq.len();
                decode_items::<T>(seq.items)?
                    .try_into()
                    .map_err(|_| Error::mismatch(format!("array of {}", N), format!("array of {}", len)))
            }
            other => Err(Error::mismatch("array", other.shape().to_string())),
        }
    }
}

impl<K: Encode, V: Encode, S> Encode for HashMap<K, V, S> {
    fn shape() -> Shape {
        Shape::map(K::shape(), V::shape())
    }

    fn to_value(&self) -> Value {
        encode_entries::<K, V, _>(self.iter())
    }
}

impl<K, V, S> Decode for HashMap<K, V, S>
where
    K: Decode + Eq + Hash,
    V: Decode,
    S: BuildHasher + Default,
{
    fn from_value(value: Value) -> Result<Self> {
        decode_entries(value)?.collect()
    }
}

impl<K: Encode, V: Encode> Encode for BTreeMap<K, V> {
    fn shape() -> Shape {
        Shape::map(K::shape(), V::shape())
    }

    fn to_value(&self) -> Value {
        encode_entries::<K, V, _>(self.iter())
    }
}

impl<K: Decode + Ord, V: Decode> Decode for BTreeMap<K, V> {
    fn from_value(value: Value) -> Result<Self> {
        decode_entries(value)?.collect()
    }
}

fn encode_entries<'a, K, V, I>(entries: I) -> Value
where
    K: Encode + 'a,
    V: Encode + 'a,
    I: ExactSizeIterator<Item = (&'a K, &'a V)>,
{
    let mut map = MapValue::with_capacity(K::shape(), V::shape(), entries.len());
    for (k, v) in entries {
        map.insert(k.to_value(), v.to_value());
    }
    Value::Map(map)
}

fn decode_entries<K: Decode, V: Decode>(
    value: Value,
) -> Result<impl Iterator<Item = Result<(K, V)>>> {
    match value {
        Value::Map(map) => Ok(map
            .into_entries()
            .into_iter()
            .map(|(k, v)| Ok((K::from_value(k)?, V::from_value(v)?)))),
        other => Err(Error::mismatch("map", other.shape().to_string())),
    }
}

impl Encode for DateTime<FixedOffset> {
    fn shape() -> Shape {
        Shape::Time
    }

    fn to_value(&self) -> Value {
        Value::Time(*self)
    }
}

impl Decode for DateTime<FixedOffset> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Time(t) => Ok(t),
            other => Err(mismatch_for::<Self>(&other)),
        }
    }
}

impl Encode for DateTime<Utc> {
    fn shape() -> Shape {
        Shape::Time
    }

    fn to_value(&self) -> Value {
        Value::Time(self.fixed_offset())
    }
}

impl Decode for DateTime<Utc> {
    fn from_value(value: Value) -> Result<Self> {
        DateTime::<FixedOffset>::from_value(value).map(|t| t.with_timezone(&Utc))
    }
}

// Untyped slot.
impl Encode for Value {
    fn shape() -> Shape {
        Shape::Any
    }

    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl Decode for Value {
    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

// Kinds that exist at runtime but never reach the wire.
macro_rules! impl_opaque {
    ($kind:ident => $($ty:ty),* $(,)?) => {
        $(
            impl<T> Encode for $ty {
                fn shape() -> Shape {
                    Shape::Opaque(Kind::$kind)
                }

                fn to_value(&self) -> Value {
                    Value::Opaque(Kind::$kind)
                }
            }
        )*
    };
}

impl_opaque!(Chan => Sender<T>, SyncSender<T>, Receiver<T>);

impl<T: ?Sized> Encode for *const T {
    fn shape() -> Shape {
        Shape::Opaque(Kind::UnsafePointer)
    }

    fn to_value(&self) -> Value {
        Value::Opaque(Kind::UnsafePointer)
    }
}

impl<T: ?Sized> Encode for *mut T {
    fn shape() -> Shape {
        Shape::Opaque(Kind::UnsafePointer)
    }

    fn to_value(&self) -> Value {
        Value::Opaque(Kind::UnsafePointer)
    }
}

macro_rules! impl_fn_pointer {
    ($(($($arg:ident),*)),* $(,)?) => {
        $(
            impl<R, $($arg),*> Encode for fn($($arg),*) -> R {
                fn shape() -> Shape {
                    Shape::Opaque(Kind::Func)
                }

                fn to_value(&self) -> Value {
                    Value::Opaque(Kind::Func)
                }
            }
        )*
    };
}

impl_fn_pointer!((), (A), (A, B), (A, B, C), (A, B, C, D));

/// Field values of a record named `type_name`, in declaration order.
///
/// Used by `#[derive(Record)]`.
#[doc(hidden)]
pub fn record_fields<const N: usize>(value: Value, type_name: &str) -> Result<[Value; N]> {
    let record = match value {
        Value::Record(record) if &*record.descriptor.name == type_name => record,
        other => return Err(Error::mismatch(type_name, other.shape().to_string())),
    };
    let found = record.fields.len();
    record
        .fields
        .try_into()
        .map_err(|_| Error::mismatch(format!("{} fields", N), format!("{} fields", found)))
}
