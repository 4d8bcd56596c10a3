// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type-level shapes.
//!
//! A [`Shape`] describes the type of a value without holding one. Containers
//! need it to emit (and, when decoding, to infer) the zero-value type marker
//! written before their elements. Records are referred to by canonical name,
//! so a recursive record has a finite shape.

use crate::kind::Kind;
use std::fmt;
use std::sync::Arc;

/// Type description mirroring [`crate::Value`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Shape {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    /// Pointer or optional referent.
    Pointer(Box<Shape>),
    /// Fixed-length array.
    Array(Box<Shape>, usize),
    /// Dynamic sequence.
    Slice(Box<Shape>),
    /// Associative map (key, value).
    Map(Box<Shape>, Box<Shape>),
    /// Registered record, by canonical name.
    Record(Arc<str>),
    /// Wall-clock timestamp.
    Time,
    /// Untyped slot: holds any value, zero value is null.
    Any,
    /// Shape of a kind that cannot be serialized.
    Opaque(Kind),
}

impl Shape {
    /// Wire kind of values of this shape.
    pub fn kind(&self) -> Kind {
        match self {
            Self::Bool => Kind::Bool,
            Self::Int => Kind::Int,
            Self::Int8 => Kind::Int8,
            Self::Int16 => Kind::Int16,
            Self::Int32 => Kind::Int32,
            Self::Int64 => Kind::Int64,
            Self::Uint => Kind::Uint,
            Self::Uint8 => Kind::Uint8,
            Self::Uint16 => Kind::Uint16,
            Self::Uint32 => Kind::Uint32,
            Self::Uint64 => Kind::Uint64,
            Self::Uintptr => Kind::Uintptr,
            Self::Float32 => Kind::Float32,
            Self::Float64 => Kind::Float64,
            Self::Complex64 => Kind::Complex64,
            Self::Complex128 => Kind::Complex128,
            Self::String => Kind::String,
            Self::Pointer(_) => Kind::Pointer,
            Self::Array(..) => Kind::Array,
            Self::Slice(_) => Kind::Slice,
            Self::Map(..) => Kind::Map,
            Self::Record(_) | Self::Time => Kind::Struct,
            Self::Any => Kind::Interface,
            Self::Opaque(kind) => *kind,
        }
    }

    /// Structural compatibility where [`Shape::Any`] matches everything.
    ///
    /// Symmetric: `a.matches(b) == b.matches(a)`.
    pub fn matches(&self, other: &Shape) -> bool {
        match (self, other) {
            (Self::Any, _) | (_, Self::Any) => true,
            (Self::Pointer(a), Self::Pointer(b)) | (Self::Slice(a), Self::Slice(b)) => a.matches(b),
            (Self::Array(a, n), Self::Array(b, m)) => n == m && a.matches(b),
            (Self::Map(ka, va), Self::Map(kb, vb)) => ka.matches(kb) && va.matches(vb),
            (a, b) => a == b,
        }
    }

    /// Integer and floating shapes, the ones that convert into each other.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Int
                | Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::Uint
                | Self::Uint8
                | Self::Uint16
                | Self::Uint32
                | Self::Uint64
                | Self::Uintptr
                | Self::Float32
                | Self::Float64
        )
    }

    /// Shorthand for `Shape::Pointer(Box::new(inner))`.
    pub fn pointer(inner: Shape) -> Self {
        Self::Pointer(Box::new(inner))
    }

    /// Shorthand for `Shape::Slice(Box::new(element))`.
    pub fn slice(element: Shape) -> Self {
        Self::Slice(Box::new(element))
    }

    /// Shorthand for `Shape::Map(Box::new(key), Box::new(value))`.
    pub fn map(key: Shape, value: Shape) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pointer(inner) => write!(f, "*{}", inner),
            Self::Array(elem, len) => write!(f, "[{}]{}", len, elem),
            Self::Slice(elem) => write!(f, "[]{}", elem),
            Self::Map(key, value) => write!(f, "map[{}]{}", key, value),
            Self::Record(name) => f.write_str(name),
            Self::Time => f.write_str("time"),
            Self::Any => f.write_str("any"),
            other => f.write_str(other.kind().name()),
        }
    }
}
