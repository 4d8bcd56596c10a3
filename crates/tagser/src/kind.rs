// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Kind tag protocol.
//!
//! Every encoded value starts with one byte holding its [`Kind`] ordinal.
//! The ordinals below are the wire contract: they are frozen and must never
//! be renumbered, only appended to.

use std::fmt;

/// Shape tag written as the first byte of every encoded value.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    /// Reserved, never emitted.
    Invalid = 0,
    Bool = 1,
    /// Native-width signed integer, always 8 bytes on the wire.
    Int = 2,
    Int8 = 3,
    Int16 = 4,
    Int32 = 5,
    Int64 = 6,
    /// Native-width unsigned integer, always 8 bytes on the wire.
    Uint = 7,
    Uint8 = 8,
    Uint16 = 9,
    Uint32 = 10,
    Uint64 = 11,
    /// Pointer-sized unsigned integer, always 8 bytes on the wire.
    Uintptr = 12,
    Float32 = 13,
    Float64 = 14,
    Complex64 = 15,
    Complex128 = 16,
    Array = 17,
    /// Concurrency channel (rejected).
    Chan = 18,
    /// Function value (rejected).
    Func = 19,
    /// Untyped slot. Never emitted: an empty slot encodes as a null pointer.
    Interface = 20,
    Map = 21,
    Pointer = 22,
    Slice = 23,
    String = 24,
    /// Record, including the wall-clock special case.
    Struct = 25,
    /// Raw memory address (rejected).
    UnsafePointer = 26,
}

impl Kind {
    /// Map a wire tag back to a kind.
    pub const fn from_u8(tag: u8) -> Option<Self> {
        Some(match tag {
            0 => Self::Invalid,
            1 => Self::Bool,
            2 => Self::Int,
            3 => Self::Int8,
            4 => Self::Int16,
            5 => Self::Int32,
            6 => Self::Int64,
            7 => Self::Uint,
            8 => Self::Uint8,
            9 => Self::Uint16,
            10 => Self::Uint32,
            11 => Self::Uint64,
            12 => Self::Uintptr,
            13 => Self::Float32,
            14 => Self::Float64,
            15 => Self::Complex64,
            16 => Self::Complex128,
            17 => Self::Array,
            18 => Self::Chan,
            19 => Self::Func,
            20 => Self::Interface,
            21 => Self::Map,
            22 => Self::Pointer,
            23 => Self::Slice,
            24 => Self::String,
            25 => Self::Struct,
            26 => Self::UnsafePointer,
            _ => return None,
        })
    }

    /// Wire tag of this kind.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Human-readable name, also used in truncation errors.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint => "uint",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Uintptr => "uintptr",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Complex64 => "complex64",
            Self::Complex128 => "complex128",
            Self::Array => "array",
            Self::Chan => "chan",
            Self::Func => "func",
            Self::Interface => "interface",
            Self::Map => "map",
            Self::Pointer => "pointer",
            Self::Slice => "slice",
            Self::String => "string",
            Self::Struct => "struct",
            Self::UnsafePointer => "unsafe pointer",
        }
    }

    /// Kinds that can never be encoded or decoded.
    pub const fn is_rejected(self) -> bool {
        matches!(
            self,
            Self::Invalid | Self::Chan | Self::Func | Self::Interface | Self::UnsafePointer
        )
    }

    /// Payload size for fixed-width kinds, `None` for everything else.
    pub const fn fixed_size(self) -> Option<usize> {
        match self {
            Self::Bool | Self::Int8 | Self::Uint8 => Some(1),
            Self::Int16 | Self::Uint16 => Some(2),
            Self::Int32 | Self::Uint32 | Self::Float32 => Some(4),
            Self::Int
            | Self::Int64
            | Self::Uint
            | Self::Uint64
            | Self::Uintptr
            | Self::Float64
            | Self::Complex64 => Some(8),
            Self::Complex128 => Some(16),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Describe a raw tag for error messages, including tags outside the table.
pub(crate) fn describe_tag(tag: &u8) -> String {
    match Kind::from_u8(*tag) {
        Some(kind) => format!("{} ({})", kind.name(), tag),
        None => format!("unknown kind {}", tag),
    }
}
