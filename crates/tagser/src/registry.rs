// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type registry: record type id <-> descriptor.
//!
//! Records are identified on the wire by the 32-bit FNV-1a hash of their
//! canonical name. The registry only grows; a type registered once stays
//! registered for the lifetime of the registry.

use crate::convert::{RegisterSample, Record};
use crate::descriptor::TypeDescriptor;
use crate::error::{Error, Result};
use crate::shape::Shape;
use crate::timefmt::zero_time;
use crate::value::{MapValue, RecordValue, SequenceValue, Value};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Default nesting bound used when building zero values outside a codec.
const ZERO_VALUE_DEPTH: usize = 256;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Compute the 32-bit FNV-1a hash of `bytes`.
pub const fn fnv1a_32(bytes: &[u8]) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// Wire identifier of a registered record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    /// Id derived from a canonical name.
    pub const fn of_name(name: &str) -> Self {
        Self(fnv1a_32(name.as_bytes()))
    }

    /// Little-endian wire bytes.
    pub const fn to_le_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Outcome of a registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// Type newly registered under `id`.
    Registered(TypeId),
    /// Same type was already registered under `id`; nothing changed.
    AlreadyRegistered(TypeId),
    /// Another type already owns `id`. The earlier registration is kept and
    /// this type stays unregistered.
    Collision { id: TypeId, existing: String },
}

impl Registration {
    /// Id the type hashed to.
    pub fn id(&self) -> TypeId {
        match self {
            Self::Registered(id) | Self::AlreadyRegistered(id) => *id,
            Self::Collision { id, .. } => *id,
        }
    }

    /// `true` unless the registration lost an id collision.
    pub fn is_usable(&self) -> bool {
        !matches!(self, Self::Collision { .. })
    }
}

#[derive(Default)]
struct Tables {
    by_id: HashMap<TypeId, Arc<TypeDescriptor>>,
    by_name: HashMap<Arc<str>, TypeId>,
}

/// Bidirectional map between record type ids and descriptors.
///
/// Shared between encoder and decoder through `Arc`; registration may run
/// concurrently with encode and decode.
#[derive(Default)]
pub struct TypeRegistry {
    tables: RwLock<Tables>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a record type.
    pub fn register<T: Record>(&self) -> Registration {
        self.register_descriptor(T::descriptor())
    }

    /// Register a record type through one pointer indirection.
    ///
    /// The wire id is derived from the name prefixed with `*`, so it differs
    /// from the id [`TypeRegistry::register`] would assign.
    pub fn register_pointer<T: Record>(&self) -> Registration {
        self.register_pointer_descriptor(T::descriptor())
    }

    /// Register the type of `sample`. A boxed sample registers its referent
    /// through the pointer marker.
    pub fn register_sample<S: RegisterSample>(&self, _sample: &S) -> Registration {
        if S::POINTER {
            self.register_pointer_descriptor(S::descriptor())
        } else {
            self.register_descriptor(S::descriptor())
        }
    }

    /// Register a runtime-built descriptor.
    pub fn register_descriptor(&self, descriptor: TypeDescriptor) -> Registration {
        let id = TypeId::of_name(&descriptor.name);
        self.insert(id, descriptor)
    }

    /// Register a runtime-built descriptor through the pointer marker.
    pub fn register_pointer_descriptor(&self, descriptor: TypeDescriptor) -> Registration {
        let id = TypeId::of_name(&format!("*{}", descriptor.name));
        self.insert(id, descriptor)
    }

    fn insert(&self, id: TypeId, descriptor: TypeDescriptor) -> Registration {
        let mut tables = self.tables.write();

        if let Some(existing) = tables.by_id.get(&id) {
            if existing.name == descriptor.name {
                return Registration::AlreadyRegistered(id);
            }
            let existing = existing.name.to_string();
            log::warn!(
                "[TypeRegistry::register] id {} of '{}' already owned by '{}', ignoring",
                id,
                descriptor.name,
                existing
            );
            return Registration::Collision { id, existing };
        }

        log::debug!(
            "[TypeRegistry::register] '{}' -> {} ({} fields)",
            descriptor.name,
            id,
            descriptor.len()
        );
        let descriptor = Arc::new(descriptor);
        // A name registered both directly and through a pointer keeps its
        // first id for encoding; both ids decode.
        tables
            .by_name
            .entry(descriptor.name.clone())
            .or_insert(id);
        tables.by_id.insert(id, descriptor);
        Registration::Registered(id)
    }

    /// Descriptor registered under `id`.
    pub fn resolve(&self, id: TypeId) -> Option<Arc<TypeDescriptor>> {
        self.tables.read().by_id.get(&id).cloned()
    }

    /// Id used when encoding the record named `name`.
    pub fn id_of(&self, name: &str) -> Option<TypeId> {
        self.tables.read().by_name.get(name).copied()
    }

    /// Descriptor of the record named `name`.
    pub fn descriptor_by_name(&self, name: &str) -> Option<Arc<TypeDescriptor>> {
        let tables = self.tables.read();
        let id = tables.by_name.get(name)?;
        tables.by_id.get(id).cloned()
    }

    /// Check whether `id` is registered.
    pub fn contains_id(&self, id: TypeId) -> bool {
        self.tables.read().by_id.contains_key(&id)
    }

    /// Number of registered ids.
    pub fn len(&self) -> usize {
        self.tables.read().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Zero value of `shape`: numeric zero, empty text, null pointer, empty
    /// slice or map, an array of zero elements, or a record whose fields are
    /// all zero.
    pub fn zero_value(&self, shape: &Shape) -> Result<Value> {
        self.zero_value_bounded(shape, ZERO_VALUE_DEPTH)
    }

    /// [`TypeRegistry::zero_value`] with an explicit nesting bound.
    pub fn zero_value_bounded(&self, shape: &Shape, max_depth: usize) -> Result<Value> {
        self.zero_at(shape, 0, max_depth)
    }

    fn zero_at(&self, shape: &Shape, depth: usize, limit: usize) -> Result<Value> {
        if depth > limit {
            return Err(Error::DepthLimitExceeded { limit });
        }
        let value = match shape {
            Shape::Bool => Value::Bool(false),
            Shape::Int => Value::Int(0),
            Shape::Int8 => Value::Int8(0),
            Shape::Int16 => Value::Int16(0),
            Shape::Int32 => Value::Int32(0),
            Shape::Int64 => Value::Int64(0),
            Shape::Uint => Value::Uint(0),
            Shape::Uint8 => Value::Uint8(0),
            Shape::Uint16 => Value::Uint16(0),
            Shape::Uint32 => Value::Uint32(0),
            Shape::Uint64 => Value::Uint64(0),
            Shape::Uintptr => Value::Uintptr(0),
            Shape::Float32 => Value::Float32(0.0),
            Shape::Float64 => Value::Float64(0.0),
            Shape::Complex64 => Value::Complex64(Default::default()),
            Shape::Complex128 => Value::Complex128(Default::default()),
            Shape::String => Value::String(String::new()),
            Shape::Pointer(_) | Shape::Any => Value::NULL,
            Shape::Array(element, len) => {
                let zero = self.zero_at(element, depth + 1, limit)?;
                Value::Array(SequenceValue::new(
                    (**element).clone(),
                    vec![zero; *len],
                ))
            }
            Shape::Slice(element) => {
                Value::Slice(SequenceValue::new((**element).clone(), Vec::new()))
            }
            Shape::Map(key, value) => {
                Value::Map(MapValue::new((**key).clone(), (**value).clone()))
            }
            Shape::Record(name) => {
                let descriptor = self
                    .descriptor_by_name(name)
                    .ok_or_else(|| Error::UnregisteredType(name.to_string()))?;
                let fields = descriptor
                    .fields
                    .iter()
                    .map(|field| self.zero_at(&field.shape, depth + 1, limit))
                    .collect::<Result<Vec<_>>>()?;
                Value::Record(RecordValue::new(descriptor, fields))
            }
            Shape::Time => Value::Time(zero_time()),
            Shape::Opaque(kind) => Value::Opaque(*kind),
        };
        Ok(value)
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tables = self.tables.read();
        let mut names: Vec<&str> = tables.by_id.values().map(|d| &*d.name).collect();
        names.sort_unstable();
        f.debug_struct("TypeRegistry").field("types", &names).finish()
    }
}
