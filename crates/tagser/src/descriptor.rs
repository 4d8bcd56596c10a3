// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record type descriptors.
//!
//! A [`TypeDescriptor`] is the structural layout of a registered record: its
//! canonical name and the ordered list of its fields. Field names stay local;
//! only field values, in declaration order, go on the wire.

use crate::shape::Shape;
use std::sync::Arc;

/// Field descriptor for record members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name (diagnostics and by-name access only).
    pub name: String,
    /// Declared field shape.
    pub shape: Shape,
}

impl FieldDescriptor {
    /// Create a new field descriptor.
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }
}

/// Layout of a registered record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Canonical type name, hashed to produce the registry id.
    pub name: Arc<str>,
    /// Fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    /// Create a record descriptor.
    pub fn new(name: impl Into<Arc<str>>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Shape referring to this record.
    pub fn shape(&self) -> Shape {
        Shape::Record(self.name.clone())
    }

    /// Get field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get field index by name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` for a record without fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Fluent builder for record descriptors assembled at runtime.
///
/// ```rust
/// use tagser::{Shape, TypeDescriptorBuilder};
///
/// let point = TypeDescriptorBuilder::new("geo::Point")
///     .field("x", Shape::Int32)
///     .field("y", Shape::Int32)
///     .build();
/// assert_eq!(point.len(), 2);
/// ```
#[derive(Debug)]
pub struct TypeDescriptorBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl TypeDescriptorBuilder {
    /// Create a new builder for a record type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field of any shape.
    pub fn field(mut self, name: impl Into<String>, shape: Shape) -> Self {
        self.fields.push(FieldDescriptor::new(name, shape));
        self
    }

    /// Add a text field.
    pub fn string_field(self, name: impl Into<String>) -> Self {
        self.field(name, Shape::String)
    }

    /// Add a dynamic sequence field.
    pub fn slice_field(self, name: impl Into<String>, element: Shape) -> Self {
        self.field(name, Shape::Slice(Box::new(element)))
    }

    /// Add a fixed-length array field.
    pub fn array_field(self, name: impl Into<String>, element: Shape, length: usize) -> Self {
        self.field(name, Shape::Array(Box::new(element), length))
    }

    /// Add a map field.
    pub fn map_field(self, name: impl Into<String>, key: Shape, value: Shape) -> Self {
        self.field(name, Shape::Map(Box::new(key), Box::new(value)))
    }

    /// Add a nested record field.
    pub fn record_field(self, name: impl Into<String>, nested: &TypeDescriptor) -> Self {
        self.field(name, nested.shape())
    }

    /// Add a wall-clock timestamp field.
    pub fn time_field(self, name: impl Into<String>) -> Self {
        self.field(name, Shape::Time)
    }

    /// Build the descriptor.
    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor::new(self.name, self.fields)
    }
}
