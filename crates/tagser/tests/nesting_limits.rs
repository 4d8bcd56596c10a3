// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Nesting at the configured depth limit, decoded and re-encoded on a thread
// with a 2 MiB stack. A stack overflow aborts the whole test binary.

use std::sync::Arc;
use tagser::{Codec, CodecConfig, Error, Kind, Shape, TypeDescriptorBuilder, TypeRegistry};

const SMALL_STACK: usize = 2 * 1024 * 1024;
const DEFAULT_DEPTH: usize = 256;

fn on_small_stack<F>(name: &str, body: F)
where
    F: FnOnce() + Send + 'static,
{
    let handle = std::thread::Builder::new()
        .name(name.to_string())
        .stack_size(SMALL_STACK)
        .spawn(body)
        .expect("spawn test thread");
    handle.join().expect("test thread panicked");
}

/// `levels` maps, each holding one `true => <next level>` entry, around a
/// final bool.
fn nested_maps(levels: usize) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(levels * 15 + 2);
    for _ in 0..levels {
        bytes.push(Kind::Map as u8);
        bytes.extend_from_slice(&1u64.to_le_bytes());
        bytes.extend_from_slice(&[22, 0, 22, 0]); // null key and value markers
        bytes.extend_from_slice(&[1, 1]);
    }
    bytes.extend_from_slice(&[1, 1]);
    bytes
}

/// `levels` single-item slices around a final bool.
fn nested_slices(levels: usize) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(levels * 11 + 2);
    for _ in 0..levels {
        bytes.push(Kind::Slice as u8);
        bytes.extend_from_slice(&1u64.to_le_bytes());
        bytes.extend_from_slice(&[22, 0]);
    }
    bytes.extend_from_slice(&[1, 1]);
    bytes
}

fn assert_depth_exceeded(result: tagser::Result<impl std::fmt::Debug>, limit: usize) {
    match result {
        Err(Error::DepthLimitExceeded { limit: l }) => assert_eq!(l, limit),
        other => panic!("expected depth limit {}, got {:?}", limit, other),
    }
}

#[test]
fn maps_at_default_depth() {
    on_small_stack("maps_at_default_depth", || {
        let codec = Codec::new(Arc::new(TypeRegistry::new()));
        let bytes = nested_maps(DEFAULT_DEPTH);

        let value = codec.unmarshal(&bytes).expect("decode");
        assert_eq!(value.kind(), Kind::Map);
        assert_eq!(codec.marshal_value(&value).expect("encode"), bytes);

        assert_depth_exceeded(codec.unmarshal(&nested_maps(DEFAULT_DEPTH + 1)), DEFAULT_DEPTH);
    });
}

#[test]
fn slices_at_default_depth() {
    on_small_stack("slices_at_default_depth", || {
        let codec = Codec::new(Arc::new(TypeRegistry::new()));
        let bytes = nested_slices(DEFAULT_DEPTH);

        let value = codec.unmarshal(&bytes).expect("decode");
        assert_eq!(value.kind(), Kind::Slice);
        assert_eq!(codec.marshal_value(&value).expect("encode"), bytes);

        assert_depth_exceeded(
            codec.unmarshal(&nested_slices(DEFAULT_DEPTH + 1)),
            DEFAULT_DEPTH,
        );
    });
}

#[test]
fn records_at_default_depth() {
    on_small_stack("records_at_default_depth", || {
        let registry = Arc::new(TypeRegistry::new());
        let node = TypeDescriptorBuilder::new("deep::Node")
            .field("next", Shape::pointer(Shape::Record("deep::Node".into())))
            .build();
        let id = registry.register_descriptor(node).id().to_le_bytes();
        let codec = Codec::new(registry);

        // Each node costs two levels: the record and its pointer field.
        let nodes = DEFAULT_DEPTH / 2;
        let mut bytes = Vec::new();
        for _ in 0..nodes - 1 {
            bytes.push(Kind::Struct as u8);
            bytes.extend_from_slice(&id);
            bytes.extend_from_slice(&[22, 1]);
        }
        bytes.push(Kind::Struct as u8);
        bytes.extend_from_slice(&id);
        bytes.extend_from_slice(&[22, 0]);

        let value = codec.unmarshal(&bytes).expect("decode");
        assert_eq!(value.kind(), Kind::Struct);
        assert_eq!(codec.marshal_value(&value).expect("encode"), bytes);

        let mut deeper = Vec::new();
        for _ in 0..nodes {
            deeper.push(Kind::Struct as u8);
            deeper.extend_from_slice(&id);
            deeper.extend_from_slice(&[22, 1]);
        }
        deeper.extend_from_slice(&bytes);
        assert_depth_exceeded(codec.unmarshal(&deeper), DEFAULT_DEPTH);
    });
}

#[test]
fn slices_at_depth_ceiling() {
    on_small_stack("slices_at_depth_ceiling", || {
        let config = CodecConfig::builder()
            .max_depth(tagser::config::MAX_DEPTH_CEILING)
            .build()
            .expect("ceiling is a valid depth");
        let codec = Codec::with_config(Arc::new(TypeRegistry::new()), config).expect("codec");
        let bytes = nested_slices(tagser::config::MAX_DEPTH_CEILING);

        let value = codec.unmarshal(&bytes).expect("decode");
        assert_eq!(codec.marshal_value(&value).expect("encode"), bytes);
    });
}
