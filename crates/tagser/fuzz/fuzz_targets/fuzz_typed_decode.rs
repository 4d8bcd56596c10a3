// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fuzz target for typed decoding
//!
//! Decodes arbitrary bytes into derived records and std containers through
//! the Decode conversions. None of these operations should panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tagser::{Codec, Record, TypeRegistry};

#[derive(Debug, Record)]
#[record(name = "fuzz.Leaf")]
struct Leaf {
    flag: bool,
    count: u16,
    name: String,
}

#[derive(Debug, Record)]
#[record(name = "fuzz.Tree")]
struct Tree {
    leaves: Vec<Leaf>,
    index: HashMap<String, i32>,
    child: Option<Box<Tree>>,
}

fuzz_target!(|data: &[u8]| {
    let codec = Codec::new(Arc::new(TypeRegistry::new()));
    codec.register::<Leaf>();
    codec.register::<Tree>();

    let _ = codec.unmarshal_as::<Tree>(data);
    let _ = codec.unmarshal_as::<Leaf>(data);
    let _ = codec.unmarshal_as::<Vec<Option<i64>>>(data);
    let _ = codec.unmarshal_as::<BTreeMap<String, Vec<u8>>>(data);
    let _ = codec.unmarshal_as::<[f64; 3]>(data);
    let _ = codec.unmarshal_as::<chrono::DateTime<chrono::Utc>>(data);
});
