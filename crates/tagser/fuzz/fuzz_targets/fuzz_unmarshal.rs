// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fuzz target for dynamic decoding
//!
//! Feeds arbitrary bytes to the dynamic decoder under default and tight
//! limits. Decoding must never panic, and anything that decodes must
//! re-encode to a value that decodes to itself.

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::Arc;
use tagser::{Codec, CodecConfig, TypeRegistry};

fuzz_target!(|data: &[u8]| {
    let codec = Codec::new(Arc::new(TypeRegistry::new()));
    if let Ok(value) = codec.unmarshal(data) {
        if let Ok(bytes) = codec.marshal_value(&value) {
            let again = codec.unmarshal(&bytes);
            assert!(again.is_ok(), "re-encoded value failed to decode");
        }
    }

    // Streaming decode walks every top-level value in the buffer.
    let mut rest = data;
    while !rest.is_empty() {
        match codec.decode_one(rest) {
            Ok((_, tail)) if tail.len() < rest.len() => rest = tail,
            _ => break,
        }
    }

    let tight = CodecConfig::builder()
        .max_depth(4)
        .max_collection_len(16)
        .build();
    if let Ok(limited) = tight.and_then(|c| Codec::with_config(Arc::new(TypeRegistry::new()), c)) {
        let _ = limited.unmarshal(data);
    }
});
