// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Golden vectors: byte-exact layouts that other implementations of the
// format rely on. Each vector is checked in both directions: the value
// encodes to exactly these bytes, and the bytes decode back to the value.

#![allow(clippy::unreadable_literal)]
#![allow(clippy::float_cmp)]

use chrono::{DateTime, FixedOffset};
use std::collections::BTreeMap;
use std::sync::Arc;
use tagser::{Codec, Complex, Encode, Record, TypeRegistry, Uintptr, Value};

fn codec() -> Codec {
    Codec::new(Arc::new(TypeRegistry::new()))
}

fn check_vector(codec: &Codec, value: &Value, expected: &[u8]) {
    let bytes = codec.marshal_value(value).unwrap();
    assert_eq!(bytes, expected, "encoding of {:?}", value);
    let back = codec.unmarshal(expected).unwrap();
    assert_eq!(&back, value, "decoding of {:02x?}", expected);
}

#[derive(Debug, Clone, PartialEq, Record)]
#[record(name = "main.SimpleStruct")]
struct SimpleStruct {
    x: i32,
    y: bool,
}

#[test]
fn simple_struct_layout() {
    let codec = codec();
    codec.register::<SimpleStruct>();

    let bytes = codec.marshal(&SimpleStruct { x: 5, y: true }).unwrap();
    assert_eq!(
        bytes,
        [
            0x19, // struct
            0x99, 0xab, 0x95, 0xae, // fnv1a("main.SimpleStruct")
            0x05, 0x05, 0x00, 0x00, 0x00, // int32 5
            0x01, 0x01, // bool true
        ]
    );
    let back: SimpleStruct = codec.unmarshal_as(&bytes).unwrap();
    assert_eq!(back, SimpleStruct { x: 5, y: true });
}

#[test]
fn scalar_vectors() {
    let codec = codec();
    check_vector(&codec, &Value::Bool(false), &[0x01, 0x00]);
    check_vector(&codec, &Value::Int8(-128), &[0x03, 0x80]);
    check_vector(&codec, &Value::Int16(-2), &[0x04, 0xfe, 0xff]);
    check_vector(
        &codec,
        &Value::Int64(0x0102030405060708),
        &[0x06, 0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01],
    );
    check_vector(&codec, &Value::Uint32(0xdeadbeef), &[0x0a, 0xef, 0xbe, 0xad, 0xde]);
    check_vector(
        &codec,
        &Uintptr(1).to_value(),
        &[0x0c, 0x01, 0, 0, 0, 0, 0, 0, 0],
    );
    check_vector(
        &codec,
        &Value::Float64(1.0),
        &[0x0e, 0, 0, 0, 0, 0, 0, 0xf0, 0x3f],
    );
    check_vector(
        &codec,
        &Value::Complex64(Complex::new(1.0, -1.0)),
        &[0x0f, 0x00, 0x00, 0x80, 0x3f, 0x00, 0x00, 0x80, 0xbf],
    );
}

#[test]
fn null_and_pointers() {
    let codec = codec();
    check_vector(&codec, &Value::NULL, &[0x16, 0x00]);
    assert_eq!(codec.marshal(&None::<String>).unwrap(), [0x16, 0x00]);
    check_vector(
        &codec,
        &Value::pointer(Value::pointer(Value::Bool(true))),
        &[0x16, 0x01, 0x16, 0x01, 0x01, 0x01],
    );
}

#[test]
fn empty_text_and_containers() {
    let codec = codec();
    check_vector(&codec, &Value::String(String::new()), &[0x18, 0, 0, 0, 0, 0, 0, 0, 0]);

    let bytes = codec.marshal(&Vec::<i16>::new()).unwrap();
    assert_eq!(bytes, [0x17, 0, 0, 0, 0, 0, 0, 0, 0, 0x04, 0x00, 0x00]);
    assert_eq!(codec.unmarshal_as::<Vec<i16>>(&bytes).unwrap(), Vec::<i16>::new());

    let bytes = codec.marshal(&BTreeMap::<String, u8>::new()).unwrap();
    assert_eq!(
        bytes,
        [
            0x15, 0, 0, 0, 0, 0, 0, 0, 0, // no entries
            0x18, 0, 0, 0, 0, 0, 0, 0, 0, // "" key marker
            0x08, 0x00, // uint8 value marker
        ]
    );
    let back = codec.unmarshal(&bytes).unwrap();
    assert!(back.as_map().is_some_and(|m| m.is_empty()));
}

#[test]
fn fixed_array_of_ints() {
    let codec = codec();
    let bytes = codec.marshal(&[7isize, -1]).unwrap();
    let mut expected = vec![0x11, 2, 0, 0, 0, 0, 0, 0, 0];
    expected.extend_from_slice(&[0x02, 0, 0, 0, 0, 0, 0, 0, 0]); // marker
    expected.extend_from_slice(&[0x02, 7, 0, 0, 0, 0, 0, 0, 0]);
    expected.extend_from_slice(&[0x02, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]);
    assert_eq!(bytes, expected);
    assert_eq!(codec.unmarshal_as::<[isize; 2]>(&bytes).unwrap(), [7, -1]);
}

#[test]
fn timestamp_layout() {
    let codec = codec();
    let t: DateTime<FixedOffset> =
        DateTime::parse_from_rfc3339("2023-04-05T06:07:08.900Z").unwrap();
    let text = b"2023-04-05T06:07:08.9Z";

    let mut expected = vec![0x19, b't', b'i', b'm', b'e', 0x18];
    expected.extend_from_slice(&(text.len() as u64).to_le_bytes());
    expected.extend_from_slice(text);
    check_vector(&codec, &Value::Time(t), &expected);
}

#[test]
fn pointer_registration_changes_the_id() {
    #[derive(Debug, PartialEq, Record)]
    #[record(name = "wire::Point")]
    struct Point {
        x: u8,
    }

    let direct = codec();
    direct.register::<Point>();
    let bytes = direct.marshal(&Point { x: 1 }).unwrap();
    assert_eq!(bytes, [0x19, 0x0a, 0xc9, 0xa7, 0xae, 0x08, 0x01]);

    let through_pointer = codec();
    through_pointer
        .registry()
        .register_sample(&Box::new(Point { x: 0 }));
    let bytes = through_pointer.marshal(&Point { x: 1 }).unwrap();
    assert_eq!(bytes, [0x19, 0x12, 0x0d, 0x6b, 0xa2, 0x08, 0x01]);
    assert_eq!(
        through_pointer.unmarshal_as::<Point>(&bytes).unwrap(),
        Point { x: 1 }
    );
}
