/***************************************************************************************************
 * Copyright (c) 2023, 2024 Qualcomm Innovation Center, Inc. All rights reserved.
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of this software
 * and associated documentation files (the “Software”), to deal in the Software without
 * restriction, including without limitation the rights to use, copy, modify, merge, publish,
 * distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all copies or
 * substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING
 * BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
 * NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
 * DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
 **************************************************************************************************/
/***************************************************************************************************
 * Encoder test cases: width preservation for scalars, preferred serialization for headers, and
 * byte-identical round trips through the pull decoder.
 **************************************************************************************************/

extern crate cft_cbor;

use half::f16;

use cft_cbor::decoder::{pull_event, Event, IntWidth};
use cft_cbor::encoder::*;
use cft_cbor::error::CborError;

fn check(written: usize, buf: &[u8], expect: &[u8]) {
    assert_eq!(&buf[..written], expect);
}

#[test]
fn encode_uint_widths() {
    println!("<======================= encode_uint_widths ======================>");
    let mut buf = [0u8; MAX_HEAD_LEN];
    check(encode_uint8(0, &mut buf).unwrap(), &buf, &[0x00]);
    check(encode_uint8(10, &mut buf).unwrap(), &buf, &[0x0a]);
    check(encode_uint8(23, &mut buf).unwrap(), &buf, &[0x17]);
    check(encode_uint8(24, &mut buf).unwrap(), &buf, &[0x18, 0x18]);
    check(encode_uint8(100, &mut buf).unwrap(), &buf, &[0x18, 0x64]);
    check(
        encode_uint16(1000, &mut buf).unwrap(),
        &buf,
        &[0x19, 0x03, 0xe8],
    );
    check(
        encode_uint32(1000000, &mut buf).unwrap(),
        &buf,
        &[0x1a, 0x00, 0x0f, 0x42, 0x40],
    );
    check(
        encode_uint64(1000000000000, &mut buf).unwrap(),
        &buf,
        &[0x1b, 0x00, 0x00, 0x00, 0xe8, 0xd4, 0xa5, 0x10, 0x00],
    );
}

// A value that would fit a narrower encoding still uses its own width class. This is what
// keeps a rewritten file byte-identical when a small value was stored wide.
#[test]
fn encode_keeps_declared_width() {
    println!("<======================= encode_keeps_declared_width =============>");
    let mut buf = [0u8; MAX_HEAD_LEN];
    check(
        encode_uint16(2, &mut buf).unwrap(),
        &buf,
        &[0x19, 0x00, 0x02],
    );
    check(
        encode_uint32(1000, &mut buf).unwrap(),
        &buf,
        &[0x1a, 0x00, 0x00, 0x03, 0xe8],
    );
    check(
        encode_negint32(999, &mut buf).unwrap(),
        &buf,
        &[0x3a, 0x00, 0x00, 0x03, 0xe7],
    );
    check(
        encode_uint64(1, &mut buf).unwrap(),
        &buf,
        &[0x1b, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01],
    );
}

#[test]
fn encode_negint_widths() {
    println!("<======================= encode_negint_widths ====================>");
    let mut buf = [0u8; MAX_HEAD_LEN];
    check(encode_negint8(0, &mut buf).unwrap(), &buf, &[0x20]); // -1
    check(encode_negint8(9, &mut buf).unwrap(), &buf, &[0x29]); // -10
    check(encode_negint8(99, &mut buf).unwrap(), &buf, &[0x38, 0x63]); // -100
    check(
        encode_negint16(999, &mut buf).unwrap(),
        &buf,
        &[0x39, 0x03, 0xe7],
    ); // -1000
    check(
        encode_negint64(999999999999, &mut buf).unwrap(),
        &buf,
        &[0x3b, 0x00, 0x00, 0x00, 0xe8, 0xd4, 0xa5, 0x0f, 0xff],
    );
}

#[test]
fn encode_floats() {
    println!("<======================= encode_floats ===========================>");
    let mut buf = [0u8; MAX_HEAD_LEN];
    check(
        encode_half(f16::from_f32(1.0), &mut buf).unwrap(),
        &buf,
        &[0xf9, 0x3c, 0x00],
    );
    check(
        encode_single(100000.0, &mut buf).unwrap(),
        &buf,
        &[0xfa, 0x47, 0xc3, 0x50, 0x00],
    );
    check(
        encode_double(1.1, &mut buf).unwrap(),
        &buf,
        &[0xfb, 0x3f, 0xf1, 0x99, 0x99, 0x99, 0x99, 0x99, 0x9a],
    );
}

#[test]
fn encode_simple_values() {
    println!("<======================= encode_simple_values ====================>");
    let mut buf = [0u8; MAX_HEAD_LEN];
    check(encode_bool(false, &mut buf).unwrap(), &buf, &[0xf4]);
    check(encode_bool(true, &mut buf).unwrap(), &buf, &[0xf5]);
    check(encode_null(&mut buf).unwrap(), &buf, &[0xf6]);
    check(encode_undef(&mut buf).unwrap(), &buf, &[0xf7]);
    check(encode_ctrl(16, &mut buf).unwrap(), &buf, &[0xf0]);
    check(encode_ctrl(255, &mut buf).unwrap(), &buf, &[0xf8, 0xff]);
    // The reserved range must be rejected rather than encoded
    assert_eq!(encode_ctrl(24, &mut buf), Err(CborError::MalformedEncoding));
    assert_eq!(encode_ctrl(31, &mut buf), Err(CborError::MalformedEncoding));
}

#[test]
fn encode_headers_use_preferred_serialization() {
    println!("<======================= encode_headers ==========================>");
    let mut buf = [0u8; MAX_HEAD_LEN];
    check(encode_map_start(0, &mut buf).unwrap(), &buf, &[0xa0]);
    check(encode_map_start(1, &mut buf).unwrap(), &buf, &[0xa1]);
    check(encode_map_start(23, &mut buf).unwrap(), &buf, &[0xb7]);
    check(encode_map_start(24, &mut buf).unwrap(), &buf, &[0xb8, 0x18]);
    check(
        encode_map_start(256, &mut buf).unwrap(),
        &buf,
        &[0xb9, 0x01, 0x00],
    );
    check(encode_tstr_header(4, &mut buf).unwrap(), &buf, &[0x64]);
    check(
        encode_tstr_header(100, &mut buf).unwrap(),
        &buf,
        &[0x78, 0x64],
    );
    check(encode_bstr_header(4, &mut buf).unwrap(), &buf, &[0x44]);
    check(
        encode_bstr_header(256, &mut buf).unwrap(),
        &buf,
        &[0x59, 0x01, 0x00],
    );
}

#[test]
fn encode_short_buffer_is_detected() {
    println!("<======================= encode_short_buffer =====================>");
    let mut two = [0u8; 2];
    assert_eq!(encode_uint16(1000, &mut two), Err(CborError::EndOfBuffer));
    let mut zero: [u8; 0] = [];
    assert_eq!(encode_bool(true, &mut zero), Err(CborError::EndOfBuffer));
    assert_eq!(encode_map_start(0, &mut zero), Err(CborError::EndOfBuffer));
}

// Every width class must survive a decode / re-encode cycle byte-identically.
#[test]
fn decode_reencode_round_trip() {
    println!("<======================= decode_reencode_round_trip ==============>");
    let vectors: &[&[u8]] = &[
        &[0x0a],
        &[0x18, 0x64],
        &[0x19, 0x00, 0x02],
        &[0x1a, 0x00, 0x0f, 0x42, 0x40],
        &[0x1b, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01],
        &[0x29],
        &[0x38, 0x63],
        &[0x39, 0x03, 0xe7],
        &[0xf9, 0x3c, 0x00],
        &[0xfa, 0x47, 0xc3, 0x50, 0x00],
        &[0xfb, 0x3f, 0xf1, 0x99, 0x99, 0x99, 0x99, 0x99, 0x9a],
        &[0xf4],
        &[0xf5],
        &[0xf6],
        &[0xf7],
        &[0xf0],
        &[0xf8, 0xff],
    ];
    let mut buf = [0u8; MAX_HEAD_LEN];
    for v in vectors {
        let (consumed, ev) = pull_event(v).unwrap();
        assert_eq!(consumed, v.len());
        let written = match ev {
            Event::UInt(IntWidth::W8, n) => encode_uint8(n as u8, &mut buf).unwrap(),
            Event::UInt(IntWidth::W16, n) => encode_uint16(n as u16, &mut buf).unwrap(),
            Event::UInt(IntWidth::W32, n) => encode_uint32(n as u32, &mut buf).unwrap(),
            Event::UInt(IntWidth::W64, n) => encode_uint64(n, &mut buf).unwrap(),
            Event::NInt(IntWidth::W8, n) => encode_negint8(n as u8, &mut buf).unwrap(),
            Event::NInt(IntWidth::W16, n) => encode_negint16(n as u16, &mut buf).unwrap(),
            Event::NInt(IntWidth::W32, n) => encode_negint32(n as u32, &mut buf).unwrap(),
            Event::NInt(IntWidth::W64, n) => encode_negint64(n, &mut buf).unwrap(),
            Event::Float16(f) => encode_half(f, &mut buf).unwrap(),
            Event::Float32(f) => encode_single(f, &mut buf).unwrap(),
            Event::Float64(f) => encode_double(f, &mut buf).unwrap(),
            Event::Bool(b) => encode_bool(b, &mut buf).unwrap(),
            Event::Null => encode_null(&mut buf).unwrap(),
            Event::Undefined => encode_undef(&mut buf).unwrap(),
            Event::Simple(s) => encode_ctrl(s, &mut buf).unwrap(),
            other => panic!("unexpected event {:?}", other),
        };
        assert_eq!(&buf[..written], *v);
    }
}
