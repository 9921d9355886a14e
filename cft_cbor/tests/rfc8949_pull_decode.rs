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
 * Pull decoder test cases from RFC8949, Appendix A, restricted to the supported subset, plus
 * window-refill and malformed-input behavior.
 **************************************************************************************************/

extern crate cft_cbor;

use half::f16;

use cft_cbor::decoder::{pull_event, Event, IntWidth};
use cft_cbor::error::CborError;

// Decode one event and check both the event and the number of bytes consumed.
fn check_event(buf: &[u8], expect: Event, expect_consumed: usize) {
    let (consumed, ev) = pull_event(buf).unwrap();
    assert_eq!(ev, expect);
    assert_eq!(consumed, expect_consumed);
}

#[test]
fn rfc8949_decode_uint() {
    println!("<======================= rfc8949_decode_uint =====================>");
    check_event(&[0x00], Event::UInt(IntWidth::W8, 0), 1);
    check_event(&[0x01], Event::UInt(IntWidth::W8, 1), 1);
    check_event(&[0x0a], Event::UInt(IntWidth::W8, 10), 1);
    check_event(&[0x17], Event::UInt(IntWidth::W8, 23), 1);
    check_event(&[0x18, 0x18], Event::UInt(IntWidth::W8, 24), 2);
    check_event(&[0x18, 0x64], Event::UInt(IntWidth::W8, 100), 2);
    check_event(&[0x19, 0x03, 0xe8], Event::UInt(IntWidth::W16, 1000), 3);
    check_event(
        &[0x1a, 0x00, 0x0f, 0x42, 0x40],
        Event::UInt(IntWidth::W32, 1000000),
        5,
    );
    check_event(
        &[0x1b, 0x00, 0x00, 0x00, 0xe8, 0xd4, 0xa5, 0x10, 0x00],
        Event::UInt(IntWidth::W64, 1000000000000),
        9,
    );
    check_event(
        &[0x1b, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff],
        Event::UInt(IntWidth::W64, 18446744073709551615),
        9,
    );
}

#[test]
fn rfc8949_decode_nint() {
    println!("<======================= rfc8949_decode_nint =====================>");
    // Negative integers carry the encoded value, i.e. the magnitude minus one
    check_event(&[0x20], Event::NInt(IntWidth::W8, 0), 1); // -1
    check_event(&[0x29], Event::NInt(IntWidth::W8, 9), 1); // -10
    check_event(&[0x38, 0x63], Event::NInt(IntWidth::W8, 99), 2); // -100
    check_event(&[0x39, 0x03, 0xe7], Event::NInt(IntWidth::W16, 999), 3); // -1000
    check_event(
        &[0x3a, 0x00, 0x0f, 0x42, 0x3f],
        Event::NInt(IntWidth::W32, 999999),
        5,
    ); // -1000000
}

#[test]
fn rfc8949_decode_strings() {
    println!("<======================= rfc8949_decode_strings ==================>");
    check_event(&[0x40], Event::Bstr(&[]), 1);
    check_event(&[0x44, 0x01, 0x02, 0x03, 0x04], Event::Bstr(&[1, 2, 3, 4]), 5);
    check_event(&[0x60], Event::Tstr(""), 1);
    check_event(&[0x61, 0x61], Event::Tstr("a"), 2);
    check_event(&[0x64, 0x49, 0x45, 0x54, 0x46], Event::Tstr("IETF"), 5);
    check_event(&[0x62, 0xc3, 0xbc], Event::Tstr("\u{00fc}"), 3);
    // Invalid UTF8 payload in a tstr
    assert_eq!(pull_event(&[0x62, 0xff, 0xfe]), Err(CborError::UTF8Error));
}

#[test]
fn rfc8949_decode_simple_and_float() {
    println!("<======================= rfc8949_decode_simple_and_float =========>");
    check_event(&[0xf4], Event::Bool(false), 1);
    check_event(&[0xf5], Event::Bool(true), 1);
    check_event(&[0xf6], Event::Null, 1);
    check_event(&[0xf7], Event::Undefined, 1);
    check_event(&[0xf0], Event::Simple(16), 1);
    check_event(&[0xf8, 0xff], Event::Simple(255), 2);
    // Simple values 24..=31 must not be encoded on two bytes
    assert_eq!(pull_event(&[0xf8, 0x18]), Err(CborError::MalformedEncoding));

    check_event(&[0xf9, 0x3c, 0x00], Event::Float16(f16::from_f32(1.0)), 3);
    check_event(&[0xf9, 0x80, 0x00], Event::Float16(f16::from_f32(-0.0)), 3);
    check_event(
        &[0xfa, 0x47, 0xc3, 0x50, 0x00],
        Event::Float32(100000.0),
        5,
    );
    check_event(
        &[0xfb, 0x3f, 0xf1, 0x99, 0x99, 0x99, 0x99, 0x99, 0x9a],
        Event::Float64(1.1),
        9,
    );
}

#[test]
fn rfc8949_decode_containers() {
    println!("<======================= rfc8949_decode_containers ===============>");
    check_event(&[0xa0], Event::MapStart(0), 1);
    check_event(&[0xa2, 0x01, 0x02], Event::MapStart(2), 1);
    check_event(&[0xb8, 0x19], Event::MapStart(25), 2);
    check_event(&[0x80], Event::ArrayStart(0), 1);
    check_event(&[0x83, 0x01, 0x02, 0x03], Event::ArrayStart(3), 1);
    check_event(&[0xc0, 0x74], Event::Tag(0), 1);
    check_event(&[0xd8, 0x20, 0x60], Event::Tag(32), 2);
}

#[test]
fn decode_indefinite_and_break_detected() {
    println!("<======================= decode_indefinite_and_break =============>");
    // Indefinite-length items are reported, not parsed; the tree layer rejects them.
    check_event(&[0x5f], Event::IndefiniteStart, 1);
    check_event(&[0x7f], Event::IndefiniteStart, 1);
    check_event(&[0x9f], Event::IndefiniteStart, 1);
    check_event(&[0xbf], Event::IndefiniteStart, 1);
    check_event(&[0xff], Event::Break, 1);
}

#[test]
fn decode_short_window_reports_needed_bytes() {
    println!("<======================= decode_short_window =====================>");
    assert_eq!(pull_event(&[]), Err(CborError::NoMoreBytes(1)));
    assert_eq!(pull_event(&[0x19]), Err(CborError::NoMoreBytes(3)));
    assert_eq!(pull_event(&[0x19, 0x03]), Err(CborError::NoMoreBytes(3)));
    assert_eq!(pull_event(&[0x1b, 0x00]), Err(CborError::NoMoreBytes(9)));
    // A string needs its header and its whole payload in the window
    assert_eq!(pull_event(&[0x64, 0x49]), Err(CborError::NoMoreBytes(5)));
    assert_eq!(
        pull_event(&[0x58, 0x20, 0x00, 0x00]),
        Err(CborError::NoMoreBytes(34))
    );
    // Once the window holds the whole item, the same bytes parse
    check_event(&[0x19, 0x03, 0xe8], Event::UInt(IntWidth::W16, 1000), 3);
}

#[test]
fn decode_malformed_ai_values() {
    println!("<======================= decode_malformed_ai =====================>");
    // AI values 28..30 are reserved in every major type
    for byte in [0x1c, 0x1d, 0x1e, 0x3c, 0x5c, 0x7c, 0x9c, 0xbc, 0xdc, 0xfc] {
        assert_eq!(pull_event(&[byte, 0x00]), Err(CborError::MalformedEncoding));
    }
    // AI 31 is only meaningful for indefinite-length types and break
    assert_eq!(pull_event(&[0x1f]), Err(CborError::MalformedEncoding));
    assert_eq!(pull_event(&[0x3f]), Err(CborError::MalformedEncoding));
}

#[test]
fn decode_sequence_of_events() {
    println!("<======================= decode_sequence_of_events ===============>");
    // {"a": 1, "b": {"c": "x"}} walked event by event, tracking consumed bytes
    let doc: &[u8] = &[
        0xa2, 0x61, 0x61, 0x01, 0x61, 0x62, 0xa1, 0x61, 0x63, 0x61, 0x78,
    ];
    let expected = [
        (1usize, Event::MapStart(2)),
        (2, Event::Tstr("a")),
        (1, Event::UInt(IntWidth::W8, 1)),
        (2, Event::Tstr("b")),
        (1, Event::MapStart(1)),
        (2, Event::Tstr("c")),
        (2, Event::Tstr("x")),
    ];
    let mut index = 0;
    for (len, ev) in expected.iter() {
        let (consumed, actual) = pull_event(&doc[index..]).unwrap();
        assert_eq!(&actual, ev);
        assert_eq!(consumed, *len);
        index += consumed;
    }
    assert_eq!(index, doc.len());
}
