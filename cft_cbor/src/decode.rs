/***************************************************************************************************
 * Copyright (c) 2023, 2024 Qualcomm Innovation Center, Inc. All rights reserved.
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of this software
 * and associated documentation files (the “Software”), to deal in the Software without
 * restriction, including without limitation the rights to use, copy, modify, merge, publish,
 * distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice (including the next
 * paragraph) shall be included in all copies or substantial portions of the
 * Software.
 *
 * THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING
 * BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
 * NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
 * DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
 **************************************************************************************************/
/***************************************************************************************************
 * CBOR Pull Decoder
 *
 * Streaming decoder for the definite-length CBOR subset. One call parses one data item head
 * (plus payload for strings) from the front of the caller's window and reports the consumed
 * byte count, so the caller can slide a bounded window over an arbitrarily large document.
 **************************************************************************************************/
/// # Pull-style CBOR event decoding
///
/// CBOR input is parsed one event at a time via [`pull_event`]. The caller owns the byte
/// window; this module never looks past the item it is asked to parse.
///
/// ## Example
///
/// ```
/// use cft_cbor::decoder::{pull_event, Event, IntWidth};
/// let b = [0x19, 0x03, 0xe8];
/// let (consumed, ev) = pull_event(&b).unwrap();
/// assert_eq!(consumed, 3);
/// assert_eq!(ev, Event::UInt(IntWidth::W16, 1000));
/// ```
use crate::constants::*;
use crate::error::{CborError, Result};

use std::convert::TryInto;
use std::str::from_utf8;

use half::f16;

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/***************************************************************************************************
 * Decoded event definitions
 **************************************************************************************************/

/// The encoded width of an integer item, preserved from the additional information bits so that
/// the item can later be re-encoded byte-identically. Immediate values (AI < 24) and one-byte
/// payloads both report `W8`, matching the eight bit encoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    /// Value encoded on the AI bits or one following byte
    W8,
    /// Value encoded on two following bytes
    W16,
    /// Value encoded on four following bytes
    W32,
    /// Value encoded on eight following bytes
    W64,
}

/// One decoded CBOR event. Container starts carry only the declared size; the container's
/// contents follow as further events. String events borrow their payload from the window, so
/// they must be consumed before the window slides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event<'buf> {
    /// Start of a definite-length map of `n` key/value pairs
    MapStart(u64),
    /// Start of a definite-length array of `n` items
    ArrayStart(u64),
    /// A tag applying to the following item
    Tag(u64),
    /// Positive integer with its encoded width
    UInt(IntWidth, u64),
    /// Negative integer, stored as magnitude minus one, with its encoded width
    NInt(IntWidth, u64),
    /// Half precision float
    Float16(f16),
    /// Single precision float
    Float32(f32),
    /// Double precision float
    Float64(f64),
    /// Boolean
    Bool(bool),
    /// Null
    Null,
    /// Undefined
    Undefined,
    /// Simple value outside of the reserved range
    Simple(u8),
    /// Definite-length byte string payload
    Bstr(&'buf [u8]),
    /// Definite-length text string payload
    Tstr(&'buf str),
    /// Start of any indefinite-length item (string, array or map)
    IndefiniteStart,
    /// Break code terminating an indefinite-length item
    Break,
}

/***************************************************************************************************
 * CBOR Pull Parser
 **************************************************************************************************/

/// Parse a single CBOR event from the front of `buf`.
///
/// On success, returns the number of bytes consumed and the decoded event. The consumed count
/// covers the item head and, for strings, the payload; for maps, arrays and tags it covers the
/// head only, as their contents are delivered as subsequent events.
///
/// When `buf` ends before the item does, the call fails with `CborError::NoMoreBytes(needed)`
/// where `needed` is the total number of bytes the complete item occupies from the front of
/// `buf`. Nothing is consumed in that case; the caller can refill its window and retry.
#[cfg_attr(feature = "trace", trace)]
pub fn pull_event(buf: &[u8]) -> Result<(usize, Event)> {
    if buf.is_empty() {
        return Err(CborError::NoMoreBytes(1));
    }
    let mt_ai_byte = buf[0];
    match mt_ai_byte {
        // Positive integers
        0x00..=0x1b => {
            let (next_index, width, val) = parse_unsigned(buf, 0)?;
            Ok((next_index, Event::UInt(width, val)))
        }
        // Negative integers
        0x20..=0x3b => {
            let (next_index, width, val) = parse_unsigned(buf, 0)?;
            Ok((next_index, Event::NInt(width, val)))
        }
        // Byte Strings
        0x40..=0x5b => {
            let (next_index, bytes) = parse_string(buf, 0)?;
            Ok((next_index, Event::Bstr(bytes)))
        }
        0x5f => Ok((1, Event::IndefiniteStart)),
        // UTF8 strings
        0x60..=0x7b => {
            let (next_index, raw_bytes) = parse_string(buf, 0)?;
            match from_utf8(raw_bytes) {
                Ok(s) => Ok((next_index, Event::Tstr(s))),
                Err(_) => Err(CborError::UTF8Error),
            }
        }
        0x7f => Ok((1, Event::IndefiniteStart)),
        // Arrays
        0x80..=0x9b => {
            let (next_index, _, n_items) = parse_unsigned(buf, 0)?;
            Ok((next_index, Event::ArrayStart(n_items)))
        }
        0x9f => Ok((1, Event::IndefiniteStart)),
        // Maps
        0xa0..=0xbb => {
            let (next_index, _, n_pairs) = parse_unsigned(buf, 0)?;
            Ok((next_index, Event::MapStart(n_pairs)))
        }
        0xbf => Ok((1, Event::IndefiniteStart)),
        // Tagged values
        0xc0..=0xdb => {
            let (next_index, _, tag) = parse_unsigned(buf, 0)?;
            Ok((next_index, Event::Tag(tag)))
        }
        // Simple values. We follow the rules in RFC8949: 20..23 have particular meanings,
        // 24..31 are illegal as the value of a simple item.
        0xe0..=0xf8 => {
            let (next_index, _, val) = parse_unsigned(buf, 0)?;
            match val {
                0..=19 => Ok((next_index, Event::Simple(val as u8))),
                20 => Ok((next_index, Event::Bool(false))),
                21 => Ok((next_index, Event::Bool(true))),
                22 => Ok((next_index, Event::Null)),
                23 => Ok((next_index, Event::Undefined)),
                24..=31 => Err(CborError::MalformedEncoding),
                _ => Ok((next_index, Event::Simple(val as u8))),
            }
        }
        0xf9 => {
            let (next_index, val) = parse_f16(buf, 0)?;
            Ok((next_index, Event::Float16(val)))
        }
        0xfa => {
            let (next_index, val) = parse_f32(buf, 0)?;
            Ok((next_index, Event::Float32(val)))
        }
        0xfb => {
            let (next_index, val) = parse_f64(buf, 0)?;
            Ok((next_index, Event::Float64(val)))
        }
        0xff => Ok((1, Event::Break)),
        _ => Err(CborError::MalformedEncoding),
    }
}

/***************************************************************************************************
 * Integer parser helpers
 **************************************************************************************************/

/// Parse an unsigned integer value, retaining the encoded width.
///
/// On entry the `start_index` is assumed to identify an MT/AI byte within `buf`. The MT bits
/// are ignored. On return we have the index of the next item, the width class of the encoding
/// and the value.
#[cfg_attr(feature = "trace", trace)]
fn parse_unsigned(buf: &[u8], start_index: usize) -> Result<(usize, IntWidth, u64)> {
    if !within(buf, start_index, 1) {
        return Err(CborError::NoMoreBytes(start_index + 1));
    }
    let ai = buf[start_index] & AI_MASK;
    if ai <= PAYLOAD_AI_BITS {
        Ok((start_index + 1, IntWidth::W8, ai as u64))
    } else if ai == PAYLOAD_ONE_BYTE {
        let (next_index, item_slice) = read_extent(buf, start_index + 1, 1)?;
        Ok((next_index, IntWidth::W8, item_slice[0] as u64))
    } else if ai == PAYLOAD_TWO_BYTES {
        let (next_index, item_slice) = read_extent(buf, start_index + 1, 2)?;
        let bytes: [u8; 2] = item_slice.try_into().map_err(|_| CborError::BadSliceLength)?;
        Ok((next_index, IntWidth::W16, u16::from_be_bytes(bytes) as u64))
    } else if ai == PAYLOAD_FOUR_BYTES {
        let (next_index, item_slice) = read_extent(buf, start_index + 1, 4)?;
        let bytes: [u8; 4] = item_slice.try_into().map_err(|_| CborError::BadSliceLength)?;
        Ok((next_index, IntWidth::W32, u32::from_be_bytes(bytes) as u64))
    } else if ai == PAYLOAD_EIGHT_BYTES {
        let (next_index, item_slice) = read_extent(buf, start_index + 1, 8)?;
        let bytes: [u8; 8] = item_slice.try_into().map_err(|_| CborError::BadSliceLength)?;
        Ok((next_index, IntWidth::W64, u64::from_be_bytes(bytes)))
    } else {
        Err(CborError::MalformedEncoding)
    }
}

/***************************************************************************************************
 * Float parser helpers
 **************************************************************************************************/

/// Parse a 16bit floating point value starting at the MT/AI byte at `start_index`.
#[cfg_attr(feature = "trace", trace)]
fn parse_f16(buf: &[u8], start_index: usize) -> Result<(usize, f16)> {
    let (next_index, item_slice) = read_extent(buf, start_index + 1, 2)?;
    let bytes: [u8; 2] = item_slice.try_into().map_err(|_| CborError::BadSliceLength)?;
    Ok((next_index, f16::from_be_bytes(bytes)))
}

/// Parse a 32bit floating point value starting at the MT/AI byte at `start_index`.
#[cfg_attr(feature = "trace", trace)]
fn parse_f32(buf: &[u8], start_index: usize) -> Result<(usize, f32)> {
    let (next_index, item_slice) = read_extent(buf, start_index + 1, 4)?;
    let bytes: [u8; 4] = item_slice.try_into().map_err(|_| CborError::BadSliceLength)?;
    Ok((next_index, f32::from_be_bytes(bytes)))
}

/// Parse a 64bit floating point value starting at the MT/AI byte at `start_index`.
#[cfg_attr(feature = "trace", trace)]
fn parse_f64(buf: &[u8], start_index: usize) -> Result<(usize, f64)> {
    let (next_index, item_slice) = read_extent(buf, start_index + 1, 8)?;
    let bytes: [u8; 8] = item_slice.try_into().map_err(|_| CborError::BadSliceLength)?;
    Ok((next_index, f64::from_be_bytes(bytes)))
}

/***************************************************************************************************
 * String helpers
 **************************************************************************************************/

/// Parse a definite-length string payload starting at the MT/AI byte at `start_index`. Used for
/// both bstr and tstr; the distinction is the major type, which the caller has already matched.
#[cfg_attr(feature = "trace", trace)]
fn parse_string(buf: &[u8], start_index: usize) -> Result<(usize, &[u8])> {
    let (payload_index, _, len) = parse_unsigned(buf, start_index)?;
    if len > usize::MAX as u64 {
        return Err(CborError::OutOfRange);
    }
    read_extent(buf, payload_index, len as usize)
}

/***************************************************************************************************
 * Other helpers
 **************************************************************************************************/

/// Return `true` if it is possible to obtain a slice of length `len` starting from `start` from
/// `buf`.
#[inline]
fn within(buf: &[u8], start: usize, len: usize) -> bool {
    start + len <= buf.len()
}

/// Return the index of the next item to parse and a slice over the extent within `buf`. If the
/// extent runs past the end of `buf`, fail with the total length needed so the caller can
/// refill its window.
#[cfg_attr(feature = "trace", trace)]
fn read_extent(buf: &[u8], start: usize, length: usize) -> Result<(usize, &[u8])> {
    if within(buf, start, length) {
        Ok((start + length, &buf[start..start + length]))
    } else {
        Err(CborError::NoMoreBytes(start + length))
    }
}
