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
 * CBOR Scalar Encoder
 *
 * Width-preserving scalar encoders for the definite-length CBOR subset. Unlike a
 * preferred-serialization encoder, the multi-byte integer encoders always emit the explicit
 * width form so that a value decoded at a given width round-trips to identical bytes. Map and
 * string headers use the preferred (shortest) length serialization, which is what the
 * containers in configuration documents are expected to use.
 *
 * Every function writes one item head (plus immediate payload for floats) into the front of a
 * caller-supplied scratch buffer and returns the number of bytes written. String payloads are
 * not copied here; the caller writes them after the header.
 **************************************************************************************************/
use crate::constants::*;
use crate::error::{CborError, Result};

use half::f16;

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/// The largest number of bytes any item head can occupy: one MT/AI byte plus an eight byte
/// payload. Scratch buffers of this size are always sufficient.
pub const MAX_HEAD_LEN: usize = 9;

/***************************************************************************************************
 * Unsigned and negative integers
 **************************************************************************************************/

/// Encode a `u8` value as a Major Type 0 item.
///
/// Values below 24 are carried on the AI bits; larger values use the one byte form. This
/// matches the eight bit width class reported by the decoder.
#[inline]
#[cfg_attr(feature = "trace", trace)]
pub fn encode_uint8(v: u8, buf: &mut [u8]) -> Result<usize> {
    encode_w8(MT_UINT, v, buf)
}

/// Encode a `u16` value as a Major Type 0 item, always using the two byte form.
#[inline]
#[cfg_attr(feature = "trace", trace)]
pub fn encode_uint16(v: u16, buf: &mut [u8]) -> Result<usize> {
    if buf.len() < 3 {
        return Err(CborError::EndOfBuffer);
    }
    buf[0] = MT_UINT | PAYLOAD_TWO_BYTES;
    buf[1..3].copy_from_slice(&v.to_be_bytes());
    Ok(3)
}

/// Encode a `u32` value as a Major Type 0 item, always using the four byte form.
#[inline]
#[cfg_attr(feature = "trace", trace)]
pub fn encode_uint32(v: u32, buf: &mut [u8]) -> Result<usize> {
    if buf.len() < 5 {
        return Err(CborError::EndOfBuffer);
    }
    buf[0] = MT_UINT | PAYLOAD_FOUR_BYTES;
    buf[1..5].copy_from_slice(&v.to_be_bytes());
    Ok(5)
}

/// Encode a `u64` value as a Major Type 0 item, always using the eight byte form.
#[inline]
#[cfg_attr(feature = "trace", trace)]
pub fn encode_uint64(v: u64, buf: &mut [u8]) -> Result<usize> {
    if buf.len() < 9 {
        return Err(CborError::EndOfBuffer);
    }
    buf[0] = MT_UINT | PAYLOAD_EIGHT_BYTES;
    buf[1..9].copy_from_slice(&v.to_be_bytes());
    Ok(9)
}

/// Encode a negative integer as a Major Type 1 item. The argument is the CBOR encoded
/// magnitude, i.e. `-1 - n` is the represented value.
#[inline]
#[cfg_attr(feature = "trace", trace)]
pub fn encode_negint8(n: u8, buf: &mut [u8]) -> Result<usize> {
    encode_w8(MT_NINT, n, buf)
}

/// Encode a negative integer as a Major Type 1 item, always using the two byte form.
#[inline]
#[cfg_attr(feature = "trace", trace)]
pub fn encode_negint16(n: u16, buf: &mut [u8]) -> Result<usize> {
    if buf.len() < 3 {
        return Err(CborError::EndOfBuffer);
    }
    buf[0] = MT_NINT | PAYLOAD_TWO_BYTES;
    buf[1..3].copy_from_slice(&n.to_be_bytes());
    Ok(3)
}

/// Encode a negative integer as a Major Type 1 item, always using the four byte form.
#[inline]
#[cfg_attr(feature = "trace", trace)]
pub fn encode_negint32(n: u32, buf: &mut [u8]) -> Result<usize> {
    if buf.len() < 5 {
        return Err(CborError::EndOfBuffer);
    }
    buf[0] = MT_NINT | PAYLOAD_FOUR_BYTES;
    buf[1..5].copy_from_slice(&n.to_be_bytes());
    Ok(5)
}

/// Encode a negative integer as a Major Type 1 item, always using the eight byte form.
#[inline]
#[cfg_attr(feature = "trace", trace)]
pub fn encode_negint64(n: u64, buf: &mut [u8]) -> Result<usize> {
    if buf.len() < 9 {
        return Err(CborError::EndOfBuffer);
    }
    buf[0] = MT_NINT | PAYLOAD_EIGHT_BYTES;
    buf[1..9].copy_from_slice(&n.to_be_bytes());
    Ok(9)
}

/***************************************************************************************************
 * Floats
 **************************************************************************************************/

/// Encode an `f16` value as a half precision float item.
#[inline]
#[cfg_attr(feature = "trace", trace)]
pub fn encode_half(v: f16, buf: &mut [u8]) -> Result<usize> {
    if buf.len() < 3 {
        return Err(CborError::EndOfBuffer);
    }
    buf[0] = MT_SIMPLE | PAYLOAD_TWO_BYTES;
    buf[1..3].copy_from_slice(&v.to_be_bytes());
    Ok(3)
}

/// Encode an `f32` value as a single precision float item.
#[inline]
#[cfg_attr(feature = "trace", trace)]
pub fn encode_single(v: f32, buf: &mut [u8]) -> Result<usize> {
    if buf.len() < 5 {
        return Err(CborError::EndOfBuffer);
    }
    buf[0] = MT_SIMPLE | PAYLOAD_FOUR_BYTES;
    buf[1..5].copy_from_slice(&v.to_be_bytes());
    Ok(5)
}

/// Encode an `f64` value as a double precision float item.
#[inline]
#[cfg_attr(feature = "trace", trace)]
pub fn encode_double(v: f64, buf: &mut [u8]) -> Result<usize> {
    if buf.len() < 9 {
        return Err(CborError::EndOfBuffer);
    }
    buf[0] = MT_SIMPLE | PAYLOAD_EIGHT_BYTES;
    buf[1..9].copy_from_slice(&v.to_be_bytes());
    Ok(9)
}

/***************************************************************************************************
 * Booleans, null, undefined and simple values
 **************************************************************************************************/

/// Encode a boolean value.
#[inline]
#[cfg_attr(feature = "trace", trace)]
pub fn encode_bool(v: bool, buf: &mut [u8]) -> Result<usize> {
    if buf.is_empty() {
        return Err(CborError::EndOfBuffer);
    }
    buf[0] = MT_SIMPLE | if v { 21 } else { 20 };
    Ok(1)
}

/// Encode the null value.
#[inline]
#[cfg_attr(feature = "trace", trace)]
pub fn encode_null(buf: &mut [u8]) -> Result<usize> {
    if buf.is_empty() {
        return Err(CborError::EndOfBuffer);
    }
    buf[0] = MT_SIMPLE | 22;
    Ok(1)
}

/// Encode the undefined value.
#[inline]
#[cfg_attr(feature = "trace", trace)]
pub fn encode_undef(buf: &mut [u8]) -> Result<usize> {
    if buf.is_empty() {
        return Err(CborError::EndOfBuffer);
    }
    buf[0] = MT_SIMPLE | 23;
    Ok(1)
}

/// Encode a simple value. Values 20..=31 are reserved for specific usage or are illegal as
/// simple values, so they are rejected here.
#[cfg_attr(feature = "trace", trace)]
pub fn encode_ctrl(v: u8, buf: &mut [u8]) -> Result<usize> {
    match v {
        0..=19 => {
            if buf.is_empty() {
                return Err(CborError::EndOfBuffer);
            }
            buf[0] = MT_SIMPLE | v;
            Ok(1)
        }
        20..=31 => Err(CborError::MalformedEncoding),
        _ => {
            if buf.len() < 2 {
                return Err(CborError::EndOfBuffer);
            }
            buf[0] = MT_SIMPLE | PAYLOAD_ONE_BYTE;
            buf[1] = v;
            Ok(2)
        }
    }
}

/***************************************************************************************************
 * Container and string headers
 **************************************************************************************************/

/// Encode a definite-length map header for `n_pairs` key/value pairs.
#[inline]
#[cfg_attr(feature = "trace", trace)]
pub fn encode_map_start(n_pairs: u64, buf: &mut [u8]) -> Result<usize> {
    encode_type_value(MT_MAP, n_pairs, buf)
}

/// Encode a definite-length text string header for a payload of `len` bytes. The caller writes
/// the payload immediately after the header.
#[inline]
#[cfg_attr(feature = "trace", trace)]
pub fn encode_tstr_header(len: u64, buf: &mut [u8]) -> Result<usize> {
    encode_type_value(MT_TSTR, len, buf)
}

/// Encode a definite-length byte string header for a payload of `len` bytes. The caller writes
/// the payload immediately after the header.
#[inline]
#[cfg_attr(feature = "trace", trace)]
pub fn encode_bstr_header(len: u64, buf: &mut [u8]) -> Result<usize> {
    encode_type_value(MT_BSTR, len, buf)
}

/***************************************************************************************************
 * Private helper functions
 **************************************************************************************************/

/// Encode a value on the eight bit width class: AI bits below 24, one following byte otherwise.
#[inline]
fn encode_w8(mt: u8, v: u8, buf: &mut [u8]) -> Result<usize> {
    if v < 24 {
        if buf.is_empty() {
            return Err(CborError::EndOfBuffer);
        }
        buf[0] = mt | v;
        Ok(1)
    } else {
        if buf.len() < 2 {
            return Err(CborError::EndOfBuffer);
        }
        buf[0] = mt | PAYLOAD_ONE_BYTE;
        buf[1] = v;
        Ok(2)
    }
}

/// Encode an unsigned value with the given major type using preferred serialization as defined
/// in RFC8949. Used for container and string headers, where sizes must always use the
/// shortest available representation.
#[cfg_attr(feature = "trace", trace)]
fn encode_type_value(mt: u8, v: u64, buf: &mut [u8]) -> Result<usize> {
    let vs = v.to_be_bytes();
    if v < 24 {
        if buf.is_empty() {
            return Err(CborError::EndOfBuffer);
        }
        buf[0] = mt | vs[7];
        Ok(1)
    } else if v <= u8::MAX as u64 {
        if buf.len() < 2 {
            return Err(CborError::EndOfBuffer);
        }
        buf[0] = mt | PAYLOAD_ONE_BYTE;
        buf[1] = vs[7];
        Ok(2)
    } else if v <= u16::MAX as u64 {
        if buf.len() < 3 {
            return Err(CborError::EndOfBuffer);
        }
        buf[0] = mt | PAYLOAD_TWO_BYTES;
        buf[1..3].copy_from_slice(&vs[6..=7]);
        Ok(3)
    } else if v <= u32::MAX as u64 {
        if buf.len() < 5 {
            return Err(CborError::EndOfBuffer);
        }
        buf[0] = mt | PAYLOAD_FOUR_BYTES;
        buf[1..5].copy_from_slice(&vs[4..=7]);
        Ok(5)
    } else {
        if buf.len() < 9 {
            return Err(CborError::EndOfBuffer);
        }
        buf[0] = mt | PAYLOAD_EIGHT_BYTES;
        buf[1..9].copy_from_slice(&vs[0..=7]);
        Ok(9)
    }
}
