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
 * Scalar items
 *
 * The owned representation of a scalar value captured from, or destined for, a configuration
 * document. Integers and floats carry their encoded width so that writing an item back
 * reproduces the original bytes; maps are containers and never appear here.
 **************************************************************************************************/
use crate::constants::MAX_ITEM_LEN;
use crate::error::{CftError, Result};

use cft_cbor::decoder::{Event, IntWidth};
use cft_cbor::encoder::*;

use std::convert::TryFrom;
use std::fmt;
use std::io::Write;

use half::f16;

/// One scalar value. The width on integer variants is the encoded width, not the smallest
/// width the value fits; negative integers store the CBOR magnitude minus one.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// Positive integer
    UInt(IntWidth, u64),
    /// Negative integer, value is `-1 - n`
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
    /// Simple value outside the reserved range
    Simple(u8),
    /// Byte string
    Bstr(Vec<u8>),
    /// Text string
    Tstr(String),
}

impl Item {
    /// Shorthand for a text string item.
    pub fn text<S: Into<String>>(s: S) -> Item {
        Item::Tstr(s.into())
    }

    /// Shorthand for a positive integer on the eight bit width.
    pub fn uint8(v: u8) -> Item {
        Item::UInt(IntWidth::W8, v as u64)
    }

    /// The payload length of a string item, zero for anything else. Used to enforce the
    /// bounded item size.
    pub fn payload_len(&self) -> usize {
        match self {
            Item::Bstr(b) => b.len(),
            Item::Tstr(s) => s.len(),
            _ => 0,
        }
    }

    /// Re-encode this item at its carried width, appending the bytes to `out`.
    pub(crate) fn encode_into<W: Write>(&self, out: &mut W) -> Result<()> {
        let mut head = [0u8; MAX_HEAD_LEN];
        let (written, payload): (usize, &[u8]) = match self {
            Item::UInt(IntWidth::W8, v) => (encode_uint8(narrow8(*v)?, &mut head)?, &[]),
            Item::UInt(IntWidth::W16, v) => (encode_uint16(narrow16(*v)?, &mut head)?, &[]),
            Item::UInt(IntWidth::W32, v) => (encode_uint32(narrow32(*v)?, &mut head)?, &[]),
            Item::UInt(IntWidth::W64, v) => (encode_uint64(*v, &mut head)?, &[]),
            Item::NInt(IntWidth::W8, v) => (encode_negint8(narrow8(*v)?, &mut head)?, &[]),
            Item::NInt(IntWidth::W16, v) => (encode_negint16(narrow16(*v)?, &mut head)?, &[]),
            Item::NInt(IntWidth::W32, v) => (encode_negint32(narrow32(*v)?, &mut head)?, &[]),
            Item::NInt(IntWidth::W64, v) => (encode_negint64(*v, &mut head)?, &[]),
            Item::Float16(v) => (encode_half(*v, &mut head)?, &[]),
            Item::Float32(v) => (encode_single(*v, &mut head)?, &[]),
            Item::Float64(v) => (encode_double(*v, &mut head)?, &[]),
            Item::Bool(v) => (encode_bool(*v, &mut head)?, &[]),
            Item::Null => (encode_null(&mut head)?, &[]),
            Item::Undefined => (encode_undef(&mut head)?, &[]),
            Item::Simple(v) => (encode_ctrl(*v, &mut head)?, &[]),
            Item::Bstr(b) => (encode_bstr_header(b.len() as u64, &mut head)?, b.as_slice()),
            Item::Tstr(s) => (encode_tstr_header(s.len() as u64, &mut head)?, s.as_bytes()),
        };
        out.write_all(&head[..written])
            .and_then(|_| out.write_all(payload))
            .map_err(|_| CftError::CreateTempFileError)
    }
}

/// Capture a decoded event as an owned item. String payloads are copied and bounded by
/// [`MAX_ITEM_LEN`]; container and tag events are not scalars and are rejected.
impl<'buf> TryFrom<&Event<'buf>> for Item {
    type Error = CftError;

    fn try_from(ev: &Event<'buf>) -> Result<Item> {
        match ev {
            Event::UInt(w, v) => Ok(Item::UInt(*w, *v)),
            Event::NInt(w, v) => Ok(Item::NInt(*w, *v)),
            Event::Float16(v) => Ok(Item::Float16(*v)),
            Event::Float32(v) => Ok(Item::Float32(*v)),
            Event::Float64(v) => Ok(Item::Float64(*v)),
            Event::Bool(v) => Ok(Item::Bool(*v)),
            Event::Null => Ok(Item::Null),
            Event::Undefined => Ok(Item::Undefined),
            Event::Simple(v) => Ok(Item::Simple(*v)),
            Event::Bstr(b) => {
                if b.len() > MAX_ITEM_LEN {
                    Err(CftError::InsufficientBuffer)
                } else {
                    Ok(Item::Bstr(b.to_vec()))
                }
            }
            Event::Tstr(s) => {
                if s.len() > MAX_ITEM_LEN {
                    Err(CftError::InsufficientBuffer)
                } else {
                    Ok(Item::Tstr(String::from(*s)))
                }
            }
            Event::MapStart(_)
            | Event::ArrayStart(_)
            | Event::Tag(_)
            | Event::IndefiniteStart
            | Event::Break => Err(CftError::TypeNotAllowed),
        }
    }
}

/***************************************************************************************************
 * Standard Trait Implementations: Try to convert an Item into a value. Always fallible
 **************************************************************************************************/

/// Attempt to convert an item into u8. The stored value must be a positive integer encoded on
/// the eight bit width.
impl TryFrom<&Item> for u8 {
    type Error = CftError;

    fn try_from(item: &Item) -> Result<u8> {
        match item {
            Item::UInt(IntWidth::W8, v) => u8::try_from(*v).map_err(|_| CftError::WrongDataType),
            _ => Err(CftError::WrongDataType),
        }
    }
}

/// Attempt to convert an item into u16. The stored value must be a positive integer encoded
/// on the sixteen bit width.
impl TryFrom<&Item> for u16 {
    type Error = CftError;

    fn try_from(item: &Item) -> Result<u16> {
        match item {
            Item::UInt(IntWidth::W16, v) => u16::try_from(*v).map_err(|_| CftError::WrongDataType),
            _ => Err(CftError::WrongDataType),
        }
    }
}

/// Attempt to convert an item into u32. The stored value must be a positive integer encoded
/// on the thirty-two bit width.
impl TryFrom<&Item> for u32 {
    type Error = CftError;

    fn try_from(item: &Item) -> Result<u32> {
        match item {
            Item::UInt(IntWidth::W32, v) => u32::try_from(*v).map_err(|_| CftError::WrongDataType),
            _ => Err(CftError::WrongDataType),
        }
    }
}

/// Attempt to convert an item into u64. The stored value must be a positive integer encoded
/// on the sixty-four bit width.
impl TryFrom<&Item> for u64 {
    type Error = CftError;

    fn try_from(item: &Item) -> Result<u64> {
        match item {
            Item::UInt(IntWidth::W64, v) => Ok(*v),
            _ => Err(CftError::WrongDataType),
        }
    }
}

/// Attempt to convert an item into i8.
///
/// Positive values fail if n > i8::MAX; negative values fail if n < i8::MIN. The width of
/// the stored encoding must be eight bits either way.
impl TryFrom<&Item> for i8 {
    type Error = CftError;

    fn try_from(item: &Item) -> Result<i8> {
        match item {
            Item::UInt(IntWidth::W8, v) => {
                if *v <= i8::MAX as u64 {
                    Ok(*v as i8)
                } else {
                    Err(CftError::WrongDataType)
                }
            }
            Item::NInt(IntWidth::W8, v) => {
                if *v <= i8::MAX as u64 {
                    Ok(-1 - (*v as i8))
                } else {
                    Err(CftError::WrongDataType)
                }
            }
            _ => Err(CftError::WrongDataType),
        }
    }
}

/// Attempt to convert an item into i16. Width and range rules follow the i8 conversion.
impl TryFrom<&Item> for i16 {
    type Error = CftError;

    fn try_from(item: &Item) -> Result<i16> {
        match item {
            Item::UInt(IntWidth::W16, v) => {
                if *v <= i16::MAX as u64 {
                    Ok(*v as i16)
                } else {
                    Err(CftError::WrongDataType)
                }
            }
            Item::NInt(IntWidth::W16, v) => {
                if *v <= i16::MAX as u64 {
                    Ok(-1 - (*v as i16))
                } else {
                    Err(CftError::WrongDataType)
                }
            }
            _ => Err(CftError::WrongDataType),
        }
    }
}

/// Attempt to convert an item into i32. Width and range rules follow the i8 conversion.
impl TryFrom<&Item> for i32 {
    type Error = CftError;

    fn try_from(item: &Item) -> Result<i32> {
        match item {
            Item::UInt(IntWidth::W32, v) => {
                if *v <= i32::MAX as u64 {
                    Ok(*v as i32)
                } else {
                    Err(CftError::WrongDataType)
                }
            }
            Item::NInt(IntWidth::W32, v) => {
                if *v <= i32::MAX as u64 {
                    Ok(-1 - (*v as i32))
                } else {
                    Err(CftError::WrongDataType)
                }
            }
            _ => Err(CftError::WrongDataType),
        }
    }
}

/// Attempt to convert an item into i64. Width and range rules follow the i8 conversion.
impl TryFrom<&Item> for i64 {
    type Error = CftError;

    fn try_from(item: &Item) -> Result<i64> {
        match item {
            Item::UInt(IntWidth::W64, v) => {
                if *v <= i64::MAX as u64 {
                    Ok(*v as i64)
                } else {
                    Err(CftError::WrongDataType)
                }
            }
            Item::NInt(IntWidth::W64, v) => {
                if *v <= i64::MAX as u64 {
                    Ok(-1 - (*v as i64))
                } else {
                    Err(CftError::WrongDataType)
                }
            }
            _ => Err(CftError::WrongDataType),
        }
    }
}

/// Attempt to convert an item into bool.
impl TryFrom<&Item> for bool {
    type Error = CftError;

    fn try_from(item: &Item) -> Result<bool> {
        match item {
            Item::Bool(v) => Ok(*v),
            _ => Err(CftError::WrongDataType),
        }
    }
}

/// Attempt to convert an item into f16.
impl TryFrom<&Item> for f16 {
    type Error = CftError;

    fn try_from(item: &Item) -> Result<f16> {
        match item {
            Item::Float16(v) => Ok(*v),
            _ => Err(CftError::WrongDataType),
        }
    }
}

/// Attempt to convert an item into f32.
impl TryFrom<&Item> for f32 {
    type Error = CftError;

    fn try_from(item: &Item) -> Result<f32> {
        match item {
            Item::Float32(v) => Ok(*v),
            _ => Err(CftError::WrongDataType),
        }
    }
}

/// Attempt to convert an item into f64.
impl TryFrom<&Item> for f64 {
    type Error = CftError;

    fn try_from(item: &Item) -> Result<f64> {
        match item {
            Item::Float64(v) => Ok(*v),
            _ => Err(CftError::WrongDataType),
        }
    }
}

/// Attempt to convert an item into a &str borrowing from the item.
impl<'i> TryFrom<&'i Item> for &'i str {
    type Error = CftError;

    fn try_from(item: &'i Item) -> Result<&'i str> {
        match item {
            Item::Tstr(s) => Ok(s.as_str()),
            _ => Err(CftError::WrongDataType),
        }
    }
}

/// Attempt to convert an item into a &[u8] borrowing from the item.
impl<'i> TryFrom<&'i Item> for &'i [u8] {
    type Error = CftError;

    fn try_from(item: &'i Item) -> Result<&'i [u8]> {
        match item {
            Item::Bstr(b) => Ok(b.as_slice()),
            _ => Err(CftError::WrongDataType),
        }
    }
}

/***************************************************************************************************
 * Display
 **************************************************************************************************/

/// Diagnostic-style rendering, used by the command line drivers.
impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Item::UInt(_, v) => write!(f, "{}", v),
            Item::NInt(_, v) => write!(f, "-{}", (*v as u128) + 1),
            Item::Float16(v) => write!(f, "{}", v),
            Item::Float32(v) => write!(f, "{}", v),
            Item::Float64(v) => write!(f, "{}", v),
            Item::Bool(v) => write!(f, "{}", v),
            Item::Null => f.write_str("null"),
            Item::Undefined => f.write_str("undefined"),
            Item::Simple(v) => write!(f, "simple({})", v),
            Item::Bstr(b) => {
                f.write_str("h'")?;
                for byte in b {
                    write!(f, "{:02x}", byte)?;
                }
                f.write_str("'")
            }
            Item::Tstr(s) => f.write_str(s),
        }
    }
}

/***************************************************************************************************
 * Private helper functions
 **************************************************************************************************/

fn narrow8(v: u64) -> Result<u8> {
    u8::try_from(v).map_err(|_| CftError::WrongDataType)
}

fn narrow16(v: u64) -> Result<u16> {
    u16::try_from(v).map_err(|_| CftError::WrongDataType)
}

fn narrow32(v: u64) -> Result<u32> {
    u32::try_from(v).map_err(|_| CftError::WrongDataType)
}
