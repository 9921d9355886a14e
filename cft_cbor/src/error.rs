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
 * cft_cbor Error API
 **************************************************************************************************/
use std::result;

#[cfg(any(feature = "std", test))]
use thiserror::Error;

/// An alias for Result<T, CborError> used throughout this crate.
pub type Result<T> = result::Result<T, CborError>;

/// `CborError` provides information about errors when decoding or encoding CBOR items.
#[cfg_attr(any(feature = "std", test), derive(Copy, Clone, PartialEq, Eq, Error, Debug))]
#[cfg_attr(all(not(feature = "std"), not(test)), derive(Copy, Clone, PartialEq, Eq, Debug))]
pub enum CborError {
    /// A number conversion has overflowed or underflowed.
    #[cfg_attr(any(feature = "std", test), error("Overflow or underflow in number conversion"))]
    OutOfRange,
    /// Attempt to convert an item to an incompatible type.
    #[cfg_attr(any(feature = "std", test), error("Attempt to convert an item of incompatible type"))]
    IncompatibleType,
    /// Slice length is incompatible with the target type conversion
    #[cfg_attr(any(feature = "std", test), error("Slice length is incompatible with the target type conversion"))]
    BadSliceLength,
    /// Buffer too short to encode the next item
    #[cfg_attr(any(feature = "std", test), error("Buffer insufficient to encode the next item"))]
    EndOfBuffer,
    /// A tstr input contains an invalid UTF8 sequence
    #[cfg_attr(any(feature = "std", test), error("A tstr contains an invalid UTF8 sequence"))]
    UTF8Error,
    /// Encoding is illegal or unsupported
    #[cfg_attr(any(feature = "std", test), error("Encoding is illegal or unsupported"))]
    MalformedEncoding,
    /// The window does not hold the complete next item. The payload is the total number of bytes
    /// the item occupies from the start of the window; the caller should refill and retry.
    #[cfg_attr(any(feature = "std", test), error("Window too short for the next item - this is usually recoverable"))]
    NoMoreBytes(usize),
    /// The type read is not allowed here.
    #[cfg_attr(any(feature = "std", test), error("Type not allowed here"))]
    NotAllowed,
}
