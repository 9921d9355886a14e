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
 * cft_cbor module definition
 *
 * A small, memory efficient CBOR (RFC8949) codec restricted to definite-length items, exposing a
 * pull-style event decoder suitable for streaming a document through a fixed window. This
 * implementation is designed for use in constrained systems and requires neither the Rust
 * standard library nor an allocator.
 **************************************************************************************************/

// Default configuration
#![no_std]
#![warn(missing_docs)]

//! # CFT_CBOR
//!
//! The `cft_cbor` crate provides the CBOR codec underneath the configuration file tree library.
//! It is deliberately restricted to the subset of CBOR that configuration documents are allowed
//! to use: definite-length maps, definite-length text and byte strings, integers, floats,
//! booleans, `null`, `undefined` and simple values.
//!
//! Two properties distinguish it from a general-purpose CBOR implementation:
//!
//! - **Pull decoding over a window.** [`decoder::pull_event`] parses exactly one data item head
//!   (and, for strings, the payload) from the front of a byte slice and reports how many bytes
//!   it consumed. When the slice ends mid-item it fails with
//!   [`error::CborError::NoMoreBytes`] carrying the number of bytes the caller must make
//!   available before retrying, so a caller streaming a file through a fixed window can refill
//!   and resume without ever holding the whole document in memory.
//! - **Width preservation.** Integer events carry the encoded width
//!   ([`decoder::IntWidth`]), and the encoder provides one function per width
//!   ([`encoder::encode_uint16`] always emits the two-byte form, and so on), so a decoded
//!   scalar can be re-emitted byte-identically.
//!
//! Arrays, tags and indefinite-length items are recognised just far enough to be reported to
//! the caller, which is expected to reject them.

// Pull in std if we are testing or if it is defined as feature (because we run tests on a
// platform supporting I/O and full feature set.
#[cfg(any(feature = "std", test))]
extern crate std;

// If we are really building no_std, pull in core as well. It is aliased as std so that "use"
// statements are always the same
#[cfg(all(not(feature = "std"), not(test)))]
extern crate core as std;

extern crate half;

pub(crate) mod constants;
pub(crate) mod decode;
pub(crate) mod encode;

/// The `error` module contains error definitions used throughout `cft_cbor`.
pub mod error;

/// The `decoder` module exports the pull-style event decoder and the event types it produces.
pub mod decoder {
    pub use super::decode::{pull_event, Event, IntWidth};
}

/// The `encoder` module exports the width-preserving scalar encoders and the container/string
/// header encoders.
pub mod encoder {
    pub use super::encode::{
        encode_bool, encode_bstr_header, encode_ctrl, encode_double, encode_half,
        encode_map_start, encode_negint16, encode_negint32, encode_negint64, encode_negint8,
        encode_null, encode_single, encode_tstr_header, encode_uint16, encode_uint32,
        encode_uint64, encode_uint8, encode_undef, MAX_HEAD_LEN,
    };
}
