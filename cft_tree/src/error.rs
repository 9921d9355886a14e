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
 * cft_tree Error API
 *
 * Operation errors for the configuration file tree. The numeric codes are stable and shared
 * with other implementations of the same storage format, so variants must not be reordered.
 **************************************************************************************************/
use std::result;

use cft_cbor::error::CborError;
use thiserror::Error;

/// An alias for Result<T, CftError> used throughout this crate.
pub type Result<T> = result::Result<T, CftError>;

/// The numeric code reported for a successful operation.
pub const CODE_OK: u32 = 0;

/// `CftError` describes every way a tree operation can fail. Declaration order fixes the
/// numeric code of each variant (success is code 0, `PointerNotFound` is 1, and so on).
#[derive(Copy, Clone, PartialEq, Eq, Error, Debug)]
pub enum CftError {
    /// The pointer does not exist in the document.
    #[error("pointer does not exist")]
    PointerNotFound,
    /// The stored value is of a different kind or width than the one requested, or the pointer
    /// descends through a scalar.
    #[error("wrong data type")]
    WrongDataType,
    /// A value exceeds the configured item buffer size.
    #[error("buffer is not large enough for value")]
    InsufficientBuffer,
    /// The scratch buffer cannot hold an encoded item head.
    #[error("buffer is not large enough for data item initial bytes")]
    InsufficientInitBytesBuffer,
    /// A pointer or file path exceeds the configured path buffer size.
    #[error("buffer is not large enough to store path")]
    InsufficientPathBuffer,
    /// A working buffer could not be allocated.
    #[error("fail to allocate buffer")]
    AllocError,
    /// The document contains a CBOR type outside the accepted subset (array, tag or
    /// indefinite-length item), or nests deeper than the configured maximum.
    #[error("CBOR type not allowed")]
    TypeNotAllowed,
    /// The document is not well-formed CBOR, or its structure violates the key/value shape.
    #[error("malformed data")]
    MalformedData,
    /// The pointer addresses a map where a scalar is required.
    #[error("pointer should not be a map")]
    PointerIsMap,
    /// The temporary output file could not be created or written.
    #[error("fail to create temp file")]
    CreateTempFileError,
    /// The source file could not be opened or read.
    #[error("fail to open file")]
    OpenFileError,
}

impl CftError {
    /// The stable numeric code of this error, as used by other implementations of the same
    /// format over their C language APIs.
    pub fn code(&self) -> u32 {
        match self {
            Self::PointerNotFound => 1,
            Self::WrongDataType => 2,
            Self::InsufficientBuffer => 3,
            Self::InsufficientInitBytesBuffer => 4,
            Self::InsufficientPathBuffer => 5,
            Self::AllocError => 6,
            Self::TypeNotAllowed => 7,
            Self::MalformedData => 8,
            Self::PointerIsMap => 9,
            Self::CreateTempFileError => 10,
            Self::OpenFileError => 11,
        }
    }
}

/// Convert codec errors into operation errors. `NoMoreBytes` is handled inside the streaming
/// driver and only maps here if it escapes, in which case the document was truncated.
impl From<CborError> for CftError {
    fn from(e: CborError) -> Self {
        match e {
            CborError::OutOfRange | CborError::IncompatibleType => CftError::WrongDataType,
            CborError::EndOfBuffer => CftError::InsufficientInitBytesBuffer,
            CborError::NotAllowed => CftError::TypeNotAllowed,
            CborError::UTF8Error
            | CborError::BadSliceLength
            | CborError::MalformedEncoding
            | CborError::NoMoreBytes(_) => CftError::MalformedData,
        }
    }
}
