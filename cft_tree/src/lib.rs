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
 * cft_tree module definition
 *
 * A file-backed, streaming editor for CBOR configuration documents. The document is a nested
 * tree of string-keyed maps with scalar leaves; operations are addressed by slash-delimited
 * pointers and stream the file through a bounded window, never holding more than a small
 * working set in memory.
 **************************************************************************************************/

#![warn(missing_docs)]

//! # CFT_TREE
//!
//! The `cft_tree` crate edits configuration documents stored as a restricted subset of CBOR:
//! a definite-length map of text-string keys whose values are scalars or further maps. Four
//! primitive operations are exposed on [`ConfigTree`], each addressed by a pointer such as
//! `/network/mtu`:
//!
//! - **get** a scalar,
//! - **set** (overwrite) a scalar, returning the previous value,
//! - **insert** a new key, creating missing intermediate maps,
//! - **erase** a key or a whole map subtree.
//!
//! All operations stream the file through a fixed window: a locate pass finds the target (or
//! the deepest existing ancestor where an insert must anchor), and mutating operations run a
//! second pass that re-encodes the document into a temporary file with only the affected map
//! header and pair changed, then atomically replaces the original. A reader concurrent with a
//! mutation observes either the old or the new file, never a partial write.
//!
//! ## Example
//!
//! ```no_run
//! use cft_tree::{ConfigTree, Item};
//!
//! fn main() -> cft_tree::Result<()> {
//!     let mut tree = ConfigTree::open("device.cbor")?;
//!     tree.insert("/network/metric", Item::uint8(10))?;
//!     let old = tree.set_scalar("/network/name", Item::text("eth0"))?;
//!     println!("name was {:?}", old);
//!     tree.erase("/network/metric")?;
//!     Ok(())
//! }
//! ```

pub(crate) mod item;
pub(crate) mod locate;
pub(crate) mod pointer;
pub(crate) mod rewrite;
pub(crate) mod stack;
pub(crate) mod stream;
pub(crate) mod tree;

/// The `constants` module fixes the bounds on nesting depth, pointer length, value size and
/// the streaming window.
pub mod constants;

/// The `error` module contains error definitions and the stable numeric codes used throughout
/// `cft_tree`.
pub mod error;

pub use error::{CftError, Result};
pub use item::Item;
pub use pointer::Pointer;
pub use tree::ConfigTree;

// The encoded width accompanies every integer item, so it is part of this crate's API.
pub use cft_cbor::decoder::IntWidth;
