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
 * Pointer utilities
 *
 * Slash-delimited pointers addressing keys and maps in a configuration tree. A map's own
 * pointer always ends in '/', a leaf's never does; the root map is "/". These primitives carry
 * both the target matching and the "should we descend into this map" decisions for the
 * streaming visitors.
 **************************************************************************************************/
use crate::constants::{MAX_POINTER_LEN, ROOT_POINTER};
use crate::error::{CftError, Result};

use std::fmt;

/// An owned, validated, bounded pointer.
///
/// Invariants: starts with `/`, contains no empty segment, and is at most
/// [`MAX_POINTER_LEN`] bytes. A trailing `/` marks a map pointer; the root map is `"/"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pointer(String);

impl Pointer {
    /// The pointer of the root map.
    pub fn root() -> Self {
        Pointer(String::from(ROOT_POINTER))
    }

    /// Parse and validate a pointer.
    ///
    /// Syntax errors (missing leading `/`, empty segment) yield `PointerNotFound`, since such
    /// a pointer cannot address anything; a pointer longer than [`MAX_POINTER_LEN`] yields
    /// `InsufficientPathBuffer`.
    pub fn parse(s: &str) -> Result<Self> {
        if s.len() > MAX_POINTER_LEN {
            return Err(CftError::InsufficientPathBuffer);
        }
        if !s.starts_with('/') {
            return Err(CftError::PointerNotFound);
        }
        if s != ROOT_POINTER {
            // Trailing '/' is allowed (map pointer), interior empty segments are not.
            let body = s[1..].strip_suffix('/').unwrap_or(&s[1..]);
            if body.is_empty() || body.split('/').any(|seg| seg.is_empty()) {
                return Err(CftError::PointerNotFound);
            }
        }
        Ok(Pointer(String::from(s)))
    }

    /// The pointer as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if this pointer addresses a map rather than a leaf.
    pub fn is_map(&self) -> bool {
        self.0.ends_with('/')
    }

    /// True if this is the root map pointer.
    pub fn is_root(&self) -> bool {
        self.0 == ROOT_POINTER
    }

    /// The pointer of the map containing this leaf: the longest prefix ending in `/`.
    pub fn parent(&self) -> Pointer {
        match self.0.rfind('/') {
            Some(idx) => Pointer(String::from(&self.0[..=idx])),
            // Unreachable for a validated pointer, but the root is the safe answer.
            None => Pointer::root(),
        }
    }

    /// The segment after the final `/`.
    pub fn last_segment(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    /// True iff `self` is a prefix of `other` respecting segment boundaries: either `self`
    /// ends in `/`, or the match ends exactly at a `/` or at the end of `other`. This is what
    /// distinguishes `/a` being a prefix of `/a/b` from it merely sharing characters with
    /// `/ab`.
    pub fn is_prefix_of(&self, other: &Pointer) -> bool {
        if !other.0.starts_with(&self.0) {
            return false;
        }
        self.is_map() || other.0.len() == self.0.len() || other.0.as_bytes()[self.0.len()] == b'/'
    }

    /// The leaf pointer of `key` within this map. `self` must be a map pointer.
    pub fn join(&self, key: &str) -> Result<Pointer> {
        debug_assert!(self.is_map());
        if self.0.len() + key.len() > MAX_POINTER_LEN {
            return Err(CftError::InsufficientPathBuffer);
        }
        let mut s = String::with_capacity(self.0.len() + key.len());
        s.push_str(&self.0);
        s.push_str(key);
        Ok(Pointer(s))
    }

    /// The map pointer of the map stored under `key` within this map: `join` plus the
    /// trailing `/`.
    pub fn child_map(&self, key: &str) -> Result<Pointer> {
        debug_assert!(self.is_map());
        if self.0.len() + key.len() + 1 > MAX_POINTER_LEN {
            return Err(CftError::InsufficientPathBuffer);
        }
        let mut s = String::with_capacity(self.0.len() + key.len() + 1);
        s.push_str(&self.0);
        s.push_str(key);
        s.push('/');
        Ok(Pointer(s))
    }

    /// The segments of this pointer below the map pointer `prefix`, in order. Used to spell
    /// out the key chain that must be synthesized when inserting below an anchor map.
    pub fn segments_after<'p>(&'p self, prefix: &Pointer) -> impl Iterator<Item = &'p str> {
        debug_assert!(prefix.is_prefix_of(self) || prefix.is_root());
        self.0[prefix.0.len().min(self.0.len())..]
            .split('/')
            .filter(|seg| !seg.is_empty())
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Pointer {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
