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
 * Rewrite pass
 *
 * Streams the source again and emits the equivalent bytes into the output, with the surgical
 * edits dictated by the operation mode: a replaced value (set), a bumped map header plus a
 * synthesized key chain (insert), or a shrunk map header plus a suppressed pair (erase).
 * Everything else is re-encoded verbatim at its original width.
 **************************************************************************************************/
use crate::error::{CftError, Result};
use crate::item::Item;
use crate::pointer::Pointer;
use crate::stack::{ContainerStack, Frame};
use crate::stream::Visitor;

use cft_cbor::decoder::Event;
use cft_cbor::encoder::*;

use std::io::Write;

use tracing::debug;

/// The operation a rewrite pass performs. Carried per pass, so no mode state outlives a call.
#[derive(Debug)]
pub(crate) enum Mode {
    /// Replace the value at `target`, which the locate pass confirmed to exist.
    Set {
        /// Pointer being overwritten
        target: Pointer,
        /// Replacement value
        item: Item,
    },
    /// Insert `target`, which does not exist; `anchor` is its deepest existing ancestor map.
    Insert {
        /// Pointer being created
        target: Pointer,
        /// Deepest existing ancestor map, from the locate pass
        anchor: Pointer,
        /// Value of the new leaf
        item: Item,
    },
    /// Remove `target`; `parent` is the map holding it.
    Erase {
        /// Pointer being removed; may address a scalar or a whole map subtree
        target: Pointer,
        /// The map containing the target's final segment
        parent: Pointer,
    },
}

impl Mode {
    fn target(&self) -> &Pointer {
        match self {
            Mode::Set { target, .. } => target,
            Mode::Insert { target, .. } => target,
            Mode::Erase { target, .. } => target,
        }
    }
}

/// Encode visitor for the rewrite pass.
pub(crate) struct RewriteVisitor<W: Write> {
    mode: Mode,
    stack: ContainerStack,
    out: W,
    applied: bool,
}

impl<W: Write> RewriteVisitor<W> {
    pub fn new(mode: Mode, out: W) -> RewriteVisitor<W> {
        RewriteVisitor {
            mode,
            stack: ContainerStack::new(),
            out,
            applied: false,
        }
    }

    /// True once the edit has been performed: the new value written, the chain synthesized or
    /// the erased pair suppressed.
    pub fn applied(&self) -> bool {
        self.applied
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    fn map_start(&mut self, size: u64) -> Result<()> {
        let (map_path, ignore, erased_subtree) = match self.stack.top() {
            Some(parent) => {
                if parent.current_key.is_empty() {
                    return Err(CftError::MalformedData);
                }
                let candidate = parent.map_path.join(&parent.current_key)?;
                let erased_subtree = match &self.mode {
                    Mode::Erase { target, .. } => candidate == *target,
                    _ => false,
                };
                if candidate == *self.mode.target() && !erased_subtree {
                    return Err(CftError::PointerIsMap);
                }
                (
                    parent.map_path.child_map(&parent.current_key)?,
                    parent.ignore || erased_subtree,
                    erased_subtree,
                )
            }
            None => (Pointer::root(), false, false),
        };

        if ignore {
            debug!("map start suppressed, map_pointer = {}", map_path);
            if erased_subtree {
                self.applied = true;
            }
            self.stack.push(Frame::new(map_path, size, true))?;
            if size == 0 {
                self.stack.collapse_completed();
            }
            return Ok(());
        }

        // The emitted header may differ from the declared size, but the frame keeps the
        // declared size: pair accounting follows the source document, not the output.
        let mut emitted = size;
        match &self.mode {
            Mode::Insert { anchor, .. } if map_path == *anchor => {
                emitted = size + 1;
            }
            Mode::Erase { parent, .. } if map_path == *parent => {
                emitted = match size.checked_sub(1) {
                    Some(n) => n,
                    None => return Err(CftError::MalformedData),
                };
            }
            _ => {}
        }
        debug!(
            "map start, size = {}, emitted = {}, map_pointer = {}",
            size, emitted, map_path
        );
        let mut head = [0u8; MAX_HEAD_LEN];
        let written = encode_map_start(emitted, &mut head)?;
        self.write_bytes(&head[..written])?;

        let is_anchor = match &self.mode {
            Mode::Insert { anchor, .. } => map_path == *anchor,
            _ => false,
        };
        self.stack.push(Frame::new(map_path, size, false))?;
        if is_anchor {
            self.emit_insert_chain()?;
        }
        if size == 0 {
            self.stack.collapse_completed();
        }
        Ok(())
    }

    /// Write the trailing segments of the target below the anchor: every intermediate segment
    /// becomes a one-entry map, the final segment carries the new value. The synthesized pair
    /// becomes the anchor map's first entry; the original pairs follow.
    fn emit_insert_chain(&mut self) -> Result<()> {
        let (target, anchor, item) = match &self.mode {
            Mode::Insert {
                target,
                anchor,
                item,
            } => (target, anchor, item),
            _ => return Ok(()),
        };
        let segments: Vec<&str> = target.segments_after(anchor).collect();
        let mut head = [0u8; MAX_HEAD_LEN];
        let mut bytes = Vec::new();
        for (i, segment) in segments.iter().enumerate() {
            let written = encode_tstr_header(segment.len() as u64, &mut head)?;
            bytes.extend_from_slice(&head[..written]);
            bytes.extend_from_slice(segment.as_bytes());
            if i + 1 < segments.len() {
                let written = encode_map_start(1, &mut head)?;
                bytes.extend_from_slice(&head[..written]);
            }
        }
        debug!("insert chain below {} for {}", anchor, target);
        self.out
            .write_all(&bytes)
            .map_err(|_| CftError::CreateTempFileError)?;
        item.encode_into(&mut self.out)?;
        self.applied = true;
        Ok(())
    }

    fn write_key(&mut self, key: &str) -> Result<()> {
        let top = match self.stack.top_mut() {
            Some(top) => top,
            None => return Err(CftError::MalformedData),
        };
        let joined = top.map_path.join(key)?;
        top.current_key.clear();
        top.current_key.push_str(key);
        let suppress = top.ignore
            || match &self.mode {
                Mode::Erase { target, .. } => joined == *target,
                _ => false,
            };
        if suppress {
            debug!("key suppressed: {}", joined);
            return Ok(());
        }
        let mut head = [0u8; MAX_HEAD_LEN];
        let written = encode_tstr_header(key.len() as u64, &mut head)?;
        let mut bytes = Vec::with_capacity(written + key.len());
        bytes.extend_from_slice(&head[..written]);
        bytes.extend_from_slice(key.as_bytes());
        self.write_bytes(&bytes)
    }

    fn value(&mut self, ev: &Event<'_>) -> Result<()> {
        let top = match self.stack.top() {
            Some(top) => top,
            None => return Err(CftError::MalformedData),
        };
        if top.current_key.is_empty() {
            return Err(CftError::MalformedData);
        }
        let full = top.map_path.join(&top.current_key)?;
        let ignore = top.ignore;
        let is_target = full == *self.mode.target();

        self.stack.complete_value();

        if ignore {
            return Ok(());
        }
        if is_target {
            match &self.mode {
                Mode::Set { item, .. } | Mode::Insert { item, .. } => {
                    debug!("set {} = {}", full, item);
                    item.encode_into(&mut self.out)?;
                }
                Mode::Erase { .. } => {
                    debug!("erase {}", full);
                }
            }
            self.applied = true;
            return Ok(());
        }
        self.emit_event(ev)
    }

    /// Re-encode a scalar event byte-identically.
    fn emit_event(&mut self, ev: &Event<'_>) -> Result<()> {
        use cft_cbor::decoder::IntWidth::*;

        let mut head = [0u8; MAX_HEAD_LEN];
        let (written, payload): (usize, &[u8]) = match ev {
            Event::UInt(W8, v) => (encode_uint8(*v as u8, &mut head)?, &[]),
            Event::UInt(W16, v) => (encode_uint16(*v as u16, &mut head)?, &[]),
            Event::UInt(W32, v) => (encode_uint32(*v as u32, &mut head)?, &[]),
            Event::UInt(W64, v) => (encode_uint64(*v, &mut head)?, &[]),
            Event::NInt(W8, v) => (encode_negint8(*v as u8, &mut head)?, &[]),
            Event::NInt(W16, v) => (encode_negint16(*v as u16, &mut head)?, &[]),
            Event::NInt(W32, v) => (encode_negint32(*v as u32, &mut head)?, &[]),
            Event::NInt(W64, v) => (encode_negint64(*v, &mut head)?, &[]),
            Event::Float16(v) => (encode_half(*v, &mut head)?, &[]),
            Event::Float32(v) => (encode_single(*v, &mut head)?, &[]),
            Event::Float64(v) => (encode_double(*v, &mut head)?, &[]),
            Event::Bool(v) => (encode_bool(*v, &mut head)?, &[]),
            Event::Null => (encode_null(&mut head)?, &[]),
            Event::Undefined => (encode_undef(&mut head)?, &[]),
            Event::Simple(v) => (encode_ctrl(*v, &mut head)?, &[]),
            Event::Bstr(b) => (encode_bstr_header(b.len() as u64, &mut head)?, *b),
            Event::Tstr(s) => (encode_tstr_header(s.len() as u64, &mut head)?, s.as_bytes()),
            Event::MapStart(_)
            | Event::ArrayStart(_)
            | Event::Tag(_)
            | Event::IndefiniteStart
            | Event::Break => return Err(CftError::TypeNotAllowed),
        };
        self.out
            .write_all(&head[..written])
            .and_then(|_| self.out.write_all(payload))
            .map_err(|_| CftError::CreateTempFileError)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.out
            .write_all(bytes)
            .map_err(|_| CftError::CreateTempFileError)
    }
}

impl<W: Write> Visitor for RewriteVisitor<W> {
    fn on_event(&mut self, ev: &Event<'_>) -> Result<()> {
        match ev {
            Event::MapStart(size) => self.map_start(*size),
            Event::ArrayStart(_) | Event::Tag(_) | Event::IndefiniteStart | Event::Break => {
                Err(CftError::TypeNotAllowed)
            }
            Event::Tstr(s) => {
                let is_key = self
                    .stack
                    .top()
                    .map(|top| top.current_key.is_empty())
                    .unwrap_or(false);
                if is_key {
                    self.write_key(s)
                } else {
                    self.value(ev)
                }
            }
            _ => self.value(ev),
        }
    }

    /// A rewrite pass always copies the whole document.
    fn finished(&self) -> bool {
        false
    }
}
