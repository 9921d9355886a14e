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
 * Locate pass
 *
 * Read-only walk over the document. Determines whether the target pointer exists; if it does,
 * captures its value; if it does not, records the deepest existing ancestor map (the insertion
 * anchor) so the rewrite pass knows where to synthesize missing structure.
 **************************************************************************************************/
use crate::error::{CftError, Result};
use crate::item::Item;
use crate::pointer::Pointer;
use crate::stack::{ContainerStack, Frame};
use crate::stream::Visitor;

use cft_cbor::decoder::Event;

use std::convert::TryFrom;

use tracing::debug;

/// The result of a locate pass.
#[derive(Debug)]
pub(crate) enum Outcome {
    /// The target exists and holds this scalar.
    Found(Item),
    /// The target does not exist; the pointer is its deepest existing ancestor map.
    Missing(Pointer),
}

/// Decode visitor for the locate pass.
pub(crate) struct LocateVisitor<'t> {
    target: &'t Pointer,
    stack: ContainerStack,
    outcome: Option<Outcome>,
}

impl<'t> LocateVisitor<'t> {
    pub fn new(target: &'t Pointer) -> LocateVisitor<'t> {
        LocateVisitor {
            target,
            stack: ContainerStack::new(),
            outcome: None,
        }
    }

    /// The pass result. If the walk ended without finding the target or a deeper anchor, the
    /// root map is the anchor.
    pub fn into_outcome(self) -> Outcome {
        self.outcome.unwrap_or_else(|| Outcome::Missing(Pointer::root()))
    }

    fn map_start(&mut self, size: u64) -> Result<()> {
        if let Some(parent) = self.stack.top() {
            if parent.current_key.is_empty() {
                // A map cannot be a key.
                return Err(CftError::MalformedData);
            }
            let candidate = parent.map_path.join(&parent.current_key)?;
            if candidate == *self.target {
                // The caller asked for a map; keys address scalars.
                return Err(CftError::PointerIsMap);
            }
            let ignore = parent.ignore || !parent.on_target_prefix;
            let map_path = parent.map_path.child_map(&parent.current_key)?;
            debug!("map start, size = {}, map_pointer = {}", size, map_path);
            self.stack.push(Frame::new(map_path, size, ignore))?;
        } else {
            // The root always matches the target's root.
            let mut frame = Frame::new(Pointer::root(), size, false);
            frame.on_target_prefix = true;
            debug!("map start, size = {}, map_pointer = /", size);
            self.stack.push(frame)?;
        }
        if size == 0 {
            // An empty map is a complete value of its parent's pending pair.
            let popped = self.stack.collapse_completed();
            self.record_anchor(&popped);
        }
        Ok(())
    }

    fn read_key(&mut self, key: &str) -> Result<()> {
        let target = self.target;
        let top = match self.stack.top_mut() {
            Some(top) => top,
            None => return Err(CftError::MalformedData),
        };
        let joined = top.map_path.join(key)?;
        top.current_key.clear();
        top.current_key.push_str(key);
        top.on_target_prefix = joined.is_prefix_of(target);
        Ok(())
    }

    fn value(&mut self, ev: &Event<'_>) -> Result<()> {
        let top = match self.stack.top() {
            Some(top) => top,
            None => return Err(CftError::MalformedData),
        };
        if top.current_key.is_empty() {
            // Scalars of non-string kind cannot be keys.
            return Err(CftError::MalformedData);
        }
        let full = top.map_path.join(&top.current_key)?;
        let on_target_prefix = top.on_target_prefix;
        let ignore = top.ignore;

        if on_target_prefix && full != *self.target {
            // The target descends past this key, but the key holds a scalar, not a map.
            debug!("wrong data type: \"{}\" should be a map", full);
            return Err(CftError::WrongDataType);
        }

        let popped = self.stack.complete_value();
        self.record_anchor(&popped);

        if on_target_prefix && !ignore && full == *self.target {
            let item = Item::try_from(ev)?;
            debug!("found {} = {}", full, item);
            self.outcome = Some(Outcome::Found(item));
        }
        Ok(())
    }

    /// Check every popped frame against its parent. A popped frame whose parent was still on
    /// the target prefix while the frame's own last key was not means the target's next
    /// segment does not exist in that map: the popped map is the insertion anchor.
    fn record_anchor(&mut self, popped: &[Frame]) {
        if self.outcome.is_some() {
            return;
        }
        for (i, frame) in popped.iter().enumerate() {
            let parent_on_prefix = match popped.get(i + 1) {
                Some(parent) => parent.on_target_prefix,
                None => self
                    .stack
                    .top()
                    .map(|top| top.on_target_prefix)
                    .unwrap_or(false),
            };
            if parent_on_prefix && !frame.on_target_prefix {
                debug!("insertion anchor = {}", frame.map_path);
                self.outcome = Some(Outcome::Missing(frame.map_path.clone()));
                return;
            }
        }
    }
}

impl<'t> Visitor for LocateVisitor<'t> {
    fn on_event(&mut self, ev: &Event<'_>) -> Result<()> {
        match ev {
            Event::MapStart(size) => self.map_start(*size),
            Event::ArrayStart(_) | Event::Tag(_) | Event::IndefiniteStart | Event::Break => {
                Err(CftError::TypeNotAllowed)
            }
            Event::Tstr(s) => {
                // A text string is a key when no key is pending, a value otherwise.
                let is_key = self
                    .stack
                    .top()
                    .map(|top| top.current_key.is_empty())
                    .unwrap_or(false);
                if is_key {
                    self.read_key(s)
                } else {
                    self.value(ev)
                }
            }
            _ => self.value(ev),
        }
    }

    fn finished(&self) -> bool {
        self.outcome.is_some()
    }
}
