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
 * Operation façade
 *
 * Orchestrates the streaming passes behind the four primitive operations. A read is one
 * locate pass; a mutation is a locate pass followed by a rewrite pass into a temporary file
 * that atomically replaces the original on success.
 **************************************************************************************************/
use crate::constants::{MAX_ITEM_LEN, MAX_PATH_LEN, SCAN_WINDOW_LEN};
use crate::error::{CftError, Result};
use crate::item::Item;
use crate::locate::{LocateVisitor, Outcome};
use crate::pointer::Pointer;
use crate::rewrite::{Mode, RewriteVisitor};
use crate::stream::{run_pass, Window};

use std::convert::TryFrom;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

/// A file-backed configuration tree.
///
/// The context owns all working memory (the scan window, the container stack and the pointer
/// strings live for the duration of one operation call); nothing escapes an operation except
/// the captured value. Buffers are released when the context is dropped.
///
/// The context is single-owner and performs no synchronization: callers must serialize access
/// to the same file.
#[derive(Debug)]
pub struct ConfigTree {
    path: PathBuf,
    scan_buf: Vec<u8>,
}

impl ConfigTree {
    /// Open a configuration tree backed by the file at `path`.
    ///
    /// The file must exist and be readable; its content is not validated until the first
    /// operation streams it.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<ConfigTree> {
        let path = path.as_ref();
        if path.as_os_str().len() > MAX_PATH_LEN {
            return Err(CftError::InsufficientPathBuffer);
        }
        File::open(path).map_err(|_| CftError::OpenFileError)?;
        let mut scan_buf = Vec::new();
        scan_buf
            .try_reserve_exact(SCAN_WINDOW_LEN)
            .map_err(|_| CftError::AllocError)?;
        scan_buf.resize(SCAN_WINDOW_LEN, 0);
        info!("opened configuration tree at {}", path.display());
        Ok(ConfigTree {
            path: path.to_path_buf(),
            scan_buf,
        })
    }

    /// Return the scalar stored at `pointer`.
    pub fn get_scalar(&mut self, pointer: &str) -> Result<Item> {
        let target = leaf_pointer(pointer)?;
        match self.locate(&target)? {
            Outcome::Found(item) => Ok(item),
            Outcome::Missing(anchor) => {
                debug!("\"{}\" doesn't exist, but \"{}\" exists", target, anchor);
                Err(CftError::PointerNotFound)
            }
        }
    }

    /// Return the `u8` stored at `pointer`. Fails with `WrongDataType` if the stored value is
    /// not a positive integer on the eight bit width.
    pub fn get_uint8(&mut self, pointer: &str) -> Result<u8> {
        u8::try_from(&self.get_scalar(pointer)?)
    }

    /// Return the `u16` stored at `pointer`. Fails with `WrongDataType` if the stored value
    /// is not a positive integer on the sixteen bit width.
    pub fn get_uint16(&mut self, pointer: &str) -> Result<u16> {
        u16::try_from(&self.get_scalar(pointer)?)
    }

    /// Return the boolean stored at `pointer`.
    pub fn get_bool(&mut self, pointer: &str) -> Result<bool> {
        bool::try_from(&self.get_scalar(pointer)?)
    }

    /// Return the text string stored at `pointer`.
    pub fn get_str(&mut self, pointer: &str) -> Result<String> {
        match self.get_scalar(pointer)? {
            Item::Tstr(s) => Ok(s),
            _ => Err(CftError::WrongDataType),
        }
    }

    /// Overwrite the scalar at `pointer` with `item`.
    ///
    /// Returns the previous value when the pointer existed. A missing pointer is not fatal:
    /// the operation falls through to an insert, creating missing intermediate maps, and
    /// returns `None`.
    pub fn set_scalar(&mut self, pointer: &str, item: Item) -> Result<Option<Item>> {
        let target = leaf_pointer(pointer)?;
        check_item(&item)?;
        match self.locate(&target)? {
            Outcome::Found(old) => {
                info!("set {}", target);
                self.rewrite(Mode::Set { target, item })?;
                Ok(Some(old))
            }
            Outcome::Missing(anchor) => {
                info!("insert {} below {}", target, anchor);
                self.rewrite(Mode::Insert {
                    target,
                    anchor,
                    item,
                })?;
                Ok(None)
            }
        }
    }

    /// Insert `pointer` with `item`, creating missing intermediate maps as single-entry maps.
    /// If the pointer already exists, the operation behaves as a set.
    pub fn insert(&mut self, pointer: &str, item: Item) -> Result<()> {
        self.set_scalar(pointer, item).map(|_| ())
    }

    /// Remove `pointer` from the document. A pointer addressing a map removes the whole
    /// subtree; erasing the sole pair of a map leaves an empty map behind.
    pub fn erase(&mut self, pointer: &str) -> Result<()> {
        let target = leaf_pointer(pointer)?;
        let parent = target.parent();
        match self.locate(&target) {
            Ok(Outcome::Found(_)) => {}
            // The locate pass rejects a pointer that turns out to address a map, which is
            // exactly the subtree case for erase.
            Err(CftError::PointerIsMap) => {}
            Ok(Outcome::Missing(_)) => return Err(CftError::PointerNotFound),
            Err(e) => return Err(e),
        }
        info!("erase {} from {}", target, parent);
        self.rewrite(Mode::Erase { target, parent })
    }

    /// One locate pass over the source file.
    fn locate(&mut self, target: &Pointer) -> Result<Outcome> {
        let file = File::open(&self.path).map_err(|_| CftError::OpenFileError)?;
        let mut window = Window::new(file, &mut self.scan_buf);
        let mut visitor = LocateVisitor::new(target);
        run_pass(&mut window, &mut visitor)?;
        Ok(visitor.into_outcome())
    }

    /// One rewrite pass: stream the source into a temporary file next to it, then atomically
    /// replace the source. On any failure the temporary file is removed and the source is
    /// left untouched.
    fn rewrite(&mut self, mode: Mode) -> Result<()> {
        let file = File::open(&self.path).map_err(|_| CftError::OpenFileError)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let tmp = NamedTempFile::new_in(dir).map_err(|_| CftError::CreateTempFileError)?;

        let expects_target = matches!(mode, Mode::Set { .. });
        let mut window = Window::new(file, &mut self.scan_buf);
        let mut visitor = RewriteVisitor::new(mode, BufWriter::new(tmp.as_file()));
        run_pass(&mut window, &mut visitor)?;
        let applied = visitor.applied();
        let mut writer = visitor.into_writer();
        writer.flush().map_err(|_| CftError::CreateTempFileError)?;
        drop(writer);

        if !applied {
            // A set whose target vanished between the passes; or a document too damaged for
            // the edit to land anywhere.
            return Err(if expects_target {
                CftError::PointerNotFound
            } else {
                CftError::MalformedData
            });
        }

        tmp.as_file()
            .sync_all()
            .map_err(|_| CftError::CreateTempFileError)?;
        tmp.persist(&self.path)
            .map_err(|_| CftError::CreateTempFileError)?;
        Ok(())
    }
}

/// Parse an operation target. Map pointers, including the root, cannot be operated on.
fn leaf_pointer(pointer: &str) -> Result<Pointer> {
    let p = Pointer::parse(pointer)?;
    if p.is_map() {
        return Err(CftError::PointerIsMap);
    }
    Ok(p)
}

/// Enforce the bounded item size for values on their way into a document.
fn check_item(item: &Item) -> Result<()> {
    if item.payload_len() > MAX_ITEM_LEN {
        return Err(CftError::InsufficientBuffer);
    }
    Ok(())
}
