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
 * Streaming driver
 *
 * Slides a fixed-size window over the source file and feeds decoded events to a visitor. The
 * window compacts the unconsumed tail to the front and reads ahead, so the file is read
 * strictly forwards, once, regardless of document size.
 **************************************************************************************************/
use crate::error::{CftError, Result};

use cft_cbor::decoder::{pull_event, Event};
use cft_cbor::error::CborError;

use std::fs::File;
use std::io::Read;

use tracing::trace;

/// A streaming pass over the document. One event is delivered at a time, in document order;
/// the driver stops when the visitor reports it is finished, at end of input, or at the first
/// error.
pub(crate) trait Visitor {
    fn on_event(&mut self, ev: &Event<'_>) -> Result<()>;
    fn finished(&self) -> bool;
}

/// Fixed-size read window over the source file. `buf[start..end]` holds bytes read but not yet
/// consumed.
pub(crate) struct Window<'b> {
    file: File,
    buf: &'b mut [u8],
    start: usize,
    end: usize,
    eof: bool,
}

impl<'b> Window<'b> {
    pub fn new(file: File, buf: &'b mut [u8]) -> Window<'b> {
        Window {
            file,
            buf,
            start: 0,
            end: 0,
            eof: false,
        }
    }

    fn data(&self) -> &[u8] {
        &self.buf[self.start..self.end]
    }

    fn capacity(&self) -> usize {
        self.buf.len()
    }

    fn consume(&mut self, n: usize) {
        self.start += n;
    }

    /// Move the unconsumed tail to the front of the buffer and fill the rest from the file.
    fn refill(&mut self) -> Result<()> {
        if self.start > 0 {
            self.buf.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
        }
        while self.end < self.buf.len() {
            let n = self
                .file
                .read(&mut self.buf[self.end..])
                .map_err(|_| CftError::OpenFileError)?;
            if n == 0 {
                self.eof = true;
                break;
            }
            self.end += n;
        }
        Ok(())
    }

    fn is_drained(&self) -> bool {
        self.eof && self.start == self.end
    }
}

/// Run one streaming pass: pull events from the window and dispatch them to the visitor until
/// the visitor is finished or the document is consumed.
pub(crate) fn run_pass<V: Visitor>(window: &mut Window, visitor: &mut V) -> Result<()> {
    loop {
        if visitor.finished() {
            return Ok(());
        }
        if window.data().is_empty() {
            if window.eof {
                return Ok(());
            }
            window.refill()?;
            if window.is_drained() {
                return Ok(());
            }
            continue;
        }
        // The decoded event borrows the window, so dispatch happens before the window can
        // slide; only the owned consumed count survives into the second stage.
        let step = match pull_event(window.data()) {
            Ok((consumed, ev)) => {
                trace!("event: {:?} ({} bytes)", ev, consumed);
                visitor.on_event(&ev)?;
                Ok(consumed)
            }
            Err(e) => Err(e),
        };
        match step {
            Ok(consumed) => window.consume(consumed),
            Err(CborError::NoMoreBytes(needed)) => {
                if needed > window.capacity() {
                    return Err(CftError::InsufficientBuffer);
                }
                if window.eof {
                    // The file ended in the middle of an item.
                    return Err(CftError::MalformedData);
                }
                window.refill()?;
            }
            Err(e) => return Err(e.into()),
        }
    }
}
