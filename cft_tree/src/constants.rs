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
 * cft_tree configuration constants
 *
 * All working memory of an operation is bounded by these values: the container stack, the
 * pointer strings, the captured value and the streaming read window.
 **************************************************************************************************/

/// Maximum map nesting depth. Documents nesting deeper than this are rejected.
pub const MAX_DEPTH: usize = 16;

/// Maximum length of a pointer in bytes, including all separators.
pub const MAX_POINTER_LEN: usize = 256;

/// Maximum length of a file path passed to [`crate::ConfigTree::open`].
pub const MAX_PATH_LEN: usize = 256;

/// Maximum payload length of a captured or written string value.
pub const MAX_ITEM_LEN: usize = 1024;

/// Size of the streaming read window. Must be large enough to hold the largest single item
/// the document may contain, i.e. at least an item head plus `MAX_ITEM_LEN`.
pub const SCAN_WINDOW_LEN: usize = MAX_ITEM_LEN + 16;

/// The pointer denoting the root map.
pub const ROOT_POINTER: &str = "/";
