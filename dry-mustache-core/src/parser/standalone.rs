// MIT License
//
// Copyright (c) 2024 Jerome Johnson
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.


//! Standalone line detection
//!
//! A structural tag that is the only thing on its line, apart from spaces and
//! tabs, renders as if the whole line (indentation and line ending included)
//! were absent.

/// The line occupied by a standalone tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line{
    /// Offset of the first byte of the line
    pub start: usize,
    /// Offset just past the line ending, or the end of input
    pub end: usize
}

fn is_blank(src: &str) -> bool{
    src.bytes().all(|b| b == b' ' || b == b'\t')
}

/// Returns the line a tag spanning `start .. end` stands alone on, if it does
///
/// `floor` is where scanning resumed after the previous tag. Only `floor .. start`
/// is searched for the line start; a line beginning before `floor` shares it
/// with that previous tag and cannot be standalone.
pub fn standalone(src: &str, floor: usize, start: usize, end: usize) -> Option<Line>{
    let line_start = match src[floor .. start].rfind('\n'){
        Some(pos) => floor + pos + 1,
        None if floor == 0 || src[.. floor].ends_with('\n') => floor,
        None => return None
    };
    if !is_blank(&src[line_start .. start]){
        return None;
    }
    let line_end = src[end ..].find('\n').map_or(src.len(), |pos| end + pos + 1);
    let trailing = src[end .. line_end].strip_suffix('\n').unwrap_or(&src[end .. line_end]);
    let trailing = trailing.strip_suffix('\r').unwrap_or(trailing);
    if !is_blank(trailing){
        return None;
    }
    Some(Line{ start: line_start, end: line_end })
}
