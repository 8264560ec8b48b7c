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

//! Error handling for template parsing and loading
//!
//! Parsing and loading are the only fallible operations: a malformed template
//! or a missing file aborts the whole call. Rendering never fails.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for template parsing and loading failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The template text could not be parsed
    #[error("malformed template: {reason}")]
    MalformedTemplate { reason: String },

    /// A template or partial file could not be loaded
    #[error("template not found: {}", path.display())]
    TemplateNotFound { path: PathBuf },
}

/// Returns the last 32 bytes of a string for error context
pub(crate) fn rcap(src: &str) -> &str {
    static CAP_AT: usize = 32;

    if src.len() > CAP_AT {
        let mut start = src.len() - CAP_AT;
        while !src.is_char_boundary(start) {
            start += 1;
        }
        &src[start..]
    } else {
        src
    }
}

impl Error {
    /// Creates a malformed template error with the source leading up to the failure
    pub(crate) fn malformed(message: &str, preceding: &str) -> Self {
        Self::MalformedTemplate {
            reason: format!("{} near \"{}\"", message, rcap(preceding)),
        }
    }

    /// Creates an error for sections left open at end of input
    pub(crate) fn unclosed(key: &str, preceding: &str) -> Self {
        Self::malformed(&format!("unclosed section {}", key), preceding)
    }

    pub(crate) fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::TemplateNotFound { path: path.into() }
    }
}

/// Result type for template parsing and loading operations
pub type Result<T> = std::result::Result<T, Error>;
