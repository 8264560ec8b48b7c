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

//! The parsed tag tree
//!
//! A template parses into a sequence of [`Tag`]s. Sections own their children,
//! so the tree is a plain nested structure with no back references.

/// The current start/stop token pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    pub start: String,
    pub stop: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::new("{{", "}}")
    }
}

impl Delimiters {
    pub fn new(start: &str, stop: &str) -> Self {
        Self {
            start: start.to_string(),
            stop: stop.to_string(),
        }
    }
}

/// One parsed unit of a template
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    /// Escaped interpolation: `{{key}}`
    Variable(String),
    /// Unescaped interpolation: `{{{key}}}` or `{{&key}}`
    RawVariable(String),
    /// `{{#key}}...{{/key}}`
    Section {
        key: String,
        children: Vec<Tag>,
        /// The verbatim template text between the open and close tags
        source: String,
        /// Delimiters in effect when the section was opened, used to parse lambda output
        delimiters: Delimiters,
    },
    /// `{{^key}}...{{/key}}`
    InvertedSection { key: String, children: Vec<Tag> },
    /// `{{>key}}`
    Partial(String),
    /// Passthrough text
    Literal(String),
}
