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


//! Mustache template parser and renderer
//!
//! This crate provides the engine behind the `dry-mustache` crate: a single pass
//! parser turning Mustache text into a tag tree, and a renderer evaluating that
//! tree against any data implementing [`Value`].
//!
//! # Features
//!
//! - Escaped and raw interpolation: `{{name}}`, `{{{name}}}`, `{{&name}}`
//! - Dotted names and the implicit iterator: `{{person.name}}`, `{{.}}`
//! - Sections over booleans, mappings, lists and lambdas: `{{#items}}...{{/items}}`
//! - Inverted sections: `{{^items}}none{{/items}}`
//! - Partials loaded from `.mustache` files: `{{>item}}`
//! - Comments: `{{! ignored }}`
//! - Delimiter changes: `{{=<% %>=}}`
//! - Standalone line trimming for structural tags
//!
//! # Example
//!
//! ```rust
//! use dry_mustache_core::Template;
//! use serde_json::json;
//!
//! let template = Template::parse("{{#people}}<p>{{name}}</p>{{/people}}").unwrap();
//! let data = json!({"people": [{"name": "King"}, {"name": "<Tubby>"}]});
//! assert_eq!(template.render(&data), "<p>King</p><p>&lt;Tubby&gt;</p>");
//! ```
//!
//! # Module Structure
//!
//! - `parser`: scanning, tag classification, standalone lines and the parser itself
//! - `render.rs`: rendering, key resolution and HTML escaping
//! - `compiler.rs`: parsing plus partial loading, options
//! - `template.rs`: the parsed template and its partial table
//! - `value.rs`: the data capability the renderer works through
//! - `data.rs`: an owned dynamic value type
//! - `loader.rs`: file system and in-memory template sources
//! - `error.rs`: error types

pub mod compiler;
pub mod data;
pub mod error;
pub mod loader;
pub mod parser;
pub mod render;
pub mod tag;
pub mod template;
pub mod value;

use std::path::Path;

pub use compiler::{Compiler, KeyType, Options, TEMPLATE_EXTENSION};
pub use data::Data;
pub use error::{Error, Result};
pub use loader::{FileLoader, Loader, MemoryLoader};
pub use parser::{parse, ParserState};
pub use render::escape_html;
pub use tag::{Delimiters, Tag};
pub use template::Template;
pub use value::{Lambda, RenderFn, Shape, Value};

/// Compiles a template from a string, loading partials from the working directory
pub fn compile_str(src: &str) -> Result<Template>{
    Compiler::default().compile_str(src)
}

/// Compiles a template file and its partials
pub fn compile_path(path: impl AsRef<Path>) -> Result<Template>{
    Compiler::default().compile_path(path)
}
