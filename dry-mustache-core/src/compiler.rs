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


//! Template compilation: parsing plus partial loading
//!
//! A [`Compiler`] parses a template and then resolves every partial it
//! references through its [`Loader`]. A partial named `N` is read from
//! `N.mustache` next to the file that references it; a template given as a
//! string looks in the current working directory. Partials of partials are
//! loaded the same way, each relative to its own file, and every name is
//! loaded only once.
//!
//! # Examples
//!
//! ```rust
//! use dry_mustache_core::{Compiler, MemoryLoader, Options};
//! use serde_json::json;
//!
//! let loader = MemoryLoader::new()
//!     .with("views/page.mustache", "<ul>{{#items}}{{>item}}{{/items}}</ul>")
//!     .with("views/item.mustache", "<li>{{.}}</li>");
//! let compiler = Compiler::new(Options::default()).with_loader(loader);
//!
//! let template = compiler.compile_path("views/page.mustache").unwrap();
//! assert_eq!(template.render(&json!({"items": [1, 2]})), "<ul><li>1</li><li>2</li></ul>");
//! ```

use std::path::{Path, PathBuf};

use log::debug;

use crate::{
    error::Result,
    loader::{FileLoader, Loader},
    parser::{self, ParserState},
    template::Template,
};

/// Extension of template and partial files
pub const TEMPLATE_EXTENSION: &str = "mustache";

/// How path segments are matched against data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyType{
    /// Segments only match mapping keys
    #[default]
    Text,
    /// Numeric segments also index into sequences: `{{items.0}}`
    Indexed
}

/// Compiler options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options{
    pub key_type: KeyType
}

/// Main compiler implementation
#[derive(Debug, Clone)]
pub struct Compiler<L = FileLoader>{
    options: Options,
    loader: L
}

impl Compiler{
    /// Creates a compiler reading from the file system
    pub fn new(options: Options) -> Self{
        Self{ options, loader: FileLoader }
    }
}

impl Default for Compiler{
    fn default() -> Self{
        Self::new(Options::default())
    }
}

fn parent_dir(path: &Path) -> &Path{
    path.parent().unwrap_or(Path::new(""))
}

impl<L: Loader> Compiler<L>{
    /// Replaces the loader
    pub fn with_loader<M: Loader>(self, loader: M) -> Compiler<M>{
        Compiler{ options: self.options, loader }
    }

    pub fn options(&self) -> Options{
        self.options
    }

    pub fn loader(&self) -> &L{
        &self.loader
    }

    /// Compiles template text, loading partials from the working directory
    pub fn compile_str(&self, src: &str) -> Result<Template>{
        let mut template = Template::parse(src)?.with_options(self.options);
        self.load_partials(&mut template, Path::new(""))?;
        Ok(template)
    }

    /// Loads and compiles a template file along with its partials
    pub fn compile_path(&self, path: impl AsRef<Path>) -> Result<Template>{
        let path = path.as_ref();
        debug!("loading template {}", path.display());
        let src = self.loader.load(path)?;
        let mut template = Template::parse(&src)?.with_options(self.options);
        self.load_partials(&mut template, parent_dir(path))?;
        Ok(template)
    }

    /// Loads every referenced partial missing from `template`
    ///
    /// Partials referenced directly by the template are looked up in `dir`.
    pub fn load_partials(&self, template: &mut Template, dir: &Path) -> Result<()>{
        let mut pending: Vec<(String, PathBuf)> = template.missing_partials()
            .map(|name| (name.to_string(), dir.to_path_buf()))
            .collect();
        while let Some((name, dir)) = pending.pop(){
            if template.partial(&name).is_some(){
                continue;
            }
            let path = dir.join(format!("{}.{}", name, TEMPLATE_EXTENSION));
            debug!("loading partial {} from {}", name, path.display());
            let src = self.loader.load(&path)?;
            let (tags, state) = parser::parse(&src, ParserState::default())?;
            let partial_dir = parent_dir(&path);
            for reference in &state.partials{
                if template.partial(reference).is_none(){
                    pending.push((reference.clone(), partial_dir.to_path_buf()));
                }
            }
            template.insert_partial(name, tags, state.partials);
        }
        Ok(())
    }
}
