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


//! Template source loading
//!
//! The engine itself never touches the file system; it asks a [`Loader`] for
//! the text behind a path and treats any failure as
//! [`Error::TemplateNotFound`].

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use log::debug;

use crate::error::{Error, Result};

/// Supplies template text by path
pub trait Loader{
    fn load(&self, path: &Path) -> Result<String>;
}

impl<L: Loader + ?Sized> Loader for &L{
    fn load(&self, path: &Path) -> Result<String>{
        (**self).load(path)
    }
}

/// Reads templates from the file system
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLoader;

impl Loader for FileLoader{
    fn load(&self, path: &Path) -> Result<String>{
        fs::read_to_string(path).map_err(|err| {
            debug!("unable to read {}: {}", path.display(), err);
            Error::not_found(path)
        })
    }
}

/// Serves templates from memory
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader{
    files: HashMap<PathBuf, String>
}

impl MemoryLoader{
    pub fn new() -> Self{
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, src: impl Into<String>) -> &mut Self{
        self.files.insert(path.into(), src.into());
        self
    }

    pub fn with(mut self, path: impl Into<PathBuf>, src: impl Into<String>) -> Self{
        self.insert(path, src);
        self
    }
}

impl Loader for MemoryLoader{
    fn load(&self, path: &Path) -> Result<String>{
        self.files.get(path).cloned().ok_or_else(|| Error::not_found(path))
    }
}
