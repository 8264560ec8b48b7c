//! Mustache templates for Rust
//!
//! Templates are declared with [`str!`], [`file!`] or [`directory!`] and are
//! parsed at compile time, so a malformed template or a missing partial is a
//! build error. Each declaration expands to a function returning a shared
//! [`Template`], ready to render any data implementing [`Value`].
//!
//! ```ignore
//! mod templates {
//!     dry_mustache::str!("greeting", "Hello {{name}}!");
//! }
//! let html = templates::greeting().render(&serde_json::json!({"name": "World"}));
//! ```
//!
//! Templates can also be compiled at runtime with [`compile_str`],
//! [`compile_path`] or a [`Compiler`] over a custom [`Loader`].

extern crate self as dry_mustache;

pub use dry_mustache_core::{
    compile_path, compile_str, escape_html, Compiler, Data, Delimiters, Error, FileLoader, KeyType,
    Lambda, Loader, MemoryLoader, Options, RenderFn, Result, Shape, Tag, Template, Value,
    TEMPLATE_EXTENSION,
};
pub use dry_mustache_macros::dry_mustache_directory as directory;
pub use dry_mustache_macros::dry_mustache_file as file;
pub use dry_mustache_macros::dry_mustache_str as str;
