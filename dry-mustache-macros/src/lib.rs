use dry_mustache_core::{Compiler, FileLoader, Loader, Options, Result, Template, TEMPLATE_EXTENSION};
use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::{format_ident, quote};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use syn::{LitStr, parse_macro_input, parse::Parse, parse::ParseStream, Token};
use walkdir::WalkDir;

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            for lc in c.to_lowercase() {
                result.push(lc);
            }
        } else {
            result.push(c);
        }
    }
    result
}

fn function_ident(name: &str) -> proc_macro2::Ident {
    format_ident!("{}", to_snake_case(&name.replace(['-', '.', ' '], "_")))
}

/// Reads from disk and remembers every path it was asked for
#[derive(Default)]
struct RecordingLoader {
    paths: RefCell<Vec<PathBuf>>,
}

impl Loader for RecordingLoader {
    fn load(&self, path: &Path) -> Result<String> {
        let src = FileLoader.load(path)?;
        self.paths.borrow_mut().push(path.to_path_buf());
        Ok(src)
    }
}

fn generate_code_for_content(name: &LitStr, content: &LitStr) -> proc_macro2::TokenStream {
    if let Err(err) = Template::parse(&content.value()) {
        return syn::Error::new(content.span(), err.to_string()).to_compile_error();
    }
    let function = function_ident(&name.value());

    quote! {
        pub fn #function() -> &'static ::dry_mustache::Template {
            static TEMPLATE: ::std::sync::LazyLock<::dry_mustache::Template> = ::std::sync::LazyLock::new(|| {
                ::dry_mustache::Template::parse(#content).expect("template checked at compile time")
            });
            &TEMPLATE
        }
    }
}

fn generate_code_for_file(path: &Path, span: Span) -> proc_macro2::TokenStream {
    let recorder = RecordingLoader::default();
    let compiled = Compiler::new(Options::default())
        .with_loader(&recorder)
        .compile_path(path);
    if let Err(err) = compiled {
        return syn::Error::new(span, err.to_string()).to_compile_error();
    }

    let file_stem = path.file_stem().map(|stem| stem.to_string_lossy()).unwrap_or_default();
    let function = function_ident(&file_stem);
    let root = path.to_string_lossy().into_owned();
    let files: Vec<String> = recorder
        .paths
        .into_inner()
        .iter()
        .map(|path| path.to_string_lossy().into_owned())
        .collect();

    quote! {
        pub fn #function() -> &'static ::dry_mustache::Template {
            static TEMPLATE: ::std::sync::LazyLock<::dry_mustache::Template> = ::std::sync::LazyLock::new(|| {
                // include_str! ties the template and its partials to this crate, so that any
                // change to the mustache files will trigger a recompilation
                let loader = ::dry_mustache::MemoryLoader::new()
                    #(.with(#files, include_str!(#files)))*;
                ::dry_mustache::Compiler::new(::dry_mustache::Options::default())
                    .with_loader(loader)
                    .compile_path(#root)
                    .expect("template checked at compile time")
            });
            &TEMPLATE
        }
    }
}

struct StrInput {
    name: LitStr,
    content: LitStr,
}

impl Parse for StrInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name: LitStr = input.parse()?;
        input.parse::<Token![,]>()?;
        let content: LitStr = input.parse()?;
        Ok(StrInput { name, content })
    }
}

fn manifest_path(relative: &str) -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_default();
    Path::new(&manifest_dir).join(relative)
}

/// Declares one accessor per `.mustache` file found under a directory
#[proc_macro]
pub fn dry_mustache_directory(input: TokenStream) -> TokenStream {
    let dir_lit = parse_macro_input!(input as LitStr);
    let root_path = manifest_path(&dir_lit.value());

    if !root_path.is_dir() {
        return syn::Error::new(
            dir_lit.span(),
            format!("Directory not found: {:?}", root_path),
        )
        .to_compile_error()
        .into();
    }

    let mut paths: Vec<PathBuf> = WalkDir::new(&root_path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == TEMPLATE_EXTENSION))
        .collect();
    paths.sort();

    let functions = paths.iter().map(|path| generate_code_for_file(path, dir_lit.span()));

    let expanded = quote! {
        #(#functions)*
    };

    TokenStream::from(expanded)
}

/// Declares an accessor for one template file and the partials it references
#[proc_macro]
pub fn dry_mustache_file(input: TokenStream) -> TokenStream {
    let file_lit = parse_macro_input!(input as LitStr);
    let path = manifest_path(&file_lit.value());

    if !path.is_file() {
        return syn::Error::new(
            file_lit.span(),
            format!("File not found: {:?}", path),
        )
        .to_compile_error()
        .into();
    }

    TokenStream::from(generate_code_for_file(&path, file_lit.span()))
}

/// Declares an accessor for an inline template
#[proc_macro]
pub fn dry_mustache_str(input: TokenStream) -> TokenStream {
    let StrInput { name, content } = parse_macro_input!(input as StrInput);
    TokenStream::from(generate_code_for_content(&name, &content))
}
