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


//! Tag tree rendering
//!
//! The renderer walks a tag tree against a stack of context values, innermost
//! last. Rendering never fails: keys that do not resolve render as empty text.
//!
//! # Key resolution
//!
//! - `.` is the innermost context value itself.
//! - The first segment of a dotted key is looked up in each context from the
//!   innermost outward, stopping at the first one that has it.
//! - Every further segment is looked up only in the value the previous segment
//!   produced. If one is missing the whole key is absent; outer contexts are
//!   not searched again.

use std::{borrow::Cow, collections::HashMap, sync::LazyLock};

use log::{debug, warn};
use regex::{Captures, Regex};

use crate::{
    compiler::{KeyType, Options},
    parser::{self, ParserState},
    tag::{Delimiters, Tag},
    value::{Shape, Value},
};

static ESCAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new("[&<>\"]").unwrap());

/// Escapes `&`, `<`, `>` and `"` for inclusion in HTML
pub fn escape_html(content: &str) -> Cow<'_, str>{
    ESCAPE.replace_all(content, |captures: &Captures| match &captures[0]{
        "&" => "&amp;",
        "<" => "&lt;",
        ">" => "&gt;",
        _ => "&quot;"
    })
}

/// Renders tag trees against a partial table
pub struct Renderer<'t>{
    partials: &'t HashMap<String, Vec<Tag>>,
    options: Options
}

impl<'t> Renderer<'t>{
    pub fn new(partials: &'t HashMap<String, Vec<Tag>>, options: Options) -> Self{
        Self{ partials, options }
    }

    /// Renders `tags` against `stack`, appending to `out`
    pub fn render<'d>(&self, tags: &[Tag], stack: &mut Vec<&'d dyn Value>, out: &mut String){
        for tag in tags{
            match tag{
                Tag::Literal(text) => out.push_str(text),
                Tag::Variable(key) => self.interpolate(key, stack, true, out),
                Tag::RawVariable(key) => self.interpolate(key, stack, false, out),
                Tag::Section{ key, children, source, delimiters } => {
                    self.section(key, children, source, delimiters, stack, out)
                },
                Tag::InvertedSection{ key, children } => {
                    if !self.resolve(key, stack).is_some_and(|value| value.is_truthy()){
                        self.render(children, stack, out);
                    }
                },
                Tag::Partial(key) => match self.partials.get(key){
                    Some(partial) => self.render(partial, stack, out),
                    None => debug!("partial {} is not loaded, rendering nothing", key)
                }
            }
        }
    }

    fn interpolate<'d>(&self, key: &str, stack: &[&'d dyn Value], escape: bool, out: &mut String){
        let Some(value) = self.resolve(key, stack) else {
            return;
        };
        let text = match value.lambda(){
            Some(lambda) => Cow::Owned(lambda.call("", &|text: &str| {
                self.render_text(text, &Delimiters::default(), stack)
            })),
            None => value.to_text()
        };
        match escape{
            true => out.push_str(&escape_html(&text)),
            false => out.push_str(&text)
        }
    }

    fn section<'d>(
        &self,
        key: &str,
        children: &[Tag],
        source: &str,
        delimiters: &Delimiters,
        stack: &mut Vec<&'d dyn Value>,
        out: &mut String
    ){
        let Some(value) = self.resolve(key, stack) else {
            return;
        };
        match value.shape(){
            Shape::Lambda => if let Some(lambda) = value.lambda(){
                let context: &[&'d dyn Value] = stack;
                out.push_str(&lambda.call(source, &|text: &str| self.render_text(text, delimiters, context)));
            },
            Shape::Sequence => for item in value.items(){
                stack.push(item);
                self.render(children, stack, out);
                stack.pop();
            },
            Shape::Mapping => {
                stack.push(value);
                self.render(children, stack, out);
                stack.pop();
            },
            Shape::Scalar => if value.is_truthy(){
                self.render(children, stack, out);
            },
            Shape::Null => ()
        }
    }

    /// Parses and renders text handed back by a lambda
    fn render_text<'d>(&self, text: &str, delimiters: &Delimiters, context: &[&'d dyn Value]) -> String{
        match parser::parse(text, ParserState::with_delimiters(delimiters.clone())){
            Ok((tags, _)) => {
                let mut stack = context.to_vec();
                let mut out = String::new();
                self.render(&tags, &mut stack, &mut out);
                out
            },
            Err(err) => {
                warn!("lambda produced an unparsable template: {}", err);
                String::new()
            }
        }
    }

    /// Resolves a dotted key against the context stack
    pub fn resolve<'d>(&self, key: &str, stack: &[&'d dyn Value]) -> Option<&'d dyn Value>{
        if key == "."{
            return stack.last().copied();
        }
        let mut segments = key.split('.');
        let first = segments.next()?;
        let mut value = stack.iter().rev().find_map(|context| self.lookup(*context, first))?;
        for segment in segments{
            value = self.lookup(value, segment)?;
        }
        Some(value)
    }

    fn lookup<'d>(&self, value: &'d dyn Value, key: &str) -> Option<&'d dyn Value>{
        match (self.options.key_type, value.shape()){
            (KeyType::Indexed, Shape::Sequence) => key.parse().ok().and_then(|index| value.get_index(index)),
            _ => value.get(key)
        }
    }
}
