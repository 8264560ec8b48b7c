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


//! Parsed templates
//!
//! A [`Template`] owns its tag tree and a table of parsed partials keyed by
//! name. The tree never changes after parsing; the partial table fills up as
//! partials are supplied. Rendering borrows the template immutably, so a fully
//! loaded template can be rendered from many threads at once.

use std::collections::HashMap;

use crate::{
    compiler::Options,
    error::Result,
    parser::{self, ParserState},
    render::Renderer,
    tag::Tag,
    value::Value,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Template{
    tags: Vec<Tag>,
    partials: HashMap<String, Vec<Tag>>,
    referenced: Vec<String>,
    options: Options
}

impl Template{
    /// Parses template text without loading any partials
    ///
    /// Partial references stay unresolved, and render as nothing, until they
    /// are supplied with [`Template::add_partial`] or a
    /// [`Compiler`](crate::Compiler) loads them.
    pub fn parse(src: &str) -> Result<Self>{
        let (tags, state) = parser::parse(src, ParserState::default())?;
        Ok(Self{
            tags,
            partials: HashMap::new(),
            referenced: state.partials,
            options: Options::default()
        })
    }

    pub fn with_options(mut self, options: Options) -> Self{
        self.options = options;
        self
    }

    pub fn options(&self) -> Options{
        self.options
    }

    /// The root tag sequence
    pub fn tags(&self) -> &[Tag]{
        &self.tags
    }

    /// A loaded partial's tag sequence
    pub fn partial(&self, name: &str) -> Option<&[Tag]>{
        self.partials.get(name).map(Vec::as_slice)
    }

    /// Every partial name referenced by the template or its loaded partials
    pub fn partial_names(&self) -> &[String]{
        &self.referenced
    }

    /// Referenced partials that have not been loaded yet
    pub fn missing_partials(&self) -> impl Iterator<Item = &str>{
        self.referenced.iter().map(String::as_str).filter(|name| !self.partials.contains_key(*name))
    }

    /// Parses `src` and registers it as the partial `name`
    pub fn add_partial(&mut self, name: impl Into<String>, src: &str) -> Result<()>{
        let (tags, state) = parser::parse(src, ParserState::default())?;
        self.insert_partial(name.into(), tags, state.partials);
        Ok(())
    }

    pub(crate) fn insert_partial(&mut self, name: String, tags: Vec<Tag>, referenced: Vec<String>){
        for reference in referenced{
            if !self.referenced.contains(&reference){
                self.referenced.push(reference);
            }
        }
        self.partials.insert(name, tags);
    }

    /// Renders the template against `data`
    pub fn render(&self, data: &dyn Value) -> String{
        let mut out = String::new();
        let mut stack = vec![data];
        Renderer::new(&self.partials, self.options).render(&self.tags, &mut stack, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn it_works(){
        let template = Template::parse("Hello {{name}}!").unwrap();
        assert_eq!(template.render(&json!({"name": "King"})), "Hello King!");
    }

    #[test]
    fn partial_table(){
        let mut template = Template::parse("[{{>item}}]").unwrap();
        assert_eq!(template.missing_partials().collect::<Vec<_>>(), vec!["item"]);
        assert_eq!(template.render(&json!({"x": 1})), "[]");

        template.add_partial("item", "x={{x}}{{>nested}}").unwrap();
        assert_eq!(template.partial_names(), ["item".to_string(), "nested".to_string()]);
        assert_eq!(template.missing_partials().collect::<Vec<_>>(), vec!["nested"]);
        assert_eq!(template.render(&json!({"x": 1})), "[x=1]");
    }

    #[test]
    fn send_and_sync(){
        fn assert_send_sync<T: Send + Sync>(){}
        assert_send_sync::<Template>();
    }
}
