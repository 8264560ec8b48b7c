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


//! Mustache template parsing
//!
//! The parser walks the template once, front to back. Each call to
//! [`Parser::parse_block`] collects tags until the input ends or a close tag is
//! found; sections recurse into it and check that the close tag names the key
//! they were opened with. The delimiter pair and the referenced partial names
//! are the only state carried between tags.

pub mod expression;
pub mod standalone;

use log::trace;

use crate::{
    error::{Error, Result},
    tag::{Delimiters, Tag},
};
use expression::{parse_delimiters, Expression, ExpressionType};
use standalone::standalone;

/// Transient state threaded through a parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserState{
    /// The delimiter pair tags are currently written with
    pub delimiters: Delimiters,
    /// Partial names referenced so far, in order of first use
    pub partials: Vec<String>
}

impl ParserState{
    /// Starts a parse with the given delimiters instead of `{{ }}`
    pub fn with_delimiters(delimiters: Delimiters) -> Self{
        Self{ delimiters, partials: Vec::new() }
    }

    fn reference(&mut self, name: &str){
        if !self.partials.iter().any(|known| known == name){
            trace!("partial {} referenced", name);
            self.partials.push(name.to_string());
        }
    }
}

/// How a run of tags came to an end
enum Ending<'a>{
    Eof,
    Close{ key: &'a str, start: usize }
}

struct Parser<'a>{
    src: &'a str,
    pos: usize,
    state: ParserState
}

/// Parses template text into a tag tree
///
/// Fails with [`Error::MalformedTemplate`] on unterminated tags, unbalanced or
/// mismatched sections and malformed delimiter changes. The returned state
/// carries the referenced partial names; its delimiters are reset to the default pair.
pub fn parse(src: &str, state: ParserState) -> Result<(Vec<Tag>, ParserState)>{
    let mut parser = Parser{ src, pos: 0, state };
    let (tags, ending) = parser.parse_block()?;
    if let Ending::Close{ key, start } = ending{
        return Err(Error::malformed(&format!("close tag for unopened section {}", key), &src[.. start]));
    }
    let mut state = parser.state;
    state.delimiters = Delimiters::default();
    Ok((tags, state))
}

/// Appends text to the tag list, merging with a preceding literal
fn push_literal(tags: &mut Vec<Tag>, text: &str){
    if text.is_empty(){
        return;
    }
    match tags.last_mut(){
        Some(Tag::Literal(last)) => last.push_str(text),
        _ => tags.push(Tag::Literal(text.to_string()))
    }
}

impl<'a> Parser<'a>{
    fn parse_block(&mut self) -> Result<(Vec<Tag>, Ending<'a>)>{
        let mut tags = Vec::new();
        loop{
            let expression = match Expression::from(self.src, self.pos, &self.state.delimiters)?{
                Some(expression) => expression,
                None => {
                    push_literal(&mut tags, &self.src[self.pos ..]);
                    self.pos = self.src.len();
                    return Ok((tags, Ending::Eof));
                }
            };
            let line = match expression.expression_type.may_stand_alone(){
                true => standalone(self.src, self.pos, expression.start, expression.end),
                false => None
            };
            let (literal_end, resume) = match line{
                Some(line) => (line.start, line.end),
                None => (expression.start, expression.end)
            };
            push_literal(&mut tags, &self.src[self.pos .. literal_end]);
            self.pos = resume;
            trace!("{:?} tag {:?}", expression.expression_type, expression.content);

            match expression.expression_type{
                ExpressionType::Variable => tags.push(Tag::Variable(expression.content.to_string())),
                ExpressionType::Raw => tags.push(Tag::RawVariable(expression.content.to_string())),
                ExpressionType::Comment => (),
                ExpressionType::Partial => {
                    self.state.reference(expression.content);
                    tags.push(Tag::Partial(expression.content.to_string()));
                },
                ExpressionType::Delimiters => {
                    self.state.delimiters = parse_delimiters(expression.content).ok_or_else(|| Error::malformed(
                        &format!("invalid delimiter change {}", expression.content),
                        &self.src[.. expression.end]
                    ))?;
                },
                ExpressionType::Open | ExpressionType::Inverted => tags.push(self.parse_section(expression)?),
                ExpressionType::Close => return Ok((tags, Ending::Close{ key: expression.content, start: expression.start }))
            }
        }
    }

    fn parse_section(&mut self, open: Expression<'a>) -> Result<Tag>{
        let delimiters = self.state.delimiters.clone();
        let (children, ending) = self.parse_block()?;
        let close = match ending{
            Ending::Close{ key, start } if key == open.content => start,
            Ending::Close{ key, start } => return Err(Error::malformed(
                &format!("section {} closed by {}", open.content, key),
                &self.src[.. start]
            )),
            Ending::Eof => return Err(Error::unclosed(open.content, &self.src[.. open.end]))
        };
        let key = open.content.to_string();
        Ok(match open.expression_type{
            ExpressionType::Inverted => Tag::InvertedSection{ key, children },
            _ => Tag::Section{ key, children, source: self.src[open.end .. close].to_string(), delimiters }
        })
    }
}
