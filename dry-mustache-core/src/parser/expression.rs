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


//! Mustache expression scanning
//!
//! This module locates the next tag in a template and classifies it. It works on
//! byte offsets into the full template text so that the parser can look around
//! a tag when applying the standalone line rule.
//!
//! # Expression Types
//!
//! - Variables: `{{name}}`
//! - Raw variables: `{{{name}}}` or `{{&name}}`
//! - Sections: `{{#name}}...{{/name}}` and inverted sections `{{^name}}...{{/name}}`
//! - Comments: `{{! comment }}`
//! - Partials: `{{>name}}`
//! - Delimiter changes: `{{=<% %>=}}`

use crate::{
    error::{Error, Result},
    tag::Delimiters,
};

/// Types of Mustache expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionType{
    Variable, Raw, Open, Inverted, Close, Comment, Partial, Delimiters
}

impl ExpressionType{
    /// Interpolations are never trimmed as standalone lines
    pub fn may_stand_alone(self) -> bool{
        !matches!(self, ExpressionType::Variable | ExpressionType::Raw)
    }
}

/// Represents a tag found in a template
#[derive(Debug, Clone, Copy)]
pub struct Expression<'a>{
    /// The type of expression
    pub expression_type: ExpressionType,
    /// The tag body without its sigil, trimmed
    pub content: &'a str,
    /// Offset of the start delimiter
    pub start: usize,
    /// Offset just past the stop delimiter
    pub end: usize
}

impl<'a> Expression<'a>{
    /// Creates a new expression by finding its closing delimiter
    fn close(expression_type: ExpressionType, src: &'a str, start: usize, body: usize, stop: &str) -> Result<Self>{
        match src[body ..].find(stop){
            Some(pos) => Ok(Self{
                expression_type,
                content: src[body .. body + pos].trim(),
                start,
                end: body + pos + stop.len()
            }),
            None => Err(Error::malformed("unclosed tag", &src[.. body]))
        }
    }

    /// Parses the next expression at or after `from`
    pub fn from(src: &'a str, from: usize, delimiters: &Delimiters) -> Result<Option<Self>>{
        let start = match src[from ..].find(delimiters.start.as_str()){
            Some(pos) => from + pos,
            None => return Ok(None)
        };
        let body = start + delimiters.start.len();
        let stop = delimiters.stop.as_str();
        let expression = match src[body ..].chars().next(){
            Some('{') => Self::close(ExpressionType::Raw, src, start, body + 1, &["}", stop].concat())?,
            Some('&') => Self::close(ExpressionType::Raw, src, start, body + 1, stop)?,
            Some('#') => Self::close(ExpressionType::Open, src, start, body + 1, stop)?,
            Some('^') => Self::close(ExpressionType::Inverted, src, start, body + 1, stop)?,
            Some('/') => Self::close(ExpressionType::Close, src, start, body + 1, stop)?,
            Some('!') => Self::close(ExpressionType::Comment, src, start, body + 1, stop)?,
            Some('>') => Self::close(ExpressionType::Partial, src, start, body + 1, stop)?,
            Some('=') => Self::close(ExpressionType::Delimiters, src, start, body + 1, &["=", stop].concat())?,
            Some(_) => Self::close(ExpressionType::Variable, src, start, body, stop)?,
            None => return Err(Error::malformed("unclosed tag", src))
        };
        if expression.content.is_empty() && expression.expression_type != ExpressionType::Comment{
            return Err(Error::malformed("empty tag", &src[.. expression.end]));
        }
        Ok(Some(expression))
    }
}

/// Parses the body of a delimiter change tag into a new delimiter pair
pub fn parse_delimiters(content: &str) -> Option<Delimiters>{
    let mut tokens = content.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()){
        (Some(start), Some(stop), None) if !start.contains('=') && !stop.contains('=') => Some(Delimiters::new(start, stop)),
        _ => None
    }
}
