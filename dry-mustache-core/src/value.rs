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


//! The data capability the renderer works through
//!
//! The renderer never looks at a concrete container type. Anything that can
//! answer a key lookup, say whether it is a sequence, a mapping, a lambda or a
//! scalar, and print itself can be rendered. Implementations are provided for
//! [`Data`](crate::Data), `serde_json::Value` and the common std types.

use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap},
    fmt::Debug,
    iter,
    sync::Arc,
};

/// The structural kind of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape{
    Null,
    Scalar,
    Sequence,
    Mapping,
    Lambda
}

/// Callback handed to lambdas: parses and renders text against the current context
pub type RenderFn<'r> = dyn Fn(&str) -> String + 'r;

type LambdaFn = dyn for<'r> Fn(&str, &RenderFn<'r>) -> String + Send + Sync;

/// A section lambda
///
/// Called with the verbatim source of the section it is bound to and a
/// callback rendering arbitrary text. Its result is emitted unescaped.
#[derive(Clone)]
pub struct Lambda(Arc<LambdaFn>);

impl Lambda{
    pub fn new<F>(f: F) -> Self
    where
        F: for<'r> Fn(&str, &RenderFn<'r>) -> String + Send + Sync + 'static
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, source: &str, render: &RenderFn<'_>) -> String{
        (self.0)(source, render)
    }
}

impl Debug for Lambda{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result{
        f.write_str("Lambda")
    }
}

impl PartialEq for Lambda{
    fn eq(&self, other: &Self) -> bool{
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Hierarchical data a template renders against
pub trait Value{
    fn shape(&self) -> Shape;

    /// Looks up a key one level down; `None` when absent or not a mapping
    fn get(&self, _key: &str) -> Option<&dyn Value>{
        None
    }

    /// Looks up a position in a sequence
    fn get_index(&self, index: usize) -> Option<&dyn Value>{
        self.items().nth(index)
    }

    /// The elements of a sequence, empty for anything else
    fn items(&self) -> Box<dyn Iterator<Item = &dyn Value> + '_>{
        Box::new(iter::empty())
    }

    fn lambda(&self) -> Option<&Lambda>{
        None
    }

    /// Text used when the value is interpolated
    fn to_text(&self) -> Cow<'_, str>;

    /// False for null, `false`, empty text and empty sequences
    fn is_truthy(&self) -> bool{
        match self.shape(){
            Shape::Null => false,
            Shape::Sequence => self.items().next().is_some(),
            _ => true
        }
    }
}

impl<T: Value + ?Sized> Value for &T{
    fn shape(&self) -> Shape{ (**self).shape() }
    fn get(&self, key: &str) -> Option<&dyn Value>{ (**self).get(key) }
    fn get_index(&self, index: usize) -> Option<&dyn Value>{ (**self).get_index(index) }
    fn items(&self) -> Box<dyn Iterator<Item = &dyn Value> + '_>{ (**self).items() }
    fn lambda(&self) -> Option<&Lambda>{ (**self).lambda() }
    fn to_text(&self) -> Cow<'_, str>{ (**self).to_text() }
    fn is_truthy(&self) -> bool{ (**self).is_truthy() }
}

impl<T: Value> Value for Option<T>{
    fn shape(&self) -> Shape{
        self.as_ref().map_or(Shape::Null, Value::shape)
    }

    fn get(&self, key: &str) -> Option<&dyn Value>{
        self.as_ref().and_then(|value| value.get(key))
    }

    fn get_index(&self, index: usize) -> Option<&dyn Value>{
        self.as_ref().and_then(|value| value.get_index(index))
    }

    fn items(&self) -> Box<dyn Iterator<Item = &dyn Value> + '_>{
        match self{
            Some(value) => value.items(),
            None => Box::new(iter::empty())
        }
    }

    fn lambda(&self) -> Option<&Lambda>{
        self.as_ref().and_then(Value::lambda)
    }

    fn to_text(&self) -> Cow<'_, str>{
        self.as_ref().map_or(Cow::Borrowed(""), Value::to_text)
    }

    fn is_truthy(&self) -> bool{
        self.as_ref().is_some_and(Value::is_truthy)
    }
}

impl Value for str{
    fn shape(&self) -> Shape{ Shape::Scalar }
    fn to_text(&self) -> Cow<'_, str>{ Cow::Borrowed(self) }
    fn is_truthy(&self) -> bool{ !self.is_empty() }
}

impl Value for String{
    fn shape(&self) -> Shape{ Shape::Scalar }
    fn to_text(&self) -> Cow<'_, str>{ Cow::Borrowed(self) }
    fn is_truthy(&self) -> bool{ !self.is_empty() }
}

impl Value for bool{
    fn shape(&self) -> Shape{ Shape::Scalar }
    fn to_text(&self) -> Cow<'_, str>{ Cow::Borrowed(if *self { "true" } else { "false" }) }
    fn is_truthy(&self) -> bool{ *self }
}

macro_rules! number_value{
    ($($ty:ty),*) => {$(
        impl Value for $ty{
            fn shape(&self) -> Shape{ Shape::Scalar }
            fn to_text(&self) -> Cow<'_, str>{ Cow::Owned(self.to_string()) }
        }
    )*};
}

number_value!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl<T: Value> Value for [T]{
    fn shape(&self) -> Shape{ Shape::Sequence }

    fn get_index(&self, index: usize) -> Option<&dyn Value>{
        <[T]>::get(self, index).map(|value| value as &dyn Value)
    }

    fn items(&self) -> Box<dyn Iterator<Item = &dyn Value> + '_>{
        Box::new(self.iter().map(|value| value as &dyn Value))
    }

    fn to_text(&self) -> Cow<'_, str>{ Cow::Borrowed("") }
}

impl<T: Value> Value for Vec<T>{
    fn shape(&self) -> Shape{ Shape::Sequence }
    fn get_index(&self, index: usize) -> Option<&dyn Value>{ self.as_slice().get_index(index) }
    fn items(&self) -> Box<dyn Iterator<Item = &dyn Value> + '_>{ self.as_slice().items() }
    fn to_text(&self) -> Cow<'_, str>{ Cow::Borrowed("") }
}

impl<T: Value> Value for HashMap<String, T>{
    fn shape(&self) -> Shape{ Shape::Mapping }

    fn get(&self, key: &str) -> Option<&dyn Value>{
        HashMap::get(self, key).map(|value| value as &dyn Value)
    }

    fn to_text(&self) -> Cow<'_, str>{ Cow::Borrowed("") }
}

impl<T: Value> Value for BTreeMap<String, T>{
    fn shape(&self) -> Shape{ Shape::Mapping }

    fn get(&self, key: &str) -> Option<&dyn Value>{
        BTreeMap::get(self, key).map(|value| value as &dyn Value)
    }

    fn to_text(&self) -> Cow<'_, str>{ Cow::Borrowed("") }
}

impl Value for serde_json::Value{
    fn shape(&self) -> Shape{
        match self{
            serde_json::Value::Null => Shape::Null,
            serde_json::Value::Array(_) => Shape::Sequence,
            serde_json::Value::Object(_) => Shape::Mapping,
            _ => Shape::Scalar
        }
    }

    fn get(&self, key: &str) -> Option<&dyn Value>{
        match self{
            serde_json::Value::Object(map) => map.get(key).map(|value| value as &dyn Value),
            _ => None
        }
    }

    fn get_index(&self, index: usize) -> Option<&dyn Value>{
        match self{
            serde_json::Value::Array(items) => <[serde_json::Value]>::get(items, index).map(|value| value as &dyn Value),
            _ => None
        }
    }

    fn items(&self) -> Box<dyn Iterator<Item = &dyn Value> + '_>{
        match self{
            serde_json::Value::Array(items) => Box::new(items.iter().map(|value| value as &dyn Value)),
            _ => Box::new(iter::empty())
        }
    }

    fn to_text(&self) -> Cow<'_, str>{
        match self{
            serde_json::Value::String(text) => Cow::Borrowed(text),
            serde_json::Value::Bool(value) => value.to_text(),
            serde_json::Value::Number(number) => Cow::Owned(number.to_string()),
            _ => Cow::Borrowed("")
        }
    }

    fn is_truthy(&self) -> bool{
        match self{
            serde_json::Value::Null => false,
            serde_json::Value::Bool(value) => *value,
            serde_json::Value::String(text) => !text.is_empty(),
            serde_json::Value::Array(items) => !items.is_empty(),
            _ => true
        }
    }
}
