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


//! Owned, dynamically typed template data
//!
//! [`Data`] is the value type to reach for when the data is assembled by hand
//! or needs to carry lambdas. Plain `serde_json::Value`s render just as well.
//!
//! ```rust
//! use dry_mustache_core::{Data, Template};
//!
//! let data = Data::from_iter([
//!     ("name", Data::from("Chris")),
//!     ("bold", Data::lambda(|source, render| format!("<b>{}</b>", render(source)))),
//! ]);
//! let template = Template::parse("{{#bold}}Hi {{name}}.{{/bold}}").unwrap();
//! assert_eq!(template.render(&data), "<b>Hi Chris.</b>");
//! ```

use std::{borrow::Cow, collections::HashMap};

use crate::value::{Lambda, RenderFn, Shape, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Data{
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Vec(Vec<Data>),
    Map(HashMap<String, Data>),
    Lambda(Lambda)
}

impl Data{
    /// Wraps a closure as a section lambda
    pub fn lambda<F>(f: F) -> Self
    where
        F: for<'r> Fn(&str, &RenderFn<'r>) -> String + Send + Sync + 'static
    {
        Data::Lambda(Lambda::new(f))
    }

    /// Inserts a key, turning the value into a map if it was not one
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Data>) -> &mut Self{
        if !matches!(self, Data::Map(_)){
            *self = Data::Map(HashMap::new());
        }
        if let Data::Map(map) = self{
            map.insert(key.into(), value.into());
        }
        self
    }
}

impl Value for Data{
    fn shape(&self) -> Shape{
        match self{
            Data::Null => Shape::Null,
            Data::Vec(_) => Shape::Sequence,
            Data::Map(_) => Shape::Mapping,
            Data::Lambda(_) => Shape::Lambda,
            _ => Shape::Scalar
        }
    }

    fn get(&self, key: &str) -> Option<&dyn Value>{
        match self{
            Data::Map(map) => map.get(key).map(|value| value as &dyn Value),
            _ => None
        }
    }

    fn get_index(&self, index: usize) -> Option<&dyn Value>{
        match self{
            Data::Vec(items) => <[Data]>::get(items, index).map(|value| value as &dyn Value),
            _ => None
        }
    }

    fn items(&self) -> Box<dyn Iterator<Item = &dyn Value> + '_>{
        match self{
            Data::Vec(items) => items.items(),
            _ => Box::new(std::iter::empty())
        }
    }

    fn lambda(&self) -> Option<&Lambda>{
        match self{
            Data::Lambda(lambda) => Some(lambda),
            _ => None
        }
    }

    fn to_text(&self) -> Cow<'_, str>{
        match self{
            Data::Bool(value) => value.to_text(),
            Data::Int(value) => value.to_text(),
            Data::Float(value) => value.to_text(),
            Data::String(value) => Cow::Borrowed(value),
            _ => Cow::Borrowed("")
        }
    }

    fn is_truthy(&self) -> bool{
        match self{
            Data::Null => false,
            Data::Bool(value) => *value,
            Data::String(value) => !value.is_empty(),
            Data::Vec(items) => !items.is_empty(),
            _ => true
        }
    }
}

impl From<bool> for Data{
    fn from(value: bool) -> Self{ Data::Bool(value) }
}

impl From<i32> for Data{
    fn from(value: i32) -> Self{ Data::Int(value.into()) }
}

impl From<i64> for Data{
    fn from(value: i64) -> Self{ Data::Int(value) }
}

impl From<f64> for Data{
    fn from(value: f64) -> Self{ Data::Float(value) }
}

impl From<&str> for Data{
    fn from(value: &str) -> Self{ Data::String(value.to_string()) }
}

impl From<String> for Data{
    fn from(value: String) -> Self{ Data::String(value) }
}

impl From<Lambda> for Data{
    fn from(value: Lambda) -> Self{ Data::Lambda(value) }
}

impl<T: Into<Data>> From<Vec<T>> for Data{
    fn from(items: Vec<T>) -> Self{
        Data::Vec(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Data>> From<Option<T>> for Data{
    fn from(value: Option<T>) -> Self{
        value.map_or(Data::Null, Into::into)
    }
}

impl<K: Into<String>, V: Into<Data>> FromIterator<(K, V)> for Data{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self{
        Data::Map(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
    }
}

impl From<serde_json::Value> for Data{
    fn from(value: serde_json::Value) -> Self{
        match value{
            serde_json::Value::Null => Data::Null,
            serde_json::Value::Bool(value) => Data::Bool(value),
            serde_json::Value::Number(number) => match number.as_i64(){
                Some(value) => Data::Int(value),
                None => Data::Float(number.as_f64().unwrap_or_default())
            },
            serde_json::Value::String(value) => Data::String(value),
            serde_json::Value::Array(items) => items.into(),
            serde_json::Value::Object(map) => map.into_iter().collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json(){
        let data = Data::from(json!({"n": 3, "f": 0.5, "list": [true, null], "s": "x"}));
        assert_eq!(Value::get(&data, "n").unwrap().to_text(), "3");
        assert_eq!(Value::get(&data, "f").unwrap().to_text(), "0.5");
        assert_eq!(Value::get(&data, "list").unwrap().items().count(), 2);
        assert_eq!(Value::get(&data, "s").unwrap().shape(), Shape::Scalar);
    }

    #[test]
    fn index_into_lists(){
        let data = Data::from(vec!["zero", "one"]);
        assert_eq!(data.get_index(1).map(|value| value.to_text().into_owned()), Some("one".to_string()));
        assert!(data.get_index(2).is_none());
        assert!(Data::from("text").get_index(0).is_none());
    }

    #[test]
    fn insert_builds_maps(){
        let mut data = Data::Null;
        data.insert("a", 1).insert("b", "two");
        assert_eq!(data, Data::from_iter([("a", Data::Int(1)), ("b", Data::from("two"))]));
    }

    #[test]
    fn truthiness(){
        assert!(!Data::Null.is_truthy());
        assert!(!Data::from("").is_truthy());
        assert!(!Data::Vec(vec![]).is_truthy());
        assert!(Data::Map(HashMap::new()).is_truthy());
        assert!(Data::Int(0).is_truthy());
        assert_eq!(Data::lambda(|_, _| String::new()).shape(), Shape::Lambda);
    }
}
