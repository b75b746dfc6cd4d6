//! value representation
//!
//! Attribute values are one of
//! - null
//! - boolean (true/false)
//! - number (integer: i64, float: f64)
//! - string (utf-8)
//! - list (ordered sequence of values)
//! - object (order-preserving "map"/"dictionary", where the key is of type string)
//!
//! Numeric conversions between the two number kinds are implicit when reading:
//! every integer is also a float, and a float read as an integer is truncated toward zero.
//!
//! A value never changes its type once constructed. Lists and objects may grow, nothing is ever
//! removed from them.
use indexmap::IndexMap;
use serde::{
    ser::{SerializeMap, SerializeSeq},
    Serializer,
};

pub type Map = IndexMap<String, Value>;

/// All possible value types
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Value>),
    Object(Map),
}

/// A number keeps track of how it was written
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    Bool,
    Number,
    String,
    List,
    Object,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    Integer,
    Float,
}

/// Returned by the container mutators when called on the wrong kind of value
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("expected {expected} value but found {found}")]
pub struct TypeMismatch {
    pub expected: ValueType,
    pub found: ValueType,
}

impl Number {
    pub fn kind(&self) -> NumberKind {
        match self {
            Number::Integer(_) => NumberKind::Integer,
            Number::Float(_) => NumberKind::Float,
        }
    }

    /// Floats are truncated toward zero (saturating at the bounds of i64)
    pub fn as_i64(&self) -> i64 {
        match *self {
            Number::Integer(int) => int,
            Number::Float(float) => float as i64,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Integer(int) => int as f64,
            Number::Float(float) => float,
        }
    }
}

impl Value {
    pub fn null() -> Self {
        Value::Null
    }

    /// An empty list
    pub fn list() -> Self {
        Value::List(Vec::new())
    }

    /// An empty object
    pub fn object() -> Self {
        Value::Object(Map::new())
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Bool,
            Value::Number(_) => ValueType::Number,
            Value::String(_) => ValueType::String,
            Value::List(_) => ValueType::List,
            Value::Object(_) => ValueType::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Number(Number::Integer(_)))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Value::Number(Number::Float(_)))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Integer view of a number, see [Number::as_i64]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().map(|number| number.as_i64())
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(|number| number.as_f64())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(members) => Some(members),
            _ => None,
        }
    }

    pub fn list_item(&self, index: usize) -> Option<&Value> {
        self.as_list().and_then(|items| items.get(index))
    }

    /// Append to a list
    pub fn add_item(&mut self, item: impl Into<Value>) -> Result<(), TypeMismatch> {
        match self {
            Value::List(items) => {
                items.push(item.into());
                Ok(())
            }
            other => Err(other.mismatch(ValueType::List)),
        }
    }

    pub fn member(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|members| members.get(key))
    }

    pub fn has_member(&self, key: &str) -> bool {
        self.member(key).is_some()
    }

    /// Keys of an object in insertion order, empty for every other type
    pub fn member_keys(&self) -> impl Iterator<Item = &str> {
        self.as_object()
            .into_iter()
            .flat_map(|members| members.keys().map(String::as_str))
    }

    /// Insert or replace an object member
    ///
    /// A replaced member keeps its position.
    pub fn set_member(
        &mut self,
        key: impl Into<String>,
        member: impl Into<Value>,
    ) -> Result<(), TypeMismatch> {
        match self {
            Value::Object(members) => {
                members.insert(key.into(), member.into());
                Ok(())
            }
            other => Err(other.mismatch(ValueType::Object)),
        }
    }

    fn mismatch(&self, expected: ValueType) -> TypeMismatch {
        TypeMismatch {
            expected,
            found: self.value_type(),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Number::Integer(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(Number::Integer(value.into()))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::Float(value))
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Object(value)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Object(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::Null => f.write_str("null"),
            ValueType::Bool => f.write_str("bool"),
            ValueType::Number => f.write_str("number"),
            ValueType::String => f.write_str("string"),
            ValueType::List => f.write_str("list"),
            ValueType::Object => f.write_str("object"),
        }
    }
}

impl std::fmt::Display for NumberKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberKind::Integer => f.write_str("integer"),
            NumberKind::Float => f.write_str("float"),
        }
    }
}

impl serde::ser::Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Number::Integer(value) => serializer.serialize_i64(*value),
            Number::Float(value) => serializer.serialize_f64(*value),
        }
    }
}

impl serde::ser::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(value) => serializer.serialize_bool(*value),
            Value::Number(value) => serde::Serialize::serialize(value, serializer),
            Value::String(value) => serializer.serialize_str(value),
            Value::List(value) => {
                let mut ser = serializer.serialize_seq(Some(value.len()))?;
                for element in value {
                    ser.serialize_element(element)?;
                }
                ser.end()
            }
            Value::Object(value) => {
                let mut ser = serializer.serialize_map(Some(value.len()))?;
                for (element_key, element_value) in value {
                    ser.serialize_entry(element_key, element_value)?;
                }
                ser.end()
            }
        }
    }
}
