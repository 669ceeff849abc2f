//! Type coercion of attribute descriptors
//!
//! Coercion is deferred until an attribute is consumed, so a bad value only
//! costs that one attribute.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::attribute::{AttributeDescriptor, BaseType, RawValue};
use super::diagnostics::CoercionError;

/// Typed attribute value, also the value type accepted by every sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// Single integer
    Int(i64),
    /// Single float
    Float(f32),
    /// Single double
    Double(f64),
    /// Single string
    String(String),
    /// Integer array and tuple size
    IntArray(Vec<i64>, usize),
    /// Float array and tuple size
    FloatArray(Vec<f32>, usize),
    /// Double array and tuple size
    DoubleArray(Vec<f64>, usize),
    /// String array and tuple size
    StringArray(Vec<String>, usize),
}

impl AttributeValue {
    /// Borrow the string payload of a single string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Single float or double widened to `f64`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(f64::from(*value)),
            Self::Double(value) => Some(*value),
            _ => None,
        }
    }

    /// Number of elements (1 for single values)
    pub fn len(&self) -> usize {
        match self {
            Self::Int(_) | Self::Float(_) | Self::Double(_) | Self::String(_) => 1,
            Self::IntArray(values, _) => values.len(),
            Self::FloatArray(values, _) => values.len(),
            Self::DoubleArray(values, _) => values.len(),
            Self::StringArray(values, _) => values.len(),
        }
    }

    /// True for an array without elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tuple size (1 for single values)
    pub fn tuple_size(&self) -> usize {
        match self {
            Self::Int(_) | Self::Float(_) | Self::Double(_) | Self::String(_) => 1,
            Self::IntArray(_, size)
            | Self::FloatArray(_, size)
            | Self::DoubleArray(_, size)
            | Self::StringArray(_, size) => *size,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f32> for AttributeValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl AttributeDescriptor {
    /// Convert the raw value text into the declared type
    pub fn coerce(&self) -> Result<AttributeValue, CoercionError> {
        match &self.raw_value {
            RawValue::Single(text) => self.coerce_single(text),
            RawValue::Array(items) => self.coerce_array(items),
        }
    }

    fn coerce_single(&self, text: &str) -> Result<AttributeValue, CoercionError> {
        Ok(match self.base_type {
            BaseType::Int => AttributeValue::Int(self.parse_int(text)?),
            BaseType::Float => AttributeValue::Float(self.parse_decimal(text)?),
            BaseType::Double => AttributeValue::Double(self.parse_decimal(text)?),
            BaseType::String => AttributeValue::String(text.to_string()),
        })
    }

    fn coerce_array(&self, items: &[String]) -> Result<AttributeValue, CoercionError> {
        let size = self.tuple_size;
        let value = match self.base_type {
            BaseType::Int => AttributeValue::IntArray(
                items.iter().map(|item| self.parse_int(item)).collect::<Result<_, _>>()?,
                size,
            ),
            BaseType::Float => AttributeValue::FloatArray(
                items.iter().map(|item| self.parse_shader_literal(item)).collect::<Result<_, _>>()?,
                size,
            ),
            BaseType::Double => AttributeValue::DoubleArray(
                items.iter().map(|item| self.parse_shader_literal(item)).collect::<Result<_, _>>()?,
                size,
            ),
            BaseType::String => AttributeValue::StringArray(
                items.iter().map(|item| item.trim().to_string()).collect(),
                size,
            ),
        };

        if size == 0 || value.len() % size != 0 {
            return Err(CoercionError::TupleMismatch {
                name: self.name.clone(),
                len: value.len(),
                tuple_size: size,
            });
        }

        Ok(value)
    }

    fn parse_int(&self, text: &str) -> Result<i64, CoercionError> {
        text.trim().parse().map_err(|_| CoercionError::Int {
            name: self.name.clone(),
            value: text.to_string(),
        })
    }

    fn parse_decimal<T: FromStr>(&self, text: &str) -> Result<T, CoercionError> {
        text.trim().parse().map_err(|_| CoercionError::Float {
            name: self.name.clone(),
            value: text.to_string(),
        })
    }

    /// Array elements may carry shader-style suffixes such as `1.0f`
    fn parse_shader_literal<T: FromStr>(&self, text: &str) -> Result<T, CoercionError> {
        let stripped: String = text.chars().filter(|&c| c != 'f').collect();
        self.parse_decimal(&stripped)
    }
}
