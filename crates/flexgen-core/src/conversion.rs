//! Scalar conversions between XML text and Java/AS3 values.
//!
//! Generated readers wrap the XML text of a basic property in a parse
//! expression; generated writers render it back with `String.valueOf`.
//! [`ScalarKind::parse_literal`] and [`ScalarValue::render`] model that
//! pair so default-value markers can be checked against the property type.

use crate::types::{JavaType, Primitive};
use std::fmt;

/// Basic types with a dedicated reader conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Boolean,
    BoxedBoolean,
    Short,
    BoxedShort,
    Int,
    Integer,
    Long,
    BoxedLong,
    Float,
    BoxedFloat,
    Double,
    BoxedDouble,
    String,
}

impl ScalarKind {
    pub const ALL: [ScalarKind; 13] = [
        ScalarKind::Boolean,
        ScalarKind::BoxedBoolean,
        ScalarKind::Short,
        ScalarKind::BoxedShort,
        ScalarKind::Int,
        ScalarKind::Integer,
        ScalarKind::Long,
        ScalarKind::BoxedLong,
        ScalarKind::Float,
        ScalarKind::BoxedFloat,
        ScalarKind::Double,
        ScalarKind::BoxedDouble,
        ScalarKind::String,
    ];

    /// Scalar kind of a Java type, if it is one
    pub fn of(ty: &JavaType) -> Option<Self> {
        match ty {
            JavaType::Primitive(p) => match p {
                Primitive::Boolean => Some(ScalarKind::Boolean),
                Primitive::Short => Some(ScalarKind::Short),
                Primitive::Int => Some(ScalarKind::Int),
                Primitive::Long => Some(ScalarKind::Long),
                Primitive::Float => Some(ScalarKind::Float),
                Primitive::Double => Some(ScalarKind::Double),
                Primitive::Byte | Primitive::Char => None,
            },
            JavaType::Class(name) => match name.as_str() {
                "java.lang.Boolean" => Some(ScalarKind::BoxedBoolean),
                "java.lang.Short" => Some(ScalarKind::BoxedShort),
                "java.lang.Integer" => Some(ScalarKind::Integer),
                "java.lang.Long" => Some(ScalarKind::BoxedLong),
                "java.lang.Float" => Some(ScalarKind::BoxedFloat),
                "java.lang.Double" => Some(ScalarKind::BoxedDouble),
                "java.lang.String" => Some(ScalarKind::String),
                _ => None,
            },
            JavaType::Array(_) => None,
        }
    }

    /// Java simple name of the type
    pub fn java_name(&self) -> &'static str {
        match self {
            ScalarKind::Boolean => "boolean",
            ScalarKind::BoxedBoolean => "Boolean",
            ScalarKind::Short => "short",
            ScalarKind::BoxedShort => "Short",
            ScalarKind::Int => "int",
            ScalarKind::Integer => "Integer",
            ScalarKind::Long => "long",
            ScalarKind::BoxedLong => "Long",
            ScalarKind::Float => "float",
            ScalarKind::BoxedFloat => "Float",
            ScalarKind::Double => "double",
            ScalarKind::BoxedDouble => "Double",
            ScalarKind::String => "String",
        }
    }

    /// Prefix and suffix turning XML text into a Java value
    pub fn java_parse(&self) -> (&'static str, &'static str) {
        match self {
            ScalarKind::Boolean => ("\"true\".equals(", ")"),
            ScalarKind::BoxedBoolean => ("Boolean.valueOf(", ")"),
            ScalarKind::Short => ("Short.parseShort(", ")"),
            ScalarKind::BoxedShort => ("Short.valueOf(", ")"),
            ScalarKind::Int => ("Integer.parseInt(", ")"),
            ScalarKind::Integer => ("Integer.valueOf(", ")"),
            ScalarKind::Long => ("Long.parseLong(", ")"),
            ScalarKind::BoxedLong => ("Long.valueOf(", ")"),
            ScalarKind::Float => ("Float.parseFloat(", ")"),
            ScalarKind::BoxedFloat => ("Float.valueOf(", ")"),
            ScalarKind::Double => ("Double.parseDouble(", ")"),
            ScalarKind::BoxedDouble => ("Double.valueOf(", ")"),
            ScalarKind::String => ("", ""),
        }
    }

    /// AS3 type of the value on the client
    pub fn as3_name(&self) -> &'static str {
        match self {
            ScalarKind::Boolean | ScalarKind::BoxedBoolean => "Boolean",
            ScalarKind::Short | ScalarKind::BoxedShort | ScalarKind::Int | ScalarKind::Integer => {
                "int"
            }
            ScalarKind::Long
            | ScalarKind::BoxedLong
            | ScalarKind::Float
            | ScalarKind::BoxedFloat
            | ScalarKind::Double
            | ScalarKind::BoxedDouble => "Number",
            ScalarKind::String => "String",
        }
    }

    /// Parse XML text the way the generated reader does.
    ///
    /// Booleans are strict here: only `true` and `false` are accepted.
    pub fn parse_literal(&self, text: &str) -> Result<ScalarValue, String> {
        let err = |e: &dyn fmt::Display| format!("not a valid {}: {e}", self.java_name());
        match self {
            ScalarKind::Boolean | ScalarKind::BoxedBoolean => match text {
                "true" => Ok(ScalarValue::Bool(true)),
                "false" => Ok(ScalarValue::Bool(false)),
                other => Err(format!("not a valid boolean: '{other}'")),
            },
            ScalarKind::Short | ScalarKind::BoxedShort => {
                text.parse().map(ScalarValue::Short).map_err(|e| err(&e))
            }
            ScalarKind::Int | ScalarKind::Integer => {
                text.parse().map(ScalarValue::Int).map_err(|e| err(&e))
            }
            ScalarKind::Long | ScalarKind::BoxedLong => {
                text.parse().map(ScalarValue::Long).map_err(|e| err(&e))
            }
            ScalarKind::Float | ScalarKind::BoxedFloat => {
                text.parse().map(ScalarValue::Float).map_err(|e| err(&e))
            }
            ScalarKind::Double | ScalarKind::BoxedDouble => {
                text.parse().map(ScalarValue::Double).map_err(|e| err(&e))
            }
            ScalarKind::String => Ok(ScalarValue::Text(text.to_string())),
        }
    }
}

/// A parsed scalar value
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Bool(bool),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Text(String),
}

impl ScalarValue {
    /// Render the value as XML text, like `String.valueOf`
    pub fn render(&self) -> String {
        match self {
            ScalarValue::Bool(v) => v.to_string(),
            ScalarValue::Short(v) => v.to_string(),
            ScalarValue::Int(v) => v.to_string(),
            ScalarValue::Long(v) => v.to_string(),
            ScalarValue::Float(v) => v.to_string(),
            ScalarValue::Double(v) => v.to_string(),
            ScalarValue::Text(v) => v.clone(),
        }
    }
}

#[cfg(test)]
#[path = "conversion/conversion_tests.rs"]
mod conversion_tests;
