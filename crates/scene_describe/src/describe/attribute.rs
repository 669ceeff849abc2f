//! Attribute statement parser for location descriptions
//!
//! Grammar, one statement per line:
//!
//! ```text
//! <type> <name> = <value>;
//! <type>[<tupleSize>] <name> = {v0, v1, ...};
//! ```
//!
//! Parsing only splits text; values stay raw strings until
//! [`AttributeDescriptor::coerce`] converts them.

use std::fmt;
use std::str::FromStr;

use super::diagnostics::{Diagnostics, SyntaxError};
use super::lexer::{statements, Statement};

const ASSIGNMENT: &str = " = ";

/// Single value or array attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
    /// `int a = 1`
    Single,
    /// `int[2] a = {1, 2}`
    Array,
}

/// Declared element type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseType {
    /// 64-bit integer
    Int,
    /// 32-bit float
    Float,
    /// 64-bit float
    Double,
    /// Text, passed through unchanged
    String,
}

impl BaseType {
    /// Keyword used in descriptions
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
        }
    }
}

impl FromStr for BaseType {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(Self::Int),
            "float" => Ok(Self::Float),
            "double" => Ok(Self::Double),
            "string" => Ok(Self::String),
            other => Err(SyntaxError::UnknownType(other.to_string())),
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uncoerced value text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// Whole right-hand side
    Single(String),
    /// Comma-separated tokens found inside the braces
    Array(Vec<String>),
}

/// One parsed, not yet coerced attribute declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDescriptor {
    /// Single or array
    pub multiplicity: Multiplicity,
    /// Declared element type
    pub base_type: BaseType,
    /// Attribute name, e.g. `geometry.radius`
    pub name: String,
    /// Value text
    pub raw_value: RawValue,
    /// Elements per tuple, always at least 1
    pub tuple_size: usize,
    /// 1-based source line, used when coercion fails later
    pub line: usize,
}

/// Result of parsing a whole location description
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDescription {
    /// Descriptors in source order
    pub descriptors: Vec<AttributeDescriptor>,
    /// Statements that were skipped
    pub diagnostics: Diagnostics,
}

/// Parse every statement of a location description
pub fn parse_description(text: &str) -> ParsedDescription {
    let mut parsed = ParsedDescription::default();

    for statement in statements(text) {
        match parse_statement(&statement) {
            Ok(descriptor) => {
                log::debug!("line {}: parsed attribute '{}'", statement.line, descriptor.name);
                parsed.descriptors.push(descriptor);
            }
            Err(err) => parsed.diagnostics.push(statement.line, err, statement.text),
        }
    }

    parsed
}

/// Parse a single lexed statement
pub fn parse_statement(statement: &Statement) -> Result<AttributeDescriptor, SyntaxError> {
    let line = statement.text.as_str();

    // Everything up to the first space is the type
    let type_sep = line.find(' ').ok_or(SyntaxError::MissingType)?;
    let type_token = &line[..type_sep];

    let multiplicity = if type_token.contains('[') {
        Multiplicity::Array
    } else {
        Multiplicity::Single
    };

    // The separator starts with a space, so it never precedes type_sep
    let assign = line.find(ASSIGNMENT).ok_or(SyntaxError::MissingAssignment)?;
    let name = line[type_sep..assign].trim();
    if name.is_empty() {
        return Err(SyntaxError::MissingName);
    }
    let value = line[assign + ASSIGNMENT.len()..].trim();

    match multiplicity {
        Multiplicity::Single => Ok(AttributeDescriptor {
            multiplicity,
            base_type: type_token.parse()?,
            name: name.to_string(),
            raw_value: RawValue::Single(value.to_string()),
            tuple_size: 1,
            line: statement.line,
        }),
        Multiplicity::Array => {
            let items = split_array_value(value)
                .ok_or_else(|| SyntaxError::InvalidArrayValue(name.to_string()))?;
            let (base, tuple_size) = split_array_type(type_token)?;

            Ok(AttributeDescriptor {
                multiplicity,
                base_type: base.parse()?,
                name: name.to_string(),
                raw_value: RawValue::Array(items),
                tuple_size,
                line: statement.line,
            })
        }
    }
}

/// `{a, b,c}` -> `["a", "b", "c"]`
fn split_array_value(value: &str) -> Option<Vec<String>> {
    let inner = value.strip_prefix('{')?.strip_suffix('}')?;
    let collapsed = inner.trim().replace(", ", ",");
    Some(collapsed.split(',').map(str::to_string).collect())
}

/// `float[3]` -> `("float", 3)`, `int[]` -> `("int", 1)`
fn split_array_type(type_token: &str) -> Result<(&str, usize), SyntaxError> {
    let open = type_token.find('[').unwrap_or(type_token.len());
    let base = &type_token[..open];

    let size_text = type_token[open..]
        .find(']')
        .map(|close| &type_token[open + 1..open + close])
        .unwrap_or("");

    if size_text.is_empty() {
        return Ok((base, 1));
    }

    match size_text.parse::<usize>() {
        Ok(size) if size >= 1 => Ok((base, size)),
        _ => Err(SyntaxError::InvalidTupleSize(size_text.to_string())),
    }
}
