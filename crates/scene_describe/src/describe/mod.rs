//! Description language front end
//!
//! Shared line lexing and diagnostics, plus the generic location description
//! (typed attribute statements such as `double geometry.radius = 1.0;`).

pub mod lexer;
pub mod diagnostics;
pub mod attribute;
pub mod coerce;
pub mod location;

pub use lexer::{statements, Statement};
pub use diagnostics::{CoercionError, Diagnostic, DiagnosticKind, Diagnostics, SyntaxError};
pub use attribute::{
    parse_description, AttributeDescriptor, BaseType, Multiplicity, ParsedDescription, RawValue,
};
pub use coerce::AttributeValue;
pub use location::{describe_location, DescribeReport, LocationMode, LocationRequest};
