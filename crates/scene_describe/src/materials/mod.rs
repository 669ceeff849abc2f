//! Material description language
//!
//! A material description is a block of `name = value;` statements where the
//! value is a number or a call such as `RGB(0.18)` or `Image("diff.png")`.
//! Statements evaluate into a [`MaterialDefinition`] that backends translate.

pub mod expression;
pub mod definition;

pub use expression::{evaluate, ExpressionError, TypedValue};
pub use definition::{
    parse_material_description, MaterialDefinition, MaterialKey, ParsedMaterial,
};
