//! Material definition built from a material description

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::expression::{evaluate, ExpressionError, TypedValue};
use crate::describe::diagnostics::{CoercionError, DiagnosticKind, Diagnostics, SyntaxError};
use crate::describe::lexer::{statements, Statement};

const ASSIGNMENT: &str = " = ";

/// Semantic keys every backend understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaterialKey {
    /// `diffColour`
    DiffColour,
    /// `diffRoughness`
    DiffRoughness,
    /// `refraIndex`
    RefraIndex,
    /// `specColour`
    SpecColour,
    /// `specRoughness`
    SpecRoughness,
}

impl MaterialKey {
    /// Every key, in translation order
    pub const ALL: [Self; 5] = [
        Self::DiffColour,
        Self::DiffRoughness,
        Self::RefraIndex,
        Self::SpecColour,
        Self::SpecRoughness,
    ];

    /// Name used in descriptions
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DiffColour => "diffColour",
            Self::DiffRoughness => "diffRoughness",
            Self::RefraIndex => "refraIndex",
            Self::SpecColour => "specColour",
            Self::SpecRoughness => "specRoughness",
        }
    }

    /// Roughness keys are the ones subject to roughness conversion
    pub fn is_roughness(self) -> bool {
        matches!(self, Self::DiffRoughness | Self::SpecRoughness)
    }

    /// Colour keys take `RGB(...)` literals, the rest take scalars
    pub fn is_colour(self) -> bool {
        matches!(self, Self::DiffColour | Self::SpecColour)
    }
}

impl FromStr for MaterialKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|key| key.as_str() == s).ok_or(())
    }
}

impl fmt::Display for MaterialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name -> value mapping, last assignment wins
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialDefinition {
    entries: BTreeMap<String, TypedValue>,
}

impl MaterialDefinition {
    /// Create an empty definition
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a value, returning the one it replaced
    pub fn insert(&mut self, name: impl Into<String>, value: TypedValue) -> Option<TypedValue> {
        self.entries.insert(name.into(), value)
    }

    /// Look up by name
    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.entries.get(name)
    }

    /// Look up a semantic key
    pub fn get_key(&self, key: MaterialKey) -> Option<&TypedValue> {
        self.get(key.as_str())
    }

    /// Entries in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypedValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Entries holding an `Invalid` value
    pub fn invalid_entries(&self) -> impl Iterator<Item = (&str, &TypedValue)> {
        self.iter().filter(|(_, value)| value.is_invalid())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was assigned
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of parsing a material description
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedMaterial {
    /// Evaluated definitions
    pub definition: MaterialDefinition,
    /// Statements that were skipped
    pub diagnostics: Diagnostics,
}

/// Parse every statement of a material description
pub fn parse_material_description(text: &str) -> ParsedMaterial {
    let mut parsed = ParsedMaterial::default();

    for statement in statements(text) {
        match parse_statement(&statement) {
            Ok((name, value)) => {
                log::debug!("line {}: {} = {}", statement.line, name, value.kind());
                if parsed.definition.insert(name.clone(), value).is_some() {
                    log::debug!("line {}: '{}' reassigned", statement.line, name);
                }
            }
            Err(kind) => parsed.diagnostics.push(statement.line, kind, statement.text),
        }
    }

    parsed
}

/// Split a statement on the first ` = ` and evaluate its value
///
/// Only the first separator counts, so a value that itself contains ` = `
/// keeps the remainder verbatim.
pub fn parse_statement(statement: &Statement) -> Result<(String, TypedValue), DiagnosticKind> {
    let line = statement.text.as_str();
    let assign = line.find(ASSIGNMENT).ok_or(SyntaxError::MissingAssignment)?;

    let name = line[..assign].trim();
    let value = line[assign + ASSIGNMENT.len()..].trim();

    let evaluated = evaluate(value).map_err(|err| match err {
        ExpressionError::Literal(value) => DiagnosticKind::Coercion(CoercionError::Literal {
            name: name.to_string(),
            value,
        }),
        ExpressionError::UnclosedCall(value) => SyntaxError::UnclosedCall(value).into(),
        ExpressionError::Unsupported(value) => DiagnosticKind::UnsupportedExpression(value),
    })?;

    Ok((name.to_string(), evaluated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Colour3;

    #[test]
    fn test_parse_full_description() {
        let text = "\
# plastic
diffColour = RGB(0.18);
diffRoughness = 0.64;
refraIndex = 1.5;
specColour = RGB(0.04,0.04,0.04);
specRoughness = Image(\"tex/rough.exr\");
";
        let parsed = parse_material_description(text);
        assert!(parsed.diagnostics.is_empty());
        assert_eq!(parsed.definition.len(), 5);
        assert_eq!(
            parsed.definition.get_key(MaterialKey::DiffColour),
            Some(&TypedValue::Col3(Colour3::new(0.18, 0.18, 0.18)))
        );
        assert_eq!(parsed.definition.get("diffRoughness"), Some(&TypedValue::Float(0.64)));
        assert_eq!(
            parsed.definition.get("specRoughness"),
            Some(&TypedValue::ImageRef("tex/rough.exr".into()))
        );
    }

    #[test]
    fn test_last_write_wins() {
        let parsed = parse_material_description("refraIndex = 1.3;\nrefraIndex = 1.5;\n");
        assert_eq!(parsed.definition.len(), 1);
        assert_eq!(parsed.definition.get("refraIndex"), Some(&TypedValue::Float(1.5)));
    }

    #[test]
    fn test_comments_and_blanks_produce_nothing() {
        let parsed =
            parse_material_description("\n# diffColour = RGB(1);\n/ specColour = RGB(1);\n\n");
        assert!(parsed.definition.is_empty());
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn test_only_assigned_names_are_present() {
        let parsed = parse_material_description("diffColour = RGB(0.5);\nglow = Noise(3);\n");
        let names: Vec<_> = parsed.definition.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["diffColour", "glow"]);
    }

    #[test]
    fn test_invalid_values_are_kept() {
        let parsed = parse_material_description("diffColour = RGB(0.1,0.2);");
        let invalid: Vec<_> = parsed.definition.invalid_entries().collect();
        assert_eq!(invalid.len(), 1);
        assert_eq!(
            invalid[0].1,
            &TypedValue::Invalid { function: "RGB".into(), arguments: "0.1,0.2".into() }
        );
    }

    #[test]
    fn test_bad_statements_become_diagnostics() {
        let text = "\
diffColour RGB(0.5);
diffRoughness = rough;
specColour = Mix(RGB(1), RGB(0));
specRoughness = 0.2;
";
        let parsed = parse_material_description(text);
        assert_eq!(parsed.definition.len(), 1);

        let kinds: Vec<_> = parsed.diagnostics.iter().map(|d| d.kind.clone()).collect();
        assert_eq!(kinds[0], DiagnosticKind::Syntax(SyntaxError::MissingAssignment));
        assert_eq!(
            kinds[1],
            DiagnosticKind::Coercion(CoercionError::Literal {
                name: "diffRoughness".into(),
                value: "rough".into()
            })
        );
        assert!(matches!(kinds[2], DiagnosticKind::UnsupportedExpression(_)));
    }

    #[test]
    fn test_first_separator_wins() {
        // Known limitation: a value containing " = " is split at the first one
        let parsed = parse_material_description("note = Label(\"a = b\");");
        assert_eq!(
            parsed.definition.get("note"),
            Some(&TypedValue::Unknown { function: "Label".into(), arguments: "\"a = b\"".into() })
        );

        let parsed = parse_material_description("odd name = x = 1;");
        assert!(parsed.definition.is_empty());
        assert_eq!(parsed.diagnostics.len(), 1);
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let text = "diffColour = RGB(0.2);\nspecRoughness = 0.3;\n";
        assert_eq!(parse_material_description(text), parse_material_description(text));
    }

    #[test]
    fn test_key_round_trip() {
        for key in MaterialKey::ALL {
            assert_eq!(key.as_str().parse::<MaterialKey>(), Ok(key));
        }
        assert!("specularColour".parse::<MaterialKey>().is_err());
    }
}
