//! Recoverable parse and coercion problems
//!
//! Nothing in the description pipelines is fatal. A statement that cannot be
//! understood is skipped and leaves a [`Diagnostic`] behind for the caller.

use std::fmt;

use thiserror::Error;

/// Statement-level syntax problems
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// No space after the type token
    #[error("missing type")]
    MissingType,

    /// No ` = ` separator
    #[error("missing assignment")]
    MissingAssignment,

    /// Nothing between the type token and the separator
    #[error("missing attribute name")]
    MissingName,

    /// Type token is not one of int, float, double or string
    #[error("unknown attribute type '{0}'")]
    UnknownType(String),

    /// Array value not wrapped in braces
    #[error("invalid array value string for attribute: {0}")]
    InvalidArrayValue(String),

    /// Bracket suffix that is not a positive integer
    #[error("invalid tuple size '{0}'")]
    InvalidTupleSize(String),

    /// Function call without a closing parenthesis
    #[error("unclosed call in '{0}'")]
    UnclosedCall(String),
}

/// Value text that cannot be converted to the declared type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoercionError {
    /// Integer parse failure
    #[error("attribute '{name}': '{value}' is not an integer")]
    Int {
        /// Attribute name
        name: String,
        /// Offending text
        value: String,
    },

    /// Float or double parse failure
    #[error("attribute '{name}': '{value}' is not a decimal number")]
    Float {
        /// Attribute name
        name: String,
        /// Offending text
        value: String,
    },

    /// Array length not a multiple of the tuple size
    #[error("attribute '{name}': {len} values do not fill tuples of {tuple_size}")]
    TupleMismatch {
        /// Attribute name
        name: String,
        /// Number of parsed elements
        len: usize,
        /// Declared tuple size
        tuple_size: usize,
    },

    /// Bare material literal that is not a number
    #[error("definition '{name}': '{value}' is not a number")]
    Literal {
        /// Definition name
        name: String,
        /// Offending text
        value: String,
    },
}

/// What went wrong with a statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Statement skipped during parsing
    Syntax(SyntaxError),
    /// Attribute or definition not produced because its value did not convert
    Coercion(CoercionError),
    /// Nested function-call expressions are reserved and not evaluated
    UnsupportedExpression(String),
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(err) => write!(f, "syntax error: {err}"),
            Self::Coercion(err) => write!(f, "coercion error: {err}"),
            Self::UnsupportedExpression(expr) => write!(f, "unsupported expression: {expr}"),
        }
    }
}

impl From<SyntaxError> for DiagnosticKind {
    fn from(err: SyntaxError) -> Self {
        Self::Syntax(err)
    }
}

impl From<CoercionError> for DiagnosticKind {
    fn from(err: CoercionError) -> Self {
        Self::Coercion(err)
    }
}

/// A skipped statement and the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based source line
    pub line: usize,
    /// Reason
    pub kind: DiagnosticKind,
    /// Statement text as seen by the parser
    pub statement: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} ('{}')", self.line, self.kind, self.statement)
    }
}

/// Ordered collection of diagnostics from one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and log it
    pub fn push(
        &mut self,
        line: usize,
        kind: impl Into<DiagnosticKind>,
        statement: impl Into<String>,
    ) {
        let diagnostic = Diagnostic {
            line,
            kind: kind.into(),
            statement: statement.into(),
        };
        log::warn!("{}", diagnostic);
        self.entries.push(diagnostic);
    }

    /// Iterate in recording order
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Number of diagnostics
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was skipped
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if any statement was malformed or failed to coerce
    ///
    /// Unsupported expressions are well-formed input the evaluator declines,
    /// so they do not count.
    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|d| matches!(d.kind, DiagnosticKind::Syntax(_) | DiagnosticKind::Coercion(_)))
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
