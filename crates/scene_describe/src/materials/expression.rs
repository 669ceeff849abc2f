//! Expression evaluator for material definition values

use thiserror::Error;

use crate::foundation::math::{grey, Colour3};

/// Evaluated right-hand side of a material statement
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// Bare number
    Float(f64),
    /// `RGB(...)`
    Col3(Colour3),
    /// `Image("path")`
    ImageRef(String),
    /// Call to a function the evaluator does not know
    Unknown {
        /// Function name
        function: String,
        /// Raw argument text
        arguments: String,
    },
    /// Known function called with unusable arguments
    Invalid {
        /// Function name
        function: String,
        /// Raw argument text
        arguments: String,
    },
}

impl TypedValue {
    /// Short name of the variant, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Float(_) => "float",
            Self::Col3(_) => "col3",
            Self::ImageRef(_) => "image",
            Self::Unknown { .. } => "unknown",
            Self::Invalid { .. } => "invalid",
        }
    }

    /// True for `Invalid` values
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid { .. })
    }
}

/// Value text that could not be evaluated at all
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    /// Bare value that is not a number
    #[error("'{0}' is not a number")]
    Literal(String),

    /// `(` without a following `)`
    #[error("unclosed call in '{0}'")]
    UnclosedCall(String),

    /// Nested calls are reserved and not evaluated
    #[error("nested call expressions are not supported: '{0}'")]
    Unsupported(String),
}

/// Evaluate a trimmed definition value
///
/// Values with at most one `(` are simple: a number or a single call. Two or
/// more `(` mean nested calls, which are rejected rather than guessed at.
pub fn evaluate(value: &str) -> Result<TypedValue, ExpressionError> {
    let value = value.trim();
    match value.matches('(').count() {
        0 => value
            .parse::<f64>()
            .map(TypedValue::Float)
            .map_err(|_| ExpressionError::Literal(value.to_string())),
        1 => evaluate_call(value),
        _ => Err(ExpressionError::Unsupported(value.to_string())),
    }
}

fn evaluate_call(value: &str) -> Result<TypedValue, ExpressionError> {
    let (function, arguments) =
        split_call(value).ok_or_else(|| ExpressionError::UnclosedCall(value.to_string()))?;

    Ok(match function {
        "RGB" => rgb(arguments),
        "Image" => image(arguments),
        _ => TypedValue::Unknown {
            function: function.to_string(),
            arguments: arguments.to_string(),
        },
    })
}

/// `Name(args)` -> `("Name", "args")`, args ending at the first `)`
fn split_call(value: &str) -> Option<(&str, &str)> {
    let open = value.find('(')?;
    let close = open + 1 + value[open + 1..].find(')')?;
    Some((value[..open].trim(), &value[open + 1..close]))
}

fn rgb(arguments: &str) -> TypedValue {
    let compact: String = arguments.chars().filter(|&c| c != ' ').collect();
    let channels: Result<Vec<f64>, _> = compact.split(',').map(str::parse::<f64>).collect();

    match channels.as_deref() {
        Ok([value]) => TypedValue::Col3(grey(*value)),
        Ok([r, g, b]) => TypedValue::Col3(Colour3::new(*r, *g, *b)),
        _ => TypedValue::Invalid {
            function: "RGB".to_string(),
            arguments: compact,
        },
    }
}

/// Strip the quote delimiters around the path
fn image(arguments: &str) -> TypedValue {
    let mut chars = arguments.chars();
    match (chars.next(), chars.next_back()) {
        (Some(_), Some(_)) => TypedValue::ImageRef(chars.as_str().to_string()),
        _ => TypedValue::Invalid {
            function: "Image".to_string(),
            arguments: arguments.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bare_literal() {
        assert_eq!(evaluate("0.64").unwrap(), TypedValue::Float(0.64));
        assert_eq!(evaluate("1e-2").unwrap(), TypedValue::Float(0.01));
    }

    #[test]
    fn test_bad_literal() {
        assert_eq!(evaluate("shiny"), Err(ExpressionError::Literal("shiny".into())));
    }

    #[test]
    fn test_rgb_broadcast() {
        assert_eq!(evaluate("RGB(0.5)").unwrap(), TypedValue::Col3(Colour3::new(0.5, 0.5, 0.5)));
    }

    #[test]
    fn test_rgb_three_channels() {
        match evaluate("RGB(0.1, 0.2,0.3)").unwrap() {
            TypedValue::Col3(colour) => {
                assert_relative_eq!(colour.x, 0.1);
                assert_relative_eq!(colour.y, 0.2);
                assert_relative_eq!(colour.z, 0.3);
            }
            other => panic!("unexpected value {other:?}"),
        }
    }

    #[test]
    fn test_rgb_wrong_argument_count_is_invalid() {
        assert_eq!(
            evaluate("RGB(0.1,0.2)").unwrap(),
            TypedValue::Invalid { function: "RGB".into(), arguments: "0.1,0.2".into() }
        );
        assert!(evaluate("RGB()").unwrap().is_invalid());
        assert!(evaluate("RGB(1,2,3,4)").unwrap().is_invalid());
    }

    #[test]
    fn test_rgb_non_numeric_is_invalid() {
        assert_eq!(
            evaluate("RGB(red)").unwrap(),
            TypedValue::Invalid { function: "RGB".into(), arguments: "red".into() }
        );
    }

    #[test]
    fn test_image_strips_quotes() {
        assert_eq!(
            evaluate("Image(\"foo/bar.png\")").unwrap(),
            TypedValue::ImageRef("foo/bar.png".into())
        );
    }

    #[test]
    fn test_image_without_argument_is_invalid() {
        assert!(evaluate("Image()").unwrap().is_invalid());
        assert!(evaluate("Image(x)").unwrap().is_invalid());
    }

    #[test]
    fn test_unknown_function() {
        assert_eq!(
            evaluate("Noise(4, 2)").unwrap(),
            TypedValue::Unknown { function: "Noise".into(), arguments: "4, 2".into() }
        );
    }

    #[test]
    fn test_unclosed_call() {
        assert_eq!(
            evaluate("RGB(0.5"),
            Err(ExpressionError::UnclosedCall("RGB(0.5".into()))
        );
    }

    #[test]
    fn test_nested_calls_are_unsupported() {
        assert_eq!(
            evaluate("Mix(RGB(0.1), Image(\"a.png\"))"),
            Err(ExpressionError::Unsupported("Mix(RGB(0.1), Image(\"a.png\"))".into()))
        );
    }
}
