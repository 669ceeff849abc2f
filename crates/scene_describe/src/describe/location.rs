//! Location description pipeline
//!
//! Parses a location description, coerces every attribute and writes the
//! result through a [`Sink`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::attribute::parse_description;
use super::coerce::AttributeValue;
use super::diagnostics::Diagnostics;
use crate::scene::Sink;

/// Whether the description creates its location or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationMode {
    /// Create the location and set its `type`
    #[default]
    Create,
    /// Amend attributes of an upstream location
    Edit,
}

impl FromStr for LocationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Self::Create),
            "edit" => Ok(Self::Edit),
            other => Err(format!("unknown location mode '{other}', expected create or edit")),
        }
    }
}

impl fmt::Display for LocationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Edit => "edit",
        })
    }
}

/// Where and how a location description is applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationRequest {
    /// Target location path
    pub path: String,
    /// Create or edit
    pub mode: LocationMode,
    /// Value of the `type` attribute in create mode
    pub location_type: String,
}

/// Outcome of one location description
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescribeReport {
    /// Attributes written from the description (not counting `type`)
    pub written: usize,
    /// Skipped statements and failed coercions
    pub diagnostics: Diagnostics,
}

/// Apply a location description to a sink
pub fn describe_location<S: Sink + ?Sized>(
    sink: &mut S,
    request: &LocationRequest,
    description: &str,
) -> DescribeReport {
    let parsed = parse_description(description);
    let mut report = DescribeReport {
        written: 0,
        diagnostics: parsed.diagnostics,
    };

    if request.mode == LocationMode::Create {
        sink.create_location(&request.path);
        sink.set_attribute(
            &request.path,
            "type",
            AttributeValue::String(request.location_type.clone()),
        );
    }

    for descriptor in parsed.descriptors {
        match descriptor.coerce() {
            Ok(value) => {
                sink.set_attribute(&request.path, &descriptor.name, value);
                report.written += 1;
            }
            Err(err) => {
                let statement = format!("{} {}", descriptor.base_type, descriptor.name);
                report.diagnostics.push(descriptor.line, err, statement);
            }
        }
    }

    log::info!(
        "{} '{}': {} attributes, {} diagnostics",
        request.mode,
        request.path,
        report.written,
        report.diagnostics.len()
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::diagnostics::{CoercionError, DiagnosticKind};
    use crate::scene::{AttributeSet, SceneTree, StaticSceneCreate};

    fn request(mode: LocationMode) -> LocationRequest {
        LocationRequest {
            path: "/root/world/geo/location1".into(),
            mode,
            location_type: "sphere".into(),
        }
    }

    #[test]
    fn test_create_mode_sets_type_and_attributes() {
        let mut builder = StaticSceneCreate::new();
        let report = describe_location(
            &mut builder,
            &request(LocationMode::Create),
            "double geometry.radius = 1.0;\nint[2] ids = {3, 4};\n",
        );

        assert_eq!(report.written, 2);
        assert!(report.diagnostics.is_empty());

        let tree = builder.build();
        let path = "/root/world/geo/location1";
        assert_eq!(tree.attribute(path, "type"), Some(&AttributeValue::String("sphere".into())));
        assert_eq!(tree.attribute(path, "geometry.radius"), Some(&AttributeValue::Double(1.0)));
        assert_eq!(tree.attribute(path, "ids"), Some(&AttributeValue::IntArray(vec![3, 4], 1)));
    }

    #[test]
    fn test_edit_mode_does_not_set_type() {
        let mut scene = SceneTree::new();
        scene.set("/root/world/geo/location1", "type", "polymesh".into());

        let mut edits = AttributeSet::new();
        describe_location(&mut edits, &request(LocationMode::Edit), "float scale = 2.0;");
        assert_eq!(edits.edits().len(), 1);

        assert_eq!(edits.apply(&mut scene), 0);
        assert_eq!(
            scene.attribute("/root/world/geo/location1", "type"),
            Some(&AttributeValue::String("polymesh".into()))
        );
    }

    #[test]
    fn test_coercion_failure_does_not_abort() {
        let mut builder = StaticSceneCreate::new();
        let report = describe_location(
            &mut builder,
            &request(LocationMode::Create),
            "int a = nope;\nint b = 7;\n",
        );

        assert_eq!(report.written, 1);
        assert_eq!(report.diagnostics.len(), 1);
        let diagnostic = report.diagnostics.iter().next().unwrap();
        assert_eq!(diagnostic.line, 1);
        assert_eq!(
            diagnostic.kind,
            DiagnosticKind::Coercion(CoercionError::Int { name: "a".into(), value: "nope".into() })
        );
        assert!(builder.tree().attribute("/root/world/geo/location1", "a").is_none());
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("edit".parse::<LocationMode>().unwrap(), LocationMode::Edit);
        assert!("amend".parse::<LocationMode>().is_err());
    }
}
