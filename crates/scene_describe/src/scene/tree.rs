//! In-memory attribute tree

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::describe::coerce::AttributeValue;

/// Attributes of one scene location, keyed by dotted attribute name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneLocation {
    /// Attribute name -> value
    pub attributes: BTreeMap<String, AttributeValue>,
}

/// Scene locations keyed by absolute path, iterated in path order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneTree {
    locations: BTreeMap<String, SceneLocation>,
}

impl SceneTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an empty location if it does not exist yet
    pub fn ensure_location(&mut self, path: &str) -> &mut SceneLocation {
        self.locations.entry(path.to_string()).or_default()
    }

    /// Set an attribute, creating the location when needed
    pub fn set(&mut self, path: &str, name: &str, value: AttributeValue) {
        self.ensure_location(path)
            .attributes
            .insert(name.to_string(), value);
    }

    /// Look up a location
    pub fn location(&self, path: &str) -> Option<&SceneLocation> {
        self.locations.get(path)
    }

    /// Mutable access to an existing location
    pub fn location_mut(&mut self, path: &str) -> Option<&mut SceneLocation> {
        self.locations.get_mut(path)
    }

    /// Look up one attribute
    pub fn attribute(&self, path: &str, name: &str) -> Option<&AttributeValue> {
        self.location(path)?.attributes.get(name)
    }

    /// True if the location exists
    pub fn contains(&self, path: &str) -> bool {
        self.locations.contains_key(path)
    }

    /// Location paths in order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.locations.keys().map(String::as_str)
    }

    /// Locations at or below `root`
    pub fn subtree<'a>(
        &'a self,
        root: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a SceneLocation)> {
        self.locations
            .iter()
            .filter(move |(path, _)| is_within(path, root))
            .map(|(path, location)| (path.as_str(), location))
    }

    /// Number of locations
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// True when no location exists
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

fn is_within(path: &str, root: &str) -> bool {
    path == root
        || path
            .strip_prefix(root)
            .is_some_and(|rest| rest.starts_with('/'))
}
