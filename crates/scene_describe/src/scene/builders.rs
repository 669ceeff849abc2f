//! Sink implementations for the two ways a description reaches the scene
//!
//! [`StaticSceneCreate`] builds new locations from scratch. [`AttributeSet`]
//! only amends locations that already exist in an upstream scene.

use crate::describe::coerce::AttributeValue;

use super::sink::Sink;
use super::tree::SceneTree;

/// Create-new builder
#[derive(Debug, Clone, Default)]
pub struct StaticSceneCreate {
    tree: SceneTree,
}

impl StaticSceneCreate {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Operation name understood by the host
    pub fn op_name(&self) -> &'static str {
        "StaticSceneCreate"
    }

    /// Peek at the tree built so far
    pub fn tree(&self) -> &SceneTree {
        &self.tree
    }

    /// Finish and return the created locations
    pub fn build(self) -> SceneTree {
        self.tree
    }
}

impl Sink for StaticSceneCreate {
    fn create_location(&mut self, path: &str) {
        self.tree.ensure_location(path);
    }

    fn set_attribute(&mut self, path: &str, name: &str, value: AttributeValue) {
        self.tree.set(path, name, value);
    }
}

/// One recorded attribute edit
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeEdit {
    /// Target location
    pub path: String,
    /// Attribute name
    pub name: String,
    /// New value
    pub value: AttributeValue,
}

/// Amend-existing builder
#[derive(Debug, Clone, Default)]
pub struct AttributeSet {
    edits: Vec<AttributeEdit>,
}

impl AttributeSet {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Operation name understood by the host
    pub fn op_name(&self) -> &'static str {
        "AttributeSet"
    }

    /// Edits recorded so far, in order
    pub fn edits(&self) -> &[AttributeEdit] {
        &self.edits
    }

    /// Apply the edits to an upstream scene
    ///
    /// Edits aimed at locations missing from `scene` are dropped. Returns how
    /// many were dropped.
    pub fn apply(self, scene: &mut SceneTree) -> usize {
        let mut skipped = 0;
        for edit in self.edits {
            match scene.location_mut(&edit.path) {
                Some(location) => {
                    location.attributes.insert(edit.name, edit.value);
                }
                None => {
                    log::warn!(
                        "AttributeSet: location '{}' does not exist, '{}' not set",
                        edit.path,
                        edit.name
                    );
                    skipped += 1;
                }
            }
        }
        skipped
    }
}

impl Sink for AttributeSet {
    fn create_location(&mut self, path: &str) {
        log::debug!("AttributeSet: ignoring create request for '{}'", path);
    }

    fn set_attribute(&mut self, path: &str, name: &str, value: AttributeValue) {
        self.edits.push(AttributeEdit {
            path: path.to_string(),
            name: name.to_string(),
            value,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_scene_create_builds_locations() {
        let mut builder = StaticSceneCreate::new();
        builder.create_location("/root/world/geo/empty");
        builder.set_attribute(
            "/root/world/geo/ball",
            "geometry.radius",
            AttributeValue::Double(2.0),
        );

        assert_eq!(builder.op_name(), "StaticSceneCreate");
        let tree = builder.build();
        assert_eq!(tree.len(), 2);
        assert!(tree.location("/root/world/geo/empty").unwrap().attributes.is_empty());
    }

    #[test]
    fn test_attribute_set_only_amends_existing() {
        let mut scene = SceneTree::new();
        scene.set("/root/world/geo/ball", "type", "sphere".into());

        let mut edits = AttributeSet::new();
        edits.create_location("/root/world/geo/new");
        edits.set_attribute("/root/world/geo/ball", "geometry.radius", AttributeValue::Double(3.0));
        edits.set_attribute("/root/world/geo/new", "geometry.radius", AttributeValue::Double(1.0));

        let skipped = edits.apply(&mut scene);
        assert_eq!(skipped, 1);
        assert!(!scene.contains("/root/world/geo/new"));
        assert_eq!(
            scene.attribute("/root/world/geo/ball", "geometry.radius"),
            Some(&AttributeValue::Double(3.0))
        );
    }
}
