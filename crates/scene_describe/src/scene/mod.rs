//! Scene locations and the sink interface
//!
//! The description pipelines never build scene data directly. They talk to a
//! [`Sink`], and the caller decides whether that sink creates new locations
//! ([`StaticSceneCreate`]) or amends existing ones ([`AttributeSet`]).

pub mod sink;
pub mod tree;
pub mod builders;

pub use sink::Sink;
pub use tree::{SceneLocation, SceneTree};
pub use builders::{AttributeSet, StaticSceneCreate};

/// Join a base location and child names without doubling separators
///
/// `join_location("/root/materials/", &["arnold", "material1"])` gives
/// `/root/materials/arnold/material1`.
pub fn join_location(base: &str, children: &[&str]) -> String {
    let mut path = base.trim_end_matches('/').to_string();
    for child in children {
        let child = child.trim_matches('/');
        if child.is_empty() {
            continue;
        }
        path.push('/');
        path.push_str(child);
    }
    path
}
