//! # Scene Describe
//!
//! Compiles small declarative descriptions into typed scene attributes.
//!
//! ## Features
//!
//! - **Location descriptions**: `double geometry.radius = 1.0;` style typed
//!   attribute statements, including arrays with tuple sizes
//! - **Material descriptions**: `diffColour = RGB(0.18);` style statements
//!   evaluated into a material definition
//! - **Renderer backends**: one definition translated for Imagine, Arnold,
//!   RenderMan and Redshift, with texture nodes for image inputs
//! - **Pluggable sinks**: write into a new scene or amend an existing one
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_describe::prelude::*;
//!
//! let engine = DescribeEngine::new(DescribeConfig::default()).unwrap();
//! let mut builder = StaticSceneCreate::new();
//!
//! let report = engine
//!     .describe_material("diffColour = RGB(0.18);\nspecRoughness = 0.3;", &mut builder)
//!     .unwrap();
//!
//! assert_eq!(report.locations.len(), 4);
//! let scene = builder.build();
//! assert!(scene.contains("/root/materials/arnold/material1"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod core;
pub mod config;
pub mod foundation;
pub mod describe;
pub mod materials;
pub mod backends;
pub mod scene;

mod engine;

pub use engine::{DescribeEngine, EngineError, MaterialReport};

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        DescribeEngine, EngineError, MaterialReport,
        backends::{registry, Backend, MaterialRequest, MaterialTranslator, PluginRegistry},
        core::config::{Config, DescribeConfig, LocationDescribeConfig, MaterialDescribeConfig},
        describe::{describe_location, AttributeValue, Diagnostics, LocationMode, LocationRequest},
        materials::{parse_material_description, MaterialDefinition, MaterialKey, TypedValue},
        scene::{AttributeSet, SceneTree, Sink, StaticSceneCreate},
    };
}
