//! Shading network writer shared by node-graph backends
//!
//! Network materials are laid out as
//!
//! ```text
//! material.nodes.<node>.name / .type / .target
//! material.nodes.<node>.parameters.<param>
//! material.nodes.<node>.connections.<param> = "<port>@<source node>"
//! material.terminals.<terminal> = <node>
//! material.terminals.<terminal>Port = <port>
//! ```
//!
//! Image inputs become auxiliary texture nodes connected into the surface
//! node instead of literal parameters. Scalar parameters read a single
//! channel of the texture.

use super::{inputs, replace_extension, Input, NodeNamer, ParameterNames};
use crate::describe::coerce::AttributeValue;
use crate::materials::MaterialDefinition;
use crate::scene::Sink;

/// Fixed description of one renderer's network layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkProfile {
    /// Renderer target written on every node
    pub target: &'static str,
    /// Surface shader node name
    pub surface_node: &'static str,
    /// Surface shader type
    pub surface_type: &'static str,
    /// Terminal the surface node is bound to
    pub terminal: &'static str,
    /// Output port of the surface node
    pub terminal_port: &'static str,
    /// Surface parameter names
    pub parameters: ParameterNames,
    /// Texture node type, also the prefix of generated node names
    pub texture_type: &'static str,
    /// Texture node parameter receiving the file path
    pub texture_path_parameter: &'static str,
    /// Texture node output connected into colour parameters
    pub texture_output: &'static str,
    /// Texture node output connected into scalar parameters
    pub texture_scalar_output: &'static str,
    /// Extension forced onto texture paths, if the renderer needs its own format
    pub texture_extension: Option<&'static str>,
    /// Whether roughness scalars are squared microfacet parameters
    pub adapts_roughness: bool,
}

/// Writes network attributes for one material location
pub struct ShadingNetwork<'a> {
    sink: &'a mut dyn Sink,
    location: &'a str,
    target: &'static str,
}

impl<'a> ShadingNetwork<'a> {
    /// Start writing below `location`
    pub fn new(sink: &'a mut dyn Sink, location: &'a str, target: &'static str) -> Self {
        Self { sink, location, target }
    }

    /// Declare a node
    pub fn add_node(&mut self, node: &str, node_type: &str) {
        self.set(&format!("material.nodes.{node}.name"), node.into());
        self.set(&format!("material.nodes.{node}.type"), node_type.into());
        self.set(&format!("material.nodes.{node}.target"), self.target.into());
    }

    /// Set a literal node parameter
    pub fn set_parameter(&mut self, node: &str, parameter: &str, value: AttributeValue) {
        self.set(&format!("material.nodes.{node}.parameters.{parameter}"), value);
    }

    /// Connect `source`'s `port` into `node`'s `parameter`
    pub fn connect(&mut self, node: &str, parameter: &str, source: &str, port: &str) {
        self.set(
            &format!("material.nodes.{node}.connections.{parameter}"),
            format!("{port}@{source}").into(),
        );
    }

    /// Declare a texture node reading `path`, returning its generated name
    pub fn add_texture(
        &mut self,
        namer: &mut NodeNamer,
        node_type: &str,
        path_parameter: &str,
        path: String,
    ) -> String {
        let texture = namer.next_name();
        self.add_node(&texture, node_type);
        self.set_parameter(&texture, path_parameter, path.into());
        texture
    }

    /// Bind a node to a material terminal
    pub fn set_terminal(&mut self, terminal: &str, node: &str, port: &str) {
        self.set(&format!("material.terminals.{terminal}"), node.into());
        self.set(&format!("material.terminals.{terminal}Port"), port.into());
    }

    fn set(&mut self, name: &str, value: AttributeValue) {
        self.sink.set_attribute(self.location, name, value);
    }
}

/// Translate a definition into a network following `profile`
pub fn translate(
    profile: &NetworkProfile,
    definition: &MaterialDefinition,
    sink: &mut dyn Sink,
    location: &str,
    convert_roughness: bool,
) {
    let mut network = ShadingNetwork::new(sink, location, profile.target);
    let mut textures = NodeNamer::new(profile.texture_type);

    network.add_node(profile.surface_node, profile.surface_type);
    network.set_terminal(profile.terminal, profile.surface_node, profile.terminal_port);

    for (key, input) in inputs(definition, convert_roughness, profile.adapts_roughness) {
        let parameter = profile.parameters.get(key);

        if let Input::Image(path) = input {
            let path = match profile.texture_extension {
                Some(extension) => replace_extension(path, extension),
                None => path.to_string(),
            };
            let output = if key.is_colour() {
                profile.texture_output
            } else {
                profile.texture_scalar_output
            };

            let texture = network.add_texture(
                &mut textures,
                profile.texture_type,
                profile.texture_path_parameter,
                path,
            );
            network.connect(profile.surface_node, parameter, &texture, output);
        } else if let Some(value) = input.literal() {
            network.set_parameter(profile.surface_node, parameter, value);
        }
    }
}
