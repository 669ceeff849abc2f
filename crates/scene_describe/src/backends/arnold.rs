//! Arnold backend: built-in `standard` shader network

use super::network::{self, NetworkProfile};
use super::{BackendIdentity, MaterialTranslator, ParameterNames};
use crate::materials::MaterialDefinition;
use crate::scene::Sink;

const PROFILE: NetworkProfile = NetworkProfile {
    target: "arnold",
    surface_node: "standard1",
    surface_type: "standard",
    terminal: "arnoldSurface",
    terminal_port: "out",
    parameters: ParameterNames {
        diff_colour: "Kd_color",
        diff_roughness: "diffuse_roughness",
        refra_index: "IOR",
        spec_colour: "Ks_color",
        spec_roughness: "specular_roughness",
    },
    texture_type: "image",
    texture_path_parameter: "filename",
    texture_output: "out",
    texture_scalar_output: "out.r",
    texture_extension: None,
    adapts_roughness: true,
};

/// Arnold built-in Standard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArnoldBackend;

impl MaterialTranslator for ArnoldBackend {
    fn identity(&self) -> BackendIdentity {
        BackendIdentity { id: "arnold", label: "Arnold built-in Standard" }
    }

    fn translate(
        &self,
        definition: &MaterialDefinition,
        sink: &mut dyn Sink,
        location: &str,
        convert_roughness: bool,
    ) {
        network::translate(&PROFILE, definition, sink, location, convert_roughness);
    }
}
