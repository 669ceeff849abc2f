//! Redshift backend: `Material` network with linear roughness

use super::network::{self, NetworkProfile};
use super::{BackendIdentity, MaterialTranslator, ParameterNames};
use crate::materials::MaterialDefinition;
use crate::scene::Sink;

const PROFILE: NetworkProfile = NetworkProfile {
    target: "redshift",
    surface_node: "Material1",
    surface_type: "Material",
    terminal: "redshiftSurface",
    terminal_port: "outColor",
    parameters: ParameterNames {
        diff_colour: "diffuse_color",
        diff_roughness: "diffuse_roughness",
        refra_index: "refl_ior",
        spec_colour: "refl_color",
        spec_roughness: "refl_roughness",
    },
    texture_type: "TextureSampler",
    texture_path_parameter: "tex0",
    texture_output: "outColor",
    texture_scalar_output: "outColor.r",
    texture_extension: None,
    adapts_roughness: false,
};

/// Redshift Material
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedshiftBackend;

impl MaterialTranslator for RedshiftBackend {
    fn identity(&self) -> BackendIdentity {
        BackendIdentity { id: "redshift", label: "Redshift Material" }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::coerce::AttributeValue;
    use crate::materials::parse_material_description;
    use crate::scene::StaticSceneCreate;

    #[test]
    fn test_roughness_ignores_conversion_flag() {
        let definition = parse_material_description("specRoughness = 0.64;").definition;
        let mut builder = StaticSceneCreate::new();
        RedshiftBackend.translate(&definition, &mut builder, "/mat", true);

        assert_eq!(
            builder
                .tree()
                .attribute("/mat", "material.nodes.Material1.parameters.refl_roughness"),
            Some(&AttributeValue::Float(0.64))
        );
    }

    #[test]
    fn test_texture_sampler_node() {
        let definition = parse_material_description("specColour = Image(\"s.exr\");").definition;
        let mut builder = StaticSceneCreate::new();
        RedshiftBackend.translate(&definition, &mut builder, "/mat", false);

        let tree = builder.build();
        assert_eq!(
            tree.attribute("/mat", "material.nodes.TextureSampler1.parameters.tex0"),
            Some(&AttributeValue::from("s.exr"))
        );
        assert_eq!(
            tree.attribute("/mat", "material.nodes.TextureSampler1.type"),
            Some(&AttributeValue::from("TextureSampler"))
        );
    }

    #[test]
    fn test_refraction_index_image() {
        let definition = parse_material_description("refraIndex = Image(\"ior.exr\");").definition;
        let mut builder = StaticSceneCreate::new();
        RedshiftBackend.translate(&definition, &mut builder, "/mat", false);

        let tree = builder.build();
        assert_eq!(
            tree.attribute("/mat", "material.nodes.TextureSampler1.parameters.tex0"),
            Some(&AttributeValue::from("ior.exr"))
        );
        assert_eq!(
            tree.attribute("/mat", "material.nodes.Material1.connections.refl_ior"),
            Some(&AttributeValue::from("outColor.r@TextureSampler1"))
        );
    }
}
