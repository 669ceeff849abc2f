//! RenderMan backend: `PxrSurface` network
//!
//! RenderMan reads its own mipmapped `.tex` files, so texture paths are
//! pointed at the converted sibling of the source image.

use super::network::{self, NetworkProfile};
use super::{BackendIdentity, MaterialTranslator, ParameterNames};
use crate::materials::MaterialDefinition;
use crate::scene::Sink;

/// Extension of converted RenderMan textures
pub const TEXTURE_EXTENSION: &str = "tex";

const PROFILE: NetworkProfile = NetworkProfile {
    target: "prman",
    surface_node: "PxrSurface1",
    surface_type: "PxrSurface",
    terminal: "prmanBxdf",
    terminal_port: "out",
    parameters: ParameterNames {
        diff_colour: "diffuseColor",
        diff_roughness: "diffuseRoughness",
        refra_index: "glassIor",
        spec_colour: "specularFaceColor",
        spec_roughness: "specularRoughness",
    },
    texture_type: "PxrTexture",
    texture_path_parameter: "filename",
    texture_output: "resultRGB",
    texture_scalar_output: "resultR",
    texture_extension: Some(TEXTURE_EXTENSION),
    adapts_roughness: true,
};

/// RenderMan PxrSurface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrManBackend;

impl MaterialTranslator for PrManBackend {
    fn identity(&self) -> BackendIdentity {
        BackendIdentity { id: "prman", label: "RenderMan PxrSurface" }
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
    fn test_texture_path_uses_tex_extension() {
        let definition =
            parse_material_description("diffColour = Image(\"maps/v1.2/wood.png\");").definition;
        let mut builder = StaticSceneCreate::new();
        PrManBackend.translate(&definition, &mut builder, "/mat", true);

        let tree = builder.build();
        assert_eq!(
            tree.attribute("/mat", "material.nodes.PxrTexture1.parameters.filename"),
            Some(&AttributeValue::from("maps/v1.2/wood.tex"))
        );
        assert_eq!(
            tree.attribute("/mat", "material.nodes.PxrSurface1.connections.diffuseColor"),
            Some(&AttributeValue::from("resultRGB@PxrTexture1"))
        );
    }

    #[test]
    fn test_scalar_image_uses_single_channel_output() {
        let definition =
            parse_material_description("diffRoughness = Image(\"maps/rough.png\");").definition;
        let mut builder = StaticSceneCreate::new();
        PrManBackend.translate(&definition, &mut builder, "/mat", true);

        let tree = builder.build();
        assert_eq!(
            tree.attribute("/mat", "material.nodes.PxrTexture1.parameters.filename"),
            Some(&AttributeValue::from("maps/rough.tex"))
        );
        assert_eq!(
            tree.attribute("/mat", "material.nodes.PxrSurface1.connections.diffuseRoughness"),
            Some(&AttributeValue::from("resultR@PxrTexture1"))
        );
        assert!(tree
            .attribute("/mat", "material.nodes.PxrSurface1.parameters.diffuseRoughness")
            .is_none());
    }
}
