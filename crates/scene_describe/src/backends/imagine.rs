//! Imagine backend: flat `Standard` surface parameters
//!
//! Literal values go straight onto `material.imagineSurfaceParams`. Image
//! inputs get an `ImageTexture<N>` node and the surface parameter holds a
//! `"<port>@<node>"` connection to it.

use super::network::ShadingNetwork;
use super::{inputs, BackendIdentity, Input, MaterialTranslator, NodeNamer, ParameterNames};
use crate::describe::coerce::AttributeValue;
use crate::materials::MaterialDefinition;
use crate::scene::Sink;

const SHADER_ATTRIBUTE: &str = "material.imagineSurfaceShader";
const PARAMS_PREFIX: &str = "material.imagineSurfaceParams";
const SHADER: &str = "Standard";
const TARGET: &str = "imagine";

const TEXTURE_TYPE: &str = "ImageTexture";
const TEXTURE_PATH: &str = "path";
const TEXTURE_OUTPUT: &str = "out";
const TEXTURE_SCALAR_OUTPUT: &str = "out.r";

const PARAMETERS: ParameterNames = ParameterNames {
    diff_colour: "diff_col",
    diff_roughness: "diff_roughness",
    refra_index: "refraction_index",
    spec_colour: "spec_col",
    spec_roughness: "spec_roughness",
};

/// Imagine built-in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImagineBackend;

impl MaterialTranslator for ImagineBackend {
    fn identity(&self) -> BackendIdentity {
        BackendIdentity { id: "imagine", label: "Imagine built-in" }
    }

    fn translate(
        &self,
        definition: &MaterialDefinition,
        sink: &mut dyn Sink,
        location: &str,
        convert_roughness: bool,
    ) {
        // Imagine's roughness is already linear
        let found = inputs(definition, convert_roughness, false);
        let mut textures = NodeNamer::new(TEXTURE_TYPE);

        sink.set_attribute(location, SHADER_ATTRIBUTE, SHADER.into());

        for (key, input) in found {
            let attribute = format!("{PARAMS_PREFIX}.{}", PARAMETERS.get(key));
            match input {
                Input::Image(path) => {
                    let texture = ShadingNetwork::new(sink, location, TARGET).add_texture(
                        &mut textures,
                        TEXTURE_TYPE,
                        TEXTURE_PATH,
                        path.to_string(),
                    );
                    let port = if key.is_colour() {
                        TEXTURE_OUTPUT
                    } else {
                        TEXTURE_SCALAR_OUTPUT
                    };
                    let connection = AttributeValue::from(format!("{port}@{texture}"));
                    sink.set_attribute(location, &attribute, connection);
                }
                literal => {
                    if let Some(value) = literal.literal() {
                        sink.set_attribute(location, &attribute, value);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::parse_material_description;
    use crate::scene::StaticSceneCreate;

    #[test]
    fn test_flat_parameters_and_texture_nodes() {
        let definition = parse_material_description(
            "diffColour = Image(\"d.png\");\nspecColour = RGB(0.04);\nspecRoughness = 0.64;",
        )
        .definition;
        let mut builder = StaticSceneCreate::new();
        ImagineBackend.translate(&definition, &mut builder, "/mat", true);

        let tree = builder.build();
        assert_eq!(
            tree.attribute("/mat", SHADER_ATTRIBUTE),
            Some(&AttributeValue::from("Standard"))
        );
        assert_eq!(
            tree.attribute("/mat", "material.nodes.ImageTexture1.parameters.path"),
            Some(&AttributeValue::from("d.png"))
        );
        assert_eq!(
            tree.attribute("/mat", "material.nodes.ImageTexture1.target"),
            Some(&AttributeValue::from("imagine"))
        );
        assert_eq!(
            tree.attribute("/mat", "material.imagineSurfaceParams.diff_col"),
            Some(&AttributeValue::from("out@ImageTexture1"))
        );
        assert_eq!(
            tree.attribute("/mat", "material.imagineSurfaceParams.spec_col"),
            Some(&AttributeValue::FloatArray(vec![0.04, 0.04, 0.04], 3))
        );
        assert_eq!(
            tree.attribute("/mat", "material.imagineSurfaceParams.spec_roughness"),
            Some(&AttributeValue::Float(0.64))
        );
        assert!(tree.paths().all(|path| path == "/mat"));
    }

    #[test]
    fn test_scalar_image_gets_its_own_node() {
        let definition = parse_material_description(
            "diffColour = Image(\"d.png\");\nspecRoughness = Image(\"r.exr\");",
        )
        .definition;
        let mut builder = StaticSceneCreate::new();
        ImagineBackend.translate(&definition, &mut builder, "/mat", true);

        let tree = builder.build();
        assert_eq!(
            tree.attribute("/mat", "material.nodes.ImageTexture2.parameters.path"),
            Some(&AttributeValue::from("r.exr"))
        );
        assert_eq!(
            tree.attribute("/mat", "material.imagineSurfaceParams.spec_roughness"),
            Some(&AttributeValue::from("out.r@ImageTexture2"))
        );
    }
}
