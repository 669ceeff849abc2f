//! Renderer backends for material definitions
//!
//! Each backend re-encodes the same [`MaterialDefinition`] into one renderer's
//! attribute layout. The set is closed: [`Backend`] has one variant per
//! renderer and the [`registry`] hands them out by id.

pub mod network;
pub mod registry;
pub mod imagine;
pub mod arnold;
pub mod prman;
pub mod redshift;

#[cfg(test)]
mod tests;

pub use imagine::ImagineBackend;
pub use arnold::ArnoldBackend;
pub use prman::PrManBackend;
pub use redshift::RedshiftBackend;
pub use registry::{registry, MaterialRequest, PluginRegistry, RegistryError};

use crate::describe::coerce::AttributeValue;
use crate::foundation::math::{to_rgb_f32, Colour3};
use crate::materials::{MaterialDefinition, MaterialKey, TypedValue};
use crate::scene::Sink;

/// Id and human readable label of a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BackendIdentity {
    /// Stable id used for selection and in location paths
    pub id: &'static str,
    /// Description shown to users
    pub label: &'static str,
}

/// Translation capability shared by every backend
pub trait MaterialTranslator {
    /// Id and label
    fn identity(&self) -> BackendIdentity;

    /// Write the backend's attributes for `definition` below `location`
    ///
    /// Unknown keys and value shapes the backend does not handle are skipped.
    fn translate(
        &self,
        definition: &MaterialDefinition,
        sink: &mut dyn Sink,
        location: &str,
        convert_roughness: bool,
    );
}

/// Every built-in backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Imagine renderer
    Imagine(ImagineBackend),
    /// Arnold
    Arnold(ArnoldBackend),
    /// RenderMan
    PrMan(PrManBackend),
    /// Redshift
    Redshift(RedshiftBackend),
}

impl Backend {
    /// Built-in backends in registration order
    pub fn builtin() -> [Self; 4] {
        [
            Self::Imagine(ImagineBackend),
            Self::Arnold(ArnoldBackend),
            Self::PrMan(PrManBackend),
            Self::Redshift(RedshiftBackend),
        ]
    }

    /// Shorthand for `identity().id`
    pub fn id(&self) -> &'static str {
        self.identity().id
    }

    fn translator(&self) -> &dyn MaterialTranslator {
        match self {
            Self::Imagine(backend) => backend,
            Self::Arnold(backend) => backend,
            Self::PrMan(backend) => backend,
            Self::Redshift(backend) => backend,
        }
    }
}

impl MaterialTranslator for Backend {
    fn identity(&self) -> BackendIdentity {
        self.translator().identity()
    }

    fn translate(
        &self,
        definition: &MaterialDefinition,
        sink: &mut dyn Sink,
        location: &str,
        convert_roughness: bool,
    ) {
        self.translator().translate(definition, sink, location, convert_roughness);
    }
}

/// Backend parameter name for each semantic key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterNames {
    /// `diffColour`
    pub diff_colour: &'static str,
    /// `diffRoughness`
    pub diff_roughness: &'static str,
    /// `refraIndex`
    pub refra_index: &'static str,
    /// `specColour`
    pub spec_colour: &'static str,
    /// `specRoughness`
    pub spec_roughness: &'static str,
}

impl ParameterNames {
    /// Parameter for a key
    pub fn get(&self, key: MaterialKey) -> &'static str {
        match key {
            MaterialKey::DiffColour => self.diff_colour,
            MaterialKey::DiffRoughness => self.diff_roughness,
            MaterialKey::RefraIndex => self.refra_index,
            MaterialKey::SpecColour => self.spec_colour,
            MaterialKey::SpecRoughness => self.spec_roughness,
        }
    }
}

/// A definition value a backend knows how to write
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input<'a> {
    /// Literal colour
    Colour(&'a Colour3),
    /// Literal scalar, already roughness-adapted
    Scalar(f64),
    /// Texture file
    Image(&'a str),
}

impl Input<'_> {
    /// Literal attribute value, `None` for images
    pub fn literal(&self) -> Option<AttributeValue> {
        match self {
            Self::Colour(colour) => Some(AttributeValue::FloatArray(to_rgb_f32(colour), 3)),
            Self::Scalar(value) => Some(AttributeValue::Float(*value as f32)),
            Self::Image(_) => None,
        }
    }
}

/// Pair every present semantic key with a value shape the backends accept
///
/// Every key takes `ImageRef`. Colour keys also take `Col3`, scalar keys take
/// `Float`. Roughness scalars go through [`adapt_roughness`] when
/// `adapts_roughness` is set.
pub fn inputs(
    definition: &MaterialDefinition,
    convert_roughness: bool,
    adapts_roughness: bool,
) -> Vec<(MaterialKey, Input<'_>)> {
    let mut found = Vec::new();

    for key in MaterialKey::ALL {
        let Some(value) = definition.get_key(key) else {
            continue;
        };

        let input = match value {
            TypedValue::ImageRef(path) => Input::Image(path),
            TypedValue::Col3(colour) if key.is_colour() => Input::Colour(colour),
            TypedValue::Float(value) if !key.is_colour() => {
                if key.is_roughness() && adapts_roughness {
                    Input::Scalar(adapt_roughness(*value, convert_roughness))
                } else {
                    Input::Scalar(*value)
                }
            }
            other => {
                log::debug!("ignoring {} value for '{}'", other.kind(), key);
                continue;
            }
        };

        found.push((key, input));
    }

    found
}

/// Map a linear roughness onto a squared microfacet parameter
pub fn adapt_roughness(value: f64, convert: bool) -> f64 {
    if convert {
        value.sqrt()
    } else {
        value
    }
}

/// Swap the file extension of a texture path
///
/// `textures/wood.png` with `tex` gives `textures/wood.tex`. Paths without an
/// extension get one appended. Dots in directory names are left alone.
pub fn replace_extension(path: &str, extension: &str) -> String {
    let file_start = path.rfind(['/', '\\']).map_or(0, |sep| sep + 1);
    let stem_end = match path[file_start..].rfind('.') {
        Some(dot) if dot > 0 => file_start + dot,
        _ => path.len(),
    };
    format!("{}.{}", &path[..stem_end], extension)
}

/// Per-call counter handing out `<Prefix><N>` node names, starting at 1
#[derive(Debug, Clone)]
pub struct NodeNamer {
    prefix: &'static str,
    count: usize,
}

impl NodeNamer {
    /// Start counting for `prefix`
    pub fn new(prefix: &'static str) -> Self {
        Self { prefix, count: 0 }
    }

    /// Next unique name
    pub fn next_name(&mut self) -> String {
        self.count += 1;
        format!("{}{}", self.prefix, self.count)
    }
}
