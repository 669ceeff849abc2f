//! Backend registry
//!
//! Built once by [`PluginRegistry::with_builtin_backends`] and read-only
//! afterwards, so any number of threads may translate through it at once.

use std::collections::HashMap;
use std::sync::OnceLock;

use thiserror::Error;

use super::{Backend, BackendIdentity, MaterialTranslator};
use crate::describe::coerce::AttributeValue;
use crate::materials::MaterialDefinition;
use crate::scene::{join_location, Sink};

/// Registry errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Requested id is not registered
    #[error("unknown backend '{0}'")]
    UnknownBackend(String),

    /// Id registered twice
    #[error("backend '{0}' is already registered")]
    Duplicate(&'static str),

    /// Request cannot produce a location
    #[error("invalid material request: {0}")]
    InvalidRequest(String),
}

/// Which material to build, where, and for which backends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialRequest {
    /// Parent of every backend location, e.g. `/root/materials/`
    pub base_location: String,
    /// Leaf name of every backend location
    pub material_name: String,
    /// Enabled backend ids, in output order
    pub backends: Vec<String>,
    /// Square-root roughness for backends with microfacet roughness
    pub convert_roughness: bool,
}

/// Ordered, id-addressable set of backends
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    backends: Vec<Backend>,
    index: HashMap<&'static str, usize>,
}

impl PluginRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in backend
    pub fn with_builtin_backends() -> Self {
        let mut registry = Self::new();
        for backend in Backend::builtin() {
            if let Err(err) = registry.register(backend) {
                log::error!("{}", err);
            }
        }
        log::debug!("registered backends: {:?}", registry.ids().collect::<Vec<_>>());
        registry
    }

    /// Add a backend at the end of the order
    pub fn register(&mut self, backend: Backend) -> Result<(), RegistryError> {
        let id = backend.id();
        if self.index.contains_key(id) {
            return Err(RegistryError::Duplicate(id));
        }
        self.index.insert(id, self.backends.len());
        self.backends.push(backend);
        Ok(())
    }

    /// Look up a backend by id
    pub fn get(&self, id: &str) -> Option<&Backend> {
        self.index.get(id).map(|&slot| &self.backends[slot])
    }

    /// Backends in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Backend> {
        self.backends.iter()
    }

    /// Ids in registration order
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.iter().map(Backend::id)
    }

    /// Identities in registration order
    pub fn identities(&self) -> Vec<BackendIdentity> {
        self.iter().map(MaterialTranslator::identity).collect()
    }

    /// Number of backends
    pub fn len(&self) -> usize {
        self.backends.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// Translate a definition for every enabled backend
    ///
    /// All ids are resolved before anything is written. Each backend gets its
    /// own location `<base>/<id>/<material>`. Returns those locations in
    /// request order.
    pub fn translate_material(
        &self,
        definition: &MaterialDefinition,
        sink: &mut dyn Sink,
        request: &MaterialRequest,
    ) -> Result<Vec<String>, RegistryError> {
        if request.material_name.trim_matches('/').is_empty() {
            return Err(RegistryError::InvalidRequest("material name is empty".into()));
        }

        let selected = request
            .backends
            .iter()
            .map(|id| self.get(id).ok_or_else(|| RegistryError::UnknownBackend(id.clone())))
            .collect::<Result<Vec<_>, _>>()?;

        let mut locations = Vec::with_capacity(selected.len());
        for backend in selected {
            let location = join_location(
                &request.base_location,
                &[backend.id(), request.material_name.as_str()],
            );

            sink.create_location(&location);
            sink.set_attribute(&location, "type", AttributeValue::from("material"));
            backend.translate(definition, sink, &location, request.convert_roughness);

            log::debug!("{}: wrote '{}'", backend.id(), location);
            locations.push(location);
        }

        Ok(locations)
    }
}

/// Process-wide registry of the built-in backends
pub fn registry() -> &'static PluginRegistry {
    static REGISTRY: OnceLock<PluginRegistry> = OnceLock::new();
    REGISTRY.get_or_init(PluginRegistry::with_builtin_backends)
}
