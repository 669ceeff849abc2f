//! Top-level entry points tying configuration, parsing and backends together

use thiserror::Error;

use crate::backends::{registry, PluginRegistry, RegistryError};
use crate::core::config::{ConfigError, DescribeConfig};
use crate::describe::diagnostics::Diagnostics;
use crate::describe::location::{describe_location, DescribeReport};
use crate::materials::{parse_material_description, MaterialDefinition};
use crate::scene::Sink;

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Backend selection failed
    #[error("Backend error: {0}")]
    Registry(#[from] RegistryError),

    /// Configuration failed to load or validate
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Outcome of one material description
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialReport {
    /// One location per enabled backend, in request order
    pub locations: Vec<String>,
    /// The evaluated definition
    pub definition: MaterialDefinition,
    /// Skipped statements
    pub diagnostics: Diagnostics,
}

/// Runs descriptions with a fixed configuration
pub struct DescribeEngine {
    config: DescribeConfig,
    registry: &'static PluginRegistry,
}

impl DescribeEngine {
    /// Create an engine after validating `config`
    pub fn new(config: DescribeConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config,
            registry: registry(),
        })
    }

    /// Active configuration
    pub fn config(&self) -> &DescribeConfig {
        &self.config
    }

    /// Backend registry in use
    pub fn registry(&self) -> &'static PluginRegistry {
        self.registry
    }

    /// Apply a location description through `sink`
    pub fn describe_location(&self, description: &str, sink: &mut dyn Sink) -> DescribeReport {
        describe_location(sink, &self.config.location.request(), description)
    }

    /// Build backend materials for a material description through `sink`
    ///
    /// Statement problems never fail the call; an unknown backend id does,
    /// before anything is written.
    pub fn describe_material(
        &self,
        description: &str,
        sink: &mut dyn Sink,
    ) -> Result<MaterialReport, EngineError> {
        let parsed = parse_material_description(description);

        for (name, value) in parsed.definition.invalid_entries() {
            log::warn!("definition '{}' is invalid: {:?}", name, value);
        }

        let locations = self.registry.translate_material(
            &parsed.definition,
            sink,
            &self.config.material.request(),
        )?;

        log::info!(
            "material '{}': {} definitions, {} backend locations, {} diagnostics",
            self.config.material.material_name,
            parsed.definition.len(),
            locations.len(),
            parsed.diagnostics.len()
        );

        Ok(MaterialReport {
            locations,
            definition: parsed.definition,
            diagnostics: parsed.diagnostics,
        })
    }
}
