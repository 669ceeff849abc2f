//! # Unified Configuration System
//!
//! One serializable structure carries the defaults of both pipelines plus
//! logging, loadable from TOML or RON through [`Config`].
//!
//! ## Configuration Categories
//!
//! - **Logging**: default log filter
//! - **Location**: target path, create/edit mode, location type
//! - **Material**: base location, material name, enabled backends, roughness conversion

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};
use crate::backends::{registry, MaterialRequest};
use crate::describe::location::{LocationMode, LocationRequest};

/// # Logging Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level, overridable by `RUST_LOG`
    pub log_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { log_level: "info".to_string() }
    }
}

/// # Location Description Configuration
///
/// Where a location description is applied and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationDescribeConfig {
    /// Target location path
    pub location: String,
    /// Create a new location or edit an upstream one
    pub mode: LocationMode,
    /// `type` attribute written in create mode
    pub location_type: String,
}

impl LocationDescribeConfig {
    /// Set the target location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Set create or edit mode
    pub fn with_mode(mut self, mode: LocationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the location type
    pub fn with_location_type(mut self, location_type: impl Into<String>) -> Self {
        self.location_type = location_type.into();
        self
    }

    /// Request for [`describe_location`](crate::describe::describe_location)
    pub fn request(&self) -> LocationRequest {
        LocationRequest {
            path: self.location.clone(),
            mode: self.mode,
            location_type: self.location_type.clone(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.location.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "location '{}' must be an absolute path",
                self.location
            )));
        }
        if self.mode == LocationMode::Create && self.location_type.is_empty() {
            return Err(ConfigError::Invalid("create mode needs a location type".into()));
        }
        Ok(())
    }
}

impl Default for LocationDescribeConfig {
    fn default() -> Self {
        Self {
            location: "/root/world/geo/location1".to_string(),
            mode: LocationMode::Create,
            location_type: "sphere".to_string(),
        }
    }
}

/// # Material Description Configuration
///
/// Where backend materials are created and which backends are enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialDescribeConfig {
    /// Parent of the per-backend locations
    pub base_location: String,
    /// Leaf name of every generated material
    pub material_name: String,
    /// Enabled backend ids, in output order
    pub backends: Vec<String>,
    /// Square-root roughness for microfacet backends
    pub convert_roughness: bool,
}

impl MaterialDescribeConfig {
    /// Set the base location
    pub fn with_base_location(mut self, base: impl Into<String>) -> Self {
        self.base_location = base.into();
        self
    }

    /// Set the material name
    pub fn with_material_name(mut self, name: impl Into<String>) -> Self {
        self.material_name = name.into();
        self
    }

    /// Replace the enabled backends
    pub fn with_backends<I, S>(mut self, backends: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.backends = backends.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable roughness conversion
    pub fn with_convert_roughness(mut self, convert: bool) -> Self {
        self.convert_roughness = convert;
        self
    }

    /// Registry request built from these settings
    pub fn request(&self) -> MaterialRequest {
        MaterialRequest {
            base_location: self.base_location.clone(),
            material_name: self.material_name.clone(),
            backends: self.backends.clone(),
            convert_roughness: self.convert_roughness,
        }
    }

    /// Validate the configuration against the built-in backends
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.material_name.is_empty() {
            return Err(ConfigError::Invalid("material name cannot be empty".into()));
        }
        if let Some(unknown) = self.backends.iter().find(|id| registry().get(id).is_none()) {
            return Err(ConfigError::Invalid(format!("unknown backend '{unknown}'")));
        }
        Ok(())
    }
}

impl Default for MaterialDescribeConfig {
    fn default() -> Self {
        Self {
            base_location: "/root/materials/".to_string(),
            material_name: "material1".to_string(),
            backends: registry().ids().map(str::to_string).collect(),
            convert_roughness: true,
        }
    }
}

/// # Complete Describe Configuration
///
/// Top-level configuration applications should load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescribeConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Location description defaults
    pub location: LocationDescribeConfig,
    /// Material description defaults
    pub material: MaterialDescribeConfig,
}

impl DescribeConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.location.validate()?;
        self.material.validate()?;
        Ok(())
    }
}

impl Config for DescribeConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DescribeConfig::default();
        assert_eq!(config.location.location, "/root/world/geo/location1");
        assert_eq!(config.location.mode, LocationMode::Create);
        assert_eq!(config.material.base_location, "/root/materials/");
        assert_eq!(config.material.backends, vec!["imagine", "arnold", "prman", "redshift"]);
        assert!(config.material.convert_roughness);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DescribeConfig::from_toml_str(
            r#"
[location]
mode = "edit"

[material]
material_name = "chrome"
backends = ["arnold"]
convert_roughness = false
"#,
        )
        .unwrap();

        assert_eq!(config.location.mode, LocationMode::Edit);
        assert_eq!(config.location.location_type, "sphere");
        assert_eq!(config.material.material_name, "chrome");
        assert_eq!(config.material.backends, vec!["arnold"]);
        assert!(!config.material.convert_roughness);
        assert_eq!(config.logging.log_level, "info");
    }

    #[test]
    fn test_ron_round_trip() {
        let config = DescribeConfig {
            material: MaterialDescribeConfig::default().with_material_name("glass"),
            ..Default::default()
        };
        let text = ron::ser::to_string_pretty(&config, Default::default()).unwrap();
        assert_eq!(DescribeConfig::from_ron_str(&text).unwrap(), config);
    }

    #[test]
    fn test_validate_rejects_unknown_backend() {
        let config = MaterialDescribeConfig::default().with_backends(["arnold", "mantra"]);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_relative_location() {
        let config = LocationDescribeConfig::default().with_location("world/geo");
        assert!(config.validate().is_err());
    }
}
