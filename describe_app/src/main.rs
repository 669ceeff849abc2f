//! Command line front end for location and material descriptions
//!
//! Reads a description file, runs it through the engine and prints the
//! resulting scene locations as RON.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use scene_describe::prelude::*;
use scene_describe::foundation::logging;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(name = "describe", version, about = "Compile scene and material descriptions")]
struct Cli {
    /// Configuration file (.toml or .ron)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a typed attribute description to one location
    Location {
        /// Description file
        file: PathBuf,
        /// Target location path
        #[arg(long)]
        path: Option<String>,
        /// create or edit
        #[arg(long)]
        mode: Option<LocationMode>,
        /// Location type written in create mode
        #[arg(long = "type")]
        location_type: Option<String>,
        /// Upstream scene (RON) amended in edit mode
        #[arg(long)]
        scene: Option<PathBuf>,
    },
    /// Build backend materials from a material description
    Material {
        /// Description file
        file: PathBuf,
        /// Material name
        #[arg(long)]
        name: Option<String>,
        /// Base location of the generated materials
        #[arg(long)]
        base: Option<String>,
        /// Enabled backend, repeatable; defaults to the configured set
        #[arg(long = "backend")]
        backends: Vec<String>,
        /// Pass roughness values through unchanged
        #[arg(long)]
        no_convert_roughness: bool,
    },
    /// List the registered backends
    Backends,
}

/// Application-level errors
#[derive(Error, Debug)]
enum AppError {
    #[error("{0}")]
    Engine(#[from] EngineError),

    #[error("Config error: {0}")]
    Config(#[from] scene_describe::config::ConfigError),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid scene file {path}: {message}")]
    Scene { path: String, message: String },

    #[error("Edit mode needs an upstream scene (--scene)")]
    MissingScene,

    #[error("Failed to serialize scene: {0}")]
    Output(#[from] ron::Error),
}

fn read_text(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn load_scene(path: &Path) -> Result<SceneTree, AppError> {
    let text = read_text(path)?;
    ron::from_str(&text).map_err(|e| AppError::Scene {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Scene amended in edit mode; there is nothing to edit without one
fn upstream_scene(path: Option<&Path>) -> Result<SceneTree, AppError> {
    load_scene(path.ok_or(AppError::MissingScene)?)
}

fn print_scene(scene: &SceneTree) -> Result<(), AppError> {
    let text = ron::ser::to_string_pretty(scene, ron::ser::PrettyConfig::default())?;
    println!("{text}");
    Ok(())
}

fn report_diagnostics(diagnostics: &Diagnostics) {
    if diagnostics.has_errors() {
        log::warn!("{} statement(s) skipped", diagnostics.len());
    } else if !diagnostics.is_empty() {
        log::info!("{} unsupported statement(s) skipped", diagnostics.len());
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = match &cli.config {
        Some(path) => DescribeConfig::load_from_file(path)?,
        None => DescribeConfig::default(),
    };

    let level = if cli.verbose { "debug" } else { config.logging.log_level.as_str() };
    logging::init_with_level(level);

    match cli.command {
        Command::Backends => {
            for identity in registry().identities() {
                println!("{:<10} {}", identity.id, identity.label);
            }
            Ok(())
        }
        Command::Location { file, path, mode, location_type, scene } => {
            if let Some(path) = path {
                config.location = config.location.with_location(path);
            }
            if let Some(mode) = mode {
                config.location = config.location.with_mode(mode);
            }
            if let Some(location_type) = location_type {
                config.location = config.location.with_location_type(location_type);
            }

            let description = read_text(&file)?;
            let engine = DescribeEngine::new(config)?;

            match engine.config().location.mode {
                LocationMode::Create => {
                    let mut builder = StaticSceneCreate::new();
                    let report = engine.describe_location(&description, &mut builder);
                    log::info!("{}: {} attributes", builder.op_name(), report.written);
                    report_diagnostics(&report.diagnostics);
                    print_scene(&builder.build())
                }
                LocationMode::Edit => {
                    let mut upstream = upstream_scene(scene.as_deref())?;
                    let mut edits = AttributeSet::new();
                    let report = engine.describe_location(&description, &mut edits);
                    let skipped = edits.apply(&mut upstream);
                    log::info!("AttributeSet: {} attributes, {} skipped", report.written, skipped);
                    report_diagnostics(&report.diagnostics);
                    print_scene(&upstream)
                }
            }
        }
        Command::Material { file, name, base, backends, no_convert_roughness } => {
            if let Some(name) = name {
                config.material = config.material.with_material_name(name);
            }
            if let Some(base) = base {
                config.material = config.material.with_base_location(base);
            }
            if !backends.is_empty() {
                config.material = config.material.with_backends(backends);
            }
            if no_convert_roughness {
                config.material = config.material.with_convert_roughness(false);
            }

            let description = read_text(&file)?;
            let engine = DescribeEngine::new(config)?;

            let mut builder = StaticSceneCreate::new();
            let report = engine.describe_material(&description, &mut builder)?;
            report_diagnostics(&report.diagnostics);
            print_scene(&builder.build())
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_mode_requires_scene() {
        assert!(matches!(upstream_scene(None), Err(AppError::MissingScene)));
    }

    #[test]
    fn test_edit_mode_reports_unreadable_scene() {
        let result = upstream_scene(Some(Path::new("does/not/exist.ron")));
        assert!(matches!(result, Err(AppError::Read { .. })));
    }

    #[test]
    fn test_location_mode_argument() {
        let cli = Cli::try_parse_from([
            "describe",
            "location",
            "sphere.location",
            "--mode",
            "edit",
        ])
        .unwrap();
        match cli.command {
            Command::Location { mode, scene, .. } => {
                assert_eq!(mode, Some(LocationMode::Edit));
                assert!(scene.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
