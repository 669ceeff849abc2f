//! Core crate services
//!
//! - `config`: unified configuration for both description pipelines

pub mod config;
