//! `orgocr-config`: orgocr runtime configuration management.
//!
//! Provides:
//! - Typed config schema (OCR backend settings, logging)
//! - YAML read/write with atomic replace
//! - `ORGOCR_*` environment overrides
//! - Default value application
//! - Validation report

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, apply_env_overrides_with};
pub use io::{config_dir, config_file_path, load_config, write_config};
pub use schema::{EasyOcrConfig, LoggingConfig, OcrConfig, OrgOcrConfig, TesseractConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::Result;
use std::path::Path;

/// Load a config file, apply env overrides and defaults, and log validation findings.
///
/// This is the main entry point for loading a config at runtime. Invalid
/// backend selectors are reported here but only fail once an engine is built.
pub async fn load_and_prepare(path: &Path) -> Result<OrgOcrConfig> {
    let config = load_config(path).await?;
    let config = apply_env_overrides(config);
    let config = apply_all_defaults(config);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }

    Ok(config)
}
