//! Config validation with user-friendly error messages.

use crate::schema::OrgOcrConfig;
use orgocr_core::BackendKind;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &OrgOcrConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_backend(config, &mut report);
    validate_commands(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_backend(config: &OrgOcrConfig, report: &mut ValidationReport) {
    let Some(ocr) = &config.ocr else { return };
    if let Some(backend) = &ocr.backend {
        if backend.parse::<BackendKind>().is_err() {
            report.error(
                "ocr.backend",
                format!("Unknown backend '{backend}'; expected 'tesseract' or 'easyocr'"),
            );
        }
    }
    if let Some(language) = &ocr.language {
        if language.trim().is_empty() {
            report.error("ocr.language", "Language cannot be empty");
        }
    }
}

fn validate_commands(config: &OrgOcrConfig, report: &mut ValidationReport) {
    let Some(ocr) = &config.ocr else { return };

    if let Some(cmd) = ocr.tesseract.as_ref().and_then(|t| t.command.as_deref()) {
        if cmd.trim().is_empty() {
            report.error("ocr.tesseract.command", "Command cannot be empty");
        }
    }

    let Some(easyocr) = &ocr.easyocr else { return };
    if let Some(cmd) = easyocr.command.as_deref() {
        if cmd.trim().is_empty() {
            report.error("ocr.easyocr.command", "Command cannot be empty");
        } else if cmd.contains(std::path::MAIN_SEPARATOR) {
            report.warn(
                "ocr.easyocr.command",
                "Command contains a path separator; it is used as-is and never provisioned",
            );
        }
    }
    if let Some(env) = easyocr.env.as_deref() {
        if env.trim().is_empty() {
            report.warn("ocr.easyocr.env", "Empty environment name is ignored");
        } else if easyocr.env_runner.as_deref().map(str::trim).unwrap_or("").is_empty() {
            report.error("ocr.easyocr.envRunner", "An environment is set but no runner is configured");
        }
    }
    if let Some(dir) = easyocr.script_dir.as_deref() {
        if dir.trim().is_empty() {
            report.error("ocr.easyocr.scriptDir", "Script directory cannot be empty");
        }
    }
}

fn validate_logging(config: &OrgOcrConfig, report: &mut ValidationReport) {
    let Some(level) = config.logging.as_ref().and_then(|l| l.level.as_deref()) else {
        return;
    };
    const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
    if !LEVELS.contains(&level.to_ascii_lowercase().as_str()) && !level.contains('=') {
        report.warn("logging.level", format!("Unrecognized log level '{level}'"));
    }
}
