//! orgocr configuration schema, typed for serde YAML deserialization.

use orgocr_core::types::{
    DEFAULT_EASYOCR_COMMAND, DEFAULT_ENV_RUNNER, DEFAULT_LANGUAGE, DEFAULT_SCRIPT_DIR,
    DEFAULT_TESSERACT_COMMAND,
};
use orgocr_core::{expand_home, OcrSettings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::defaults::DEFAULT_LOG_LEVEL;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration for orgocr.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgOcrConfig {
    /// OCR backend selection and per-backend settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr: Option<OcrConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

// ---------------------------------------------------------------------------
// OCR
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrConfig {
    /// `tesseract` or `easyocr`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
    /// Tesseract recognition language, e.g. `eng`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tesseract: Option<TesseractConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easyocr: Option<EasyOcrConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TesseractConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EasyOcrConfig {
    /// Command looked up on PATH; provisioned into `scriptDir` when missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Runtime environment (e.g. conda env) to run the command in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_runner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_dir: Option<String>,
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for rolling JSON logs; console only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

impl OrgOcrConfig {
    /// Resolve the OCR section into engine settings, falling back to built-in
    /// defaults for anything unset.
    pub fn ocr_settings(&self) -> OcrSettings {
        let ocr = self.ocr.clone().unwrap_or_default();
        let tesseract = ocr.tesseract.unwrap_or_default();
        let easyocr = ocr.easyocr.unwrap_or_default();

        OcrSettings {
            backend: ocr.backend.unwrap_or_else(|| "tesseract".to_string()),
            language: ocr.language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            tesseract_command: tesseract
                .command
                .unwrap_or_else(|| DEFAULT_TESSERACT_COMMAND.to_string()),
            easyocr_command: easyocr
                .command
                .unwrap_or_else(|| DEFAULT_EASYOCR_COMMAND.to_string()),
            easyocr_env: easyocr.env.filter(|e| !e.trim().is_empty()),
            env_runner: easyocr
                .env_runner
                .unwrap_or_else(|| DEFAULT_ENV_RUNNER.to_string()),
            script_dir: PathBuf::from(
                easyocr.script_dir.unwrap_or_else(|| DEFAULT_SCRIPT_DIR.to_string()),
            ),
        }
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> Option<PathBuf> {
        self.logging
            .as_ref()
            .and_then(|l| l.dir.as_deref())
            .map(|d| expand_home(Path::new(d)))
    }
}
