//! Config defaults: applies sensible default values to parsed config.

use orgocr_core::types::{
    DEFAULT_EASYOCR_COMMAND, DEFAULT_ENV_RUNNER, DEFAULT_LANGUAGE, DEFAULT_SCRIPT_DIR,
    DEFAULT_TESSERACT_COMMAND,
};
use orgocr_core::BackendKind;

use crate::schema::{EasyOcrConfig, LoggingConfig, OcrConfig, OrgOcrConfig, TesseractConfig};

/// Default log level when neither config nor `RUST_LOG` set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: OrgOcrConfig) -> OrgOcrConfig {
    let config = apply_ocr_defaults(config);
    let config = apply_logging_defaults(config);
    config
}

/// Fill in backend, language, and per-backend commands.
fn apply_ocr_defaults(mut config: OrgOcrConfig) -> OrgOcrConfig {
    let ocr = config.ocr.get_or_insert_with(OcrConfig::default);
    if ocr.backend.is_none() {
        ocr.backend = Some(BackendKind::Tesseract.to_string());
    }
    if ocr.language.is_none() {
        ocr.language = Some(DEFAULT_LANGUAGE.to_string());
    }

    let tesseract = ocr.tesseract.get_or_insert_with(TesseractConfig::default);
    if tesseract.command.is_none() {
        tesseract.command = Some(DEFAULT_TESSERACT_COMMAND.to_string());
    }

    let easyocr = ocr.easyocr.get_or_insert_with(EasyOcrConfig::default);
    if easyocr.command.is_none() {
        easyocr.command = Some(DEFAULT_EASYOCR_COMMAND.to_string());
    }
    if easyocr.env_runner.is_none() {
        easyocr.env_runner = Some(DEFAULT_ENV_RUNNER.to_string());
    }
    if easyocr.script_dir.is_none() {
        easyocr.script_dir = Some(DEFAULT_SCRIPT_DIR.to_string());
    }

    config
}

fn apply_logging_defaults(mut config: OrgOcrConfig) -> OrgOcrConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    config
}
