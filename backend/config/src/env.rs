//! `ORGOCR_*` environment overrides, applied on top of the config file.
//!
//! Empty values are ignored so that `ORGOCR_BACKEND=` does not wipe a
//! configured backend.

use std::collections::HashMap;

use crate::schema::{EasyOcrConfig, LoggingConfig, OcrConfig, OrgOcrConfig, TesseractConfig};

pub const ENV_BACKEND: &str = "ORGOCR_BACKEND";
pub const ENV_LANGUAGE: &str = "ORGOCR_LANGUAGE";
pub const ENV_TESSERACT_COMMAND: &str = "ORGOCR_TESSERACT_COMMAND";
pub const ENV_EASYOCR_COMMAND: &str = "ORGOCR_EASYOCR_COMMAND";
pub const ENV_EASYOCR_ENV: &str = "ORGOCR_EASYOCR_ENV";
pub const ENV_SCRIPT_DIR: &str = "ORGOCR_SCRIPT_DIR";
pub const ENV_LOG_LEVEL: &str = "ORGOCR_LOG_LEVEL";

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: OrgOcrConfig) -> OrgOcrConfig {
    apply_env_overrides_with(config, &std::env::vars().collect())
}

/// Apply overrides from a provided map (useful for testing).
pub fn apply_env_overrides_with(
    mut config: OrgOcrConfig,
    env: &HashMap<String, String>,
) -> OrgOcrConfig {
    let get = |key: &str| {
        env.get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let ocr = config.ocr.get_or_insert_with(OcrConfig::default);
    if let Some(v) = get(ENV_BACKEND) {
        ocr.backend = Some(v);
    }
    if let Some(v) = get(ENV_LANGUAGE) {
        ocr.language = Some(v);
    }
    if let Some(v) = get(ENV_TESSERACT_COMMAND) {
        ocr.tesseract.get_or_insert_with(TesseractConfig::default).command = Some(v);
    }

    let easyocr = ocr.easyocr.get_or_insert_with(EasyOcrConfig::default);
    if let Some(v) = get(ENV_EASYOCR_COMMAND) {
        easyocr.command = Some(v);
    }
    if let Some(v) = get(ENV_EASYOCR_ENV) {
        easyocr.env = Some(v);
    }
    if let Some(v) = get(ENV_SCRIPT_DIR) {
        easyocr.script_dir = Some(v);
    }

    if let Some(v) = get(ENV_LOG_LEVEL) {
        config.logging.get_or_insert_with(LoggingConfig::default).level = Some(v);
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn overrides_backend_and_env() {
        let cfg = apply_env_overrides_with(
            OrgOcrConfig::default(),
            &env(&[(ENV_BACKEND, "easyocr"), (ENV_EASYOCR_ENV, "ocr")]),
        );
        let settings = cfg.ocr_settings();
        assert_eq!(settings.backend, "easyocr");
        assert_eq!(settings.easyocr_env.as_deref(), Some("ocr"));
    }

    #[test]
    fn empty_values_are_ignored() {
        let mut base = OrgOcrConfig::default();
        base.ocr = Some(OcrConfig {
            backend: Some("easyocr".into()),
            ..Default::default()
        });
        let cfg = apply_env_overrides_with(base, &env(&[(ENV_BACKEND, "  ")]));
        assert_eq!(cfg.ocr.unwrap().backend.unwrap(), "easyocr");
    }

    #[test]
    fn log_level_override() {
        let cfg = apply_env_overrides_with(OrgOcrConfig::default(), &env(&[(ENV_LOG_LEVEL, "trace")]));
        assert_eq!(cfg.log_level(), "trace");
    }
}
