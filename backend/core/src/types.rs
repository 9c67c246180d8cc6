use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OcrError;

pub const DEFAULT_LANGUAGE: &str = "eng";
pub const DEFAULT_TESSERACT_COMMAND: &str = "tesseract";
pub const DEFAULT_EASYOCR_COMMAND: &str = "orgocr-easyocr";
pub const DEFAULT_ENV_RUNNER: &str = "conda";
pub const DEFAULT_SCRIPT_DIR: &str = "~/.local/bin";

/// Which OCR engine to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Runs the `tesseract` binary and captures its stdout.
    Tesseract,
    /// Runs an EasyOCR helper script that writes to an output file.
    EasyOcr,
}

impl BackendKind {
    pub const ALL: [BackendKind; 2] = [BackendKind::Tesseract, BackendKind::EasyOcr];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tesseract => "tesseract",
            Self::EasyOcr => "easyocr",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = OcrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tesseract" => Ok(Self::Tesseract),
            "easyocr" => Ok(Self::EasyOcr),
            _ => Err(OcrError::UnknownBackend(s.to_string())),
        }
    }
}

/// Resolved OCR settings, read-only while an engine runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrSettings {
    /// Raw backend selector; parsed when an engine is built.
    pub backend: String,
    /// Recognition language passed to tesseract (`-l`).
    pub language: String,
    pub tesseract_command: String,
    /// Command name looked up on `PATH` before provisioning the helper.
    pub easyocr_command: String,
    /// Runtime environment to activate around the easyocr command.
    pub easyocr_env: Option<String>,
    /// Executable used to activate `easyocr_env` (`<runner> run -n <env> ...`).
    pub env_runner: String,
    /// Where the easyocr helper script is provisioned. `~` is expanded.
    pub script_dir: PathBuf,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            backend: BackendKind::Tesseract.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            tesseract_command: DEFAULT_TESSERACT_COMMAND.to_string(),
            easyocr_command: DEFAULT_EASYOCR_COMMAND.to_string(),
            easyocr_env: None,
            env_runner: DEFAULT_ENV_RUNNER.to_string(),
            script_dir: PathBuf::from(DEFAULT_SCRIPT_DIR),
        }
    }
}

impl OcrSettings {
    pub fn backend_kind(&self) -> Result<BackendKind, OcrError> {
        self.backend.parse()
    }
}

/// Expand a leading `~` to the home directory and make the path absolute.
pub fn expand_home(path: &Path) -> PathBuf {
    let expanded = match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    };
    if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_selectors() {
        assert_eq!("tesseract".parse::<BackendKind>().unwrap(), BackendKind::Tesseract);
        assert_eq!(" EasyOCR ".parse::<BackendKind>().unwrap(), BackendKind::EasyOcr);
    }

    #[test]
    fn unknown_selector_is_config_error() {
        for bad in ["", "paddle", "tesseract4", "easy ocr"] {
            let err = bad.parse::<BackendKind>().unwrap_err();
            assert!(err.is_config());
            assert!(matches!(err, OcrError::UnknownBackend(ref s) if s == bad));
        }
    }

    #[test]
    fn display_roundtrips_through_parse() {
        for kind in BackendKind::ALL {
            assert_eq!(kind.to_string().parse::<BackendKind>().unwrap(), kind);
        }
    }

    #[test]
    fn expands_tilde() {
        let Some(home) = dirs::home_dir() else { return };
        assert_eq!(expand_home(Path::new("~/.local/bin")), home.join(".local/bin"));
        assert_eq!(expand_home(Path::new("/opt/bin")), PathBuf::from("/opt/bin"));
    }
}
