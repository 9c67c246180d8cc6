//! OCR engine integrations.
//!
//! - `tesseract`: runs the binary and captures stdout
//! - `easyocr`: runs a helper script that writes to an output file, optionally
//!   inside a runtime environment, provisioning the script on first use

pub mod backend;
pub mod command;
pub mod easyocr;
pub mod provision;
pub mod tesseract;

pub use backend::{run_ocr, Backend};
pub use command::Invocation;
pub use easyocr::{EasyOcrEngine, EASYOCR_SCRIPT};
pub use provision::ensure_script_installed;
pub use tesseract::TesseractEngine;
