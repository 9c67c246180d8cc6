//! Structured logging for orgocr.
//!
//! Console + rolling NDJSON file output, and the OCR progress event logger.

pub mod event_logger;
pub mod logger;

pub use event_logger::{EventLogEntry, EventLogger, OcrEvent};
pub use logger::init_logger;
