//! OCR Event Logger
//!
//! Progress events for one OCR run (starting, recognizing, done, failed),
//! emitted through `tracing` under the `ocr_events` target.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OcrEvent {
    Starting {
        image: String,
    },
    Recognizing {
        image: String,
        backend: String,
    },
    Done {
        image: String,
        chars: usize,
        lines: usize,
    },
    Failed {
        image: String,
        error_msg: String,
    },
}

impl OcrEvent {
    pub fn status(&self) -> &'static str {
        match self {
            Self::Starting { .. } => "starting",
            Self::Recognizing { .. } => "recognizing",
            Self::Done { .. } => "done",
            Self::Failed { .. } => "failed",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Starting { image } => format!("OCR starting for {image}"),
            Self::Recognizing { image, backend } => {
                format!("Recognizing {image} with {backend}")
            }
            Self::Done { image, chars, lines } => {
                format!("OCR done for {image}: {lines} line(s), {chars} char(s)")
            }
            Self::Failed { image, error_msg } => format!("OCR failed for {image}: {error_msg}"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: OcrEvent,
}

pub struct EventLogger;

impl EventLogger {
    /// Log a progress event and return the entry that was written.
    pub fn log_event(event: OcrEvent) -> EventLogEntry {
        let entry = EventLogEntry {
            timestamp: Utc::now(),
            event,
        };
        let json = serde_json::to_string(&entry).unwrap_or_default();

        match &entry.event {
            OcrEvent::Failed { .. } => {
                warn!(target: "ocr_events", status = entry.event.status(), event = %json, "{}", entry.event.message());
            }
            _ => {
                info!(target: "ocr_events", status = entry.event.status(), event = %json, "{}", entry.event.message());
            }
        }
        entry
    }
}
