//! OCR drawers in org documents.
//!
//! Formats recognized text as an `:ocr:` drawer and inserts it below the
//! image link it belongs to.

pub mod document;
pub mod format;
pub mod inserter;
pub mod links;

pub use document::TextDocument;
pub use format::{format_drawer, DRAWER_END, DRAWER_START};
pub use inserter::{DrawerInserter, InsertOutcome};
pub use links::{find_image_links, has_drawer_after, image_link, insert_image_link, ImageLink};
