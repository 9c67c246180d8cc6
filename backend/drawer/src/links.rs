//! Image link detection in org text.

use once_cell::sync::Lazy;
use orgocr_core::Document;
use regex::Regex;

use crate::format::is_drawer_start;

/// `[[file:x.png]]`, `[[./x.png]]`, `[[x.png][description]]`
static IMAGE_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\[\[(?:file:)?([^\[\]]+?\.(?i:png|jpe?g|gif|bmp|tiff?|webp))\](?:\[[^\[\]]*\])?\]",
    )
    .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLink {
    /// Zero-indexed line holding the link.
    pub line: usize,
    pub path: String,
}

/// Format an image path as an org file link.
pub fn image_link(path: &str) -> String {
    format!("[[file:{path}]]")
}

/// Insert an image link on its own line below `after_line`, the way an
/// editor's image-insertion command would. Returns the line holding the link.
pub fn insert_image_link<D: Document + ?Sized>(doc: &mut D, after_line: usize, path: &str) -> usize {
    let anchor = (after_line + 1).min(doc.line_count());
    doc.goto_line_after(after_line);
    doc.insert(&format!("{}\n", image_link(path)));
    anchor
}

/// Local image links in `doc`, first link per line, in document order.
/// Remote links (`https://...`) are skipped.
pub fn find_image_links<D: Document + ?Sized>(doc: &D) -> Vec<ImageLink> {
    (0..doc.line_count())
        .filter_map(|line| {
            let text = doc.line(line)?;
            IMAGE_LINK
                .captures_iter(text)
                .map(|caps| caps[1].to_string())
                .find(|path| !path.contains("://"))
                .map(|path| ImageLink { line, path })
        })
        .collect()
}

/// True when the line below `line` opens an OCR drawer.
pub fn has_drawer_after<D: Document + ?Sized>(doc: &D, line: usize) -> bool {
    doc.line(line + 1).map(is_drawer_start).unwrap_or(false)
}
