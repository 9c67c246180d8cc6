/// First line of an OCR drawer.
pub const DRAWER_START: &str = ":ocr:";
/// Last line of every org drawer.
pub const DRAWER_END: &str = ":end:";

/// Format recognized text as an OCR drawer.
///
/// The text is terminated with a newline if it isn't already. Trailing page
/// breaks (form feeds) are dropped. Recognized lines that org would read as a
/// headline or a drawer end are escaped with a leading comma, as are lines
/// that already look escaped, so the block always closes at its own `:end:`.
pub fn format_drawer(text: &str) -> String {
    let text = text.trim_end_matches('\u{c}');
    let mut block = String::with_capacity(text.len() + DRAWER_START.len() + DRAWER_END.len() + 8);
    block.push_str(DRAWER_START);
    block.push('\n');
    for line in text.lines() {
        if needs_escape(line) {
            block.push(',');
        }
        block.push_str(line);
        block.push('\n');
    }
    block.push_str(DRAWER_END);
    block.push('\n');
    block
}

/// Lines org would treat as structure inside a drawer: headlines (`*`), the
/// drawer end marker, and their already comma-escaped forms.
fn needs_escape(line: &str) -> bool {
    let unescaped = line.trim_start().trim_start_matches(',');
    unescaped.starts_with('*') || is_drawer_end(unescaped)
}

pub(crate) fn is_drawer_end(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(DRAWER_END)
}

pub(crate) fn is_drawer_start(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(DRAWER_START)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_line_text() {
        assert_eq!(format_drawer("hello\nworld"), ":ocr:\nhello\nworld\n:end:\n");
    }

    #[test]
    fn already_terminated_text_is_not_doubled() {
        assert_eq!(format_drawer("Sample Text\n"), ":ocr:\nSample Text\n:end:\n");
    }

    #[test]
    fn empty_text() {
        assert_eq!(format_drawer(""), ":ocr:\n:end:\n");
    }

    #[test]
    fn trailing_form_feed_is_dropped() {
        assert_eq!(format_drawer("Page one\n\u{c}"), ":ocr:\nPage one\n:end:\n");
    }

    #[test]
    fn end_marker_in_text_is_escaped() {
        let block = format_drawer("before\n:END:\n  :end:  \nafter");
        assert_eq!(block, ":ocr:\nbefore\n,:END:\n,  :end:  \nafter\n:end:\n");
        let ends = block.lines().filter(|l| is_drawer_end(l)).count();
        assert_eq!(ends, 1);
    }

    #[test]
    fn headline_lines_are_escaped() {
        let block = format_drawer("* Agenda\n- item\n  ** nested\nnot * a headline\n");
        assert_eq!(
            block,
            ":ocr:\n,* Agenda\n- item\n,  ** nested\nnot * a headline\n:end:\n"
        );
        assert!(block.lines().all(|l| !l.trim_start().starts_with('*')));
    }

    #[test]
    fn already_escaped_lines_get_another_comma() {
        assert_eq!(
            format_drawer(",* quoted\n,:end:\n,,*\n, plain"),
            ":ocr:\n,,* quoted\n,,:end:\n,,,*\n, plain\n:end:\n"
        );
    }

    #[test]
    fn blank_lines_are_kept() {
        assert_eq!(format_drawer("a\n\nb\n"), ":ocr:\na\n\nb\n:end:\n");
    }
}
