//! Text normalization
//!
//! Replaces line breaks with spaces and trims the document. Word content and
//! interior whitespace runs are left alone.

use std::borrow::Cow;

/// Characters treated as line breaks
const LINE_BREAKS: [char; 6] = ['\n', '\r', '\u{0B}', '\u{0C}', '\u{2028}', '\u{2029}'];

fn is_line_break(c: char) -> bool {
    LINE_BREAKS.contains(&c)
}

/// Normalize a raw document.
///
/// Each line break (`\r\n` counts as one) becomes a single space, then
/// leading and trailing whitespace is removed. Borrows when nothing but
/// trimming is needed.
pub fn normalize(text: &str) -> Cow<'_, str> {
    if !text.contains(is_line_break) {
        return Cow::Borrowed(text.trim());
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' && chars.peek() == Some(&'\n') {
            chars.next();
            out.push(' ');
        } else if is_line_break(c) {
            out.push(' ');
        } else {
            out.push(c);
        }
    }

    let trimmed = out.trim();
    if trimmed.len() == out.len() {
        Cow::Owned(out)
    } else {
        Cow::Owned(trimmed.to_string())
    }
}
