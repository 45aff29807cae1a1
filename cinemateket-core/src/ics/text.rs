//! Escaping and line folding for free-text property values (RFC 5545 §3.1, §3.3.11).

use std::borrow::Cow;

/// Characters allowed on the first physical line of a folded value.
pub const FIRST_LINE_WIDTH: usize = 75;

/// Characters allowed on a continuation line, after its leading space.
pub const CONTINUATION_WIDTH: usize = FIRST_LINE_WIDTH - 1;

const CRLF: &str = "\r\n";

const RESERVED: &[char] = &[';', ':', '\\', '"', ',', '\n', '\r'];

/// Escape, fold and terminate a property value.
///
/// The result always ends in CRLF and uses CRLF for every physical line.
pub fn fold_and_escape(value: &str) -> String {
    fold(&escape(value))
}

/// Escape commas, double quotes and backslashes.
///
/// Each input character is escaped at most once, so the backslash written in
/// front of a comma or quote is never doubled. Line breaks become `\n` and
/// carriage returns are dropped, so a value never spans a raw line.
pub fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(RESERVED) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            ',' => out.push_str("\\,"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Fold a value into CRLF-terminated lines.
///
/// Widths are counted in characters, so multi-byte characters stay whole.
pub fn fold(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + value.len() / CONTINUATION_WIDTH * 3 + 2);
    let mut rest = value;
    let mut width = FIRST_LINE_WIDTH;

    loop {
        match rest.char_indices().nth(width) {
            Some((split, _)) => {
                let (line, tail) = rest.split_at(split);
                out.push_str(line);
                out.push_str(CRLF);
                out.push(' ');
                rest = tail;
                width = CONTINUATION_WIDTH;
            }
            None => {
                out.push_str(rest);
                out.push_str(CRLF);
                return out;
            }
        }
    }
}
