//! Reserved-character escaping.

use chatmark_types::{Dialect, Result, TranscodeError};

/// Backslash-escape every reserved character of `dialect` in `text`.
///
/// Used for span content, which never carries placeholders.
pub fn escape_literal(text: &str, dialect: Dialect) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    push_escaped(&mut out, text, dialect);
    out
}

/// Escape the plain regions of placeholder-bearing text.
///
/// Each `S<id>S` token is copied through as one unit and nothing between
/// its sentinels is inspected. A start sentinel without a closing one means
/// the token was cut apart upstream and is an internal error.
pub fn escape_placeholder_text(text: &str, dialect: Dialect, sentinel: char) -> Result<String> {
    let width = sentinel.len_utf8();
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    let mut rest = text;

    while let Some(start) = rest.find(sentinel) {
        push_escaped(&mut out, &rest[..start], dialect);
        let body = &rest[start + width..];
        let Some(len) = body.find(sentinel) else {
            return Err(TranscodeError::internal(format!(
                "unterminated placeholder at byte {}",
                text.len() - rest.len() + start
            )));
        };
        out.push_str(&rest[start..start + width + len + width]);
        rest = &body[len + width..];
    }
    push_escaped(&mut out, rest, dialect);
    Ok(out)
}

fn push_escaped(out: &mut String, text: &str, dialect: Dialect) {
    if dialect.reserved().is_empty() && !dialect.escapes_backslash() {
        out.push_str(text);
        return;
    }
    for c in text.chars() {
        if dialect.needs_escape(c) {
            out.push('\\');
        }
        out.push(c);
    }
}
