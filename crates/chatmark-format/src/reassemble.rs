//! Span rendering and placeholder substitution.
//!
//! Rendering rules per span:
//!
//! | Span        | Slack          | Strict                          |
//! |-------------|----------------|---------------------------------|
//! | code        | unchanged      | unchanged                       |
//! | link        | `<url\|label>` | `[label](url)`, label escaped   |
//! | bold        | `*text*`       | `*text*`, text escaped          |
//! | italic      | `_text_`       | `_text_`, text escaped          |
//!
//! Strict link URLs are escaped unless [`UrlEscaping::Raw`] is selected.

use std::borrow::Cow;

use chatmark_types::{Dialect, LinkStyle, Result, TranscodeError, TranscodeOptions, UrlEscaping};

use crate::escape::escape_literal;
use crate::extract::Span;
use crate::placeholder::{Placeholder, parse_id};

/// Render one span in `dialect`.
pub fn render(span: &Span<'_>, dialect: Dialect, options: &TranscodeOptions) -> String {
    match *span {
        Span::CodeBlock { raw, .. } | Span::InlineCode { raw, .. } => raw.to_owned(),
        Span::Link { label, url, .. } => match dialect.link_style() {
            LinkStyle::AngleBracket => format!("<{url}|{label}>"),
            LinkStyle::Inline => {
                let label = span_text(label, dialect);
                let url = match options.link_urls {
                    UrlEscaping::Escape => span_text(url, dialect),
                    UrlEscaping::Raw => Cow::Borrowed(url),
                };
                format!("[{label}]({url})")
            }
        },
        Span::Bold { content, .. } => {
            let delim = dialect.bold_delimiter();
            format!("{delim}{}{delim}", span_text(content, dialect))
        }
        Span::Italic { content, .. } => {
            let delim = dialect.italic_delimiter();
            format!("{delim}{}{delim}", span_text(content, dialect))
        }
    }
}

fn span_text(text: &str, dialect: Dialect) -> Cow<'_, str> {
    if dialect.escapes_span_content() {
        Cow::Owned(escape_literal(text, dialect))
    } else {
        Cow::Borrowed(text)
    }
}

/// Replace every placeholder token in `text` with its rendering.
///
/// Each replacement is consumed exactly once, at the position of its own
/// token. An unknown id, a token seen twice, a replacement never used, or
/// a sentinel surviving into the output are all internal errors.
pub fn substitute(
    text: &str,
    sentinel: char,
    replacements: &[(Placeholder, String)],
) -> Result<String> {
    let width = sentinel.len_utf8();
    let extra: usize = replacements.iter().map(|(_, rendered)| rendered.len()).sum();
    let mut out = String::with_capacity(text.len() + extra);
    let mut consumed = vec![false; replacements.len()];
    let mut rest = text;

    while let Some(start) = rest.find(sentinel) {
        out.push_str(&rest[..start]);
        let body = &rest[start + width..];
        let len = body
            .find(sentinel)
            .ok_or_else(|| TranscodeError::internal("unterminated placeholder during reassembly"))?;
        let token = &body[..len];

        let id = parse_id(token)
            .filter(|id| *id < replacements.len())
            .ok_or_else(|| TranscodeError::internal(format!("unknown placeholder id {token:?}")))?;
        let (placeholder, rendered) = &replacements[id];
        if placeholder.id() != id {
            return Err(TranscodeError::internal(format!(
                "replacement {id} belongs to placeholder {}",
                placeholder.id()
            )));
        }
        if std::mem::replace(&mut consumed[id], true) {
            return Err(TranscodeError::internal(format!(
                "placeholder {id} substituted twice"
            )));
        }
        out.push_str(rendered);
        rest = &body[len + width..];
    }
    out.push_str(rest);

    if let Some(id) = consumed.iter().position(|used| !used) {
        return Err(TranscodeError::internal(format!(
            "placeholder {id} never substituted"
        )));
    }
    if out.contains(sentinel) {
        return Err(TranscodeError::internal("sentinel leaked into output"));
    }
    Ok(out)
}
