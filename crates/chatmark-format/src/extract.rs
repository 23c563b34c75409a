//! Span extraction.
//!
//! Locates the structural spans of a message without building a syntax
//! tree. Passes run in a fixed precedence order and each pass only sees the
//! plain text left over by the passes before it:
//!
//! 1. fenced code blocks (```` ``` ````, may span lines)
//! 2. inline code (`` ` ``)
//! 3. links (`[label](url)`)
//! 4. bold (`**text**`)
//! 5. italic (`*text*`, then `_text_`)
//!
//! A code span therefore swallows any asterisks or brackets inside it, and
//! bold is resolved before italic scanning ever sees its asterisks.
//! Unterminated delimiters never form a span: they stay in the plain text.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::trace;

static CODE_BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```(.*?)```").unwrap());
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`\n]+)`").unwrap());
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*\n]+)\*\*").unwrap());
static ITALIC_ASTERISK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\n]+)\*").unwrap());
static ITALIC_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_([^_\n]+)_").unwrap());

/// The kind of a structural span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    CodeBlock,
    InlineCode,
    Link,
    Bold,
    Italic,
}

/// A structural markdown unit, borrowed from the input.
///
/// `raw` is always the exact matched substring, delimiters included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span<'a> {
    CodeBlock { raw: &'a str, content: &'a str },
    InlineCode { raw: &'a str, content: &'a str },
    Link { raw: &'a str, label: &'a str, url: &'a str },
    Bold { raw: &'a str, content: &'a str },
    /// `delimiter` is the source delimiter, `*` or `_`.
    Italic { raw: &'a str, content: &'a str, delimiter: char },
}

impl<'a> Span<'a> {
    pub fn kind(&self) -> SpanKind {
        match self {
            Self::CodeBlock { .. } => SpanKind::CodeBlock,
            Self::InlineCode { .. } => SpanKind::InlineCode,
            Self::Link { .. } => SpanKind::Link,
            Self::Bold { .. } => SpanKind::Bold,
            Self::Italic { .. } => SpanKind::Italic,
        }
    }

    pub fn raw(&self) -> &'a str {
        match *self {
            Self::CodeBlock { raw, .. }
            | Self::InlineCode { raw, .. }
            | Self::Link { raw, .. }
            | Self::Bold { raw, .. }
            | Self::Italic { raw, .. } => raw,
        }
    }
}

/// One piece of the input in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece<'a> {
    /// Plain text between spans.
    Text(&'a str),
    /// Index into [`Extraction::spans`].
    Span(usize),
}

/// The result of [`extract`]: a span arena plus the pieces covering the
/// whole input.
///
/// Spans are stored in the order they were found (precedence first, then
/// position); pieces are in document order. Concatenating every piece, with
/// spans written as their `raw` text, reproduces the input exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction<'a> {
    spans: Vec<Span<'a>>,
    pieces: Vec<Piece<'a>>,
}

impl<'a> Extraction<'a> {
    pub fn spans(&self) -> &[Span<'a>] {
        &self.spans
    }

    pub fn pieces(&self) -> &[Piece<'a>] {
        &self.pieces
    }

    /// Spans in document order.
    pub fn spans_in_order(&self) -> impl Iterator<Item = &Span<'a>> {
        self.pieces.iter().filter_map(|piece| match piece {
            Piece::Span(idx) => self.spans.get(*idx),
            Piece::Text(_) => None,
        })
    }

    fn run(&mut self, pass: Pass) {
        let found_before = self.spans.len();
        let mut pieces = Vec::with_capacity(self.pieces.len());

        for piece in std::mem::take(&mut self.pieces) {
            let Piece::Text(text) = piece else {
                pieces.push(piece);
                continue;
            };

            let mut cursor = 0;
            while let Some(found) = pass.find(text, cursor) {
                if found.start > cursor {
                    pieces.push(Piece::Text(&text[cursor..found.start]));
                }
                pieces.push(Piece::Span(self.spans.len()));
                self.spans.push(found.span);
                cursor = found.end;
            }
            if cursor < text.len() {
                pieces.push(Piece::Text(&text[cursor..]));
            }
        }

        self.pieces = pieces;
        trace!(
            pass = ?pass,
            found = self.spans.len() - found_before,
            pieces = self.pieces.len(),
            "extraction pass complete"
        );
    }
}

/// Extract every structural span from `input`.
pub fn extract(input: &str) -> Extraction<'_> {
    let mut extraction = Extraction::default();
    if input.is_empty() {
        return extraction;
    }
    extraction.pieces.push(Piece::Text(input));

    for pass in Pass::ORDER {
        extraction.run(pass);
    }
    extraction
}

/// A single extraction pass, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    CodeBlock,
    InlineCode,
    Link,
    Bold,
    ItalicAsterisk,
    ItalicUnderscore,
}

struct Found<'a> {
    start: usize,
    end: usize,
    span: Span<'a>,
}

impl Pass {
    const ORDER: [Pass; 6] = [
        Pass::CodeBlock,
        Pass::InlineCode,
        Pass::Link,
        Pass::Bold,
        Pass::ItalicAsterisk,
        Pass::ItalicUnderscore,
    ];

    /// Find the first span of this pass in `text` at or after byte `from`.
    fn find<'a>(self, text: &'a str, from: usize) -> Option<Found<'a>> {
        match self {
            Self::CodeBlock => first(&CODE_BLOCK, text, from, |raw, caps| Span::CodeBlock {
                raw,
                content: group(caps, 1),
            }),
            Self::InlineCode => first(&INLINE_CODE, text, from, |raw, caps| Span::InlineCode {
                raw,
                content: group(caps, 1),
            }),
            Self::Link => first(&LINK, text, from, |raw, caps| Span::Link {
                raw,
                label: group(caps, 1),
                url: group(caps, 2),
            }),
            Self::Bold => first(&BOLD, text, from, |raw, caps| Span::Bold {
                raw,
                content: group(caps, 1),
            }),
            Self::ItalicAsterisk => find_lone_asterisk_italic(text, from),
            Self::ItalicUnderscore => {
                first(&ITALIC_UNDERSCORE, text, from, |raw, caps| Span::Italic {
                    raw,
                    content: group(caps, 1),
                    delimiter: '_',
                })
            }
        }
    }
}

fn first<'a>(
    re: &Regex,
    text: &'a str,
    from: usize,
    build: impl FnOnce(&'a str, &Captures<'a>) -> Span<'a>,
) -> Option<Found<'a>> {
    let caps = re.captures_at(text, from)?;
    let whole = caps.get(0)?;
    Some(Found {
        start: whole.start(),
        end: whole.end(),
        span: build(whole.as_str(), &caps),
    })
}

fn group<'a>(caps: &Captures<'a>, idx: usize) -> &'a str {
    caps.get(idx).map_or("", |m| m.as_str())
}

/// `*text*` where neither delimiter touches another asterisk.
///
/// Leftover `**` from an unterminated bold must not produce an italic, so a
/// candidate whose delimiters sit next to a `*` is skipped and the search
/// resumes one byte later.
fn find_lone_asterisk_italic(text: &str, from: usize) -> Option<Found<'_>> {
    let bytes = text.as_bytes();
    let mut from = from;
    loop {
        let caps = ITALIC_ASTERISK.captures_at(text, from)?;
        let whole = caps.get(0)?;
        let touches_before = whole.start() > 0 && bytes[whole.start() - 1] == b'*';
        let touches_after = bytes.get(whole.end()) == Some(&b'*');
        if !touches_before && !touches_after {
            return Some(Found {
                start: whole.start(),
                end: whole.end(),
                span: Span::Italic {
                    raw: whole.as_str(),
                    content: group(&caps, 1),
                    delimiter: '*',
                },
            });
        }
        // `*` is a single byte, so this stays on a char boundary.
        from = whole.start() + 1;
    }
}
