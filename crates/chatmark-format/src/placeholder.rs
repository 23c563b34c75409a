//! Placeholder tokens standing in for spans while plain text is escaped.
//!
//! A token is `S<id>S`: a sentinel control character, the decimal registry
//! id, and the sentinel again. The sentinel is picked per call by scanning
//! the input, so a token can never match ordinary text. Digits are not
//! reserved in any dialect, so nothing inside a token ever needs escaping.

use chatmark_types::{Dialect, Result, TranscodeError, TranscodeOptions};

use crate::extract::Span;
use crate::reassemble::render;

/// Number of characters [`choose_sentinel`] can pick from.
pub const SENTINEL_CANDIDATES: usize = 29;

/// C0 control characters other than tab, line feed and carriage return.
fn sentinel_candidates() -> impl Iterator<Item = char> {
    (0u8..0x20)
        .filter(|&b| !matches!(b, b'\t' | b'\n' | b'\r'))
        .map(char::from)
}

/// Pick a sentinel that does not occur anywhere in `input`.
///
/// Bytes below 0x20 never appear inside a multi-byte UTF-8 sequence, so a
/// byte scan is exact.
pub fn choose_sentinel(input: &str) -> Result<char> {
    let mut seen = [false; 0x20];
    for b in input.bytes().filter(|b| *b < 0x20) {
        seen[usize::from(b)] = true;
    }
    sentinel_candidates()
        .find(|c| !seen[*c as usize])
        .ok_or(TranscodeError::ConflictingInput {
            candidates: SENTINEL_CANDIDATES,
        })
}

/// An opaque token substituted for one span.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Placeholder {
    id: usize,
    token: String,
}

impl Placeholder {
    fn new(id: usize, sentinel: char) -> Self {
        Self {
            id,
            token: format!("{sentinel}{id}{sentinel}"),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn as_str(&self) -> &str {
        &self.token
    }
}

/// Parse the text between two sentinels back into a registry id.
pub(crate) fn parse_id(body: &str) -> Option<usize> {
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    body.parse().ok()
}

/// Spans registered for one transcoding call, keyed by placeholder id.
///
/// Ids are handed out sequentially from zero. The registry is owned by a
/// single call; nothing is shared between calls.
#[derive(Debug)]
pub struct PlaceholderRegistry<'a> {
    sentinel: char,
    entries: Vec<(Placeholder, Span<'a>)>,
}

impl<'a> PlaceholderRegistry<'a> {
    /// Create a registry whose sentinel is absent from `input`.
    pub fn for_input(input: &str) -> Result<Self> {
        Ok(Self::with_sentinel(choose_sentinel(input)?))
    }

    pub(crate) fn with_sentinel(sentinel: char) -> Self {
        Self {
            sentinel,
            entries: Vec::new(),
        }
    }

    pub fn sentinel(&self) -> char {
        self.sentinel
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register `span` and return the token that stands in for it.
    pub fn register(&mut self, span: Span<'a>) -> Placeholder {
        let placeholder = Placeholder::new(self.entries.len(), self.sentinel);
        self.entries.push((placeholder.clone(), span));
        placeholder
    }

    /// Render every registered span for `dialect`, in id order.
    pub fn resolve(
        &self,
        dialect: Dialect,
        options: &TranscodeOptions,
    ) -> Vec<(Placeholder, String)> {
        self.entries
            .iter()
            .map(|(placeholder, span)| (placeholder.clone(), render(span, dialect, options)))
            .collect()
    }
}
