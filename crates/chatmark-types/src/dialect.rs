//! Target markup dialects and their rule tables.
//!
//! A [`Dialect`] carries everything the transcoder needs to know about a
//! platform: which characters are reserved, whether span content is escaped,
//! how links are written, and which delimiters bold and italic map to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Characters with syntactic meaning in Telegram's MarkdownV2.
///
/// See <https://core.telegram.org/bots/api#markdownv2-style>.
const STRICT_RESERVED: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// A target platform's markup rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// Slack `mrkdwn`: remapped delimiters, no escaping.
    #[serde(alias = "mrkdwn")]
    Slack,
    /// Telegram MarkdownV2: every reserved character outside code must be
    /// backslash-escaped, including inside bold, italic and link text.
    #[serde(alias = "telegram", alias = "markdown_v2", alias = "markdownv2")]
    Strict,
}

/// How a dialect writes hyperlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStyle {
    /// `<url|label>`
    AngleBracket,
    /// `[label](url)`
    Inline,
}

impl Dialect {
    /// All dialects, in declaration order.
    pub const ALL: [Dialect; 2] = [Dialect::Slack, Dialect::Strict];

    /// The reserved-character set for this dialect.
    pub fn reserved(self) -> &'static [char] {
        match self {
            Self::Slack => &[],
            Self::Strict => STRICT_RESERVED,
        }
    }

    /// Whether `c` must be backslash-escaped when it appears as literal text.
    pub fn is_reserved(self, c: char) -> bool {
        self.reserved().contains(&c)
    }

    /// Whether a literal backslash must itself be escaped.
    ///
    /// MarkdownV2 treats `\` as the escape character, so an unescaped one
    /// would swallow the next character or cancel the escape added for it.
    pub fn escapes_backslash(self) -> bool {
        matches!(self, Self::Strict)
    }

    /// Whether `c` gets a backslash prefix when written as literal text.
    pub fn needs_escape(self, c: char) -> bool {
        self.is_reserved(c) || (c == '\\' && self.escapes_backslash())
    }

    /// Whether bold, italic and link text is escaped like plain text.
    ///
    /// Code content is never escaped regardless of dialect.
    pub fn escapes_span_content(self) -> bool {
        matches!(self, Self::Strict)
    }

    pub fn link_style(self) -> LinkStyle {
        match self {
            Self::Slack => LinkStyle::AngleBracket,
            Self::Strict => LinkStyle::Inline,
        }
    }

    /// Delimiter wrapped around bold content.
    pub fn bold_delimiter(self) -> &'static str {
        "*"
    }

    /// Delimiter wrapped around italic content, whatever the source used.
    pub fn italic_delimiter(self) -> &'static str {
        "_"
    }

    /// Canonical lowercase name, as accepted by [`FromStr`] and serde.
    pub fn name(self) -> &'static str {
        match self {
            Self::Slack => "slack",
            Self::Strict => "strict",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slack" | "mrkdwn" => Ok(Self::Slack),
            "strict" | "telegram" | "markdown_v2" | "markdownv2" => Ok(Self::Strict),
            _ => Err(ConfigError::UnknownFormat(s.to_owned())),
        }
    }
}

/// Whether link URLs are escaped in dialects that escape span content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlEscaping {
    /// Escape reserved characters in the URL like any other span content.
    /// Telegram strips the backslashes again when it resolves the link.
    #[default]
    Escape,
    /// Copy the URL through untouched.
    Raw,
}

/// Tunables for a transcoding call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscodeOptions {
    /// URL handling for [`LinkStyle::Inline`] links.
    #[serde(default, alias = "linkUrls")]
    pub link_urls: UrlEscaping,
}
