//! Channel-facing converters.
//!
//! The [`MarkdownConverter`] trait provides a uniform interface for turning
//! authored markdown into whatever a channel's transport expects:
//!
//! - **Telegram** uses the strict MarkdownV2 dialect.
//! - **Slack** uses its own `mrkdwn` format.
//! - **Discord** renders markdown natively and gets the text as authored.

use chatmark_types::{Dialect, Result, TranscodeOptions};

use crate::transcode::transcode_with;

/// Trait for converting authored markdown into a channel-specific format.
///
/// Implementations are used by the delivery layer via the
/// [`MarkdownDispatcher`](crate::dispatch::MarkdownDispatcher).
pub trait MarkdownConverter: Send + Sync {
    /// Convert the given `markdown` string into the target format.
    fn convert(&self, markdown: &str) -> Result<String>;
}

/// Converts markdown into one [`Dialect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectConverter {
    dialect: Dialect,
    options: TranscodeOptions,
}

impl DialectConverter {
    pub fn new(dialect: Dialect) -> Self {
        Self::with_options(dialect, TranscodeOptions::default())
    }

    pub fn with_options(dialect: Dialect, options: TranscodeOptions) -> Self {
        Self { dialect, options }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }
}

impl MarkdownConverter for DialectConverter {
    fn convert(&self, markdown: &str) -> Result<String> {
        transcode_with(markdown, self.dialect, &self.options)
    }
}

/// Returns the input unchanged, for transports that take markdown as is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassthroughConverter;

impl MarkdownConverter for PassthroughConverter {
    fn convert(&self, markdown: &str) -> Result<String> {
        Ok(markdown.to_owned())
    }
}
