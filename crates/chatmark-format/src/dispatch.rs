//! Channel-aware markdown dispatch.
//!
//! Routes outbound message content through the appropriate
//! [`MarkdownConverter`] based on the target channel name.

use std::collections::HashMap;

use chatmark_types::{ChannelFormat, Dialect, FormattingConfig, Result, TranscodeOptions};
use tracing::debug;

use crate::converter::{DialectConverter, MarkdownConverter, PassthroughConverter};

/// Dispatches markdown conversion based on channel name.
///
/// Maps channel names (e.g. "telegram", "slack", "discord") to their
/// respective [`MarkdownConverter`] implementations. Unknown channels
/// get the content passed through unchanged.
pub struct MarkdownDispatcher {
    converters: HashMap<String, Box<dyn MarkdownConverter>>,
}

impl MarkdownDispatcher {
    /// Create a dispatcher with the built-in channels registered.
    pub fn new() -> Self {
        Self::from_config(&FormattingConfig::default())
    }

    /// Create a dispatcher from a formatting configuration.
    pub fn from_config(config: &FormattingConfig) -> Self {
        let options = config.options();
        let converters = config
            .channels
            .iter()
            .map(|(channel, format)| (channel.clone(), converter_for(*format, options)))
            .collect();
        Self { converters }
    }

    /// Convert markdown content for the given channel.
    ///
    /// If the channel has a registered converter, applies it.
    /// Otherwise returns the content unchanged.
    pub fn convert(&self, channel: &str, content: &str) -> Result<String> {
        match self.converters.get(channel) {
            Some(converter) => {
                debug!(channel, len = content.len(), "converting outbound markdown");
                converter.convert(content)
            }
            None => Ok(content.to_owned()),
        }
    }

    /// Register a custom converter for a channel name.
    pub fn register(&mut self, channel: impl Into<String>, converter: Box<dyn MarkdownConverter>) {
        self.converters.insert(channel.into(), converter);
    }

    /// Register a channel that transcodes into `dialect`.
    pub fn register_dialect(&mut self, channel: impl Into<String>, dialect: Dialect) {
        self.register(channel, Box::new(DialectConverter::new(dialect)));
    }

    /// List all registered channel names.
    pub fn channels(&self) -> Vec<String> {
        let mut names: Vec<String> = self.converters.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for MarkdownDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn converter_for(format: ChannelFormat, options: TranscodeOptions) -> Box<dyn MarkdownConverter> {
    match format.dialect() {
        Some(dialect) => Box::new(DialectConverter::with_options(dialect, options)),
        None => Box::new(PassthroughConverter),
    }
}
