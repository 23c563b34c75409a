//! Per-channel output format configuration.
//!
//! Maps delivery channel names (e.g. `"telegram"`, `"slack"`) to the format
//! their transport expects. Unknown keys in the JSON are ignored so newer
//! configs keep loading on older builds.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dialect::{Dialect, TranscodeOptions, UrlEscaping};
use crate::error::ConfigError;

/// What a channel's transport expects as message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelFormat {
    /// Slack `mrkdwn`.
    #[serde(alias = "mrkdwn")]
    Slack,
    /// Telegram MarkdownV2.
    #[serde(alias = "telegram", alias = "markdown_v2", alias = "markdownv2")]
    Strict,
    /// Send the text as authored (Discord renders markdown natively).
    #[serde(alias = "plain", alias = "none")]
    Passthrough,
}

impl ChannelFormat {
    /// The dialect to transcode into, or `None` to skip transcoding.
    pub fn dialect(self) -> Option<Dialect> {
        match self {
            Self::Slack => Some(Dialect::Slack),
            Self::Strict => Some(Dialect::Strict),
            Self::Passthrough => None,
        }
    }
}

impl From<Dialect> for ChannelFormat {
    fn from(dialect: Dialect) -> Self {
        match dialect {
            Dialect::Slack => Self::Slack,
            Dialect::Strict => Self::Strict,
        }
    }
}

/// Formatting configuration for outbound messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattingConfig {
    /// Channel name to format. Channels missing here pass text through.
    #[serde(default = "default_channels")]
    pub channels: HashMap<String, ChannelFormat>,

    /// URL escaping for strict-dialect links.
    #[serde(default, alias = "linkUrls")]
    pub link_urls: UrlEscaping,
}

fn default_channels() -> HashMap<String, ChannelFormat> {
    HashMap::from([
        ("telegram".to_owned(), ChannelFormat::Strict),
        ("slack".to_owned(), ChannelFormat::Slack),
        ("discord".to_owned(), ChannelFormat::Passthrough),
    ])
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            channels: default_channels(),
            link_urls: UrlEscaping::default(),
        }
    }
}

impl FormattingConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Deserialize a configuration from an already-parsed JSON value.
    ///
    /// `null` yields the default configuration.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Options passed to every transcoding call made under this config.
    pub fn options(&self) -> TranscodeOptions {
        TranscodeOptions {
            link_urls: self.link_urls,
        }
    }

    /// The configured format for `channel`, if any.
    pub fn format_for(&self, channel: &str) -> Option<ChannelFormat> {
        self.channels.get(channel).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_covers_builtin_channels() {
        let cfg = FormattingConfig::default();
        assert_eq!(cfg.format_for("telegram"), Some(ChannelFormat::Strict));
        assert_eq!(cfg.format_for("slack"), Some(ChannelFormat::Slack));
        assert_eq!(cfg.format_for("discord"), Some(ChannelFormat::Passthrough));
        assert_eq!(cfg.format_for("irc"), None);
        assert_eq!(cfg.options(), TranscodeOptions::default());
    }

    #[test]
    fn empty_object_uses_defaults() {
        let cfg = FormattingConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, FormattingConfig::default());
    }

    #[test]
    fn null_value_uses_defaults() {
        let cfg = FormattingConfig::from_value(Value::Null).unwrap();
        assert_eq!(cfg, FormattingConfig::default());
    }

    #[test]
    fn explicit_channels_replace_defaults() {
        let json = r#"{
            "channels": { "ops-chat": "telegram", "team": "mrkdwn", "log": "plain" },
            "linkUrls": "raw"
        }"#;
        let cfg = FormattingConfig::from_json_str(json).unwrap();
        assert_eq!(cfg.channels.len(), 3);
        assert_eq!(cfg.format_for("ops-chat"), Some(ChannelFormat::Strict));
        assert_eq!(cfg.format_for("team"), Some(ChannelFormat::Slack));
        assert_eq!(cfg.format_for("log"), Some(ChannelFormat::Passthrough));
        assert_eq!(cfg.format_for("telegram"), None);
        assert_eq!(cfg.options().link_urls, UrlEscaping::Raw);
    }

    #[test]
    fn snake_case_key_accepted() {
        let cfg = FormattingConfig::from_json_str(r#"{"link_urls":"raw"}"#).unwrap();
        assert_eq!(cfg.link_urls, UrlEscaping::Raw);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let cfg = FormattingConfig::from_json_str(r#"{"theme":"dark"}"#).unwrap();
        assert_eq!(cfg, FormattingConfig::default());
    }

    #[test]
    fn unknown_format_is_json_error() {
        let err = FormattingConfig::from_json_str(r#"{"channels":{"x":"html"}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn channel_format_dialect() {
        assert_eq!(ChannelFormat::Strict.dialect(), Some(Dialect::Strict));
        assert_eq!(ChannelFormat::Slack.dialect(), Some(Dialect::Slack));
        assert_eq!(ChannelFormat::Passthrough.dialect(), None);
        for dialect in Dialect::ALL {
            assert_eq!(ChannelFormat::from(dialect).dialect(), Some(dialect));
        }
    }

    #[test]
    fn serde_roundtrip() {
        let cfg = FormattingConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let restored = FormattingConfig::from_json_str(&json).unwrap();
        assert_eq!(restored, cfg);
    }
}
