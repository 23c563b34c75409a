//! # chatmark-format
//!
//! Rewrites common GitHub-flavored markdown into the markup dialect a chat
//! platform expects: Slack `mrkdwn` or Telegram's strictly escaped
//! MarkdownV2.
//!
//! The pipeline is a straight sequence of pure stages:
//!
//! - **[`extract`]** -- finds code blocks, inline code, links, bold and
//!   italic spans in fixed precedence order
//! - **[`placeholder`]** -- swaps each span for a collision-free token
//! - **[`escape`]** -- escapes reserved characters outside the tokens
//! - **[`reassemble`]** -- renders each span and puts it back in place
//!
//! [`transcode`] runs the whole pipeline. [`dispatch::MarkdownDispatcher`]
//! picks a converter by channel name for the delivery layer.
//!
//! ```
//! use chatmark_format::{Dialect, transcode};
//!
//! let out = transcode("**Done** in 3.5s!", Dialect::Strict).unwrap();
//! assert_eq!(out, r"*Done* in 3\.5s\!");
//! ```

pub mod converter;
pub mod dispatch;
pub mod escape;
pub mod extract;
pub mod placeholder;
pub mod reassemble;
pub mod transcode;

pub use chatmark_types::{Dialect, TranscodeError, TranscodeOptions, UrlEscaping};
pub use converter::{DialectConverter, MarkdownConverter, PassthroughConverter};
pub use dispatch::MarkdownDispatcher;
pub use transcode::{transcode, transcode_with};
