//! # chatmark-types
//!
//! Core type definitions for the chatmark transcoder.
//!
//! This crate is the foundation of the dependency graph -- the formatting
//! crate depends on it. It contains:
//!
//! - **[`dialect`]** -- the [`Dialect`] rule table and [`TranscodeOptions`]
//! - **[`error`]** -- [`TranscodeError`] and [`ConfigError`] error types
//! - **[`config`]** -- per-channel output format configuration

pub mod config;
pub mod dialect;
pub mod error;

pub use config::{ChannelFormat, FormattingConfig};
pub use dialect::{Dialect, LinkStyle, TranscodeOptions, UrlEscaping};
pub use error::{ConfigError, Result, TranscodeError};
