//! Error handling for html-block-adapter
//!
//! This module provides the error type shared by every adapter operation.
//! Most variants describe data problems that the adapter absorbs at the
//! render-one-record boundary (they are logged and the record degrades to
//! empty markup). Only [`Error::MissingType`], [`Error::ParseError`] and
//! [`Error::ConfigError`] reach callers, since they signal misuse of the API.
//!
//! # Error Types
//!
//! - [`Error::MissingType`] - `render_type` called without a type
//! - [`Error::InvalidRecord`] - a value that is not a `{ type, data }` record
//! - [`Error::TemplateNotFound`] - no exact or prefix match for a type
//! - [`Error::ParseError`] - template source syntax errors
//! - [`Error::RenderError`] - substitution or rendering function failures
//! - [`Error::ConfigError`] - invalid adapter configuration
//! - [`Error::JsonError`] - JSON parsing and serialization errors
//!
//! # Memory Efficiency
//!
//! Error messages use `Cow<'static, str>` to avoid unnecessary allocations
//! when using static error messages, while still supporting owned strings
//! for dynamic error context.

use std::borrow::Cow;
use thiserror::Error;

/// Error type for all html-block-adapter operations
#[derive(Error, Debug)]
pub enum Error {
    /// `render_type` was called with an empty type name
    #[error("type can't be empty")]
    MissingType,

    /// The value does not have the `{ type, data }` record shape
    #[error("Invalid record: {0}")]
    InvalidRecord(Cow<'static, str>),

    /// Neither an exact nor a prefix match exists for the type
    #[error("No template for type {0}")]
    TemplateNotFound(String),

    /// Template source could not be compiled
    #[error("Parse error: {0}")]
    ParseError(Cow<'static, str>),

    /// Substitution or rendering function failure
    #[error("Render error: {0}")]
    RenderError(Cow<'static, str>),

    /// Adapter configuration rejected at build time
    #[error("Config error: {0}")]
    ConfigError(Cow<'static, str>),

    /// Automatically converted from `serde_json::Error` when JSON operations fail.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl Error {
    /// Create a parse error with a static string
    pub fn parse_static(msg: &'static str) -> Self {
        Error::ParseError(Cow::Borrowed(msg))
    }

    /// Create a parse error with an owned string
    pub fn parse_owned(msg: String) -> Self {
        Error::ParseError(Cow::Owned(msg))
    }

    /// Create a render error with a static string
    pub fn render_static(msg: &'static str) -> Self {
        Error::RenderError(Cow::Borrowed(msg))
    }

    /// Create a render error with an owned string
    ///
    /// Use this from rendering functions to report a failure that should
    /// degrade the record to empty markup.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use html_block_adapter::Error;
    ///
    /// let error = Error::render_owned(format!("Missing field: {}", "href"));
    /// assert_eq!(error.to_string(), "Render error: Missing field: href");
    /// ```
    pub fn render_owned(msg: String) -> Self {
        Error::RenderError(Cow::Owned(msg))
    }

    /// Create an invalid record error with a static string
    pub fn invalid_record_static(msg: &'static str) -> Self {
        Error::InvalidRecord(Cow::Borrowed(msg))
    }

    /// Create an invalid record error with an owned string
    pub fn invalid_record_owned(msg: String) -> Self {
        Error::InvalidRecord(Cow::Owned(msg))
    }

    /// Create a config error with a static string
    pub fn config_static(msg: &'static str) -> Self {
        Error::ConfigError(Cow::Borrowed(msg))
    }

    /// Create a config error with an owned string
    pub fn config_owned(msg: String) -> Self {
        Error::ConfigError(Cow::Owned(msg))
    }

    /// Whether this error is a contract violation that callers must see
    ///
    /// Data-quality errors return `false`; the adapter logs them and
    /// degrades to empty markup instead.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Error::MissingType | Error::ParseError(_) | Error::ConfigError(_)
        )
    }
}

/// Result type alias for html-block-adapter operations
pub type Result<T> = std::result::Result<T, Error>;
