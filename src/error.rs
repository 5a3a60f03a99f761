//! Error types for feed-fetch
//!
//! Errors are split by how far they reach:
//! - [`Error`] aborts a run (bad configuration, the feed itself cannot be fetched)
//! - [`FeedError`] describes what went wrong with the feed document
//! - [`ItemError`] is recorded against a single item; the run carries on

use reqwest::StatusCode;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for feed-fetch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for feed-fetch
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "redirect_extension")
        key: Option<String>,
    },

    /// The feed could not be fetched or decoded
    #[error("feed error: {0}")]
    Feed(#[from] FeedError),

    /// Network error (client construction and other transport failures)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl Error {
    /// Shorthand for a [`Error::Config`] tied to a configuration key
    pub(crate) fn config(key: &str, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }
}

/// Errors concerning the feed document
#[derive(Debug, Error)]
pub enum FeedError {
    /// The feed request failed before a response arrived
    #[error("failed to fetch feed {url}: {source}")]
    Request {
        /// Feed URL
        url: String,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// The feed server answered with something other than 200 OK
    #[error("feed {url} returned HTTP {status}")]
    Status {
        /// Feed URL
        url: String,
        /// Status returned by the server
        status: StatusCode,
    },

    /// The feed body is not a readable RSS document
    #[error("failed to parse feed: {0}")]
    Parse(String),
}

/// Errors recorded against a single feed item
///
/// None of these stop the run; the item is reported and the next one is processed.
#[derive(Debug, Error)]
pub enum ItemError {
    /// The item's pubDate does not follow the `Mon, 2 Jan 2006 15:04:05 +0000` layout
    #[error("invalid publish date '{value}': {source}")]
    InvalidDate {
        /// The raw pubDate text
        value: String,
        /// Parser error
        #[source]
        source: PublishDateError,
    },

    /// The item's link is not an absolute URL
    #[error("invalid link '{link}': {source}")]
    InvalidLink {
        /// The raw link text
        link: String,
        /// Parser error
        #[source]
        source: url::ParseError,
    },

    /// The request did not complete within the configured timeout
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout {
        /// Requested URL
        url: String,
        /// Configured timeout
        timeout: Duration,
    },

    /// Transport-level failure (connect, TLS, body read, redirect limit)
    #[error("request to {url} failed: {source}")]
    Request {
        /// Requested URL
        url: String,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// The final response was neither 200 nor a captured redirect
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Requested URL
        url: String,
        /// Terminal status
        status: StatusCode,
    },

    /// A redirect that was not followed and not classified for capture
    #[error("{url} redirected ({status}) to {location:?} which was neither followed nor captured")]
    UncapturedRedirect {
        /// Requested URL
        url: String,
        /// Redirect status
        status: StatusCode,
        /// Raw Location header, if any
        location: Option<String>,
    },

    /// Writing the artifact to the output directory failed
    #[error("failed to write {path}: {source}")]
    Write {
        /// Target file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Ways a pubDate can fail the `Mon, 2 Jan 2006 15:04:05 +0000` layout
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PublishDateError {
    /// No `<weekday>, ` prefix
    #[error("missing weekday prefix")]
    MissingWeekday,

    /// The prefix is not a three-letter weekday name
    #[error("invalid weekday '{0}'")]
    InvalidWeekday(String),

    /// The month is not a three-letter month name
    #[error("invalid month '{0}'")]
    InvalidMonth(String),

    /// Day, time or the literal `+0000` offset did not match
    #[error("{0}")]
    Timestamp(#[from] chrono::ParseError),
}

impl ItemError {
    /// Whether this error came from the per-request timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, ItemError::Timeout { .. })
    }
}
