//! Configuration types for feed-fetch

use crate::error::{Error, Result};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// How item titles are turned into output file stems
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitlePolicy {
    /// Use the title exactly as it appears in the feed
    #[default]
    Verbatim,
    /// Replace path separators, reserved characters and control characters with `_`
    Sanitize,
}

/// Run configuration
///
/// Built once (usually from command line flags) and handed to the runner by
/// reference. Nothing reads configuration from global state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Feed URL, including any API key and search query
    pub feed_url: String,

    /// Output directory (default: ".")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Extension for downloaded content files (default: "file")
    #[serde(default = "default_content_extension")]
    pub content_extension: String,

    /// Extension for redirect pointer files, and the URL scheme that marks a
    /// redirect for capture (default: "redirect")
    #[serde(default = "default_redirect_extension")]
    pub redirect_extension: String,

    /// Only items published on this date are fetched (default: today, local time)
    #[serde(default = "default_target_date")]
    pub target_date: NaiveDate,

    /// Describe what would be fetched without touching the network or disk (default: true)
    #[serde(default = "default_true")]
    pub dry_run: bool,

    /// Log skipped items and redirect decisions (default: false)
    #[serde(default)]
    pub verbose: bool,

    /// Timeout applied to every HTTP request (default: 30s)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: Duration,

    /// Maximum number of redirects followed for a single item (default: 10)
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Permission bits for created files, before umask (default: 0o666, unix only)
    #[serde(default = "default_file_mode")]
    pub file_mode: u32,

    /// Title to filename policy
    #[serde(default)]
    pub title_policy: TitlePolicy,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: String::new(),
            output_dir: default_output_dir(),
            content_extension: default_content_extension(),
            redirect_extension: default_redirect_extension(),
            target_date: default_target_date(),
            dry_run: true,
            verbose: false,
            request_timeout: default_request_timeout(),
            max_redirects: default_max_redirects(),
            file_mode: default_file_mode(),
            title_policy: TitlePolicy::default(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Create a configuration for the given feed URL with every other setting defaulted
    pub fn new(feed_url: impl Into<String>) -> Self {
        Self {
            feed_url: feed_url.into(),
            ..Default::default()
        }
    }

    /// Check the configuration before any request is made
    ///
    /// # Errors
    /// Returns [`Error::Config`] naming the offending key when:
    /// - the feed URL is empty, unparseable, or not http(s)
    /// - either extension is empty or contains a path separator
    /// - the redirect extension is not usable as a URL scheme
    /// - the request timeout is zero
    pub fn validate(&self) -> Result<()> {
        if self.feed_url.trim().is_empty() {
            return Err(Error::config("feed_url", "URL is required"));
        }
        let parsed = url::Url::parse(&self.feed_url)
            .map_err(|e| Error::config("feed_url", format!("invalid feed URL: {}", e)))?;
        match parsed.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(Error::config(
                    "feed_url",
                    format!("feed URL scheme '{}' is not supported", scheme),
                ));
            }
        }

        validate_extension("content_extension", &self.content_extension)?;
        validate_extension("redirect_extension", &self.redirect_extension)?;
        if !is_valid_scheme(&self.redirect_extension) {
            return Err(Error::config(
                "redirect_extension",
                format!(
                    "'{}' cannot be used as a URL scheme",
                    self.redirect_extension
                ),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(Error::config(
                "request_timeout",
                "request timeout must be greater than zero",
            ));
        }

        Ok(())
    }
}

fn validate_extension(key: &str, ext: &str) -> Result<()> {
    if ext.is_empty() {
        return Err(Error::config(key, "extension must not be empty"));
    }
    if ext.contains(['/', '\\']) {
        return Err(Error::config(
            key,
            format!("extension '{}' must not contain a path separator", ext),
        ));
    }
    Ok(())
}

/// RFC 3986: `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
fn is_valid_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_content_extension() -> String {
    "file".to_string()
}

fn default_redirect_extension() -> String {
    "redirect".to_string()
}

fn default_target_date() -> NaiveDate {
    Local::now().date_naive()
}

fn default_true() -> bool {
    true
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_max_redirects() -> usize {
    10
}

fn default_file_mode() -> u32 {
    0o666
}

fn default_user_agent() -> String {
    concat!("feed-fetch/", env!("CARGO_PKG_VERSION")).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Config {
        Config::new("https://example.com/rss?apikey=abc")
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.content_extension, "file");
        assert_eq!(config.redirect_extension, "redirect");
        assert!(config.dry_run);
        assert!(!config.verbose);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.max_redirects, 10);
        assert_eq!(config.file_mode, 0o666);
        assert_eq!(config.title_policy, TitlePolicy::Verbatim);
    }

    #[test]
    fn test_validate_accepts_defaults_with_url() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_validate_requires_url() {
        let err = Config::default().validate().unwrap_err();
        match err {
            Error::Config { key, .. } => assert_eq!(key.as_deref(), Some("feed_url")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_non_http_feed() {
        let config = Config::new("ftp://example.com/rss");
        assert!(config.validate().is_err());

        let config = Config::new("not a url");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_extensions() {
        let mut config = valid();
        config.content_extension = String::new();
        assert!(config.validate().is_err());

        let mut config = valid();
        config.content_extension = "../x".to_string();
        assert!(config.validate().is_err());

        let mut config = valid();
        config.redirect_extension = "1bad".to_string();
        match config.validate().unwrap_err() {
            Error::Config { key, .. } => assert_eq!(key.as_deref(), Some("redirect_extension")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_accepts_real_schemes() {
        for scheme in ["magnet", "redirect", "x-pointer", "web+feed", "a.b"] {
            let mut config = valid();
            config.redirect_extension = scheme.to_string();
            assert!(config.validate().is_ok(), "scheme {} should be valid", scheme);
        }
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = valid();
        config.request_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_title_policy_serde() {
        assert_eq!(
            serde_json::to_string(&TitlePolicy::Sanitize).unwrap(),
            "\"sanitize\""
        );
    }
}
