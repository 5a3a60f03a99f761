//! Command line flags.

use crate::config::{Config, TitlePolicy};
use crate::date_filter::parse_target_date;
use chrono::{Local, NaiveDate};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

/// Download today's items from an RSS feed, recording sentinel redirects as pointer files
#[derive(Clone, Debug, Parser)]
#[command(name = "feed-fetch", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct Cli {
    /// The URL to call to fetch RSS data, including API key and search query
    #[arg(long)]
    pub url: String,

    /// Path to output directory
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// File extension for downloaded content
    #[arg(long, default_value = "file")]
    pub ext: String,

    /// Redirect scheme to capture, also used as the pointer file extension
    #[arg(long = "redir-ext", default_value = "redirect")]
    pub redir_ext: String,

    /// Date to find results from, e.g. 2006-01-02 (default: today)
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Only report what would be downloaded; pass --dry-run=false to download
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = true,
        default_missing_value = "true"
    )]
    pub dry_run: bool,

    /// Log skipped items and redirect decisions
    #[arg(long)]
    pub verbose: bool,

    /// Timeout in seconds for each HTTP request
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Replace path separators and reserved characters in titles used as file names
    #[arg(long)]
    pub sanitize_titles: bool,
}

impl Cli {
    /// Build the run configuration from the parsed flags
    pub fn into_config(self) -> Config {
        Config {
            feed_url: self.url,
            output_dir: self.out,
            content_extension: self.ext,
            redirect_extension: self.redir_ext,
            target_date: self.date.unwrap_or_else(|| Local::now().date_naive()),
            dry_run: self.dry_run,
            verbose: self.verbose,
            request_timeout: Duration::from_secs(self.timeout),
            title_policy: if self.sanitize_titles {
                TitlePolicy::Sanitize
            } else {
                TitlePolicy::Verbatim
            },
            ..Default::default()
        }
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    parse_target_date(value).map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("feed-fetch").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["--url", "https://example.com/rss"]).unwrap();
        assert_eq!(cli.out, PathBuf::from("."));
        assert_eq!(cli.ext, "file");
        assert_eq!(cli.redir_ext, "redirect");
        assert!(cli.date.is_none());
        assert!(cli.dry_run);
        assert!(!cli.verbose);
        assert_eq!(cli.timeout, 30);

        let config = cli.into_config();
        assert_eq!(config.feed_url, "https://example.com/rss");
        assert_eq!(config.target_date, Local::now().date_naive());
        assert_eq!(config.title_policy, TitlePolicy::Verbatim);
    }

    #[test]
    fn test_url_is_required() {
        assert!(parse(&["--out", "/tmp"]).is_err());
    }

    #[test]
    fn test_all_flags() {
        let cli = parse(&[
            "--url",
            "https://example.com/rss",
            "--out",
            "/srv/downloads",
            "--ext",
            "nzb",
            "--redir-ext",
            "magnet",
            "--date",
            "2024-01-11",
            "--dry-run=false",
            "--verbose",
            "--timeout",
            "5",
            "--sanitize-titles",
        ])
        .unwrap();

        let config = cli.into_config();
        assert_eq!(config.output_dir, PathBuf::from("/srv/downloads"));
        assert_eq!(config.content_extension, "nzb");
        assert_eq!(config.redirect_extension, "magnet");
        assert_eq!(
            config.target_date,
            NaiveDate::from_ymd_opt(2024, 1, 11).unwrap()
        );
        assert!(!config.dry_run);
        assert!(config.verbose);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.title_policy, TitlePolicy::Sanitize);
    }

    #[test]
    fn test_dry_run_forms() {
        let cli = parse(&["--url", "https://example.com/rss", "--dry-run"]).unwrap();
        assert!(cli.dry_run);

        let cli = parse(&["--url", "https://example.com/rss", "--dry-run", "false"]).unwrap();
        assert!(!cli.dry_run);

        assert!(parse(&["--url", "https://example.com/rss", "--dry-run=maybe"]).is_err());
    }

    #[test]
    fn test_bad_date_rejected() {
        assert!(parse(&["--url", "https://example.com/rss", "--date", "11/01/2024"]).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(parse(&["--url", "https://example.com/rss", "--timeout", "0"]).is_err());
    }
}
