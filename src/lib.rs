//! # feed-fetch
//!
//! Date-filtered RSS downloader.
//!
//! A run fetches one RSS feed, keeps the items published on a target date and
//! fetches each item's link:
//! - a `200 OK` body is saved as `<title>.<ext>`
//! - a redirect whose target is classified for capture (by default: its URL
//!   scheme equals the redirect extension) is saved as `<title>.<redir-ext>`
//!   containing the target URL, without fetching it
//!
//! Items are processed one at a time; a failing item is reported and the run
//! moves on. Only a failed feed fetch aborts the run.
//!
//! ## Quick Start
//!
//! ```no_run
//! use feed_fetch::{Config, FeedRunner};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::new("https://indexer.example.com/rss?apikey=KEY");
//!     config.output_dir = "downloads".into();
//!     config.redirect_extension = "magnet".to_string();
//!     config.dry_run = false;
//!
//!     let report = FeedRunner::new(config)?.run().await?;
//!     println!(
//!         "{} downloaded, {} captured, {} failed",
//!         report.downloaded(),
//!         report.captured(),
//!         report.failed()
//!     );
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Command line flags
pub mod cli;
/// Configuration types
pub mod config;
/// Publish-date matching
pub mod date_filter;
/// Error types
pub mod error;
/// Feed retrieval and decoding
pub mod feed;
/// Item fetching with redirect classification
pub mod fetcher;
/// Artifact writing
pub mod output;
/// Run orchestration
pub mod runner;
/// Core types
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use cli::Cli;
pub use config::{Config, TitlePolicy};
pub use date_filter::{DateCheck, DateFilter};
pub use error::{Error, FeedError, ItemError, PublishDateError, Result};
pub use fetcher::{RedirectAction, RedirectAwareFetcher, RedirectClassifier, SchemeClassifier};
pub use output::OutputWriter;
pub use runner::FeedRunner;
pub use types::{
    Channel, FeedItem, FetchOutcome, ItemReport, ItemStatus, RunReport, SkipReason,
};
