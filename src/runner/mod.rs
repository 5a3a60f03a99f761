//! Run orchestration.
//!
//! A run fetches the feed once, decodes it once, then walks the items in
//! document order: date filter, fetch (or skip), write. Item failures are
//! recorded and never stop the run; only a failed feed fetch does.

use crate::config::Config;
use crate::date_filter::{DateCheck, DateFilter};
use crate::error::{ItemError, Result};
use crate::feed::{fetch_feed, parse_channel};
use crate::fetcher::{RedirectAwareFetcher, RedirectClassifier};
use crate::output::OutputWriter;
use crate::types::{FeedItem, FetchOutcome, ItemReport, ItemStatus, RunReport, SkipReason};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Drives a single run over one feed
pub struct FeedRunner {
    /// Run configuration
    config: Config,

    /// Client for the feed request (default redirect handling)
    feed_client: reqwest::Client,

    filter: DateFilter,
    fetcher: RedirectAwareFetcher,
    writer: OutputWriter,
}

impl FeedRunner {
    /// Create a runner that captures redirects to the redirect extension's scheme
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or an HTTP client cannot be created
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let fetcher = RedirectAwareFetcher::from_config(&config)?;
        Self::build(config, fetcher)
    }

    /// Create a runner with a custom redirect classifier
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or an HTTP client cannot be created
    pub fn with_classifier(
        config: Config,
        classifier: Arc<dyn RedirectClassifier>,
    ) -> Result<Self> {
        config.validate()?;
        let fetcher = RedirectAwareFetcher::new(&config, classifier)?;
        Self::build(config, fetcher)
    }

    fn build(config: Config, fetcher: RedirectAwareFetcher) -> Result<Self> {
        let feed_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            filter: DateFilter::new(config.target_date),
            writer: OutputWriter::new(&config),
            feed_client,
            fetcher,
            config,
        })
    }

    /// The configuration this runner was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Execute the run
    ///
    /// # Errors
    /// Returns [`crate::Error::Feed`] if the feed cannot be fetched; no item is
    /// processed in that case. A feed body that is not valid RSS is not an
    /// error: the report comes back empty with `feed_error` set.
    pub async fn run(&self) -> Result<RunReport> {
        info!(
            dry_run = self.config.dry_run,
            date = %self.config.target_date,
            output_dir = %self.config.output_dir.display(),
            extension = %self.config.content_extension,
            redirect_extension = %self.config.redirect_extension,
            url = %self.config.feed_url,
            "Starting feed run"
        );

        let body = fetch_feed(&self.feed_client, &self.config.feed_url)
            .await
            .inspect_err(|e| error!("Error fetching feed: {}", e))?;

        let channel = match parse_channel(&body) {
            Ok(channel) => channel,
            Err(e) => {
                warn!("Feed could not be decoded, nothing to do: {}", e);
                return Ok(RunReport {
                    feed_error: Some(e.to_string()),
                    ..Default::default()
                });
            }
        };

        info!(
            "Found {} items in '{}', starting download",
            channel.items.len(),
            channel.title
        );

        let mut report = RunReport {
            channel_title: channel.title.clone(),
            feed_error: None,
            items: Vec::with_capacity(channel.items.len()),
        };

        for item in &channel.items {
            report.items.push(self.process_item(item).await);
        }

        info!(
            downloaded = report.downloaded(),
            captured = report.captured(),
            skipped = report.skipped(),
            failed = report.failed(),
            "Done all"
        );

        Ok(report)
    }

    async fn process_item(&self, item: &FeedItem) -> ItemReport {
        let outcome = match self.filter.evaluate(&item.publish_date) {
            DateCheck::Matches => self.fetcher.fetch(item).await,
            DateCheck::Mismatch { published } => {
                if self.config.verbose {
                    info!("Skipping, date mismatch: {} {}", item.title, published);
                } else {
                    debug!("Skipping, date mismatch: {} {}", item.title, published);
                }
                FetchOutcome::skipped(SkipReason::DateMismatch { published })
            }
            DateCheck::Unparseable(source) => FetchOutcome::error(ItemError::InvalidDate {
                value: item.publish_date.clone(),
                source,
            }),
        };

        if let FetchOutcome::Error { cause } = &outcome {
            warn!("Error processing '{}': {}", item.title, cause);
        }

        let (status, artifact) = match self.writer.write(&item.title, &outcome).await {
            Ok(artifact) => (ItemStatus::from_outcome(&outcome), artifact),
            Err(e) => {
                warn!("Error processing '{}': {}", item.title, e);
                (
                    ItemStatus::Failed {
                        error: e.to_string(),
                    },
                    None,
                )
            }
        };

        if artifact.is_some() {
            info!("Done {}", item.title);
        }

        ItemReport {
            title: item.title.clone(),
            guid: item.guid.clone(),
            status,
            artifact,
        }
    }
}
