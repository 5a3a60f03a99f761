//! Per-item fetching under a classifying redirect policy.
//!
//! An item's link either serves content (200) or redirects. Ordinary redirects are
//! followed transparently; redirects the [`RedirectClassifier`] marks for capture
//! end the request and their target is returned instead of any content.

mod redirect;

pub use redirect::{RedirectAction, RedirectClassifier, SchemeClassifier};

use crate::config::Config;
use crate::error::{ItemError, Result};
use crate::types::{FeedItem, FetchOutcome, SkipReason};
use reqwest::StatusCode;
use reqwest::header::LOCATION;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Fetches item links, capturing classified redirects
pub struct RedirectAwareFetcher {
    /// HTTP client carrying the classifying redirect policy
    client: reqwest::Client,

    /// Shared with the client's redirect policy
    classifier: Arc<dyn RedirectClassifier>,

    /// No requests are made when set
    dry_run: bool,

    /// Per-request timeout, kept for error reporting
    timeout: Duration,
}

impl RedirectAwareFetcher {
    /// Create a fetcher using `classifier` for redirect decisions
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: &Config, classifier: Arc<dyn RedirectClassifier>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .redirect(redirect::redirect_policy(
                Arc::clone(&classifier),
                config.max_redirects,
            ))
            .build()?;

        Ok(Self {
            client,
            classifier,
            dry_run: config.dry_run,
            timeout: config.request_timeout,
        })
    }

    /// Create a fetcher that captures redirects to the configured redirect extension's scheme
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn from_config(config: &Config) -> Result<Self> {
        let classifier = SchemeClassifier::new(config.redirect_extension.as_str());
        Self::new(config, Arc::new(classifier))
    }

    /// Fetch an item's link
    ///
    /// Never fails as a whole; every problem is an [`FetchOutcome::Error`] for this item.
    pub async fn fetch(&self, item: &FeedItem) -> FetchOutcome {
        if self.dry_run {
            info!(
                "Skipping download, dry run enabled: {} ({})",
                item.title, item.link
            );
            return FetchOutcome::skipped(SkipReason::DryRun);
        }

        let url = match Url::parse(item.link.trim()) {
            Ok(url) => url,
            Err(source) => {
                return FetchOutcome::error(ItemError::InvalidLink {
                    link: item.link.clone(),
                    source,
                });
            }
        };

        info!("Fetching {}", item.title);

        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => return FetchOutcome::error(self.transport_error(&url, e)),
        };

        let status = response.status();
        if status.is_redirection() {
            // The policy stopped here, or the target was not a URI the client can follow
            return self.classify_stopped_redirect(&response);
        }

        if status != StatusCode::OK {
            return FetchOutcome::error(ItemError::Status {
                url: response.url().to_string(),
                status,
            });
        }

        match response.bytes().await {
            Ok(bytes) => {
                debug!("Read {} bytes for {}", bytes.len(), item.title);
                FetchOutcome::Downloaded { bytes }
            }
            Err(e) => FetchOutcome::error(self.transport_error(&url, e)),
        }
    }

    fn classify_stopped_redirect(&self, response: &reqwest::Response) -> FetchOutcome {
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let target = location
            .as_deref()
            .and_then(|loc| response.url().join(loc).ok());

        if let Some(target) = target
            && self.classifier.classify(&target) == RedirectAction::Capture
        {
            info!("Got {}, capturing {}", response.status(), target);
            return FetchOutcome::RedirectCaptured { target };
        }

        FetchOutcome::error(ItemError::UncapturedRedirect {
            url: response.url().to_string(),
            status: response.status(),
            location,
        })
    }

    fn transport_error(&self, url: &Url, source: reqwest::Error) -> ItemError {
        if source.is_timeout() {
            ItemError::Timeout {
                url: url.to_string(),
                timeout: self.timeout,
            }
        } else {
            ItemError::Request {
                url: url.to_string(),
                source,
            }
        }
    }
}
