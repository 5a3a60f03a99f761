//! Core types for feed-fetch

use crate::error::ItemError;
use bytes::Bytes;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;
use url::Url;

/// A single `<item>` of the feed
///
/// Fields hold the raw element text. Missing elements are empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedItem {
    /// Item title, used as the output file stem
    pub title: String,
    /// Item GUID
    pub guid: String,
    /// Raw pubDate text, e.g. `Thu, 11 Jan 2024 21:00:00 +0000`
    pub publish_date: String,
    /// Raw link text
    pub link: String,
}

/// The feed's `<channel>`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Channel {
    /// Channel title
    pub title: String,
    /// Items in document order
    pub items: Vec<FeedItem>,
}

/// Why an item was skipped without a request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The item was published on another day
    DateMismatch {
        /// Calendar date of the item's pubDate, in UTC
        published: NaiveDate,
    },
    /// Dry-run mode is enabled
    DryRun,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::DateMismatch { published } => write!(f, "date mismatch ({})", published),
            SkipReason::DryRun => write!(f, "dry run"),
        }
    }
}

/// Result of processing one item
#[derive(Debug)]
pub enum FetchOutcome {
    /// The link answered 200; the whole body
    Downloaded {
        /// Response body
        bytes: Bytes,
    },
    /// The link redirected to a target classified for capture
    RedirectCaptured {
        /// Absolute redirect target
        target: Url,
    },
    /// The item failed
    Error {
        /// What went wrong
        cause: ItemError,
    },
    /// The item was not fetched
    Skipped {
        /// Why
        reason: SkipReason,
    },
}

impl FetchOutcome {
    /// Shorthand for [`FetchOutcome::Error`]
    pub fn error(cause: ItemError) -> Self {
        FetchOutcome::Error { cause }
    }

    /// Shorthand for [`FetchOutcome::Skipped`]
    pub fn skipped(reason: SkipReason) -> Self {
        FetchOutcome::Skipped { reason }
    }
}

/// Terminal state of an item as kept in the run report
///
/// Unlike [`FetchOutcome`] this does not hold the downloaded body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemStatus {
    /// Content was downloaded and written
    Downloaded {
        /// Body length in bytes
        size: usize,
    },
    /// A redirect target was captured and written
    RedirectCaptured {
        /// Absolute redirect target
        target: String,
    },
    /// The item failed (fetch or write)
    Failed {
        /// Error message
        error: String,
    },
    /// The item was skipped
    Skipped(SkipReason),
}

impl ItemStatus {
    /// Terminal status for an outcome (before any write error is considered)
    pub fn from_outcome(outcome: &FetchOutcome) -> Self {
        match outcome {
            FetchOutcome::Downloaded { bytes } => ItemStatus::Downloaded { size: bytes.len() },
            FetchOutcome::RedirectCaptured { target } => ItemStatus::RedirectCaptured {
                target: target.to_string(),
            },
            FetchOutcome::Error { cause } => ItemStatus::Failed {
                error: cause.to_string(),
            },
            FetchOutcome::Skipped { reason } => ItemStatus::Skipped(*reason),
        }
    }
}

/// Per-item entry of a [`RunReport`]
#[derive(Clone, Debug, Serialize)]
pub struct ItemReport {
    /// Item title
    pub title: String,
    /// Item GUID
    pub guid: String,
    /// Terminal status
    pub status: ItemStatus,
    /// File written for this item, if any
    pub artifact: Option<PathBuf>,
}

/// Ordered summary of a run
#[derive(Clone, Debug, Default, Serialize)]
pub struct RunReport {
    /// Channel title
    pub channel_title: String,
    /// Feed decode error, when the feed body could not be read as RSS
    pub feed_error: Option<String>,
    /// One entry per item, in document order
    pub items: Vec<ItemReport>,
}

impl RunReport {
    /// Items whose content was written
    pub fn downloaded(&self) -> usize {
        self.count(|s| matches!(s, ItemStatus::Downloaded { .. }))
    }

    /// Items whose redirect target was written
    pub fn captured(&self) -> usize {
        self.count(|s| matches!(s, ItemStatus::RedirectCaptured { .. }))
    }

    /// Items skipped for date mismatch or dry-run
    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, ItemStatus::Skipped(_)))
    }

    /// Items that failed
    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, ItemStatus::Failed { .. }))
    }

    /// Files written during the run
    pub fn artifacts(&self) -> impl Iterator<Item = &PathBuf> {
        self.items.iter().filter_map(|i| i.artifact.as_ref())
    }

    fn count(&self, pred: impl Fn(&ItemStatus) -> bool) -> usize {
        self.items.iter().filter(|i| pred(&i.status)).count()
    }
}
