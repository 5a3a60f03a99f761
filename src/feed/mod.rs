//! Feed retrieval and decoding.
//!
//! The feed is fetched exactly once per run. A failed fetch is the only fatal
//! condition of a run; a body that cannot be decoded is reported as
//! [`FeedError::Parse`] and left to the caller to treat as an empty feed.

use crate::error::FeedError;
use crate::types::{Channel, FeedItem};
use bytes::Bytes;
use reqwest::StatusCode;
use tracing::debug;

/// Fetch the raw feed body
///
/// # Errors
/// - [`FeedError::Request`] when the request fails or times out
/// - [`FeedError::Status`] for any status other than 200
pub async fn fetch_feed(client: &reqwest::Client, url: &str) -> Result<Bytes, FeedError> {
    debug!("Fetching feed: {}", url);

    let request_error = |source| FeedError::Request {
        url: url.to_string(),
        source,
    };

    let response = client.get(url).send().await.map_err(request_error)?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(FeedError::Status {
            url: url.to_string(),
            status,
        });
    }

    response.bytes().await.map_err(request_error)
}

/// Decode an RSS document into a [`Channel`]
///
/// Only `title`, `guid`, `pubDate` and `link` are read from each item; absent
/// elements become empty strings. Dates are not interpreted here.
///
/// # Errors
/// Returns [`FeedError::Parse`] if the body is not an RSS document.
pub fn parse_channel(body: &[u8]) -> Result<Channel, FeedError> {
    let channel =
        rss::Channel::read_from(body).map_err(|e| FeedError::Parse(e.to_string()))?;

    let items = channel
        .items()
        .iter()
        .map(|item| FeedItem {
            title: item.title().unwrap_or_default().to_string(),
            guid: item
                .guid()
                .map(|g| g.value().to_string())
                .unwrap_or_default(),
            publish_date: item.pub_date().unwrap_or_default().to_string(),
            link: item.link().unwrap_or_default().to_string(),
        })
        .collect();

    Ok(Channel {
        title: channel.title().to_string(),
        items,
    })
}
