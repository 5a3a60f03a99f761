//! Redirect classification.
//!
//! Every redirect an item request runs into is shown to a [`RedirectClassifier`],
//! which decides whether the client keeps following it or stops and hands the
//! target back to the caller as a capture.

use reqwest::redirect::Policy;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// What to do with a redirect target
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedirectAction {
    /// Follow the redirect and fetch whatever is behind it
    Follow,
    /// Stop and record the target instead of fetching it
    Capture,
}

/// Decides how a redirect target is handled
///
/// Any `Fn(&Url) -> RedirectAction` closure is a classifier:
///
/// ```
/// use feed_fetch::fetcher::{RedirectAction, RedirectClassifier};
/// use url::Url;
///
/// let mirrors = |target: &Url| {
///     if target.host_str() == Some("mirror.example.com") {
///         RedirectAction::Capture
///     } else {
///         RedirectAction::Follow
///     }
/// };
/// let target = Url::parse("https://mirror.example.com/a").unwrap();
/// assert_eq!(mirrors.classify(&target), RedirectAction::Capture);
/// ```
pub trait RedirectClassifier: Send + Sync {
    /// Classify an absolute redirect target
    fn classify(&self, target: &Url) -> RedirectAction;
}

impl<F> RedirectClassifier for F
where
    F: Fn(&Url) -> RedirectAction + Send + Sync,
{
    fn classify(&self, target: &Url) -> RedirectAction {
        self(target)
    }
}

/// Captures redirects whose target uses a given URL scheme
///
/// Such schemes are not fetchable content (`magnet:`, or a private marker
/// scheme set up by the feed operator); the target is what should be kept.
#[derive(Clone, Debug)]
pub struct SchemeClassifier {
    scheme: String,
}

impl SchemeClassifier {
    /// Capture redirects to `scheme` (compared case-insensitively)
    pub fn new(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into().to_ascii_lowercase(),
        }
    }

    /// The sentinel scheme, lowercased
    pub fn scheme(&self) -> &str {
        &self.scheme
    }
}

impl RedirectClassifier for SchemeClassifier {
    fn classify(&self, target: &Url) -> RedirectAction {
        // Url normalizes schemes to lowercase
        if target.scheme() == self.scheme {
            RedirectAction::Capture
        } else {
            RedirectAction::Follow
        }
    }
}

/// Build the client redirect policy for `classifier`
///
/// Followed redirects are bounded by `max_redirects`; exceeding it fails the request.
pub(crate) fn redirect_policy(
    classifier: Arc<dyn RedirectClassifier>,
    max_redirects: usize,
) -> Policy {
    Policy::custom(move |attempt| match classifier.classify(attempt.url()) {
        RedirectAction::Capture => {
            debug!("Capturing redirect to {}", attempt.url());
            attempt.stop()
        }
        RedirectAction::Follow => {
            if attempt.previous().len() > max_redirects {
                attempt.error(format!("too many redirects (max {})", max_redirects))
            } else {
                debug!("Following redirect to {}", attempt.url());
                attempt.follow()
            }
        }
    })
}
