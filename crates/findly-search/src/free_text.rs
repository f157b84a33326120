//! Free-text web search over the DuckDuckGo HTML endpoint.
//!
//! No credentials, no official API: one GET against the HTML frontend,
//! result anchors extracted with a regex. Transport and parsing failures
//! are logged and surface as `ProviderError`; the presentation layer
//! renders a localized not-found message, never the raw error.

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use findly_core::types::{NotFoundReason, Outcome, ProviderKind, SearchResult};

use crate::error::SearchError;
use crate::provider::{SearchAttempt, SearchProvider};

const ENDPOINT: &str = "https://html.duckduckgo.com/html/";
/// Region token for unlocalized worldwide results.
const REGION: &str = "wt-wt";

/// Adapter for the free-text web search backend.
pub struct FreeTextProvider {
    client: Client,
    max_results: usize,
    anchor_re: Regex,
    tag_re: Regex,
}

impl FreeTextProvider {
    /// Create a new adapter capping results at `max_results`.
    pub fn new(max_results: usize) -> Self {
        Self {
            client: Client::new(),
            max_results,
            // Result links carry the result__a class; titles may contain
            // inline markup that gets stripped separately.
            anchor_re: Regex::new(r#"(?s)<a[^>]*class="result__a"[^>]*href="([^"]+)"[^>]*>(.*?)</a>"#)
                .unwrap(),
            tag_re: Regex::new(r"<[^>]+>").unwrap(),
        }
    }

    async fn fetch(&self, query_text: &str) -> Result<String, SearchError> {
        let response = self
            .client
            .get(ENDPOINT)
            .query(&[("q", query_text), ("kl", REGION)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SearchError::Http(format!(
                "search endpoint returned {}",
                response.status()
            )));
        }

        Ok(response.text().await?)
    }

    /// Extract up to `max_results` results from the HTML response body.
    fn parse_results(&self, html: &str) -> Vec<SearchResult> {
        let mut results = Vec::new();
        for captures in self.anchor_re.captures_iter(html) {
            if results.len() >= self.max_results {
                break;
            }
            let href = &captures[1];
            let title = decode_entities(self.tag_re.replace_all(&captures[2], "").trim());
            if title.is_empty() {
                continue;
            }
            results.push(SearchResult {
                title,
                link: resolve_link(href),
            });
        }
        results
    }
}

#[async_trait]
impl SearchProvider for FreeTextProvider {
    fn name(&self) -> &'static str {
        "free-text"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::FreeText
    }

    async fn execute(&self, attempt: &SearchAttempt) -> Outcome {
        let query_text = attempt.query.as_text();
        let html = match self.fetch(&query_text).await {
            Ok(body) => body,
            Err(e) => {
                warn!(query = %query_text, error = %e, "Free-text search failed");
                return Outcome::ProviderError(e.to_string());
            }
        };

        let results = self.parse_results(&html);
        debug!(query = %query_text, count = results.len(), "Free-text search parsed");
        if results.is_empty() {
            Outcome::NotFound {
                reason: NotFoundReason::NoMatches,
            }
        } else {
            Outcome::Found(results)
        }
    }
}

/// Resolve a result href to the destination URL.
///
/// The HTML endpoint wraps destinations in a `/l/?uddg=<encoded>` redirect;
/// the wrapped URL is already percent-decoded by the query parser.
fn resolve_link(href: &str) -> String {
    let absolute = if let Some(rest) = href.strip_prefix("//") {
        format!("https://{rest}")
    } else {
        href.to_string()
    };
    if let Ok(parsed) = Url::parse(&absolute) {
        if parsed.path().starts_with("/l/") {
            if let Some((_, target)) = parsed.query_pairs().find(|(k, _)| k == "uddg") {
                return target.into_owned();
            }
        }
    }
    absolute
}

/// Decode the handful of HTML entities that appear in result titles.
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
