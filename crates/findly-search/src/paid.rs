//! Paid search over the Google Programmable Search JSON API.
//!
//! Requires two credentials: an API key and a search-engine context id.
//! The response envelope branches three ways: an error object, a success
//! with zero total matches, or a success with an items list.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use findly_core::types::{NotFoundReason, Outcome, ProviderKind, SearchResult};

use crate::error::SearchError;
use crate::provider::{SearchAttempt, SearchProvider};

const ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Adapter for the keyed paid search backend.
pub struct PaidSearchProvider {
    client: Client,
    api_key: String,
    context_id: String,
    max_results: usize,
}

impl PaidSearchProvider {
    /// Create a new adapter with the given credentials.
    pub fn new(api_key: &str, context_id: &str, max_results: usize) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            context_id: context_id.to_string(),
            max_results,
        }
    }

    async fn fetch(&self, query_text: &str) -> Result<SearchEnvelope, SearchError> {
        // The query term reaches the wire percent-encoded; reqwest encodes
        // every query pair on serialization.
        let num = self.max_results.to_string();
        let response = self
            .client
            .get(ENDPOINT)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.context_id.as_str()),
                ("q", query_text),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        let envelope: SearchEnvelope = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))?;
        Ok(envelope)
    }
}

#[async_trait]
impl SearchProvider for PaidSearchProvider {
    fn name(&self) -> &'static str {
        "paid-api"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::PaidApi
    }

    async fn execute(&self, attempt: &SearchAttempt) -> Outcome {
        let query_text = attempt.query.as_text();
        let envelope = match self.fetch(&query_text).await {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(query = %query_text, error = %e, "Paid search failed");
                return Outcome::ProviderError(e.to_string());
            }
        };
        let outcome = interpret(envelope, self.max_results);
        debug!(query = %query_text, outcome = outcome.tag(), "Paid search resolved");
        outcome
    }
}

// =============================================================================
// Response envelope
// =============================================================================

/// Top-level response shape. Exactly one of the branches is meaningful:
/// `error`, or `search_information` with zero totals, or `items`.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchEnvelope {
    #[serde(default)]
    error: Option<ErrorEnvelope>,
    #[serde(rename = "searchInformation", default)]
    search_information: Option<SearchInformation>,
    #[serde(default)]
    items: Option<Vec<Item>>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct SearchInformation {
    /// Reported as a decimal string by the API.
    #[serde(rename = "totalResults", default)]
    total_results: String,
}

#[derive(Debug, Deserialize)]
struct Item {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
}

/// Map a decoded envelope to an outcome.
///
/// "Zero total indexed matches" is kept distinguishable from an ordinary
/// empty items list; the presentation layer decides whether to show it.
pub(crate) fn interpret(envelope: SearchEnvelope, max_results: usize) -> Outcome {
    if let Some(error) = envelope.error {
        return Outcome::ProviderError(error.message);
    }

    if let Some(info) = &envelope.search_information {
        if info.total_results == "0" {
            return Outcome::NotFound {
                reason: NotFoundReason::ZeroIndexed,
            };
        }
    }

    let items = envelope.items.unwrap_or_default();
    if items.is_empty() {
        return Outcome::NotFound {
            reason: NotFoundReason::NoMatches,
        };
    }

    Outcome::Found(
        items
            .into_iter()
            .take(max_results)
            .map(|item| SearchResult {
                title: item.title,
                link: item.link,
            })
            .collect(),
    )
}
