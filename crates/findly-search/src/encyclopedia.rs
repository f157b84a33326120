//! Encyclopedia lookup against the language-local Wikipedia edition.
//!
//! Operates on the raw topic only; query composition and augmentation are
//! bypassed by contract. Two-step lookup: resolve the canonical title via
//! opensearch, then fetch the page summary for the canonical title and URL.
//! Missing pages and disambiguation pages both collapse to not-found; no
//! disambiguation choice is offered back to the user.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use findly_core::types::{Language, NotFoundReason, Outcome, ProviderKind, SearchResult};

use crate::error::SearchError;
use crate::provider::{SearchAttempt, SearchProvider};

/// Adapter for the encyclopedia summary backend.
pub struct EncyclopediaProvider {
    client: Client,
}

impl EncyclopediaProvider {
    /// Create a new adapter.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Step 1: resolve the topic to a canonical page title.
    /// Returns `None` when the edition has no matching page.
    async fn resolve_title(
        &self,
        topic: &str,
        language: Language,
    ) -> Result<Option<String>, SearchError> {
        let endpoint = format!(
            "https://{}.wikipedia.org/w/api.php",
            language.wiki_subdomain()
        );
        let response = self
            .client
            .get(&endpoint)
            .query(&[
                ("action", "opensearch"),
                ("search", topic),
                ("limit", "1"),
                ("format", "json"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SearchError::Http(format!(
                "opensearch returned {}",
                response.status()
            )));
        }

        let (_, titles, _, _): (String, Vec<String>, Vec<String>, Vec<String>) = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))?;
        Ok(titles.into_iter().next())
    }

    /// Step 2: fetch the page summary for a resolved title.
    /// `Ok(None)` means the page does not exist after all.
    async fn fetch_summary(
        &self,
        title: &str,
        language: Language,
    ) -> Result<Option<PageSummary>, SearchError> {
        let mut endpoint = Url::parse(&format!(
            "https://{}.wikipedia.org/api/rest_v1/page/summary/",
            language.wiki_subdomain()
        ))
        .map_err(|e| SearchError::Parse(e.to_string()))?;
        // push() percent-encodes the title segment.
        endpoint
            .path_segments_mut()
            .map_err(|_| SearchError::Parse("summary endpoint is not a base URL".to_string()))?
            .pop_if_empty()
            .push(title);

        let response = self.client.get(endpoint).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(SearchError::Http(format!(
                "summary endpoint returned {}",
                response.status()
            )));
        }

        let summary: PageSummary = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))?;
        Ok(Some(summary))
    }
}

impl Default for EncyclopediaProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchProvider for EncyclopediaProvider {
    fn name(&self) -> &'static str {
        "encyclopedia"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Encyclopedia
    }

    /// A failed lookup is terminal; there is no relaxed retry.
    fn fallback_tier(&self) -> bool {
        false
    }

    async fn execute(&self, attempt: &SearchAttempt) -> Outcome {
        let topic = attempt.topic.trim();
        let language = attempt.language;

        let title = match self.resolve_title(topic, language).await {
            Ok(Some(title)) => title,
            Ok(None) => {
                debug!(topic = %topic, lang = language.wiki_subdomain(), "No encyclopedia page");
                return Outcome::NotFound {
                    reason: NotFoundReason::NoMatches,
                };
            }
            Err(e) => {
                warn!(topic = %topic, error = %e, "Encyclopedia title lookup failed");
                return Outcome::ProviderError(e.to_string());
            }
        };

        let summary = match self.fetch_summary(&title, language).await {
            Ok(Some(summary)) => summary,
            Ok(None) => {
                return Outcome::NotFound {
                    reason: NotFoundReason::NoMatches,
                }
            }
            Err(e) => {
                warn!(title = %title, error = %e, "Encyclopedia summary fetch failed");
                return Outcome::ProviderError(e.to_string());
            }
        };

        summary_outcome(summary, language)
    }
}

// =============================================================================
// Summary response
// =============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct PageSummary {
    /// "standard" for articles, "disambiguation" for ambiguous titles.
    #[serde(rename = "type", default)]
    page_type: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content_urls: Option<ContentUrls>,
}

#[derive(Debug, Deserialize)]
struct ContentUrls {
    desktop: Option<DesktopUrls>,
}

#[derive(Debug, Deserialize)]
struct DesktopUrls {
    page: Option<String>,
}

/// Map a fetched summary to an outcome. Disambiguation pages collapse to
/// not-found, the same as a missing page.
pub(crate) fn summary_outcome(summary: PageSummary, language: Language) -> Outcome {
    if summary.page_type == "disambiguation" {
        return Outcome::NotFound {
            reason: NotFoundReason::NoMatches,
        };
    }

    let link = summary
        .content_urls
        .and_then(|urls| urls.desktop)
        .and_then(|desktop| desktop.page)
        .unwrap_or_else(|| {
            format!(
                "https://{}.wikipedia.org/wiki/{}",
                language.wiki_subdomain(),
                summary.title.replace(' ', "_")
            )
        });

    Outcome::Found(vec![SearchResult {
        title: summary.title,
        link,
    }])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> PageSummary {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_standard_summary_maps_to_single_result() {
        let summary = decode(
            r#"{
                "type": "standard",
                "title": "Квантовая запутанность",
                "extract": "...",
                "content_urls": {
                    "desktop": {"page": "https://ru.wikipedia.org/wiki/Квантовая_запутанность"}
                }
            }"#,
        );
        match summary_outcome(summary, Language::Ru) {
            Outcome::Found(results) => {
                assert_eq!(results.len(), 1);
                assert_eq!(results[0].title, "Квантовая запутанность");
                assert_eq!(
                    results[0].link,
                    "https://ru.wikipedia.org/wiki/Квантовая_запутанность"
                );
            }
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn test_disambiguation_maps_to_not_found() {
        let summary = decode(r#"{"type": "disambiguation", "title": "Mercury"}"#);
        assert_eq!(
            summary_outcome(summary, Language::En),
            Outcome::NotFound {
                reason: NotFoundReason::NoMatches
            }
        );
    }

    #[test]
    fn test_missing_content_urls_falls_back_to_wiki_path() {
        let summary = decode(r#"{"type": "standard", "title": "Cell division"}"#);
        match summary_outcome(summary, Language::En) {
            Outcome::Found(results) => {
                assert_eq!(results[0].link, "https://en.wikipedia.org/wiki/Cell_division");
            }
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn test_opensearch_tuple_shape_decodes() {
        let raw = r#"["quantum", ["Quantum entanglement"], [""], ["https://en.wikipedia.org/wiki/Quantum_entanglement"]]"#;
        let (query, titles, _, links): (String, Vec<String>, Vec<String>, Vec<String>) =
            serde_json::from_str(raw).unwrap();
        assert_eq!(query, "quantum");
        assert_eq!(titles[0], "Quantum entanglement");
        assert_eq!(links.len(), 1);
    }
}
