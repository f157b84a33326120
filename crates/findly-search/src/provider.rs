//! Provider adapter interface and construction.
//!
//! Every backend implements [`SearchProvider`]; the rest of the system only
//! sees `execute(attempt) -> Outcome`. Adapters catch every failure at
//! their own boundary: an `Outcome` comes back, never an error.

use std::sync::Arc;

use async_trait::async_trait;

use findly_core::config::FindlyConfig;
use findly_core::error::{FindlyError, Result};
use findly_core::types::{Language, Outcome, ProviderKind};

use crate::encyclopedia::EncyclopediaProvider;
use crate::free_text::FreeTextProvider;
use crate::paid::PaidSearchProvider;
use crate::query::Query;

/// One search attempt handed to a provider.
///
/// Free-text style providers flatten `query`; the encyclopedia provider
/// reads only `topic` and `language`, bypassing query composition.
#[derive(Clone, Debug)]
pub struct SearchAttempt {
    /// Composed query for free-text style providers.
    pub query: Query,
    /// Raw topic exactly as the user entered it.
    pub topic: String,
    /// Language selected for the cycle.
    pub language: Language,
}

/// A search or lookup backend.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Short name for logs and events.
    fn name(&self) -> &'static str;

    /// Which kind of backend this is, for event payloads.
    fn kind(&self) -> ProviderKind;

    /// Whether the resolver retries this provider with the relaxed query.
    /// Lookup-style providers have no fallback tier.
    fn fallback_tier(&self) -> bool {
        true
    }

    /// Execute one attempt. Must not panic and must not return transport
    /// errors raw; every failure maps to an `Outcome` variant.
    async fn execute(&self, attempt: &SearchAttempt) -> Outcome;
}

/// Build the configured provider.
///
/// Fails fast on missing paid credentials so a misconfigured deployment
/// dies at startup instead of on the first user search.
pub fn build_provider(config: &FindlyConfig) -> Result<Arc<dyn SearchProvider>> {
    let max_results = config.search.max_results;
    match config.search.provider {
        ProviderKind::FreeText => Ok(Arc::new(FreeTextProvider::new(max_results))),
        ProviderKind::PaidApi => {
            let paid = &config.search.paid;
            if paid.api_key.is_empty() || paid.context_id.is_empty() {
                return Err(FindlyError::Config(
                    "paid-api provider selected but api_key/context_id missing".to_string(),
                ));
            }
            Ok(Arc::new(PaidSearchProvider::new(
                &paid.api_key,
                &paid.context_id,
                max_results,
            )))
        }
        ProviderKind::Encyclopedia => Ok(Arc::new(EncyclopediaProvider::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_free_text_provider() {
        let config = FindlyConfig::default();
        let provider = build_provider(&config).unwrap();
        assert_eq!(provider.kind(), ProviderKind::FreeText);
        assert!(provider.fallback_tier());
    }

    #[test]
    fn test_build_paid_provider_requires_credentials() {
        let mut config = FindlyConfig::default();
        config.search.provider = ProviderKind::PaidApi;
        assert!(build_provider(&config).is_err());

        config.search.paid.api_key = "key".to_string();
        config.search.paid.context_id = "ctx".to_string();
        let provider = build_provider(&config).unwrap();
        assert_eq!(provider.kind(), ProviderKind::PaidApi);
    }

    #[test]
    fn test_build_encyclopedia_provider_has_no_fallback_tier() {
        let mut config = FindlyConfig::default();
        config.search.provider = ProviderKind::Encyclopedia;
        let provider = build_provider(&config).unwrap();
        assert_eq!(provider.kind(), ProviderKind::Encyclopedia);
        assert!(!provider.fallback_tier());
    }
}
