//! Two-attempt search resolution with a single relaxed fallback.
//!
//! The primary query runs first; anything short of `Found` triggers exactly
//! one retry with the relaxed query, for providers in the fallback tier.
//! No backoff, no ladder: the second outcome is returned verbatim.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use findly_core::types::Outcome;

use crate::provider::{SearchAttempt, SearchProvider};
use crate::query::{self, SearchRequest};

/// Resolves a completed conversation cycle into a search outcome.
pub struct Resolver {
    provider: Arc<dyn SearchProvider>,
}

/// What the resolver did, for event reporting.
#[derive(Clone, Debug)]
pub struct Resolution {
    /// Final outcome after any fallback.
    pub outcome: Outcome,
    /// Queries issued, in order (1 or 2 entries).
    pub issued: Vec<String>,
}

impl Resolver {
    /// Create a resolver over the given provider.
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }

    /// Which provider this resolver drives.
    pub fn provider(&self) -> &Arc<dyn SearchProvider> {
        &self.provider
    }

    /// Execute the primary query and, if it yields nothing, the relaxed
    /// fallback exactly once.
    pub async fn resolve(&self, cycle_id: Uuid, request: &SearchRequest) -> Resolution {
        let primary = query::primary(request);
        let primary_text = primary.as_text();
        let attempt = SearchAttempt {
            query: primary,
            topic: request.topic.clone(),
            language: request.language,
        };

        info!(
            cycle_id = %cycle_id,
            provider = self.provider.name(),
            query = %primary_text,
            "Executing primary search"
        );
        let first = self.provider.execute(&attempt).await;
        let mut issued = vec![primary_text];

        if first.is_found() {
            return Resolution {
                outcome: first,
                issued,
            };
        }

        if !self.provider.fallback_tier() {
            debug!(
                cycle_id = %cycle_id,
                provider = self.provider.name(),
                "Provider has no fallback tier; returning first outcome"
            );
            return Resolution {
                outcome: first,
                issued,
            };
        }

        let relaxed = query::relaxed(request);
        let relaxed_text = relaxed.as_text();
        let retry = SearchAttempt {
            query: relaxed,
            topic: request.topic.clone(),
            language: request.language,
        };

        info!(
            cycle_id = %cycle_id,
            provider = self.provider.name(),
            query = %relaxed_text,
            first = first.tag(),
            "Primary search yielded nothing; executing relaxed fallback"
        );
        let second = self.provider.execute(&retry).await;
        issued.push(relaxed_text);

        Resolution {
            outcome: second,
            issued,
        }
    }
}
