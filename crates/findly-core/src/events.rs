use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{Language, ProviderKind, Timestamp};

/// All domain events that can occur in the Findly system.
///
/// Events are emitted by the dialog engine after state changes and consumed
/// by:
/// - The SSE broadcast channel (for real-time monitoring)
/// - Cross-context listeners (for reactive behavior)
#[derive(Clone, Debug, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DomainEvent {
    /// A new search cycle started for a user (first contact or restart).
    CycleStarted {
        user_id: i64,
        cycle_id: Uuid,
        timestamp: Timestamp,
    },

    /// The user selected a language for the current cycle.
    LanguageSelected {
        user_id: i64,
        cycle_id: Uuid,
        language: Language,
        timestamp: Timestamp,
    },

    /// A free-text field (subject, category, topic) was collected.
    FieldCollected {
        user_id: i64,
        cycle_id: Uuid,
        field: String,
        timestamp: Timestamp,
    },

    /// The user issued the restart command mid-cycle; all fields discarded.
    SessionRestarted {
        user_id: i64,
        cycle_id: Uuid,
        timestamp: Timestamp,
    },

    /// All fields collected; the session completed one full cycle.
    SessionCompleted {
        user_id: i64,
        cycle_id: Uuid,
        timestamp: Timestamp,
    },

    /// A query was sent to a provider. `attempt` is 1 for the primary
    /// query, 2 for the relaxed fallback.
    SearchIssued {
        cycle_id: Uuid,
        provider: ProviderKind,
        attempt: u8,
        query: String,
        timestamp: Timestamp,
    },

    /// A search (including any fallback attempt) resolved to an outcome.
    SearchCompleted {
        cycle_id: Uuid,
        outcome: String,
        result_count: usize,
        timestamp: Timestamp,
    },
}
