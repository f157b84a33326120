//! Dialog engine: central coordinator wiring the session store, state
//! machine, message catalog, and search resolver.
//!
//! One inbound message advances one user's machine by one step. Provider
//! calls happen only after the state transition has committed, so a user's
//! next message always observes the committed state.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, warn};
use uuid::Uuid;

use findly_core::config::FindlyConfig;
use findly_core::events::DomainEvent;
use findly_core::types::{Language, NotFoundReason, Outcome, SearchResult};
use findly_search::{Resolver, SearchProvider, SearchRequest};

use crate::error::DialogError;
use crate::machine::{self, ConversationState, RejectReason, StepOutcome};
use crate::messages;
use crate::session::SessionStore;

/// Maximum message length in characters.
const MAX_MESSAGE_LENGTH: usize = 2000;

/// Capacity of the domain event channel.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// What the transport renders back to the user for one inbound message.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DialogReply {
    /// Ask the next question; `options` are quick-reply button labels.
    Prompt { text: String, options: Vec<String> },
    /// The search found results.
    Results { results: Vec<SearchResult> },
    /// The search ended without results; `text` is already localized.
    NotFound { text: String },
}

/// What one machine step decided, captured under the store lock.
enum Advance {
    Restarted {
        old_cycle: Uuid,
        new_cycle: Uuid,
    },
    RejectedLanguage,
    Reprompt {
        state: ConversationState,
        language: Option<Language>,
    },
    Prompt {
        state: ConversationState,
        language: Option<Language>,
        cycle_id: Uuid,
        field: &'static str,
    },
    Search {
        request: SearchRequest,
        cycle_id: Uuid,
    },
}

/// Central dialog engine.
pub struct DialogEngine {
    store: SessionStore,
    resolver: Resolver,
    supported: Vec<Language>,
    zero_total_hint: bool,
    event_tx: broadcast::Sender<DomainEvent>,
}

impl DialogEngine {
    /// Create a new engine over the configured provider.
    pub fn new(config: &FindlyConfig, provider: Arc<dyn SearchProvider>) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            store: SessionStore::new(),
            resolver: Resolver::new(provider),
            supported: config.dialog.languages(),
            zero_total_hint: config.search.zero_total_hint,
            event_tx,
        }
    }

    /// Subscribe to domain events.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.event_tx.subscribe()
    }

    /// Number of user sessions currently held.
    pub fn active_sessions(&self) -> usize {
        self.store.len()
    }

    /// Handle one inbound `(user_id, text)` message.
    ///
    /// Returns the next prompt, a results list, or a localized not-found
    /// reply. Provider failures never surface raw.
    pub async fn handle_message(
        &self,
        user_id: i64,
        text: &str,
    ) -> Result<DialogReply, DialogError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DialogError::EmptyMessage);
        }
        if text.len() > MAX_MESSAGE_LENGTH {
            return Err(DialogError::MessageTooLong(MAX_MESSAGE_LENGTH));
        }

        // Advance the machine and commit the transition before any I/O.
        let (advance, created) = self.store.with_session(user_id, |session| {
            let old_cycle = session.cycle_id;
            match machine::step(session, text, &self.supported) {
                StepOutcome::Restarted => Ok(Advance::Restarted {
                    old_cycle,
                    new_cycle: session.cycle_id,
                }),
                StepOutcome::Rejected(RejectReason::UnknownLanguage) => {
                    Ok(Advance::RejectedLanguage)
                }
                StepOutcome::Rejected(RejectReason::EmptyInput) => Ok(Advance::Reprompt {
                    state: session.state,
                    language: session.language(),
                }),
                StepOutcome::Advanced(state) => Ok(Advance::Prompt {
                    state,
                    language: session.language(),
                    cycle_id: session.cycle_id,
                    field: field_for(state),
                }),
                StepOutcome::Completed => {
                    let request = session.fields.to_request().ok_or_else(|| {
                        DialogError::Internal("completed session is missing fields".to_string())
                    })?;
                    let cycle_id = session.cycle_id;
                    // Reset immediately: the session is ephemeral per search.
                    session.reset();
                    Ok(Advance::Search { request, cycle_id })
                }
            }
        })?;
        let advance = advance?;

        // The restart branch emits its own CycleStarted for the new cycle.
        if created && !matches!(advance, Advance::Restarted { .. }) {
            if let Some(session) = self.store.get(user_id) {
                self.emit(DomainEvent::CycleStarted {
                    user_id,
                    cycle_id: session.cycle_id,
                    timestamp: Utc::now(),
                });
            }
        }

        match advance {
            Advance::Restarted {
                old_cycle,
                new_cycle,
            } => {
                self.emit(DomainEvent::SessionRestarted {
                    user_id,
                    cycle_id: old_cycle,
                    timestamp: Utc::now(),
                });
                self.emit(DomainEvent::CycleStarted {
                    user_id,
                    cycle_id: new_cycle,
                    timestamp: Utc::now(),
                });
                Ok(DialogReply::Prompt {
                    text: messages::language_prompt().to_string(),
                    options: messages::language_options(&self.supported),
                })
            }
            Advance::RejectedLanguage => {
                debug!(user_id, "Unrecognized language token; re-prompting");
                Ok(DialogReply::Prompt {
                    text: messages::invalid_language().to_string(),
                    options: messages::language_options(&self.supported),
                })
            }
            Advance::Reprompt { state, language } => Ok(self.prompt_for(state, language)),
            Advance::Prompt {
                state,
                language,
                cycle_id,
                field,
            } => {
                if field == "language" {
                    self.emit(DomainEvent::LanguageSelected {
                        user_id,
                        cycle_id,
                        language: language.unwrap_or(Language::En),
                        timestamp: Utc::now(),
                    });
                } else {
                    self.emit(DomainEvent::FieldCollected {
                        user_id,
                        cycle_id,
                        field: field.to_string(),
                        timestamp: Utc::now(),
                    });
                }
                Ok(self.prompt_for(state, language))
            }
            Advance::Search { request, cycle_id } => {
                self.emit(DomainEvent::FieldCollected {
                    user_id,
                    cycle_id,
                    field: "topic".to_string(),
                    timestamp: Utc::now(),
                });
                self.emit(DomainEvent::SessionCompleted {
                    user_id,
                    cycle_id,
                    timestamp: Utc::now(),
                });
                Ok(self.run_search(cycle_id, request).await)
            }
        }
    }

    /// Execute the search for a completed cycle and localize the outcome.
    async fn run_search(&self, cycle_id: Uuid, request: SearchRequest) -> DialogReply {
        let language = request.language;
        let resolution = self.resolver.resolve(cycle_id, &request).await;

        let provider = self.resolver.provider();
        for (index, query) in resolution.issued.iter().enumerate() {
            self.emit(DomainEvent::SearchIssued {
                cycle_id,
                provider: provider.kind(),
                attempt: (index + 1) as u8,
                query: query.clone(),
                timestamp: Utc::now(),
            });
        }

        let result_count = match &resolution.outcome {
            Outcome::Found(results) => results.len(),
            _ => 0,
        };
        self.emit(DomainEvent::SearchCompleted {
            cycle_id,
            outcome: resolution.outcome.tag().to_string(),
            result_count,
            timestamp: Utc::now(),
        });

        match resolution.outcome {
            Outcome::Found(results) => DialogReply::Results { results },
            Outcome::NotFound {
                reason: NotFoundReason::ZeroIndexed,
            } if self.zero_total_hint => DialogReply::NotFound {
                text: messages::zero_indexed(language).to_string(),
            },
            Outcome::NotFound { .. } => DialogReply::NotFound {
                text: messages::not_found(language).to_string(),
            },
            Outcome::ProviderError(message) => {
                // Logged with full detail; the user sees the ordinary
                // localized not-found text, never the raw error.
                warn!(cycle_id = %cycle_id, error = %message, "Search failed after fallback");
                DialogReply::NotFound {
                    text: messages::not_found(language).to_string(),
                }
            }
        }
    }

    /// Compose the prompt for a machine state.
    fn prompt_for(&self, state: ConversationState, language: Option<Language>) -> DialogReply {
        match (state, language) {
            (ConversationState::AwaitingLanguage, _) | (_, None) => DialogReply::Prompt {
                text: messages::language_prompt().to_string(),
                options: messages::language_options(&self.supported),
            },
            (ConversationState::AwaitingSubject, Some(lang)) => DialogReply::Prompt {
                text: messages::welcome(lang).to_string(),
                options: Vec::new(),
            },
            (ConversationState::AwaitingCategory, Some(lang)) => DialogReply::Prompt {
                text: messages::category_prompt(lang).to_string(),
                options: messages::category_buttons(lang)
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
            (ConversationState::AwaitingTopic, Some(lang)) => DialogReply::Prompt {
                text: messages::topic_prompt(lang).to_string(),
                options: Vec::new(),
            },
        }
    }

    fn emit(&self, event: DomainEvent) {
        // Send fails only when nobody is subscribed, which is fine.
        let _ = self.event_tx.send(event);
    }
}

/// Field name recorded by advancing *into* a state.
fn field_for(state: ConversationState) -> &'static str {
    match state {
        ConversationState::AwaitingLanguage => "none",
        ConversationState::AwaitingSubject => "language",
        ConversationState::AwaitingCategory => "subject",
        ConversationState::AwaitingTopic => "category",
    }
}
