//! Per-user conversation sessions and the in-memory store.
//!
//! A session is exclusively owned by its user's flow while one message is
//! processed; the store only guarantees atomic get/set per user id. Per-user
//! message ordering is the transport's contract.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use findly_core::types::{CategoryClass, Language};
use findly_search::SearchRequest;

use crate::error::DialogError;
use crate::machine::ConversationState;

/// Category text as entered, beside the class decided at collection time.
///
/// The raw text stays a query term; the class drives augmentation without
/// any further matching against localized strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedCategory {
    pub raw: String,
    pub class: CategoryClass,
}

/// Fields collected so far in the current cycle.
///
/// Invariant: a field is `Some` only when its state has already passed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFields {
    pub language: Option<Language>,
    pub subject: Option<String>,
    pub category: Option<CollectedCategory>,
    pub topic: Option<String>,
}

impl SearchFields {
    /// Discard everything collected in the cycle.
    pub fn clear(&mut self) {
        *self = SearchFields::default();
    }

    /// Convert completed fields into a search request.
    /// Returns `None` unless every field has been collected.
    pub fn to_request(&self) -> Option<SearchRequest> {
        let category = self.category.as_ref()?;
        Some(SearchRequest {
            language: self.language?,
            subject: self.subject.clone()?,
            category: category.raw.clone(),
            category_class: category.class,
            topic: self.topic.clone()?,
        })
    }
}

/// One user's in-progress conversation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// Transport-assigned user identity.
    pub user_id: i64,
    /// Correlation id for the current cycle; regenerated on every reset.
    pub cycle_id: Uuid,
    /// Current machine state.
    pub state: ConversationState,
    /// Fields collected so far.
    pub fields: SearchFields,
    /// Epoch seconds of first contact.
    pub started_at: i64,
    /// Epoch seconds of the last processed message.
    pub last_message_at: i64,
}

impl Session {
    /// Create a fresh session at the start of the prompt sequence.
    pub fn new(user_id: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            user_id,
            cycle_id: Uuid::new_v4(),
            state: ConversationState::AwaitingLanguage,
            fields: SearchFields::default(),
            started_at: now,
            last_message_at: now,
        }
    }

    /// Begin a new cycle: fresh correlation id, empty fields, initial state.
    pub fn reset(&mut self) {
        self.cycle_id = Uuid::new_v4();
        self.state = ConversationState::AwaitingLanguage;
        self.fields.clear();
    }

    /// Language selected in this cycle, if any.
    pub fn language(&self) -> Option<Language> {
        self.fields.language
    }
}

/// In-memory session store keyed by user identity.
///
/// Created lazily per user; multiple users' flows may run concurrently with
/// no cross-user interference.
pub struct SessionStore {
    sessions: Mutex<HashMap<i64, Session>>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Run `f` against the user's session under the store lock, creating
    /// the session on first contact. Returns `f`'s result and whether the
    /// session was created by this call.
    pub fn with_session<T>(
        &self,
        user_id: i64,
        f: impl FnOnce(&mut Session) -> T,
    ) -> Result<(T, bool), DialogError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| DialogError::Store(format!("session lock poisoned: {}", e)))?;
        let created = !sessions.contains_key(&user_id);
        let session = sessions.entry(user_id).or_insert_with(|| Session::new(user_id));
        session.last_message_at = Utc::now().timestamp();
        Ok((f(session), created))
    }

    /// Snapshot a session by user id.
    pub fn get(&self, user_id: i64) -> Option<Session> {
        self.sessions
            .lock()
            .ok()
            .and_then(|s| s.get(&user_id).cloned())
    }

    /// Drop a user's session entirely.
    pub fn remove(&self, user_id: i64) -> bool {
        self.sessions
            .lock()
            .map(|mut s| s.remove(&user_id).is_some())
            .unwrap_or(false)
    }

    /// Number of sessions currently held.
    pub fn len(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }

    /// Whether the store holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_at_language_state() {
        let session = Session::new(7);
        assert_eq!(session.state, ConversationState::AwaitingLanguage);
        assert_eq!(session.fields, SearchFields::default());
    }

    #[test]
    fn test_reset_clears_fields_and_rotates_cycle_id() {
        let mut session = Session::new(7);
        session.fields.language = Some(Language::En);
        session.fields.subject = Some("math".to_string());
        session.state = ConversationState::AwaitingCategory;
        let old_cycle = session.cycle_id;

        session.reset();
        assert_eq!(session.state, ConversationState::AwaitingLanguage);
        assert_eq!(session.fields, SearchFields::default());
        assert_ne!(session.cycle_id, old_cycle);
    }

    #[test]
    fn test_to_request_requires_all_fields() {
        let mut fields = SearchFields::default();
        assert!(fields.to_request().is_none());

        fields.language = Some(Language::En);
        fields.subject = Some("biology".to_string());
        fields.category = Some(CollectedCategory {
            raw: "Book".to_string(),
            class: CategoryClass::Book,
        });
        assert!(fields.to_request().is_none());

        fields.topic = Some("cell division".to_string());
        let request = fields.to_request().unwrap();
        assert_eq!(request.subject, "biology");
        assert_eq!(request.category_class, CategoryClass::Book);
        assert_eq!(request.topic, "cell division");
    }

    #[test]
    fn test_store_creates_lazily_and_reports_creation() {
        let store = SessionStore::new();
        assert!(store.is_empty());

        let ((), created) = store.with_session(1, |_| ()).unwrap();
        assert!(created);
        assert_eq!(store.len(), 1);

        let ((), created) = store.with_session(1, |_| ()).unwrap();
        assert!(!created);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_updates_are_atomic_per_user() {
        let store = SessionStore::new();
        store
            .with_session(1, |s| {
                s.fields.subject = Some("physics".to_string());
                s.state = ConversationState::AwaitingCategory;
            })
            .unwrap();

        let session = store.get(1).unwrap();
        assert_eq!(session.fields.subject.as_deref(), Some("physics"));
        assert_eq!(session.state, ConversationState::AwaitingCategory);
    }

    #[test]
    fn test_store_isolates_users() {
        let store = SessionStore::new();
        store
            .with_session(1, |s| s.fields.subject = Some("math".to_string()))
            .unwrap();
        store.with_session(2, |_| ()).unwrap();

        assert_eq!(store.get(1).unwrap().fields.subject.as_deref(), Some("math"));
        assert!(store.get(2).unwrap().fields.subject.is_none());
    }

    #[test]
    fn test_store_remove() {
        let store = SessionStore::new();
        store.with_session(1, |_| ()).unwrap();
        assert!(store.remove(1));
        assert!(!store.remove(1));
        assert!(store.get(1).is_none());
    }
}
