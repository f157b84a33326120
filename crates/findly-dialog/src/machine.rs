//! Conversation state machine driving the fixed prompt sequence.
//!
//! Language → subject → category → topic, then back to language. The
//! machine is cyclic: one cycle is one search, and completion is an event
//! rather than a resting state. The restart command is valid everywhere
//! and only ever resets.

use serde::{Deserialize, Serialize};

use findly_core::types::{CategoryClass, Language};

use crate::session::{CollectedCategory, Session};

/// Command that unconditionally restarts the cycle from any state.
pub const RESTART_COMMAND: &str = "/start";

/// Steps of one search cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    /// Constrained: only a recognized, supported language token advances.
    #[default]
    AwaitingLanguage,
    /// Free text: school subject.
    AwaitingSubject,
    /// Free text, classified into a `CategoryClass` on collection.
    AwaitingCategory,
    /// Free text: topic. Collecting it completes the cycle.
    AwaitingTopic,
}

/// Why an input was rejected without advancing the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// The constrained language state got an unrecognized or unsupported
    /// token. Never silently defaulted; the caller re-prompts.
    UnknownLanguage,
    /// A free-text state got blank input.
    EmptyInput,
}

/// What feeding one input to the machine did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The restart command ran: fields discarded, cycle restarted.
    Restarted,
    /// Input rejected; state unchanged, caller re-prompts.
    Rejected(RejectReason),
    /// Field recorded; machine advanced to the contained state.
    Advanced(ConversationState),
    /// Topic recorded; every field is now collected.
    Completed,
}

/// Advance the session's machine by one input.
///
/// The restart command is handled before any state logic and always
/// succeeds. All other inputs either record a field and advance, or are
/// rejected leaving the session untouched.
pub fn step(session: &mut Session, input: &str, supported: &[Language]) -> StepOutcome {
    let input = input.trim();

    if input == RESTART_COMMAND {
        session.reset();
        return StepOutcome::Restarted;
    }

    match session.state {
        ConversationState::AwaitingLanguage => {
            let language = match Language::parse(input) {
                Some(lang) if supported.contains(&lang) => lang,
                _ => return StepOutcome::Rejected(RejectReason::UnknownLanguage),
            };
            session.fields.language = Some(language);
            session.state = ConversationState::AwaitingSubject;
            StepOutcome::Advanced(ConversationState::AwaitingSubject)
        }
        ConversationState::AwaitingSubject => {
            if input.is_empty() {
                return StepOutcome::Rejected(RejectReason::EmptyInput);
            }
            session.fields.subject = Some(input.to_string());
            session.state = ConversationState::AwaitingCategory;
            StepOutcome::Advanced(ConversationState::AwaitingCategory)
        }
        ConversationState::AwaitingCategory => {
            if input.is_empty() {
                return StepOutcome::Rejected(RejectReason::EmptyInput);
            }
            session.fields.category = Some(CollectedCategory {
                raw: input.to_string(),
                class: CategoryClass::classify(input),
            });
            session.state = ConversationState::AwaitingTopic;
            StepOutcome::Advanced(ConversationState::AwaitingTopic)
        }
        ConversationState::AwaitingTopic => {
            if input.is_empty() {
                return StepOutcome::Rejected(RejectReason::EmptyInput);
            }
            session.fields.topic = Some(input.to_string());
            StepOutcome::Completed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Language; 3] = Language::ALL;

    fn session() -> Session {
        Session::new(42)
    }

    fn walk_to_topic(session: &mut Session) {
        assert_eq!(
            step(session, "English 🇺🇸", &ALL),
            StepOutcome::Advanced(ConversationState::AwaitingSubject)
        );
        assert_eq!(
            step(session, "biology", &ALL),
            StepOutcome::Advanced(ConversationState::AwaitingCategory)
        );
        assert_eq!(
            step(session, "Book", &ALL),
            StepOutcome::Advanced(ConversationState::AwaitingTopic)
        );
    }

    #[test]
    fn test_full_cycle_collects_expected_fields() {
        let mut s = session();
        walk_to_topic(&mut s);
        assert_eq!(step(&mut s, "cell division", &ALL), StepOutcome::Completed);

        assert_eq!(s.fields.language, Some(Language::En));
        assert_eq!(s.fields.subject.as_deref(), Some("biology"));
        let category = s.fields.category.as_ref().unwrap();
        assert_eq!(category.raw, "Book");
        assert_eq!(category.class, CategoryClass::Book);
        assert_eq!(s.fields.topic.as_deref(), Some("cell division"));
    }

    #[test]
    fn test_unknown_language_rejected_not_defaulted() {
        let mut s = session();
        assert_eq!(
            step(&mut s, "hello there", &ALL),
            StepOutcome::Rejected(RejectReason::UnknownLanguage)
        );
        assert_eq!(s.state, ConversationState::AwaitingLanguage);
        assert!(s.fields.language.is_none());
    }

    #[test]
    fn test_unsupported_language_rejected() {
        let mut s = session();
        let only_uz = [Language::Uz];
        assert_eq!(
            step(&mut s, "English 🇺🇸", &only_uz),
            StepOutcome::Rejected(RejectReason::UnknownLanguage)
        );
        assert!(s.fields.language.is_none());
    }

    #[test]
    fn test_restart_from_every_state() {
        let inputs = ["Русский 🇷🇺", "history", "Книга"];
        for steps_before_restart in 0..=inputs.len() {
            let mut s = session();
            for input in &inputs[..steps_before_restart] {
                step(&mut s, input, &ALL);
            }
            assert_eq!(step(&mut s, RESTART_COMMAND, &ALL), StepOutcome::Restarted);
            assert_eq!(s.state, ConversationState::AwaitingLanguage);
            assert!(s.fields.language.is_none());
            assert!(s.fields.subject.is_none());
            assert!(s.fields.category.is_none());
            assert!(s.fields.topic.is_none());
        }
    }

    #[test]
    fn test_restart_token_is_trimmed() {
        let mut s = session();
        assert_eq!(step(&mut s, "  /start  ", &ALL), StepOutcome::Restarted);
    }

    #[test]
    fn test_blank_free_text_rejected() {
        let mut s = session();
        step(&mut s, "eng", &ALL);
        assert_eq!(
            step(&mut s, "   ", &ALL),
            StepOutcome::Rejected(RejectReason::EmptyInput)
        );
        assert_eq!(s.state, ConversationState::AwaitingSubject);
    }

    #[test]
    fn test_category_classified_at_collection_time() {
        let mut s = session();
        step(&mut s, "ru", &ALL);
        step(&mut s, "физика", &ALL);
        step(&mut s, "Видеоролик", &ALL);
        let category = s.fields.category.as_ref().unwrap();
        assert_eq!(category.raw, "Видеоролик");
        assert_eq!(category.class, CategoryClass::Video);
    }

    #[test]
    fn test_completion_happens_exactly_once_per_cycle() {
        let mut s = session();
        walk_to_topic(&mut s);
        assert_eq!(step(&mut s, "mitosis", &ALL), StepOutcome::Completed);
        // The engine resets after completion; simulate that contract.
        s.reset();
        assert_eq!(
            step(&mut s, "uz", &ALL),
            StepOutcome::Advanced(ConversationState::AwaitingSubject)
        );
    }
}
