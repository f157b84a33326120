//! Conversational interface for Findly.
//!
//! Walks each user through the fixed prompt sequence (language, subject,
//! category, topic), keeps per-user sessions in memory, and hands completed
//! cycles to the search layer.

pub mod engine;
pub mod error;
pub mod machine;
pub mod messages;
pub mod session;

pub use engine::{DialogEngine, DialogReply};
pub use error::DialogError;
pub use machine::{ConversationState, RejectReason, StepOutcome, RESTART_COMMAND};
pub use session::{CollectedCategory, SearchFields, Session, SessionStore};
