//! Error types for the conversational interface.

use findly_core::error::FindlyError;

/// Errors from the dialog engine.
#[derive(Debug, thiserror::Error)]
pub enum DialogError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("session store error: {0}")]
    Store(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DialogError> for FindlyError {
    fn from(err: DialogError) -> Self {
        FindlyError::Dialog(err.to_string())
    }
}
