use thiserror::Error;

/// Top-level error type for the Findly system.
///
/// Each variant wraps a subsystem-specific error. Subsystem crates define
/// their own error types and implement `From<SubsystemError> for FindlyError`
/// so that the `?` operator works seamlessly across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FindlyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dialog error: {0}")]
    Dialog(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for FindlyError {
    fn from(err: toml::de::Error) -> Self {
        FindlyError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for FindlyError {
    fn from(err: toml::ser::Error) -> Self {
        FindlyError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for FindlyError {
    fn from(err: serde_json::Error) -> Self {
        FindlyError::Serialization(err.to_string())
    }
}

/// Convenience result alias used across the workspace.
pub type Result<T> = std::result::Result<T, FindlyError>;
