//! Core domain types, configuration, errors, and events for Findly.
//!
//! Findly walks a user through a fixed prompt sequence (language, subject,
//! material category, topic) and issues one search against an external
//! provider. This crate holds everything the other crates share; it has no
//! I/O beyond reading the configuration file.

pub mod config;
pub mod error;
pub mod events;
pub mod types;

pub use config::FindlyConfig;
pub use error::{FindlyError, Result};
pub use events::DomainEvent;
pub use types::{
    CategoryClass, Language, NotFoundReason, Outcome, ProviderKind, SearchResult, Timestamp,
};
