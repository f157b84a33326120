//! Search layer for Findly.
//!
//! Composes provider queries from collected conversation fields, executes
//! them through one of three backend adapters, and applies the single-shot
//! relaxed-query fallback.

pub mod encyclopedia;
pub mod error;
pub mod free_text;
pub mod paid;
pub mod provider;
pub mod query;
pub mod resolver;

pub use encyclopedia::EncyclopediaProvider;
pub use error::SearchError;
pub use free_text::FreeTextProvider;
pub use paid::PaidSearchProvider;
pub use provider::{build_provider, SearchAttempt, SearchProvider};
pub use query::{Query, SearchRequest};
pub use resolver::{Resolution, Resolver};
