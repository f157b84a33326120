//! Application state shared across all route handlers.
//!
//! AppState holds the dialog engine and configuration and is passed to
//! handlers via axum's State extractor.

use std::sync::Arc;
use std::time::Instant;

use findly_core::config::FindlyConfig;
use findly_dialog::DialogEngine;

/// Shared application state.
///
/// All fields use `Arc` for cheap cloning across handler tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<FindlyConfig>,
    /// Dialog engine: sessions, state machine, search resolution.
    pub engine: Arc<DialogEngine>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState with the given components.
    pub fn new(config: FindlyConfig, engine: DialogEngine) -> Self {
        Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
            start_time: Instant::now(),
        }
    }
}
