//! HTTP surface for Findly.
//!
//! Exposes the dialog engine to an external chat transport: a liveness
//! probe, a message endpoint that advances one conversation step per call,
//! and an SSE stream of domain events.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
