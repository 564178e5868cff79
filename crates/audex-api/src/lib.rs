//! Audex API Library
//!
//! HTTP surface of the audio extraction service: routes, handlers, error
//! responses and application setup.

pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
