//! noteful-api - HTTP API for folders and notes.
//!
//! The binary in `main.rs` only wires configuration, logging, and the store
//! together; everything a request touches lives here so integration tests can
//! build the same router over an in-memory store.

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod state;

pub use app::build_router;
pub use config::Config;
pub use error::ApiError;
pub use state::AppState;
