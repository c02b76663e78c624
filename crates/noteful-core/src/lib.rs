//! # noteful-core
//!
//! Core types, traits, and request rules for the noteful API.
//!
//! This crate provides the domain models (folders and notes), the validation
//! rules applied to incoming request bodies, the markup sanitizer applied to
//! outgoing text, and the repository traits implemented by `noteful-db`.

pub mod error;
pub mod models;
pub mod sanitize;
pub mod traits;
pub mod validation;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use sanitize::sanitize_html;
pub use traits::*;
pub use validation::{ValidationError, FOLDER_FIELDS, NOTE_FIELDS};
