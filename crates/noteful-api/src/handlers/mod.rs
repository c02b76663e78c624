//! Route handlers.

pub mod folders;
pub mod notes;
pub mod system;

pub const FOLDERS_PATH: &str = "/api/folders";
pub const NOTES_PATH: &str = "/api/notes";
