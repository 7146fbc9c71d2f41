//! Shared utilities: error types and JSON file handling.

pub mod errors;
pub mod file_handler;

pub use errors::{Result, ValidationError};
pub use file_handler::FileHandler;
