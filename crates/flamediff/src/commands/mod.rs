//! CLI command implementations.
//!
//! Commands orchestrate the library components to perform user tasks.

pub mod diff;
pub mod models;

// Re-export main command functions
pub use diff::{execute_diff, resolve_options, validate_args};
pub use models::DiffArgs;
