//! Root of the `caseflow-core` library.

// Prevent accidental direct writes to stdout/stderr in library code. All
// diagnostics go through the tracing stack.
#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod catalog;
pub mod error;
pub mod guard;
pub mod starter;
pub mod validate;

pub use error::ConfigError;
pub use error::PhaseTransitionError;
pub use error::ValidationError;
