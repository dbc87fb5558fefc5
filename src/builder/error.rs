//! Build errors for the state machine builder.

use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("No transitions defined. Add at least one with .transition() or .declare()")]
    NoTransitions,
}
