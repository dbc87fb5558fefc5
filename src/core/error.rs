//! Error types for table lookups and input streams.

use std::fmt::Debug;
use thiserror::Error;

/// Result type alias for state machine operations
pub type MachineResult<T, S, I> = std::result::Result<T, MachineError<S, I>>;

/// Errors raised while looking up or running transitions.
///
/// Every variant carries the offending state and, where one was involved,
/// the input, so callers can report exactly which pair was malformed.
#[derive(Debug, Error)]
pub enum MachineError<S: Debug, I: Debug> {
    /// The state has no entries in the transition table at all
    #[error("State {state:?} is not registered.")]
    StateNotRegistered { state: S },

    /// The state is known but has no entry for this input
    #[error("State {state:?} is not registered to accept input {input:?}.")]
    InputNotValidForState { state: S, input: I },

    /// The pair was declared without an action
    #[error("No action is defined for state {state:?} and input {input:?}.")]
    ActionNotDefinedForStateAndInput { state: S, input: I },

    /// An input was drawn past the end of its stream
    #[error(transparent)]
    Stream(#[from] StreamError),
}

impl<S: Debug, I: Debug> MachineError<S, I> {
    /// The state involved in the failure, if any.
    pub fn state(&self) -> Option<&S> {
        match self {
            Self::StateNotRegistered { state }
            | Self::InputNotValidForState { state, .. }
            | Self::ActionNotDefinedForStateAndInput { state, .. } => Some(state),
            Self::Stream(_) => None,
        }
    }

    /// The input involved in the failure, if any.
    pub fn input(&self) -> Option<&I> {
        match self {
            Self::InputNotValidForState { input, .. }
            | Self::ActionNotDefinedForStateAndInput { input, .. } => Some(input),
            Self::StateNotRegistered { .. } | Self::Stream(_) => None,
        }
    }
}

/// Errors raised by [`InputStream`](crate::core::InputStream).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// `next_input` was called with the cursor already at the end
    #[error("Input stream exhausted at position {position} of {len}")]
    Exhausted { position: usize, len: usize },
}
