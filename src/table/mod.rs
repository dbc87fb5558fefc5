//! Transition table: the `(state, input) -> action` lookup structure.
//!
//! # Key Concepts
//!
//! - **Actions**: shared closures `(owner, input) -> next state`, compared by identity
//! - **Table**: nested `state -> input -> action` maps with append-only introspection lists
//! - **Snapshots**: serializable views of a table for diagnostics

mod action;
mod snapshot;
mod transitions;

pub use action::Action;
pub use snapshot::{TableSnapshot, TransitionEntry};
pub use transitions::TransitionTable;
