//! The run loop.
//!
//! [`StateMachine`] ties a [`TransitionTable`](crate::table::TransitionTable)
//! to an [`OwnerRegistry`](crate::registry::OwnerRegistry) and drives input
//! streams through it, one synchronous call per owner session.

mod machine;

pub use machine::{StateMachine, UpdateHook};
