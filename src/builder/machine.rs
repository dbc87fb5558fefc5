//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::builder::goto;
use crate::core::{Input, InputStream, State};
use crate::engine::StateMachine;
use crate::registry::Owner;
use crate::table::Action;

/// Builder for constructing state machines with a fluent API.
///
/// # Example
///
/// ```rust
/// use statewise::builder::StateMachineBuilder;
/// use statewise::registry::OwnerToken;
/// use statewise::table::Action;
///
/// let machine = StateMachineBuilder::<u8, char, OwnerToken>::new()
///     .transition(0, 'a', Action::new(|_, _| 1))
///     .transition(1, 'b', Action::new(|_, _| 0))
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.table().states(), &[0, 1]);
/// ```
pub struct StateMachineBuilder<S, I, O: ?Sized> {
    machine: StateMachine<S, I, O>,
}

impl<S: State, I: Input, O: Owner + ?Sized> StateMachineBuilder<S, I, O> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            machine: StateMachine::new(),
        }
    }

    /// Register an action for `(state, input)`.
    pub fn transition(mut self, state: S, input: I, action: Action<S, I, O>) -> Self {
        self.machine.set(state, input, action);
        self
    }

    /// Register a closure for `(state, input)`.
    pub fn on<F>(self, state: S, input: I, func: F) -> Self
    where
        F: Fn(&O, &I) -> S + Send + Sync + 'static,
    {
        self.transition(state, input, Action::new(func))
    }

    /// Register `(state, input)` as a plain move to `target`.
    pub fn goto(self, state: S, input: I, target: S) -> Self {
        self.transition(state, input, goto(target))
    }

    /// Declare `(state, input)` without an action.
    pub fn declare(mut self, state: S, input: I) -> Self {
        self.machine.declare(state, input);
        self
    }

    /// Set the update hook (optional).
    pub fn on_update<F>(mut self, hook: F) -> Self
    where
        F: Fn(&O, &mut InputStream<I>) + Send + Sync + 'static,
    {
        self.machine.set_update_hook(hook);
        self
    }

    /// Build the state machine.
    /// Returns an error if no transitions were registered.
    pub fn build(self) -> Result<StateMachine<S, I, O>, BuildError> {
        if self.machine.table().is_empty() {
            return Err(BuildError::NoTransitions);
        }
        Ok(self.machine)
    }
}

impl<S: State, I: Input, O: Owner + ?Sized> Default for StateMachineBuilder<S, I, O> {
    fn default() -> Self {
        Self::new()
    }
}
