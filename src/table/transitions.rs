//! Nested-map transition table.

use super::action::Action;
use super::snapshot::{TableSnapshot, TransitionEntry};
use crate::core::{Input, MachineError, MachineResult, State};
use std::collections::HashMap;

/// Maps `(state, input)` pairs to the [`Action`] computing the next state.
///
/// Stored as `state -> input -> action` so tables can be authored one state
/// at a time. Besides the map, the table keeps append-only lists of every
/// state, input and action it has seen, in first-registration order. Those
/// lists are for introspection only and never influence dispatch.
///
/// An entry may also be *declared* without an action. Looking it up then
/// succeeds with `None`, which the engine reports as
/// [`MachineError::ActionNotDefinedForStateAndInput`].
pub struct TransitionTable<S, I, O: ?Sized> {
    entries: HashMap<S, HashMap<I, Option<Action<S, I, O>>>>,
    states: Vec<S>,
    inputs: Vec<I>,
    actions: Vec<Action<S, I, O>>,
}

impl<S: State, I: Input, O: ?Sized> TransitionTable<S, I, O> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            states: Vec::new(),
            inputs: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Look up the entry for `(state, input)`.
    ///
    /// # Errors
    ///
    /// - [`MachineError::StateNotRegistered`] when `state` has no entries.
    /// - [`MachineError::InputNotValidForState`] when `state` is known but
    ///   `input` is not registered for it.
    pub fn get(&self, state: &S, input: &I) -> MachineResult<Option<&Action<S, I, O>>, S, I> {
        let Some(row) = self.entries.get(state) else {
            return Err(MachineError::StateNotRegistered {
                state: state.clone(),
            });
        };

        match row.get(input) {
            Some(entry) => Ok(entry.as_ref()),
            None => Err(MachineError::InputNotValidForState {
                state: state.clone(),
                input: input.clone(),
            }),
        }
    }

    /// Register `action` for `(state, input)`, replacing any previous entry.
    pub fn set(&mut self, state: S, input: I, action: Action<S, I, O>) {
        if !self.actions.contains(&action) {
            self.actions.push(action.clone());
        }
        self.insert(state, input, Some(action));
    }

    /// Register `(state, input)` as valid but with no action.
    pub fn declare(&mut self, state: S, input: I) {
        self.insert(state, input, None);
    }

    fn insert(&mut self, state: S, input: I, action: Option<Action<S, I, O>>) {
        if !self.inputs.contains(&input) {
            self.inputs.push(input.clone());
        }
        if !self.entries.contains_key(&state) {
            self.states.push(state.clone());
        }
        self.entries.entry(state).or_default().insert(input, action);
    }

    /// True if `(state, input)` has an entry, with or without an action.
    pub fn contains(&self, state: &S, input: &I) -> bool {
        self.entries
            .get(state)
            .is_some_and(|row| row.contains_key(input))
    }

    /// Number of registered `(state, input)` pairs.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every state with at least one entry, in registration order.
    pub fn states(&self) -> &[S] {
        &self.states
    }

    /// Every input registered for any state, in registration order.
    pub fn inputs(&self) -> &[I] {
        &self.inputs
    }

    /// Every distinct action registered, in registration order.
    ///
    /// Actions that were later overwritten stay in this list.
    pub fn actions(&self) -> &[Action<S, I, O>] {
        &self.actions
    }

    /// Inputs accepted by `state`, in the order of [`inputs`](Self::inputs).
    pub fn inputs_for(&self, state: &S) -> Option<Vec<&I>> {
        let row = self.entries.get(state)?;
        let accepted = self.inputs.iter().filter(|i| row.contains_key(*i));
        Some(accepted.collect())
    }

    /// Serializable description of the table for diagnostics.
    pub fn snapshot(&self) -> TableSnapshot<S, I> {
        let mut transitions = Vec::with_capacity(self.len());
        for state in &self.states {
            let Some(row) = self.entries.get(state) else {
                continue;
            };
            for input in &self.inputs {
                if let Some(entry) = row.get(input) {
                    transitions.push(TransitionEntry {
                        state: state.clone(),
                        input: input.clone(),
                        action: entry.as_ref().map(Action::label),
                    });
                }
            }
        }

        TableSnapshot {
            states: self.states.clone(),
            inputs: self.inputs.clone(),
            actions: self.actions.iter().map(Action::label).collect(),
            transitions,
        }
    }
}

impl<S: State, I: Input, O: ?Sized> Default for TransitionTable<S, I, O> {
    fn default() -> Self {
        Self::new()
    }
}
