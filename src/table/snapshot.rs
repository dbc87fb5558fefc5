//! Serializable table descriptions for diagnostics and tooling.

use serde::{Deserialize, Serialize};

/// One registered `(state, input)` pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionEntry<S, I> {
    pub state: S,
    pub input: I,
    /// Label of the registered action, `None` for a declared-only entry
    pub action: Option<String>,
}

/// Point-in-time description of a [`TransitionTable`](super::TransitionTable).
///
/// Snapshots are write-only: they describe a table for logs or tooling but
/// cannot be turned back into one, since actions are closures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot<S, I> {
    /// Known states, in registration order
    pub states: Vec<S>,
    /// Known inputs, in registration order
    pub inputs: Vec<I>,
    /// Labels of known actions, in registration order
    pub actions: Vec<String>,
    /// Every registered pair, grouped by state
    pub transitions: Vec<TransitionEntry<S, I>>,
}

impl<S: Serialize, I: Serialize> TableSnapshot<S, I> {
    /// Render the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
