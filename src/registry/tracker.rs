//! Lock-guarded map from owner identity to current state.

use super::owner::OwnerKey;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Current state of one owner and when it was last written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tracked<S> {
    pub state: S,
    pub updated_at: DateTime<Utc>,
}

/// Per-owner current states, safe to share between threads.
///
/// This is the only mutable state a running machine has. Every operation
/// takes one short lock around the inner map and never calls back into user
/// code while holding it. Entries live until they are removed explicitly.
#[derive(Debug)]
pub struct OwnerRegistry<S> {
    entries: Mutex<HashMap<OwnerKey, Tracked<S>>>,
}

impl<S: Clone> OwnerRegistry<S> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Current state for `key`, if it is tracked.
    pub fn get(&self, key: OwnerKey) -> Option<S> {
        self.entries.lock().get(&key).map(|t| t.state.clone())
    }

    /// Record `state` as the current state for `key`.
    pub fn set(&self, key: OwnerKey, state: S) {
        let tracked = Tracked {
            state,
            updated_at: Utc::now(),
        };
        self.entries.lock().insert(key, tracked);
    }

    /// Stop tracking `key`. Removing an unknown key is a no-op.
    pub fn remove(&self, key: OwnerKey) -> Option<S> {
        self.entries.lock().remove(&key).map(|t| t.state)
    }

    /// Remove every entry last written before `cutoff`.
    ///
    /// Returns how many entries were removed.
    pub fn remove_stale(&self, cutoff: DateTime<Utc>) -> usize {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, tracked| tracked.updated_at >= cutoff);
        before - entries.len()
    }

    pub fn contains(&self, key: OwnerKey) -> bool {
        self.entries.lock().contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Copy of every tracked entry, in no particular order.
    pub fn entries(&self) -> Vec<(OwnerKey, Tracked<S>)> {
        self.entries
            .lock()
            .iter()
            .map(|(key, tracked)| (*key, tracked.clone()))
            .collect()
    }
}

impl<S: Clone> Default for OwnerRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}
