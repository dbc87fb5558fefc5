//! State machine that drives input streams through a shared transition table.

use crate::core::{Input, InputStream, MachineError, MachineResult, State};
use crate::registry::{Owner, OwnerRegistry};
use crate::table::{Action, TransitionTable};
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Callback invoked before the first input and after every transition.
///
/// It receives the owner being run and the stream being driven, so it can
/// feed new inputs into the stream as the machine progresses.
pub type UpdateHook<O, I> = Arc<dyn Fn(&O, &mut InputStream<I>) + Send + Sync>;

/// A transition table shared by any number of owners.
///
/// The table is populated up front through `&mut self` methods; running
/// only needs `&self`, so one machine can be put behind an `Arc` (or
/// borrowed by scoped threads) and run concurrently for different owners.
/// Two concurrent runs for the *same* owner race on that owner's entry and
/// must be avoided by the caller.
///
/// # Example
///
/// ```rust
/// use statewise::core::InputStream;
/// use statewise::engine::StateMachine;
/// use statewise::registry::OwnerToken;
/// use statewise::table::Action;
///
/// let mut machine: StateMachine<&str, char, OwnerToken> = StateMachine::new();
/// machine.set("even", '1', Action::new(|_, _| "odd"));
/// machine.set("even", '0', Action::new(|_, _| "even"));
/// machine.set("odd", '1', Action::new(|_, _| "even"));
/// machine.set("odd", '0', Action::new(|_, _| "odd"));
///
/// let owner = OwnerToken::new();
/// let mut bits: InputStream<char> = "1011".chars().collect();
///
/// let parity = machine.run(&owner, "even", &mut bits).unwrap();
/// assert_eq!(parity, "odd");
/// assert_eq!(machine.current_state(&owner), Some("odd"));
/// ```
pub struct StateMachine<S, I, O: ?Sized> {
    table: TransitionTable<S, I, O>,
    owners: OwnerRegistry<S>,
    update_hook: Option<UpdateHook<O, I>>,
}

impl<S: State, I: Input, O: Owner + ?Sized> StateMachine<S, I, O> {
    /// Create a machine with an empty table, no owners and no update hook.
    pub fn new() -> Self {
        Self::from_table(TransitionTable::new())
    }

    /// Create a machine around an already populated table.
    pub fn from_table(table: TransitionTable<S, I, O>) -> Self {
        Self {
            table,
            owners: OwnerRegistry::new(),
            update_hook: None,
        }
    }

    pub fn table(&self) -> &TransitionTable<S, I, O> {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut TransitionTable<S, I, O> {
        &mut self.table
    }

    /// Register `action` for `(state, input)`. See [`TransitionTable::set`].
    pub fn set(&mut self, state: S, input: I, action: Action<S, I, O>) {
        self.table.set(state, input, action);
    }

    /// Declare `(state, input)` without an action. See [`TransitionTable::declare`].
    pub fn declare(&mut self, state: S, input: I) {
        self.table.declare(state, input);
    }

    /// Look up the entry for `(state, input)`. See [`TransitionTable::get`].
    pub fn get(&self, state: &S, input: &I) -> MachineResult<Option<&Action<S, I, O>>, S, I> {
        self.table.get(state, input)
    }

    /// Install the update hook, replacing any previous one.
    pub fn set_update_hook<F>(&mut self, hook: F)
    where
        F: Fn(&O, &mut InputStream<I>) + Send + Sync + 'static,
    {
        self.update_hook = Some(Arc::new(hook));
    }

    pub fn clear_update_hook(&mut self) {
        self.update_hook = None;
    }

    pub fn has_update_hook(&self) -> bool {
        self.update_hook.is_some()
    }

    /// Run `inputs` through the machine on behalf of `owner`.
    ///
    /// `start` is recorded as the owner's current state, the update hook (if
    /// any) is called, and the stream is rewound. Each input is then looked
    /// up against the current state, its action computes the next state, the
    /// next state is recorded, and the hook is called again. Returns the
    /// owner's final state once the stream is exhausted.
    ///
    /// The state used for each lookup is the one this run computed, not a
    /// fresh read of the registry. A state written through
    /// [`owners`](Self::owners) while the run is in progress, from the hook
    /// for instance, never steers a lookup and is overwritten by the next
    /// transition.
    ///
    /// # Errors
    ///
    /// Fails on the first input the table cannot handle:
    /// [`MachineError::StateNotRegistered`],
    /// [`MachineError::InputNotValidForState`] or
    /// [`MachineError::ActionNotDefinedForStateAndInput`]. The owner is left
    /// in the state it had before the failing input; inputs already drawn
    /// stay consumed.
    pub fn run(&self, owner: &O, start: S, inputs: &mut InputStream<I>) -> MachineResult<S, S, I> {
        let key = owner.owner_key();
        debug!(owner = %key, start = ?start, inputs = inputs.len(), "running state machine");

        self.owners.set(key, start.clone());
        self.notify(owner, inputs);
        inputs.reset();

        let mut current = start;
        let mut steps = 0usize;
        while !inputs.is_at_end() {
            let input = inputs.next_input()?.clone();
            let next = match self.step(owner, &current, &input) {
                Ok(next) => next,
                Err(err) => {
                    debug!(owner = %key, steps, error = %err, "state machine run aborted");
                    return Err(err);
                }
            };
            trace!(owner = %key, from = ?current, input = ?input, to = ?next, "transition");

            self.owners.set(key, next.clone());
            current = next;
            steps += 1;
            self.notify(owner, inputs);
        }

        debug!(owner = %key, state = ?current, steps, "state machine run complete");
        Ok(current)
    }

    fn step(&self, owner: &O, current: &S, input: &I) -> MachineResult<S, S, I> {
        match self.table.get(current, input)? {
            Some(action) => Ok(action.call(owner, input)),
            None => Err(MachineError::ActionNotDefinedForStateAndInput {
                state: current.clone(),
                input: input.clone(),
            }),
        }
    }

    fn notify(&self, owner: &O, inputs: &mut InputStream<I>) {
        if let Some(hook) = &self.update_hook {
            hook(owner, inputs);
        }
    }

    /// Current state of `owner`, if it has been run and not unregistered.
    pub fn current_state(&self, owner: &O) -> Option<S> {
        self.owners.get(owner.owner_key())
    }

    /// Forget `owner`'s current state. Returns the state it had, if any.
    ///
    /// A later run for the same owner starts from scratch.
    pub fn unregister_owner(&self, owner: &O) -> Option<S> {
        let key = owner.owner_key();
        let removed = self.owners.remove(key);
        if removed.is_some() {
            debug!(owner = %key, "owner unregistered");
        }
        removed
    }

    /// Forget every owner whose state was last written before `cutoff`.
    pub fn unregister_stale(&self, cutoff: DateTime<Utc>) -> usize {
        let removed = self.owners.remove_stale(cutoff);
        if removed > 0 {
            debug!(removed, %cutoff, "stale owners unregistered");
        }
        removed
    }

    /// Number of owners with a tracked state.
    pub fn tracked_owners(&self) -> usize {
        self.owners.len()
    }

    /// Registry of tracked owners.
    ///
    /// Writes made here are visible to [`current_state`](Self::current_state)
    /// but do not redirect a run already in progress; see [`run`](Self::run).
    pub fn owners(&self) -> &OwnerRegistry<S> {
        &self.owners
    }
}

impl<S: State, I: Input, O: Owner + ?Sized> Default for StateMachine<S, I, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, I: Input, O: ?Sized> fmt::Debug for StateMachine<S, I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("states", &self.table.states())
            .field("inputs", &self.table.inputs())
            .field("owners", &self.owners)
            .field("update_hook", &self.update_hook.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::goto;
    use crate::registry::OwnerToken;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{OnceLock, Weak};

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Gate {
        Locked,
        Unlocked,
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Event {
        Coin,
        Push,
    }

    fn turnstile() -> StateMachine<Gate, Event, OwnerToken> {
        let mut machine = StateMachine::new();
        machine.set(Gate::Locked, Event::Coin, goto(Gate::Unlocked));
        machine.set(Gate::Locked, Event::Push, goto(Gate::Locked));
        machine.set(Gate::Unlocked, Event::Push, goto(Gate::Locked));
        machine.set(Gate::Unlocked, Event::Coin, goto(Gate::Unlocked));
        machine
    }

    #[test]
    fn empty_stream_keeps_start_state() {
        let machine = turnstile();
        let owner = OwnerToken::new();
        let mut inputs = InputStream::new();

        let state = machine.run(&owner, Gate::Locked, &mut inputs).unwrap();
        assert_eq!(state, Gate::Locked);
        assert_eq!(machine.current_state(&owner), Some(Gate::Locked));
    }

    #[test]
    fn run_follows_transitions() {
        let machine = turnstile();
        let owner = OwnerToken::new();
        let mut inputs = InputStream::from(vec![Event::Coin, Event::Push, Event::Coin]);

        let state = machine.run(&owner, Gate::Locked, &mut inputs).unwrap();
        assert_eq!(state, Gate::Unlocked);
        assert!(inputs.is_at_end());
    }

    #[test]
    fn run_rewinds_stream_first() {
        let machine = turnstile();
        let owner = OwnerToken::new();
        let mut inputs = InputStream::from(vec![Event::Coin]);
        inputs.next_input().unwrap();

        let state = machine.run(&owner, Gate::Locked, &mut inputs).unwrap();
        assert_eq!(state, Gate::Unlocked);
    }

    #[test]
    fn hook_runs_before_first_input_and_after_each_transition() {
        let mut machine = turnstile();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        machine.set_update_hook(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let owner = OwnerToken::new();
        machine
            .run(&owner, Gate::Locked, &mut InputStream::new())
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        calls.store(0, Ordering::SeqCst);
        let mut inputs = InputStream::from(vec![Event::Coin, Event::Push]);
        machine.run(&owner, Gate::Locked, &mut inputs).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn hook_can_feed_the_stream() {
        let mut machine = turnstile();
        machine.set_update_hook(|_, inputs: &mut InputStream<Event>| {
            if inputs.len() < 3 {
                inputs.push(Event::Coin);
            }
        });

        let owner = OwnerToken::new();
        let mut inputs = InputStream::new();
        let state = machine.run(&owner, Gate::Locked, &mut inputs).unwrap();

        assert_eq!(inputs.len(), 3);
        assert_eq!(state, Gate::Unlocked);
    }

    #[test]
    fn clear_update_hook_disables_it() {
        let mut machine = turnstile();
        machine.set_update_hook(|_, _| {});
        assert!(machine.has_update_hook());
        machine.clear_update_hook();
        assert!(!machine.has_update_hook());
    }

    #[test]
    fn unregistered_next_state_fails_after_first_transition() {
        let mut machine: StateMachine<u8, char, OwnerToken> = StateMachine::new();
        machine.set(0, 'a', Action::new(|_, _| 1));
        let owner = OwnerToken::new();
        let mut inputs = InputStream::from(vec!['a', 'a']);

        let err = machine.run(&owner, 0, &mut inputs).unwrap_err();
        assert!(matches!(err, MachineError::StateNotRegistered { state: 1 }));
        assert_eq!(machine.current_state(&owner), Some(1));
        assert!(inputs.is_at_end());
    }

    #[test]
    fn failure_leaves_previous_state_and_is_rerunnable() {
        let mut machine: StateMachine<Gate, Event, OwnerToken> = StateMachine::new();
        machine.set(Gate::Locked, Event::Coin, goto(Gate::Unlocked));
        machine.set(Gate::Unlocked, Event::Push, goto(Gate::Locked));

        let owner = OwnerToken::new();
        let mut inputs = InputStream::from(vec![Event::Coin, Event::Coin, Event::Push]);
        let err = machine.run(&owner, Gate::Locked, &mut inputs).unwrap_err();

        assert!(matches!(
            err,
            MachineError::InputNotValidForState {
                state: Gate::Unlocked,
                input: Event::Coin
            }
        ));
        assert_eq!(machine.current_state(&owner), Some(Gate::Unlocked));
        assert_eq!(inputs.position(), 2);

        machine.set(Gate::Unlocked, Event::Coin, goto(Gate::Unlocked));
        let state = machine.run(&owner, Gate::Locked, &mut inputs).unwrap();
        assert_eq!(state, Gate::Locked);
    }

    #[test]
    fn declared_entry_fails_with_action_not_defined() {
        let mut machine = turnstile();
        machine.declare(Gate::Unlocked, Event::Coin);
        let owner = OwnerToken::new();
        let mut inputs = InputStream::from(vec![Event::Coin, Event::Coin]);

        let err = machine.run(&owner, Gate::Locked, &mut inputs).unwrap_err();
        assert!(matches!(
            err,
            MachineError::ActionNotDefinedForStateAndInput {
                state: Gate::Unlocked,
                input: Event::Coin
            }
        ));
        assert_eq!(machine.current_state(&owner), Some(Gate::Unlocked));
    }

    #[test]
    fn action_sees_owner_and_input() {
        struct Counter {
            limit: usize,
        }
        impl Owner for Counter {}

        let mut machine: StateMachine<usize, usize, Counter> = StateMachine::new();
        let add: Action<usize, usize, Counter> =
            Action::new(|c: &Counter, n: &usize| (*n).min(c.limit));
        for state in 0..=3 {
            let bump = Action::new(move |c: &Counter, n: &usize| (state + n).min(c.limit));
            machine.set(state, 1, bump);
        }
        machine.set(3, 5, add);

        let owner = Counter { limit: 3 };
        let mut inputs = InputStream::from(vec![1, 1, 1, 1, 5]);
        assert_eq!(machine.run(&owner, 0, &mut inputs).unwrap(), 3);
    }

    #[test]
    fn registry_writes_during_run_do_not_steer_lookups() {
        type Steps = StateMachine<u8, char, OwnerToken>;

        let mut machine: Steps = StateMachine::new();
        machine.set(0, 'a', Action::new(|_, _| 1));
        machine.set(1, 'a', Action::new(|_, _| 2));

        let slot: Arc<OnceLock<Weak<Steps>>> = Arc::new(OnceLock::new());
        let hook_slot = Arc::clone(&slot);
        machine.set_update_hook(move |owner: &OwnerToken, inputs: &mut InputStream<char>| {
            let Some(machine) = hook_slot.get().and_then(Weak::upgrade) else {
                return;
            };
            if inputs.position() == 0 {
                machine.owners().set(owner.owner_key(), 9);
            }
        });
        let machine = Arc::new(machine);
        assert!(slot.set(Arc::downgrade(&machine)).is_ok());

        let owner = OwnerToken::new();
        let mut inputs = InputStream::from(vec!['a', 'a']);
        assert_eq!(machine.run(&owner, 0, &mut inputs).unwrap(), 2);
        assert_eq!(machine.current_state(&owner), Some(2));

        machine.owners().set(owner.owner_key(), 1);
        assert_eq!(machine.current_state(&owner), Some(1));
    }

    #[test]
    fn unregister_owner_forgets_state() {
        let machine = turnstile();
        let owner = OwnerToken::new();
        let mut inputs = InputStream::from(vec![Event::Coin]);
        machine.run(&owner, Gate::Locked, &mut inputs).unwrap();
        assert_eq!(machine.tracked_owners(), 1);

        assert_eq!(machine.unregister_owner(&owner), Some(Gate::Unlocked));
        assert_eq!(machine.current_state(&owner), None);
        assert_eq!(machine.unregister_owner(&owner), None);
        assert_eq!(machine.tracked_owners(), 0);
    }

    #[test]
    fn unregister_stale_uses_cutoff() {
        let machine = turnstile();
        let owner = OwnerToken::new();
        machine
            .run(&owner, Gate::Locked, &mut InputStream::new())
            .unwrap();

        let past = Utc::now() - chrono::Duration::hours(1);
        assert_eq!(machine.unregister_stale(past), 0);

        let future = Utc::now() + chrono::Duration::hours(1);
        assert_eq!(machine.unregister_stale(future), 1);
        assert_eq!(machine.tracked_owners(), 0);
    }
}
