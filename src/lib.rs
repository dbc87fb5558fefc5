//! Statewise: a table-driven finite state machine engine
//!
//! A [`StateMachine`] maps `(state, input)` pairs to actions that compute the
//! next state. One machine definition is meant to be shared: many independent
//! owners (sessions, connections, documents) run their own input streams
//! through it, concurrently if need be, and each keeps its own current state.
//!
//! # Core Concepts
//!
//! - **Transition table**: nested `state -> input -> action` lookup with
//!   append-only lists of known states, inputs and actions
//! - **Owners**: identity-keyed contexts, each tracked with its own current state
//! - **Input streams**: replayable input sequences with a cursor
//! - **Update hook**: a callback run before the first input and after every
//!   transition, typically used to feed the stream
//!
//! The engine logs through [`tracing`] and never installs a subscriber.
//!
//! # Example
//!
//! ```rust
//! use statewise::builder::StateMachineBuilder;
//! use statewise::core::{InputStream, MachineError};
//! use statewise::registry::OwnerToken;
//! use statewise::symbol_enum;
//!
//! symbol_enum! {
//!     enum Turnstile {
//!         Locked,
//!         Unlocked,
//!     }
//! }
//!
//! symbol_enum! {
//!     enum Event {
//!         Coin,
//!         Push,
//!     }
//! }
//!
//! let machine = StateMachineBuilder::<Turnstile, Event, OwnerToken>::new()
//!     .goto(Turnstile::Locked, Event::Coin, Turnstile::Unlocked)
//!     .goto(Turnstile::Unlocked, Event::Push, Turnstile::Locked)
//!     .build()
//!     .unwrap();
//!
//! let alice = OwnerToken::new();
//! let bob = OwnerToken::new();
//!
//! let mut paid = InputStream::from(vec![Event::Coin, Event::Push, Event::Coin]);
//! assert_eq!(machine.run(&alice, Turnstile::Locked, &mut paid).unwrap(), Turnstile::Unlocked);
//!
//! let mut pushed = InputStream::from(vec![Event::Push]);
//! let err = machine.run(&bob, Turnstile::Locked, &mut pushed).unwrap_err();
//! assert!(matches!(err, MachineError::InputNotValidForState { .. }));
//!
//! assert_eq!(machine.current_state(&alice), Some(Turnstile::Unlocked));
//! assert_eq!(machine.current_state(&bob), Some(Turnstile::Locked));
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod registry;
pub mod table;

// Re-export commonly used types
pub use crate::builder::{BuildError, StateMachineBuilder};
pub use crate::core::{Input, InputStream, MachineError, MachineResult, State, StreamError};
pub use crate::engine::{StateMachine, UpdateHook};
pub use crate::registry::{Owner, OwnerKey, OwnerRegistry, OwnerToken};
pub use crate::table::{Action, TableSnapshot, TransitionTable};
