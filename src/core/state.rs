//! Marker traits for the values a state machine is built from.
//!
//! States and inputs are opaque to the engine. It only needs to compare,
//! hash, clone and print them, and to move them between threads.

use std::fmt::Debug;
use std::hash::Hash;

/// A node of the state machine.
///
/// Implemented automatically for every type meeting the bounds, so plain
/// enums, integers and strings all work as states.
///
/// # Example
///
/// ```rust
/// use statewise::core::State;
///
/// fn assert_state<S: State>() {}
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// assert_state::<Door>();
/// assert_state::<&'static str>();
/// assert_state::<u32>();
/// ```
pub trait State: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> State for T where T: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

/// A stimulus fed to the state machine.
///
/// Same requirements as [`State`]; the two are kept apart so signatures say
/// which role a value plays.
pub trait Input: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> Input for T where T: Clone + Eq + Hash + Debug + Send + Sync + 'static {}
