//! Builder API for ergonomic state machine construction.
//!
//! This module provides a fluent builder and a declaration macro for
//! creating state machines with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::StateMachineBuilder;

use crate::core::{Input, State};
use crate::registry::Owner;
use crate::table::Action;

/// Create an action that always moves to `target`.
///
/// # Example
///
/// ```
/// use statewise::builder::goto;
/// use statewise::registry::OwnerToken;
/// use statewise::symbol_enum;
///
/// symbol_enum! {
///     enum Phase {
///         Start,
///         End,
///     }
/// }
///
/// let action = goto::<Phase, char, OwnerToken>(Phase::End);
/// assert_eq!(action.call(&OwnerToken::new(), &'x'), Phase::End);
/// assert_eq!(action.name(), Some("goto End"));
/// ```
pub fn goto<S, I, O>(target: S) -> Action<S, I, O>
where
    S: State,
    I: Input,
    O: Owner + ?Sized,
{
    let name = format!("goto {target:?}");
    Action::named(name, move |_, _| target.clone())
}
