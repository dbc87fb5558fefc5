//! Owner-scoped state tracking.
//!
//! One transition table can serve many independent owners at once. Each
//! owner's current state lives in an [`OwnerRegistry`], keyed by the owner's
//! identity rather than its value.

mod owner;
mod tracker;

pub use owner::{Owner, OwnerKey, OwnerToken};
pub use tracker::{OwnerRegistry, Tracked};
