//! Core value types shared by every other module.
//!
//! This module contains the pieces with no dependency on the rest of the
//! engine:
//! - `State` and `Input` marker traits
//! - The replayable `InputStream`
//! - The error taxonomy for lookups and streams

mod error;
mod state;
mod stream;

pub use error::{MachineError, MachineResult, StreamError};
pub use state::{Input, State};
pub use stream::InputStream;
