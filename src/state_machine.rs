//! Electricity-fee dialogue state machine
//!
//! Routing plus two flow handlers over an explicitly threaded state. The
//! caller owns persistence; transitions never perform I/O.

pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use state::{DialogueState, FeeStep, Intent, PersistedState};
pub use transition::route;
