//! Session state tracking
//!
//! This module defines the coordinator's coarse session state machine.

mod session;

pub use session::SessionState;
