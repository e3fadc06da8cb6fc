//! Session state definitions for the crawl coordinator
//!
//! Search and download exclusion is modeled as one explicit finite-state
//! value owned by the coordinator, rather than separate boolean lock flags.

use std::fmt;

/// Represents the coordinator's current session state
///
/// At most one of `Searching`/`Downloading` is ever active. Entering either
/// while the other is active is refused outright, not queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No operation in progress
    Idle,

    /// A tag search (page 1 probe) is in progress
    Searching,

    /// A full crawl/download run is in progress
    Downloading,
}

impl SessionState {
    /// Returns true if no operation is active
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true if an operation holds the session
    pub fn is_busy(&self) -> bool {
        !self.is_idle()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Searching => "searching",
            Self::Downloading => "downloading",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_idle() {
        assert!(SessionState::Idle.is_idle());
        assert!(!SessionState::Searching.is_idle());
        assert!(!SessionState::Downloading.is_idle());
    }

    #[test]
    fn test_is_busy() {
        assert!(!SessionState::Idle.is_busy());
        assert!(SessionState::Searching.is_busy());
        assert!(SessionState::Downloading.is_busy());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", SessionState::Idle), "idle");
        assert_eq!(format!("{}", SessionState::Searching), "searching");
        assert_eq!(format!("{}", SessionState::Downloading), "downloading");
    }
}
