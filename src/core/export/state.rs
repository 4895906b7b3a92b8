//! Export attempt states
//!
//! An attempt moves `Idle → Generating → Uploading → Polling → Settled`, and
//! may jump to `Settled` from any earlier state when a stage fails.

use std::fmt;

/// Lifecycle state of one export attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExportState {
    /// Layout resolved, nothing requested yet
    Idle,
    /// Waiting for the save configuration
    Generating,
    /// Uploading the serialized layout
    Uploading,
    /// Result and error loops running
    Polling,
    /// Outcome delivered
    Settled,
}

impl ExportState {
    /// Returns the state name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportState::Idle => "idle",
            ExportState::Generating => "generating",
            ExportState::Uploading => "uploading",
            ExportState::Polling => "polling",
            ExportState::Settled => "settled",
        }
    }

    /// Whether `next` is a legal successor of `self`
    pub fn can_transition_to(&self, next: ExportState) -> bool {
        matches!(
            (self, next),
            (ExportState::Idle, ExportState::Generating)
                | (ExportState::Generating, ExportState::Uploading)
                | (ExportState::Uploading, ExportState::Polling)
        ) || (*self != ExportState::Settled && next == ExportState::Settled)
    }

    /// Whether the attempt has finished
    pub fn is_terminal(&self) -> bool {
        *self == ExportState::Settled
    }
}

impl fmt::Display for ExportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(ExportState::Idle, ExportState::Generating ; "idle to generating")]
    #[test_case(ExportState::Generating, ExportState::Uploading ; "generating to uploading")]
    #[test_case(ExportState::Uploading, ExportState::Polling ; "uploading to polling")]
    #[test_case(ExportState::Idle, ExportState::Settled ; "idle to settled")]
    #[test_case(ExportState::Generating, ExportState::Settled ; "generating to settled")]
    #[test_case(ExportState::Polling, ExportState::Settled ; "polling to settled")]
    fn test_legal_transitions(from: ExportState, to: ExportState) {
        assert!(from.can_transition_to(to));
    }

    #[test_case(ExportState::Idle, ExportState::Polling ; "skip upload")]
    #[test_case(ExportState::Polling, ExportState::Generating ; "backwards")]
    #[test_case(ExportState::Settled, ExportState::Settled ; "settle twice")]
    #[test_case(ExportState::Settled, ExportState::Polling ; "resume after settle")]
    fn test_illegal_transitions(from: ExportState, to: ExportState) {
        assert!(!from.can_transition_to(to));
    }

    #[test]
    fn test_display() {
        assert_eq!(ExportState::Polling.to_string(), "polling");
        assert!(ExportState::Settled.is_terminal());
        assert!(!ExportState::Uploading.is_terminal());
    }
}
