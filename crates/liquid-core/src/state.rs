use serde::{Deserialize, Serialize};

/// Lifecycle of the animated set.
///
/// `Closed` and `Open` are stable; `Opening` and `Closing` last while the frame
/// clock runs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl LifecycleState {
    pub fn is_transient(&self) -> bool {
        matches!(self, LifecycleState::Opening | LifecycleState::Closing)
    }

    /// True once a close has been requested, whether or not it finished.
    pub fn is_closed(&self) -> bool {
        matches!(self, LifecycleState::Closed | LifecycleState::Closing)
    }

    /// The stable state a running cycle ends in.
    pub fn settled(&self) -> LifecycleState {
        match self {
            LifecycleState::Opening | LifecycleState::Open => LifecycleState::Open,
            LifecycleState::Closing | LifecycleState::Closed => LifecycleState::Closed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settled_states() {
        assert_eq!(LifecycleState::Opening.settled(), LifecycleState::Open);
        assert_eq!(LifecycleState::Closing.settled(), LifecycleState::Closed);
        assert_eq!(LifecycleState::Open.settled(), LifecycleState::Open);
        assert!(LifecycleState::Closing.is_closed());
        assert!(!LifecycleState::Open.is_transient());
    }
}
