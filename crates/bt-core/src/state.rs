#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// State of one node visit within a traversal.
///
/// `Success`, `CleanFail` and `UnexpectedFail` are terminal for a traversal
/// instance; `Running` marks a node waiting on a deferred action and is only
/// re-entered across ticks via resume-matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TokenState {
    Ready,
    Running,
    Success,
    CleanFail,
    UnexpectedFail,
}

impl TokenState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::CleanFail | Self::UnexpectedFail)
    }
}
