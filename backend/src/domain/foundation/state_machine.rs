//! Forward-only state machines.

use super::{DomainError, ErrorCode};

/// A flow where each state has at most one successor.
///
/// The last state has none and is terminal. Jumps, repeats and moves
/// backwards are all rejected with `InvalidStateTransition`.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    fn successor(&self) -> Option<Self>;

    fn can_transition_to(&self, target: &Self) -> bool {
        self.successor().as_ref() == Some(target)
    }

    /// Validated move to `target`.
    fn transition_to(&self, target: Self) -> Result<Self, DomainError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot move from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Moves to the successor, failing on a terminal state.
    fn advance(&self) -> Result<Self, DomainError> {
        self.successor().ok_or_else(|| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("{:?} is the last step", self),
            )
        })
    }

    fn is_terminal(&self) -> bool {
        self.successor().is_none()
    }
}
