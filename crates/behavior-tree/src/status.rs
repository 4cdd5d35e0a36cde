//! Status returned by behavior nodes.

/// The result of evaluating a behavior node.
///
/// Every node resolves within the tick it is evaluated in:
/// - Conditions answer immediately (e.g., "is a dialogue box open?")
/// - Decision nodes record their choice on the blackboard and succeed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The condition held, or the decision was recorded.
    Success,

    /// The condition did not hold, or no decision could be made.
    Failure,
}

impl Status {
    #[inline]
    pub fn is_success(self) -> bool {
        self == Status::Success
    }

    #[inline]
    pub fn is_failure(self) -> bool {
        self == Status::Failure
    }

    /// Maps a boolean predicate result onto a status.
    #[inline]
    pub fn from_bool(holds: bool) -> Self {
        if holds {
            Status::Success
        } else {
            Status::Failure
        }
    }
}
