//! States of a paginated result walk.

use std::fmt;

/// Where a [`PaginationTracker`](crate::PaginationTracker) stands.
///
/// ```text
/// HasMore --advance()--> Fetching --ok--> HasMore | Exhausted
///                            |
///                            +--failure / dropped--> HasMore
/// ```
///
/// `Exhausted` is terminal: only a fresh initial query leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationState {
    /// A cursor to the next page is held.
    HasMore,
    /// A next-page fetch is in flight.
    Fetching,
    /// The last page has been reached.
    Exhausted,
}

impl PaginationState {
    /// Initial state for a first page, derived from cursor presence.
    pub fn from_cursor_presence(has_cursor: bool) -> Self {
        if has_cursor {
            Self::HasMore
        } else {
            Self::Exhausted
        }
    }

    pub fn can_advance(&self) -> bool {
        matches!(self, Self::HasMore)
    }
}

impl fmt::Display for PaginationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HasMore => write!(f, "more pages are available"),
            Self::Fetching => write!(f, "a page fetch is in flight"),
            Self::Exhausted => write!(f, "exhausted"),
        }
    }
}
