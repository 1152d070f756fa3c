//! Local-search moves.

/// Kind of a [`PairedMove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Adds `candidate_in`.
    Insertion,
    /// Drops `candidate_out`.
    Removal,
    /// Swaps `candidate_out` for `candidate_in`.
    Exchange,
    /// Neither side populated; applying it changes nothing.
    Null,
}

/// A move encoded as an (in, out) pair.
///
/// Only `candidate_in` is an insertion, only `candidate_out` a removal,
/// both an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairedMove<E> {
    /// Element entering the solution.
    pub candidate_in: Option<E>,
    /// Element leaving the solution.
    pub candidate_out: Option<E>,
}

impl<E> PairedMove<E> {
    /// Move adding `candidate`.
    pub fn insertion(candidate: E) -> Self {
        Self {
            candidate_in: Some(candidate),
            candidate_out: None,
        }
    }

    /// Move dropping `candidate`.
    pub fn removal(candidate: E) -> Self {
        Self {
            candidate_in: None,
            candidate_out: Some(candidate),
        }
    }

    /// Move swapping `candidate_out` for `candidate_in`.
    pub fn exchange(candidate_in: E, candidate_out: E) -> Self {
        Self {
            candidate_in: Some(candidate_in),
            candidate_out: Some(candidate_out),
        }
    }

    /// The empty move committed when nothing is admissible.
    pub fn null() -> Self {
        Self {
            candidate_in: None,
            candidate_out: None,
        }
    }

    /// Classifies the move by which sides are populated.
    pub fn kind(&self) -> MoveKind {
        match (&self.candidate_in, &self.candidate_out) {
            (Some(_), None) => MoveKind::Insertion,
            (None, Some(_)) => MoveKind::Removal,
            (Some(_), Some(_)) => MoveKind::Exchange,
            (None, None) => MoveKind::Null,
        }
    }
}
