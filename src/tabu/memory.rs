//! Short-term memory (the tabu list).

use std::collections::VecDeque;

/// Fixed-size FIFO of recently moved elements.
///
/// Holds exactly `2 × tenure` slots at all times: one "removed" and one
/// "inserted" slot per remembered iteration. `None` marks a slot where
/// no element moved, so it never collides with a real element.
#[derive(Debug, Clone, PartialEq)]
pub struct TabuList<E> {
    slots: VecDeque<Option<E>>,
}

impl<E: PartialEq> TabuList<E> {
    /// Creates a list of `2 × tenure` empty slots.
    pub fn new(tenure: usize) -> Self {
        let size = 2 * tenure;
        let mut slots = VecDeque::with_capacity(size);
        slots.extend((0..size).map(|_| None));
        Self { slots }
    }

    /// Returns `true` if `element` occupies any slot.
    pub fn contains(&self, element: &E) -> bool {
        self.slots.iter().any(|s| s.as_ref() == Some(element))
    }

    /// Like [`contains`](Self::contains), but an absent side is never tabu.
    pub fn is_tabu(&self, element: Option<&E>) -> bool {
        element.is_some_and(|e| self.contains(e))
    }

    /// Records one iteration: evicts the two oldest slots, then appends
    /// `removed` followed by `inserted`.
    pub fn record(&mut self, removed: Option<E>, inserted: Option<E>) {
        self.slots.pop_front();
        self.slots.push_back(removed);
        self.slots.pop_front();
        self.slots.push_back(inserted);
    }

    /// Number of slots (constant).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` for a zero-tenure list.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots holding no element.
    pub fn vacant(&self) -> usize {
        self.slots.iter().filter(|s| s.is_none()).count()
    }

    /// Iterates over the slots, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = Option<&E>> {
        self.slots.iter().map(Option::as_ref)
    }
}
