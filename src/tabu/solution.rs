//! Solution container shared by the engine and its specializations.

/// An ordered set of selected elements with a cached cost.
///
/// Insertion order is kept so iteration is deterministic. The `cost`
/// field is only refreshed by [`Evaluator::evaluate`](super::Evaluator::evaluate);
/// `add` and `remove` leave it stale until the next full evaluation.
///
/// Cloning yields an independent copy (membership and cost).
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<E> {
    elements: Vec<E>,
    /// Cached objective value of `elements`.
    pub cost: f64,
}

impl<E: PartialEq> Solution<E> {
    /// Creates an empty solution with the given cost.
    pub fn with_cost(cost: f64) -> Self {
        Self {
            elements: Vec::new(),
            cost,
        }
    }

    /// Returns `true` if `element` is selected.
    pub fn contains(&self, element: &E) -> bool {
        self.elements.contains(element)
    }

    /// Appends `element` unless it is already selected.
    pub fn add(&mut self, element: E) {
        if !self.contains(&element) {
            self.elements.push(element);
        }
    }

    /// Removes `element`, preserving the order of the remaining ones.
    ///
    /// Returns `false` if it was not selected.
    pub fn remove(&mut self, element: &E) -> bool {
        match self.elements.iter().position(|e| e == element) {
            Some(pos) => {
                self.elements.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Number of selected elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates over the selected elements in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.elements.iter()
    }

    /// Selected elements as a slice.
    pub fn elements(&self) -> &[E] {
        &self.elements
    }
}

impl<E: Ord> Solution<E> {
    /// Sorts the selected elements in ascending order.
    pub fn sort(&mut self) {
        self.elements.sort();
    }
}

impl<E: PartialEq> Default for Solution<E> {
    fn default() -> Self {
        Self::with_cost(0.0)
    }
}

impl<'a, E> IntoIterator for &'a Solution<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<E: std::fmt::Display> std::fmt::Display for Solution<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Solution: cost=[{}], size=[{}], elements=[", self.cost, self.elements.len())?;
        for (i, e) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{e}")?;
        }
        write!(f, "]")
    }
}
