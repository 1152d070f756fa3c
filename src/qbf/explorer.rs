//! Insertion / removal / exchange neighborhood with tabu filtering.
//!
//! One call to [`MoveExplorer::neighborhood_move`]:
//!
//! 1. Rebuilds the candidate list of the incumbent
//! 2. Generates insertion, removal and exchange moves
//! 3. Shuffles them and scans a (possibly adaptive) prefix
//! 4. Keeps the admissible move with the lowest delta, where admissible
//!    means no side is tabu or the move beats the best known cost
//! 5. Rotates the tabu list and applies the move (possibly a null move)

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

use super::config::{QbfConfig, RemovalSource};
use super::moves::PairedMove;
use crate::tabu::{Evaluator, SearchState, Solution, TabuList};

/// Rebuilds `cl` with every element of `0..domain_size` that can be
/// added without selecting two adjacent elements.
pub fn update_candidate_list(domain_size: usize, cl: &mut Vec<usize>, solution: &Solution<usize>) {
    cl.clear();
    cl.extend((0..domain_size).filter(|&i| {
        let left = i.checked_sub(1).is_some_and(|l| solution.contains(&l));
        !(solution.contains(&i) || left || solution.contains(&(i + 1)))
    }));
}

/// Progress of a scan over the sampled moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// No admissible move with a negative delta recorded yet.
    Searching,
    /// The running minimum delta is negative.
    Improving,
}

/// Tracks the best admissible move of a scan.
#[derive(Debug)]
struct MoveScan {
    state: ScanState,
    first_improving: bool,
    best: Option<(PairedMove<usize>, f64)>,
}

impl MoveScan {
    fn new(first_improving: bool) -> Self {
        Self {
            state: ScanState::Searching,
            first_improving,
            best: None,
        }
    }

    fn min_delta(&self) -> f64 {
        self.best.map_or(f64::INFINITY, |(_, d)| d)
    }

    /// Records an admissible move. Returns `false` when the scan must end.
    fn offer(&mut self, mv: PairedMove<usize>, delta: f64) -> bool {
        if delta < self.min_delta() {
            self.best = Some((mv, delta));
        }
        if self.min_delta() < 0.0 {
            self.state = ScanState::Improving;
        }
        !(self.first_improving && self.state == ScanState::Improving)
    }
}

/// Move generation and selection policy for QBF with the adjacency rule.
#[derive(Debug, Clone)]
pub struct MoveExplorer {
    domain_size: usize,
    percent: f64,
    adaptive: bool,
    first_improving: bool,
    removal_source: RemovalSource,
}

impl MoveExplorer {
    /// Creates an explorer over `0..domain_size` with the selection
    /// settings of `config`.
    pub fn new(domain_size: usize, config: &QbfConfig) -> Self {
        Self {
            domain_size,
            percent: config.percent,
            adaptive: config.is_adaptive(),
            first_improving: config.first_improving,
            removal_source: config.removal_source,
        }
    }

    /// Builds the full move list for `incumbent`, leaving its candidate
    /// list in `cl`.
    ///
    /// Exchange moves for an element `out` pair it with every candidate
    /// of the incumbent without `out`, except `out` itself.
    pub fn generate_moves(&self, cl: &mut Vec<usize>, incumbent: &Solution<usize>) -> Vec<PairedMove<usize>> {
        update_candidate_list(self.domain_size, cl, incumbent);

        let mut moves: Vec<PairedMove<usize>> = cl.iter().map(|&c| PairedMove::insertion(c)).collect();

        match self.removal_source {
            RemovalSource::CandidateList => moves.extend(cl.iter().map(|&c| PairedMove::removal(c))),
            RemovalSource::Incumbent => moves.extend(incumbent.iter().map(|&c| PairedMove::removal(c))),
        }

        let mut reduced_cl = Vec::with_capacity(self.domain_size);
        for &out in incumbent {
            let mut reduced = incumbent.clone();
            reduced.remove(&out);
            update_candidate_list(self.domain_size, &mut reduced_cl, &reduced);
            moves.extend(
                reduced_cl
                    .iter()
                    .filter(|&&c| c != out)
                    .map(|&c| PairedMove::exchange(c, out)),
            );
        }

        moves
    }

    /// Number of shuffled moves to scan out of `total`.
    ///
    /// In adaptive mode (`percent < 1`) the sample grows to the
    /// stagnation ratio once that exceeds `percent`.
    pub fn sample_length(&self, total: usize, stagnation_ratio: f64) -> usize {
        let fraction = if self.adaptive && stagnation_ratio > self.percent {
            stagnation_ratio
        } else {
            self.percent
        };
        ((total as f64 * fraction) as usize).min(total)
    }

    /// Delta cost of `mv` on `incumbent`.
    pub fn delta<V: Evaluator<usize>>(evaluator: &V, mv: &PairedMove<usize>, incumbent: &Solution<usize>) -> f64 {
        match (mv.candidate_in, mv.candidate_out) {
            (Some(i), Some(o)) => evaluator.evaluate_exchange_cost(&i, &o, incumbent),
            (Some(i), None) => evaluator.evaluate_insertion_cost(&i, incumbent),
            (None, Some(o)) => evaluator.evaluate_removal_cost(&o, incumbent),
            (None, None) => 0.0,
        }
    }

    /// Picks the admissible move with the lowest delta among `moves`.
    ///
    /// Returns `None` if nothing is admissible.
    pub fn select<V: Evaluator<usize>>(
        &self,
        evaluator: &V,
        moves: &[PairedMove<usize>],
        incumbent: &Solution<usize>,
        tabu: &TabuList<usize>,
        best_cost: f64,
    ) -> Option<(PairedMove<usize>, f64)> {
        let mut scan = MoveScan::new(self.first_improving);

        for mv in moves {
            let delta = Self::delta(evaluator, mv, incumbent);
            let tabu_move = tabu.is_tabu(mv.candidate_in.as_ref()) || tabu.is_tabu(mv.candidate_out.as_ref());
            let aspiration = incumbent.cost + delta < best_cost;

            if (!tabu_move || aspiration) && !scan.offer(*mv, delta) {
                break;
            }
        }

        scan.best
    }

    /// Rotates the tabu list with `mv`'s sides (removed first) and applies
    /// it to `incumbent`, then re-evaluates the incumbent.
    pub fn commit<V: Evaluator<usize>>(
        evaluator: &V,
        mv: PairedMove<usize>,
        incumbent: &mut Solution<usize>,
        tabu: &mut TabuList<usize>,
    ) {
        tabu.record(mv.candidate_out, mv.candidate_in);
        if let Some(out) = mv.candidate_out {
            incumbent.remove(&out);
        }
        if let Some(inn) = mv.candidate_in {
            incumbent.add(inn);
        }
        evaluator.evaluate(incumbent);
    }

    /// Applies exactly one move to the incumbent in `state`.
    pub fn neighborhood_move<V: Evaluator<usize>, R: Rng>(
        &self,
        evaluator: &V,
        state: SearchState<'_, usize>,
        stagnation_ratio: f64,
        rng: &mut R,
    ) -> PairedMove<usize> {
        let mut moves = self.generate_moves(state.cl, state.incumbent);
        moves.shuffle(rng);

        let length = self.sample_length(moves.len(), stagnation_ratio);
        let chosen = self.select(evaluator, &moves[..length], state.incumbent, state.tabu, state.best_cost);

        let (mv, delta) = chosen.unwrap_or((PairedMove::null(), 0.0));
        Self::commit(evaluator, mv, state.incumbent, state.tabu);

        trace!(
            event = "move",
            kind = ?mv.kind(),
            candidate_in = ?mv.candidate_in,
            candidate_out = ?mv.candidate_out,
            delta,
            sampled = length,
            total = moves.len(),
            cost = state.incumbent.cost,
        );

        mv
    }
}
