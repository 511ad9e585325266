//! Operators working on a random subset ("slice") of the teams.
//!
//! A slice covers half of the eligible teams, but at least two. Working on
//! a slice instead of all teams trades breadth for per-call cost.

use rand::seq::SliceRandom;
use rand::RngCore;
use tracing::trace;

use super::local_max::apply_best_partition;
use super::types::MutationOperator;
use crate::candidate::Candidate;
use crate::model::MemberId;
use crate::objective::Scorer;

/// Reshuffles all members of a random slice, keeping team sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomSlice;

/// Pairs up the teams of a random slice and repartitions every pair the
/// way [`LocalMax`](super::LocalMax) does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreedyRandomLocalMax;

impl MutationOperator for RandomSlice {
    fn name(&self) -> &str {
        "random_slice"
    }

    fn mutate(
        &self,
        candidate: &Candidate,
        _scorer: &Scorer<'_>,
        rng: &mut dyn RngCore,
    ) -> Candidate {
        let mut next = candidate.clone();
        let Some(slice) = pick_slice(&next, rng) else {
            trace!(operator = self.name(), "fewer than two eligible teams");
            return next;
        };

        let mut pool: Vec<MemberId> = slice
            .iter()
            .flat_map(|&idx| next.team(idx).members().iter().copied())
            .collect();
        pool.shuffle(rng);

        let mut rest = pool.as_slice();
        let mut assignment = Vec::with_capacity(slice.len());
        for &idx in &slice {
            let (head, tail) = rest.split_at(next.team(idx).len());
            assignment.push((idx, head.to_vec()));
            rest = tail;
        }
        next.redistribute(assignment);
        next
    }
}

impl MutationOperator for GreedyRandomLocalMax {
    fn name(&self) -> &str {
        "greedy_random_local_max"
    }

    fn mutate(
        &self,
        candidate: &Candidate,
        scorer: &Scorer<'_>,
        rng: &mut dyn RngCore,
    ) -> Candidate {
        let mut next = candidate.clone();
        let Some(slice) = pick_slice(&next, rng) else {
            trace!(operator = self.name(), "fewer than two eligible teams");
            return next;
        };

        for pair in slice.chunks_exact(2) {
            apply_best_partition(self.name(), &mut next, scorer, pair[0], pair[1]);
        }
        next
    }
}

/// Random slice of eligible team indices, in random order.
fn pick_slice(candidate: &Candidate, rng: &mut dyn RngCore) -> Option<Vec<usize>> {
    let eligible = candidate.eligible_indices();
    if eligible.len() < 2 {
        return None;
    }
    let size = (eligible.len() / 2).max(2);
    let mut slice: Vec<usize> = rand::seq::index::sample(rng, eligible.len(), size)
        .into_iter()
        .map(|i| eligible[i])
        .collect();
    slice.shuffle(rng);
    Some(slice)
}
