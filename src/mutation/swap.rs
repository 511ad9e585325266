//! Random member exchange.

use rand::{Rng, RngCore};
use tracing::trace;

use super::types::{pick_two, MutationOperator};
use crate::candidate::Candidate;
use crate::objective::Scorer;

/// Exchanges one random member between two random eligible teams.
///
/// Cheapest operator and the main source of diversity in the pool.
/// Team sizes never change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomSwap;

impl MutationOperator for RandomSwap {
    fn name(&self) -> &str {
        "random_swap"
    }

    fn mutate(
        &self,
        candidate: &Candidate,
        _scorer: &Scorer<'_>,
        rng: &mut dyn RngCore,
    ) -> Candidate {
        let mut next = candidate.clone();
        let eligible = next.eligible_indices();
        let Some((a, b)) = pick_two(&eligible, rng) else {
            trace!(operator = self.name(), "fewer than two eligible teams");
            return next;
        };

        let members_a = next.team(a).members();
        let members_b = next.team(b).members();
        let member_a = members_a[rng.random_range(0..members_a.len())];
        let member_b = members_b[rng.random_range(0..members_b.len())];
        next.swap_at(a, member_a, b, member_b);
        next
    }
}
