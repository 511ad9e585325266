//! Core trait for mutation operators, plus selection helpers shared by
//! the built-in operators.

use rand::{Rng, RngCore};

use crate::candidate::Candidate;
use crate::objective::Scorer;

pub(crate) const EPSILON: f64 = 1e-9;

/// Produces a neighboring candidate from an existing one.
///
/// # Contract
///
/// - The input is never modified; the operator works on a clone and
///   returns it.
/// - An operator never fails. When its preconditions are unmet (fewer
///   than two eligible teams, no improving move, neighborhood too large)
///   it returns an unchanged clone.
/// - Locked teams are never touched, and the returned candidate holds
///   exactly the members of the input.
///
/// Operators are `Send + Sync` so a search may call them from several
/// threads, each call with its own candidate and RNG.
///
/// # Examples
///
/// ```
/// use rand::RngCore;
/// use u_teamform::candidate::Candidate;
/// use u_teamform::mutation::MutationOperator;
/// use u_teamform::objective::Scorer;
///
/// /// Leaves every candidate as it is.
/// struct Identity;
///
/// impl MutationOperator for Identity {
///     fn name(&self) -> &str { "identity" }
///
///     fn mutate(&self, candidate: &Candidate, _: &Scorer<'_>, _: &mut dyn RngCore) -> Candidate {
///         candidate.clone()
///     }
/// }
/// ```
pub trait MutationOperator: Send + Sync {
    /// Registry name of this operator.
    fn name(&self) -> &str;

    /// Returns a mutated clone of `candidate`.
    fn mutate(
        &self,
        candidate: &Candidate,
        scorer: &Scorer<'_>,
        rng: &mut dyn RngCore,
    ) -> Candidate;
}

/// Two distinct entries of `pool`, chosen uniformly.
pub(crate) fn pick_two(pool: &[usize], rng: &mut dyn RngCore) -> Option<(usize, usize)> {
    if pool.len() < 2 {
        return None;
    }
    let picked = rand::seq::index::sample(rng, pool.len(), 2);
    Some((pool[picked.index(0)], pool[picked.index(1)]))
}

/// An entry of `pool` other than `exclude`, chosen uniformly.
pub(crate) fn pick_other(pool: &[usize], exclude: usize, rng: &mut dyn RngCore) -> Option<usize> {
    let others: Vec<usize> = pool.iter().copied().filter(|&i| i != exclude).collect();
    if others.is_empty() {
        return None;
    }
    Some(others[rng.random_range(0..others.len())])
}

/// Team indices from `pool` with their scores, lowest score first.
///
/// The sort is stable, so equal scores keep team order.
pub(crate) fn rank_by_score(
    candidate: &Candidate,
    scorer: &Scorer<'_>,
    pool: &[usize],
) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = pool
        .iter()
        .map(|&idx| (idx, scorer.team_score(candidate.team(idx))))
        .collect();
    ranked.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pick_two_distinct() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool = [3, 5, 8];
        for _ in 0..100 {
            let (a, b) = pick_two(&pool, &mut rng).unwrap();
            assert_ne!(a, b);
            assert!(pool.contains(&a) && pool.contains(&b));
        }
        assert!(pick_two(&[1], &mut rng).is_none());
    }

    #[test]
    fn test_pick_other() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(pick_other(&[2, 4], 2, &mut rng), Some(4));
        }
        assert_eq!(pick_other(&[2], 2, &mut rng), None);
    }
}
