//! Exhaustive two-team repartitioning.
//!
//! The local-max family takes two eligible teams, enumerates every way to
//! split the union of their members into two sets of the original sizes,
//! and keeps the best split. The three operators differ only in how the
//! pair is chosen:
//!
//! | Operator | First team | Second team |
//! |---|---|---|
//! | [`LocalMax`] | lowest score | second lowest |
//! | [`LocalMaxRandom`] | lowest score | uniform |
//! | [`LocalMaxDoubleRandom`] | uniform | uniform |
//!
//! A split is ranked by the better of its two team scores, then by their
//! sum. Enumeration starts with the current split, so ties keep it.

use rand::RngCore;
use tracing::trace;

use super::types::{pick_other, pick_two, rank_by_score, MutationOperator, EPSILON};
use crate::candidate::Candidate;
use crate::model::MemberId;
use crate::objective::Scorer;

/// Largest number of splits one local-max call will score.
///
/// Two teams of ten give about 185k splits, which are scored; two teams
/// of twelve give 2.7M, which are skipped.
pub const MAX_PARTITIONS: u64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PairSelection {
    LowestTwo,
    LowestAndRandom,
    BothRandom,
}

/// Repartitions the two lowest-scoring eligible teams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalMax;

/// Repartitions the lowest-scoring eligible team with a random one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalMaxRandom;

/// Repartitions two random eligible teams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalMaxDoubleRandom;

impl MutationOperator for LocalMax {
    fn name(&self) -> &str {
        "local_max"
    }

    fn mutate(
        &self,
        candidate: &Candidate,
        scorer: &Scorer<'_>,
        rng: &mut dyn RngCore,
    ) -> Candidate {
        local_max(self.name(), candidate, scorer, rng, PairSelection::LowestTwo)
    }
}

impl MutationOperator for LocalMaxRandom {
    fn name(&self) -> &str {
        "local_max_random"
    }

    fn mutate(
        &self,
        candidate: &Candidate,
        scorer: &Scorer<'_>,
        rng: &mut dyn RngCore,
    ) -> Candidate {
        local_max(self.name(), candidate, scorer, rng, PairSelection::LowestAndRandom)
    }
}

impl MutationOperator for LocalMaxDoubleRandom {
    fn name(&self) -> &str {
        "local_max_double_random"
    }

    fn mutate(
        &self,
        candidate: &Candidate,
        scorer: &Scorer<'_>,
        rng: &mut dyn RngCore,
    ) -> Candidate {
        local_max(self.name(), candidate, scorer, rng, PairSelection::BothRandom)
    }
}

fn local_max(
    operator: &str,
    candidate: &Candidate,
    scorer: &Scorer<'_>,
    rng: &mut dyn RngCore,
    selection: PairSelection,
) -> Candidate {
    let mut next = candidate.clone();
    let eligible = next.eligible_indices();
    if eligible.len() < 2 {
        trace!(operator, "fewer than two eligible teams");
        return next;
    }

    let pair = match selection {
        PairSelection::LowestTwo => {
            let ranked = rank_by_score(&next, scorer, &eligible);
            Some((ranked[0].0, ranked[1].0))
        }
        PairSelection::LowestAndRandom => {
            let lowest = rank_by_score(&next, scorer, &eligible)[0].0;
            pick_other(&eligible, lowest, rng).map(|other| (lowest, other))
        }
        PairSelection::BothRandom => pick_two(&eligible, rng),
    };
    let Some((a, b)) = pair else {
        return next;
    };

    apply_best_partition(operator, &mut next, scorer, a, b);
    next
}

/// Replaces teams `a` and `b` of `candidate` with their best split.
///
/// Returns whether the candidate changed.
pub(crate) fn apply_best_partition(
    operator: &str,
    candidate: &mut Candidate,
    scorer: &Scorer<'_>,
    a: usize,
    b: usize,
) -> bool {
    match best_partition(candidate, scorer, a, b) {
        Some((members_a, members_b)) => candidate.repartition(a, members_a, b, members_b),
        None => {
            trace!(operator, a, b, "no better split");
            false
        }
    }
}

/// Best split of the members of teams `a` and `b`.
///
/// Returns `None` when the current split is already best or when the
/// neighborhood exceeds [`MAX_PARTITIONS`].
///
/// With equal team sizes a combination and its complement describe the
/// same partition, so only combinations holding the first pooled member
/// are enumerated. Each of them is scored in both orientations, since the
/// two teams may differ in requirements or project.
pub(crate) fn best_partition(
    candidate: &Candidate,
    scorer: &Scorer<'_>,
    a: usize,
    b: usize,
) -> Option<(Vec<MemberId>, Vec<MemberId>)> {
    let team_a = candidate.team(a);
    let team_b = candidate.team(b);
    let (id_a, id_b) = (team_a.team_id(), team_b.team_id());
    let pool: Vec<MemberId> = team_a
        .members()
        .iter()
        .chain(team_b.members())
        .copied()
        .collect();
    let n = pool.len();
    let k = team_a.len();

    if binomial(n, k) > MAX_PARTITIONS {
        trace!(n, k, "split neighborhood too large");
        return None;
    }
    let symmetric = k > 0 && 2 * k == n;

    let key_of = |side_a: &[MemberId], side_b: &[MemberId]| {
        let score_a = scorer.score_members(id_a, side_a);
        let score_b = scorer.score_members(id_b, side_b);
        (score_a.max(score_b), score_a + score_b)
    };

    let mut combo: Vec<usize> = (0..k).collect();
    let mut in_a = vec![false; n];
    let mut best_key = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    let mut best: Option<(Vec<MemberId>, Vec<MemberId>)> = None;
    let mut first = true;

    loop {
        in_a.fill(false);
        combo.iter().for_each(|&i| in_a[i] = true);
        let (side_a, side_b) = split(&pool, &in_a);

        let key = key_of(&side_a, &side_b);
        if is_better(key, best_key) {
            best_key = key;
            // The first combination is the current split.
            best = if first {
                None
            } else {
                Some((side_a.clone(), side_b.clone()))
            };
        }
        first = false;

        if symmetric {
            let key = key_of(&side_b, &side_a);
            if is_better(key, best_key) {
                best_key = key;
                best = Some((side_b, side_a));
            }
        }

        if !next_combination(&mut combo, n) || (symmetric && combo[0] != 0) {
            break;
        }
    }
    best
}

fn split(pool: &[MemberId], in_a: &[bool]) -> (Vec<MemberId>, Vec<MemberId>) {
    let mut side_a = Vec::new();
    let mut side_b = Vec::new();
    for (&member, &flag) in pool.iter().zip(in_a) {
        if flag {
            side_a.push(member);
        } else {
            side_b.push(member);
        }
    }
    (side_a, side_b)
}

fn is_better(key: (f64, f64), best: (f64, f64)) -> bool {
    key.0 > best.0 + EPSILON || ((key.0 - best.0).abs() <= EPSILON && key.1 > best.1 + EPSILON)
}

/// Advances `combo` to the next k-combination of `0..n` in lexicographic
/// order. Returns `false` after the last one.
fn next_combination(combo: &mut [usize], n: usize) -> bool {
    let k = combo.len();
    let mut i = k;
    while i > 0 {
        i -= 1;
        if combo[i] < n - k + i {
            combo[i] += 1;
            for j in i + 1..k {
                combo[j] = combo[j - 1] + 1;
            }
            return true;
        }
    }
    false
}

/// `C(n, k)`, saturating once it exceeds [`MAX_PARTITIONS`].
fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        result = result * (n - i) as u128 / (i + 1) as u128;
        if result > MAX_PARTITIONS as u128 {
            return u64::MAX;
        }
    }
    result as u64
}
