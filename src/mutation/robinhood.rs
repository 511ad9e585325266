//! Moves from the best team to the worst one.
//!
//! The donor is the highest-scoring eligible team and the receiver the
//! lowest-scoring one. Moves considered:
//!
//! - every exchange of one donor member with one receiver member;
//! - every plain transfer of a donor member, if the receiver has spare
//!   capacity and the donor keeps at least one member.
//!
//! [`Robinhood`] commits the move with the largest receiver gain.
//! [`RobinhoodHolistic`] also charges the donor's loss and commits the
//! move with the largest net gain. Either commits nothing unless the
//! chosen gain is positive.

use rand::RngCore;
use tracing::trace;

use super::types::{rank_by_score, MutationOperator, EPSILON};
use crate::candidate::Candidate;
use crate::model::MemberId;
use crate::objective::Scorer;

/// Greedy donor → receiver move maximizing the receiver's gain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Robinhood;

/// Greedy donor → receiver move maximizing the combined gain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RobinhoodHolistic;

impl MutationOperator for Robinhood {
    fn name(&self) -> &str {
        "robinhood"
    }

    fn mutate(
        &self,
        candidate: &Candidate,
        scorer: &Scorer<'_>,
        _rng: &mut dyn RngCore,
    ) -> Candidate {
        robinhood(self.name(), candidate, scorer, false)
    }
}

impl MutationOperator for RobinhoodHolistic {
    fn name(&self) -> &str {
        "robinhood_holistic"
    }

    fn mutate(
        &self,
        candidate: &Candidate,
        scorer: &Scorer<'_>,
        _rng: &mut dyn RngCore,
    ) -> Candidate {
        robinhood(self.name(), candidate, scorer, true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Move {
    Swap { give: MemberId, take: MemberId },
    Transfer { give: MemberId },
}

fn robinhood(
    operator: &str,
    candidate: &Candidate,
    scorer: &Scorer<'_>,
    holistic: bool,
) -> Candidate {
    let mut next = candidate.clone();
    let eligible = next.eligible_indices();
    if eligible.len() < 2 {
        trace!(operator, "fewer than two eligible teams");
        return next;
    }

    let ranked = rank_by_score(&next, scorer, &eligible);
    let (receiver_idx, receiver_score) = ranked[0];
    let (donor_idx, donor_score) = ranked[ranked.len() - 1];
    let donor = next.team(donor_idx);
    let receiver = next.team(receiver_idx);

    let mut moves = Vec::with_capacity(donor.len() * (receiver.len() + 1));
    for &give in donor.members() {
        for &take in receiver.members() {
            moves.push(Move::Swap { give, take });
        }
    }
    if !receiver.is_full() && donor.len() > 1 {
        moves.extend(donor.members().iter().map(|&give| Move::Transfer { give }));
    }

    let mut best: Option<(f64, Move)> = None;
    for mv in moves {
        let (new_donor, new_receiver) = apply(donor.members(), receiver.members(), mv);
        let gain = scorer.score_members(receiver.team_id(), &new_receiver) - receiver_score;
        let value = if holistic {
            let loss = donor_score - scorer.score_members(donor.team_id(), &new_donor);
            gain - loss
        } else {
            gain
        };
        if best.is_none_or(|(best_value, _)| value > best_value + EPSILON) {
            best = Some((value, mv));
        }
    }

    let committed = match best {
        Some((value, mv)) if value > EPSILON => match mv {
            Move::Swap { give, take } => next.swap_at(donor_idx, give, receiver_idx, take),
            Move::Transfer { give } => next.move_at(give, donor_idx, receiver_idx),
        },
        _ => false,
    };
    if !committed {
        trace!(operator, donor_idx, receiver_idx, "no improving move");
    }
    next
}

fn apply(donor: &[MemberId], receiver: &[MemberId], mv: Move) -> (Vec<MemberId>, Vec<MemberId>) {
    match mv {
        Move::Swap { give, take } => (
            donor.iter().map(|&m| if m == give { take } else { m }).collect(),
            receiver.iter().map(|&m| if m == take { give } else { m }).collect(),
        ),
        Move::Transfer { give } => (
            donor.iter().copied().filter(|&m| m != give).collect(),
            receiver.iter().copied().chain(std::iter::once(give)).collect(),
        ),
    }
}
