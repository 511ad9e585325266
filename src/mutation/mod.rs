//! Mutation operators.
//!
//! Each operator derives one neighboring [`Candidate`](crate::candidate::Candidate)
//! from an existing one. Operators never fail: when a move is impossible
//! or useless they return an unchanged clone, so every generation yields
//! exactly `max_spread` children per parent.
//!
//! # Built-in Operators
//!
//! | Name | Operator | Neighborhood |
//! |---|---|---|
//! | `random_swap` | [`RandomSwap`] | one random exchange |
//! | `local_max` | [`LocalMax`] | all splits of the two worst teams |
//! | `local_max_random` | [`LocalMaxRandom`] | worst team + random team |
//! | `local_max_double_random` | [`LocalMaxDoubleRandom`] | two random teams |
//! | `robinhood` | [`Robinhood`] | best team gives to worst team |
//! | `robinhood_holistic` | [`RobinhoodHolistic`] | same, net of the donor's loss |
//! | `random_slice` | [`RandomSlice`] | reshuffle a random slice |
//! | `greedy_random_local_max` | [`GreedyRandomLocalMax`] | local max over slice pairs |
//!
//! Locked teams and empty teams are never eligible.

mod local_max;
mod plan;
mod registry;
mod robinhood;
mod slice;
mod swap;
mod types;

pub use local_max::{LocalMax, LocalMaxDoubleRandom, LocalMaxRandom, MAX_PARTITIONS};
pub use plan::{MutationPlan, PlanEntry};
pub use registry::{MutationRegistry, BUILTIN_MUTATIONS};
pub use robinhood::{Robinhood, RobinhoodHolistic};
pub use slice::{GreedyRandomLocalMax, RandomSlice};
pub use swap::RandomSwap;
pub use types::MutationOperator;
