//! Candidate assignments.
//!
//! A [`Candidate`] is one complete hypothetical assignment of members to
//! teams. It stores only ids, so cloning costs O(members) no matter how
//! large the member entities are. The read-only part of each team (id,
//! lock flag, capacity) sits in an `Arc`-shared [`TeamSlot`].
//!
//! # Invariants
//!
//! Between search iterations every candidate satisfies:
//!
//! 1. The set of teams and their order never change.
//! 2. Every member of the population appears in exactly one team.
//! 3. Locked teams keep the members they were seeded with.
//!
//! The mutating methods on [`Candidate`] refuse any move that would break
//! these rules and report the refusal as `false`.

mod materialize;
mod types;

pub use types::{Candidate, CandidateTeam, TeamSlot};
