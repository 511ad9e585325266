//! Budgeted local-search team formation.
//!
//! Assigns a fixed population of members to a fixed set of teams so that
//! an ordered list of soft objectives (priorities) is satisfied as well as
//! possible within an iteration and wall-clock budget:
//!
//! - **Model**: members, teams and the [`Roster`](model::Roster) arena that
//!   owns the member ↔ team relation.
//! - **Candidate**: lightweight, cloneable assignment of member ids to
//!   teams, seeded from and written back to a roster.
//! - **Objective**: pluggable priorities, each thresholded to
//!   satisfied/unsatisfied per team and combined by a linear or
//!   exponential [`WeightScheme`](objective::WeightScheme).
//! - **Mutation**: eight built-in neighborhood operators (random swaps,
//!   exhaustive two-team repartitions, donor/receiver exchanges, slice
//!   reshuffles) plus a registry for custom ones.
//! - **Search**: beam search that keeps the `max_keep` best candidates and
//!   expands each through a mutation plan every generation.
//!
//! [`optimize`] ties them together: seed from the roster, search, write
//! the best assignment back.
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for the model, priority configs
//!   and [`SearchSettings`](search::SearchSettings).
//! - `parallel`: generate children on the rayon thread pool when
//!   [`SearchConfig::parallel`](search::SearchConfig::parallel) is set.
//!
//! # Logging
//!
//! Progress is reported through [`tracing`] events. The crate never
//! installs a subscriber.

pub mod candidate;
pub mod error;
pub mod model;
pub mod mutation;
pub mod objective;
pub mod optimizer;
pub mod search;

pub use error::Error;
pub use optimizer::{optimize, OptimizeReport};
