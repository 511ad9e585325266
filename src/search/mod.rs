//! Budgeted beam search.
//!
//! Keeps the `max_keep` best candidates seen so far. Each generation expands
//! every one of them `max_spread` times through the mutation plan, then
//! re-selects the best from parents and children together. Because parents
//! compete in every selection, the best score never decreases. The search
//! stops when `max_iterations` generations have run or `max_time` has
//! elapsed, both checked before each generation. There is no convergence
//! detection.
//!
//! # Key Types
//!
//! - [`SearchConfig`]: beam width, spread, budgets, mutation plan, seed
//! - [`SearchSettings`]: serializable form resolved via a
//!   [`MutationRegistry`](crate::mutation::MutationRegistry)
//! - [`Search`]: step-wise state machine ([`SearchState`])
//! - [`SearchRunner`]: runs a search to completion, yielding a [`SearchResult`]

mod config;
mod runner;

pub use config::{MutationSetting, SearchConfig, SearchSettings};
pub use runner::{ScoredCandidate, Search, SearchResult, SearchRunner, SearchState, Termination};
