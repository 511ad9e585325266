//! Multi-objective scoring.
//!
//! Users state what a good team looks like as an ordered list of
//! [`Priority`] objects. Each priority is judged satisfied or not per
//! team; a [`WeightScheme`] turns the list position into a weight, and the
//! [`Objective`] sums the weights of satisfied priorities into a team
//! score. A [`Scorer`] pairs the objective with the roster so candidates
//! (which hold only ids) can be evaluated.
//!
//! # Key Types
//!
//! - [`Priority`]: the soft-objective trait; implement it for custom goals
//! - [`PriorityConfig`]: declarative form of the built-in priorities
//! - [`WeightScheme`]: linear or exponential position weights
//! - [`Objective`] / [`Scorer`]: aggregation and candidate scoring

mod config;
mod priorities;
mod scorer;
mod types;
mod weighting;

pub use config::PriorityConfig;
pub use priorities::{
    DiversityPriority, DiversityStrategy, ProjectPreferencePriority, RequirementPriority,
    SocialPreferencePriority, TokenizationDirection, TokenizationPriority,
};
pub use scorer::{Objective, Scorer};
pub use types::Priority;
pub use weighting::WeightScheme;
