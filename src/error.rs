//! Error types.
//!
//! Two families exist, raised at different times:
//!
//! - [`ConfigError`]: malformed priorities, mutation plans or registry
//!   names. Raised eagerly while building an [`Objective`](crate::objective::Objective),
//!   a [`MutationPlan`](crate::mutation::MutationPlan) or a
//!   [`SearchConfig`](crate::search::SearchConfig), never mid-search.
//! - [`IntegrityError`]: a roster or candidate references ids that do not
//!   line up. These indicate a caller-side precondition violation.
//!
//! Mutation operators have no error type at all: an operator whose
//! preconditions are unmet returns its input unchanged.

use crate::model::{MemberId, TeamId};
use thiserror::Error;

/// Invalid configuration detected before any search begins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A priority rejected its own parameters.
    #[error("invalid priority `{priority}`: {reason}")]
    InvalidPriority {
        /// Name of the offending priority.
        priority: String,
        /// What is wrong with it.
        reason: String,
    },

    /// An objective needs at least one priority.
    #[error("at least one priority is required")]
    NoPriorities,

    /// Mutation plan counts do not add up to `max_spread`.
    #[error("mutation plan counts sum to {actual}, expected max_spread = {expected}")]
    PlanMismatch {
        /// The configured `max_spread`.
        expected: usize,
        /// Sum of the plan's counts.
        actual: usize,
    },

    /// A mutation plan without entries.
    #[error("mutation plan is empty")]
    EmptyPlan,

    /// A plan entry with a count of zero.
    #[error("mutation `{0}` has a count of zero")]
    ZeroCount(String),

    /// A numeric search parameter is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A custom operator tried to take the name of a built-in one.
    #[error("`{0}` is a reserved mutation name")]
    ReservedName(String),

    /// A custom operator name was registered twice.
    #[error("mutation `{0}` is already registered")]
    DuplicateName(String),

    /// A plan refers to a mutation name the registry does not know.
    #[error("unknown mutation `{0}`")]
    UnknownMutation(String),
}

impl ConfigError {
    /// Creates an [`InvalidPriority`](Self::InvalidPriority) error.
    pub fn invalid_priority(priority: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPriority {
            priority: priority.into(),
            reason: reason.into(),
        }
    }
}

/// Inconsistent ids between a roster and a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    /// A member id is not present in the roster.
    #[error("unknown member {0}")]
    UnknownMember(MemberId),

    /// A team id is not present in the roster.
    #[error("unknown team {0}")]
    UnknownTeam(TeamId),

    /// The same member id appears twice.
    #[error("duplicate member {0}")]
    DuplicateMember(MemberId),

    /// The same team id appears twice.
    #[error("duplicate team {0}")]
    DuplicateTeam(TeamId),

    /// A member belongs to no team, so no complete candidate can be built.
    #[error("member {0} is not assigned to any team")]
    UnassignedMember(MemberId),

    /// A member is already assigned to a team.
    #[error("member {member} is already assigned to team {team}")]
    AlreadyAssigned {
        /// The member being assigned.
        member: MemberId,
        /// The team currently holding it.
        team: TeamId,
    },
}

/// Umbrella error for [`optimize`](crate::optimizer::optimize).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// See [`ConfigError`].
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// See [`IntegrityError`].
    #[error(transparent)]
    Integrity(#[from] IntegrityError),
}
