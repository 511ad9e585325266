//! Domain entities: members, teams and the roster that relates them.
//!
//! The optimizer never holds member or team objects directly. It works on
//! ids and borrows a [`Roster`] whenever it needs the entities behind
//! them (for scoring and for writing the final assignment back).
//!
//! # Key Types
//!
//! - [`Member`]: an entity to be placed in exactly one team
//! - [`Team`]: a capacity-bounded container with requirements and a lock flag
//! - [`Roster`]: arena of members and teams plus the membership relation

mod roster;
mod types;

pub use roster::Roster;
pub use types::{
    AttributeId, AttributeValue, Member, MemberId, ProjectId, Relationship, Requirement,
    RequirementOperator, Team, TeamId,
};
