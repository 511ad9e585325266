//! Core trait for priorities.

use std::fmt;

use crate::error::ConfigError;
use crate::model::{Member, Team};

/// A soft objective evaluated per team.
///
/// A priority maps a team and its current members to a satisfaction value
/// in `[0, 1]`. The [`Objective`](super::Objective) thresholds that value
/// through [`is_satisfied`](Self::is_satisfied) and weights the result by
/// the priority's position in the list.
///
/// # Contract
///
/// - [`satisfaction`](Self::satisfaction) is pure and defined for every
///   non-empty member slice and every team. A team with nothing to check
///   (e.g. no requirements) is fully satisfied.
/// - [`validate`](Self::validate) rejects malformed parameters with
///   [`ConfigError`]. It is called once, when the objective is built.
///
/// # Examples
///
/// ```
/// use u_teamform::error::ConfigError;
/// use u_teamform::model::{Member, Team};
/// use u_teamform::objective::Priority;
///
/// /// Satisfied when the team has at most `max` members.
/// #[derive(Debug)]
/// struct SmallTeams { max: usize }
///
/// impl Priority for SmallTeams {
///     fn name(&self) -> &str { "small_teams" }
///
///     fn validate(&self) -> Result<(), ConfigError> {
///         if self.max == 0 {
///             return Err(ConfigError::invalid_priority(self.name(), "max must be positive"));
///         }
///         Ok(())
///     }
///
///     fn satisfaction(&self, members: &[&Member], _team: &Team) -> f64 {
///         if members.len() <= self.max { 1.0 } else { 0.0 }
///     }
/// }
/// ```
pub trait Priority: Send + Sync + fmt::Debug {
    /// Short identifier used in logs and error messages.
    fn name(&self) -> &str;

    /// Checks the priority's parameters.
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Satisfaction of `team` with `members`, in `[0, 1]`.
    fn satisfaction(&self, members: &[&Member], team: &Team) -> f64;

    /// Turns a satisfaction value into satisfied / not satisfied.
    ///
    /// Any positive satisfaction counts by default.
    fn is_satisfied(&self, satisfaction: f64) -> bool {
        satisfaction > 0.0
    }
}
