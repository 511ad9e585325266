//! One-call team formation: seed → search → write back.
//!
//! [`optimize`] takes the roster's current assignment as the seed,
//! searches for a better one, and rewrites the roster's membership with
//! the best candidate found. Callers that need the intermediate pieces use
//! [`Candidate`], [`Search`](crate::search::Search) and
//! [`Candidate::materialize`] directly.

use std::time::Duration;

use tracing::info;

use crate::candidate::Candidate;
use crate::error::Error;
use crate::model::Roster;
use crate::objective::{Objective, Scorer};
use crate::search::{SearchConfig, SearchRunner, Termination};

/// Summary of an [`optimize`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeReport {
    /// Total score of the assignment now held by the roster.
    pub best_score: f64,
    /// Total score of the roster's assignment before the call.
    pub seed_score: f64,
    /// Completed generations.
    pub iterations: usize,
    /// Children generated and scored.
    pub evaluations: usize,
    /// Wall-clock search time.
    pub elapsed: Duration,
    /// Which budget ended the search.
    pub termination: Termination,
    /// Best pool score after each generation; index 0 is the seed.
    pub score_history: Vec<f64>,
}

impl OptimizeReport {
    /// Score gained over the seed assignment.
    pub fn improvement(&self) -> f64 {
        self.best_score - self.seed_score
    }
}

/// Improves the roster's assignment in place.
///
/// Every member must already be assigned to a team; that assignment is the
/// seed. On success the roster holds the best assignment found, which
/// scores at least as well as the seed.
///
/// # Errors
///
/// - [`Error::Config`] if `config` does not validate.
/// - [`Error::Integrity`] if a member is unassigned. The roster is not
///   modified.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_teamform::model::{Member, MemberId, Roster, Team, TeamId};
/// use u_teamform::mutation::{MutationPlan, RandomSwap, Robinhood};
/// use u_teamform::objective::{Objective, TokenizationDirection, TokenizationPriority, WeightScheme};
/// use u_teamform::optimize;
/// use u_teamform::search::SearchConfig;
///
/// // Members 0..4 carry value 1 on attribute 0, members 4..8 carry value 2.
/// let members = (0..8)
///     .map(|i| Member::new(MemberId(i)).with_attribute(0, vec![if i < 4 { 1 } else { 2 }]))
///     .collect();
/// let teams = (0..2).map(|i| Team::new(TeamId(i))).collect();
/// let mut roster = Roster::new(members, teams).unwrap();
/// for i in 0..8 {
///     roster.assign(MemberId(i), TeamId(i / 4)).unwrap();
/// }
///
/// // Every team wants at least one member with value 2.
/// let objective = Objective::new(
///     vec![Box::new(TokenizationPriority {
///         attribute: 0,
///         value: 2,
///         direction: TokenizationDirection::MinOf,
///         threshold: 1,
///     })],
///     WeightScheme::Linear,
/// )
/// .unwrap();
///
/// let plan = MutationPlan::new().with(RandomSwap, 6).with(Robinhood, 2);
/// let config = SearchConfig::new(2, 8, 50, Duration::from_secs(10), plan).unwrap().with_seed(3);
///
/// let report = optimize(&mut roster, &objective, &config).unwrap();
/// assert_eq!(report.seed_score, 1.0);
/// assert_eq!(report.best_score, 2.0);
/// assert_eq!(roster.assigned_count(), 8);
/// ```
pub fn optimize(
    roster: &mut Roster,
    objective: &Objective,
    config: &SearchConfig,
) -> Result<OptimizeReport, Error> {
    config.validate()?;
    let seed = Candidate::from_roster(roster)?;

    let result = {
        let scorer = Scorer::new(objective, roster);
        SearchRunner::run(seed, &scorer, config)?
    };
    result.best.materialize(roster)?;

    info!(
        seed_score = result.seed_score,
        best_score = result.best_score,
        "roster updated"
    );

    Ok(OptimizeReport {
        best_score: result.best_score,
        seed_score: result.seed_score,
        iterations: result.iterations,
        evaluations: result.evaluations,
        elapsed: result.elapsed,
        termination: result.termination,
        score_history: result.score_history,
    })
}
