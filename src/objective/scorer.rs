//! Objective aggregation and candidate scoring.

use tracing::debug;

use super::config::PriorityConfig;
use super::types::Priority;
use super::weighting::WeightScheme;
use crate::candidate::{Candidate, CandidateTeam};
use crate::error::ConfigError;
use crate::model::{Member, MemberId, Roster, Team, TeamId};

/// An ordered, validated list of priorities and their weights.
///
/// Team score = Σ `weight_i` · `satisfied_i`, where `satisfied_i` is the
/// i-th priority's thresholded satisfaction. A candidate's score is the
/// sum of its team scores, so the maximum equals the number of teams.
#[derive(Debug)]
pub struct Objective {
    priorities: Vec<Box<dyn Priority>>,
    scheme: WeightScheme,
    weights: Vec<f64>,
}

impl Objective {
    /// Builds an objective, validating every priority.
    ///
    /// Fails with [`ConfigError::NoPriorities`] on an empty list, or with
    /// the first priority's validation error.
    pub fn new(
        priorities: Vec<Box<dyn Priority>>,
        scheme: WeightScheme,
    ) -> Result<Self, ConfigError> {
        if priorities.is_empty() {
            return Err(ConfigError::NoPriorities);
        }
        for priority in &priorities {
            priority.validate()?;
        }
        let weights = scheme.weights(priorities.len());
        debug!(
            priorities = priorities.len(),
            ?scheme,
            "objective configured"
        );
        Ok(Self {
            priorities,
            scheme,
            weights,
        })
    }

    /// Builds an objective from built-in priority configurations.
    pub fn from_configs(
        configs: &[PriorityConfig],
        scheme: WeightScheme,
    ) -> Result<Self, ConfigError> {
        let priorities = configs.iter().map(PriorityConfig::build).collect::<Result<_, _>>()?;
        Self::new(priorities, scheme)
    }

    /// Priorities in importance order.
    pub fn priorities(&self) -> &[Box<dyn Priority>] {
        &self.priorities
    }

    /// Weight per priority, same order.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// The weighting scheme.
    pub fn scheme(&self) -> WeightScheme {
        self.scheme
    }

    /// Whether the `index`-th priority is satisfied by `members` on `team`.
    pub fn satisfied(&self, index: usize, members: &[&Member], team: &Team) -> bool {
        let priority = &self.priorities[index];
        priority.is_satisfied(priority.satisfaction(members, team))
    }

    /// Weighted score of one team. Empty teams score 0.
    pub fn team_score(&self, members: &[&Member], team: &Team) -> f64 {
        if members.is_empty() {
            return 0.0;
        }
        self.weights
            .iter()
            .enumerate()
            .filter(|&(i, _)| self.satisfied(i, members, team))
            .map(|(_, w)| w)
            .sum()
    }
}

/// Scores candidates against a roster.
///
/// Cheap to copy; mutation operators receive one to evaluate the moves
/// they consider.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    objective: &'a Objective,
    roster: &'a Roster,
}

impl<'a> Scorer<'a> {
    /// Creates a scorer.
    pub fn new(objective: &'a Objective, roster: &'a Roster) -> Self {
        Self { objective, roster }
    }

    /// The objective.
    pub fn objective(&self) -> &'a Objective {
        self.objective
    }

    /// The member lookup table.
    pub fn roster(&self) -> &'a Roster {
        self.roster
    }

    /// Score of `team` if it held exactly `members`.
    ///
    /// Ids unknown to the roster are skipped and an unknown team scores
    /// 0; materialization is where such inconsistencies are reported.
    pub fn score_members(&self, team: TeamId, members: &[MemberId]) -> f64 {
        let Some(team) = self.roster.team(team) else {
            return 0.0;
        };
        let resolved: Vec<&Member> = members
            .iter()
            .filter_map(|&id| self.roster.member(id))
            .collect();
        self.objective.team_score(&resolved, team)
    }

    /// Score of a candidate team.
    pub fn team_score(&self, team: &CandidateTeam) -> f64 {
        self.score_members(team.team_id(), team.members())
    }

    /// Score of every team of `candidate`, in team order.
    pub fn team_scores(&self, candidate: &Candidate) -> Vec<f64> {
        candidate
            .teams()
            .iter()
            .map(|team| self.team_score(team))
            .collect()
    }

    /// Total score of `candidate`.
    pub fn score(&self, candidate: &Candidate) -> f64 {
        candidate
            .teams()
            .iter()
            .map(|team| self.team_score(team))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::{TokenizationDirection, TokenizationPriority};

    #[derive(Debug)]
    struct Always;

    impl Priority for Always {
        fn name(&self) -> &str {
            "always"
        }
        fn satisfaction(&self, _: &[&Member], _: &Team) -> f64 {
            1.0
        }
    }

    #[derive(Debug)]
    struct Never;

    impl Priority for Never {
        fn name(&self) -> &str {
            "never"
        }
        fn satisfaction(&self, _: &[&Member], _: &Team) -> f64 {
            0.0
        }
    }

    #[derive(Debug)]
    struct Broken;

    impl Priority for Broken {
        fn name(&self) -> &str {
            "broken"
        }
        fn validate(&self) -> Result<(), ConfigError> {
            Err(ConfigError::invalid_priority("broken", "always invalid"))
        }
        fn satisfaction(&self, _: &[&Member], _: &Team) -> f64 {
            1.0
        }
    }

    fn roster_with_gender() -> Roster {
        let members = (0..4)
            .map(|i| Member::new(MemberId(i)).with_attribute(0, vec![if i < 2 { 2 } else { 1 }]))
            .collect();
        let mut roster = Roster::new(members, vec![Team::new(TeamId(1)), Team::new(TeamId(2))])
            .unwrap();
        roster.assign(MemberId(0), TeamId(1)).unwrap();
        roster.assign(MemberId(1), TeamId(1)).unwrap();
        roster.assign(MemberId(2), TeamId(2)).unwrap();
        roster.assign(MemberId(3), TeamId(2)).unwrap();
        roster
    }

    #[test]
    fn test_empty_priorities_rejected() {
        let err = Objective::new(vec![], WeightScheme::Linear).unwrap_err();
        assert_eq!(err, ConfigError::NoPriorities);
    }

    #[test]
    fn test_invalid_priority_rejected() {
        let err = Objective::new(vec![Box::new(Always), Box::new(Broken)], WeightScheme::Linear)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPriority { .. }));
    }

    #[test]
    fn test_always_satisfied_scores_team_count() {
        let roster = roster_with_gender();
        let objective = Objective::new(vec![Box::new(Always)], WeightScheme::Linear).unwrap();
        let candidate = Candidate::from_roster(&roster).unwrap();
        let scorer = Scorer::new(&objective, &roster);
        assert_eq!(scorer.score(&candidate), 2.0);
    }

    #[test]
    fn test_exponential_prefers_first_priority() {
        let roster = roster_with_gender();
        let team = roster.team(TeamId(1)).unwrap();
        let members: Vec<&Member> = roster.members().iter().take(2).collect();

        let first_only = Objective::new(
            vec![Box::new(Always), Box::new(Never), Box::new(Never)],
            WeightScheme::Exponential,
        )
        .unwrap();
        let rest_only = Objective::new(
            vec![Box::new(Never), Box::new(Always), Box::new(Always)],
            WeightScheme::Exponential,
        )
        .unwrap();
        assert!(first_only.team_score(&members, team) > rest_only.team_score(&members, team));

        let first_only_linear = Objective::new(
            vec![Box::new(Always), Box::new(Never), Box::new(Never), Box::new(Never)],
            WeightScheme::Linear,
        )
        .unwrap();
        let rest_only_linear = Objective::new(
            vec![Box::new(Never), Box::new(Always), Box::new(Always), Box::new(Always)],
            WeightScheme::Linear,
        )
        .unwrap();
        assert!(
            first_only_linear.team_score(&members, team)
                < rest_only_linear.team_score(&members, team)
        );
    }

    #[test]
    fn test_tokenization_team_scores() {
        let roster = roster_with_gender();
        let objective = Objective::new(
            vec![Box::new(TokenizationPriority {
                attribute: 0,
                value: 2,
                direction: TokenizationDirection::MinOf,
                threshold: 2,
            })],
            WeightScheme::Linear,
        )
        .unwrap();
        let candidate = Candidate::from_roster(&roster).unwrap();
        let scorer = Scorer::new(&objective, &roster);
        assert_eq!(scorer.team_scores(&candidate), vec![1.0, 0.0]);
        assert_eq!(scorer.score(&candidate), 1.0);
    }

    #[test]
    fn test_empty_team_scores_zero() {
        let roster = roster_with_gender();
        let objective = Objective::new(vec![Box::new(Always)], WeightScheme::Linear).unwrap();
        let scorer = Scorer::new(&objective, &roster);
        assert_eq!(scorer.score_members(TeamId(1), &[]), 0.0);
        assert_eq!(scorer.score_members(TeamId(42), &[MemberId(0)]), 0.0);
    }
}
