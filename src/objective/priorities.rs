//! Built-in priorities.
//!
//! | Priority | Satisfied when |
//! |---|---|
//! | [`RequirementPriority`] | every team requirement is met by some member |
//! | [`DiversityPriority`] | an attribute is spread out (or concentrated) |
//! | [`TokenizationPriority`] | a value appears at least / at most N times |
//! | [`ProjectPreferencePriority`] | members ranked the team's project highly |
//! | [`SocialPreferencePriority`] | all friend/enemy declarations are honored |

use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::Priority;
use crate::error::ConfigError;
use crate::model::{AttributeId, AttributeValue, Member, Relationship, Team};

const EPSILON: f64 = 1e-9;

/// Fraction of the team's requirements met by at least one member.
///
/// Only full satisfaction counts: a team with three requirements of which
/// two are met scores `2/3` but is not satisfied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequirementPriority;

impl Priority for RequirementPriority {
    fn name(&self) -> &str {
        "requirement"
    }

    fn satisfaction(&self, members: &[&Member], team: &Team) -> f64 {
        if team.requirements.is_empty() {
            return 1.0;
        }
        let met = team
            .requirements
            .iter()
            .filter(|req| members.iter().any(|m| req.is_met_by(m)))
            .count();
        met as f64 / team.requirements.len() as f64
    }

    fn is_satisfied(&self, satisfaction: f64) -> bool {
        satisfaction >= 1.0 - EPSILON
    }
}

/// Whether a [`DiversityPriority`] wants many or few distinct values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DiversityStrategy {
    /// Prefer teams whose members hold different values.
    Diversify,
    /// Prefer teams whose members share values.
    Concentrate,
}

/// Spread of one attribute across a team.
///
/// With `n` members holding `u` distinct values, `Diversify` scores
/// `(u - 1) / (n - 1)` and `Concentrate` scores `(n - u) / (n - 1)`. A
/// single-member team scores 1 under both strategies. Members without the
/// attribute do not contribute a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiversityPriority {
    /// Attribute inspected.
    pub attribute: AttributeId,
    /// Direction of the preference.
    pub strategy: DiversityStrategy,
}

impl Priority for DiversityPriority {
    fn name(&self) -> &str {
        "diversity"
    }

    fn satisfaction(&self, members: &[&Member], _team: &Team) -> f64 {
        let n = members.len();
        if n <= 1 {
            return 1.0;
        }
        let distinct: HashSet<AttributeValue> = members
            .iter()
            .flat_map(|m| m.values(self.attribute).iter().copied())
            .collect();
        let u = distinct.len().clamp(1, n);
        let spread = (u - 1) as f64 / (n - 1) as f64;
        match self.strategy {
            DiversityStrategy::Diversify => spread,
            DiversityStrategy::Concentrate => 1.0 - spread,
        }
    }
}

/// Direction of a [`TokenizationPriority`] threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TokenizationDirection {
    /// At least `threshold` members must carry the value.
    MinOf,
    /// At most `threshold` members may carry the value.
    MaxOf,
}

/// Counts the members carrying a specific attribute value.
///
/// Typical use: "at least two members with gender value 2 in every
/// team", so nobody is the only one of their kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizationPriority {
    /// Attribute inspected.
    pub attribute: AttributeId,
    /// Value counted.
    pub value: AttributeValue,
    /// Whether `threshold` is a lower or an upper bound.
    pub direction: TokenizationDirection,
    /// The bound.
    pub threshold: usize,
}

impl Priority for TokenizationPriority {
    fn name(&self) -> &str {
        "tokenization"
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.direction == TokenizationDirection::MinOf && self.threshold == 0 {
            return Err(ConfigError::invalid_priority(
                self.name(),
                "min_of threshold must be at least 1",
            ));
        }
        Ok(())
    }

    fn satisfaction(&self, members: &[&Member], _team: &Team) -> f64 {
        let count = members
            .iter()
            .filter(|m| m.has_value(self.attribute, self.value))
            .count();
        let ok = match self.direction {
            TokenizationDirection::MinOf => count >= self.threshold,
            TokenizationDirection::MaxOf => count <= self.threshold,
        };
        if ok {
            1.0
        } else {
            0.0
        }
    }
}

/// How well the team's project matches its members' preferences.
///
/// A member whose preference list has the team's project at 0-based rank
/// `r < max_preferences` contributes `(max_preferences - r) / max_preferences`;
/// anyone else contributes 0. The score is the mean over members. Teams
/// without a project score 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectPreferencePriority {
    /// How many leading preferences count.
    pub max_preferences: usize,
}

impl Priority for ProjectPreferencePriority {
    fn name(&self) -> &str {
        "project_preference"
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_preferences == 0 {
            return Err(ConfigError::invalid_priority(
                self.name(),
                "max_preferences must be at least 1",
            ));
        }
        Ok(())
    }

    fn satisfaction(&self, members: &[&Member], team: &Team) -> f64 {
        let Some(project) = team.project else {
            return 1.0;
        };
        if members.is_empty() {
            return 0.0;
        }
        let max = self.max_preferences as f64;
        let total: f64 = members
            .iter()
            .filter_map(|m| m.preference_rank(project))
            .filter(|&rank| rank < self.max_preferences)
            .map(|rank| (max - rank as f64) / max)
            .sum();
        total / members.len() as f64
    }
}

/// Honors friend and enemy declarations.
///
/// Each declaration of a team member counts once: a friend declaration is
/// honored when the friend is on the same team, an enemy declaration when
/// the enemy is not. The score is the honored fraction, 1 when nobody on
/// the team declared anything. Only full satisfaction counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SocialPreferencePriority;

impl Priority for SocialPreferencePriority {
    fn name(&self) -> &str {
        "social_preference"
    }

    fn satisfaction(&self, members: &[&Member], _team: &Team) -> f64 {
        let on_team: HashSet<_> = members.iter().map(|m| m.id).collect();
        let mut declared = 0usize;
        let mut honored = 0usize;
        for member in members {
            for (other, relationship) in &member.relationships {
                declared += 1;
                let together = on_team.contains(other);
                let ok = match relationship {
                    Relationship::Friend => together,
                    Relationship::Enemy => !together,
                };
                if ok {
                    honored += 1;
                }
            }
        }
        if declared == 0 {
            1.0
        } else {
            honored as f64 / declared as f64
        }
    }

    fn is_satisfied(&self, satisfaction: f64) -> bool {
        satisfaction >= 1.0 - EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MemberId, ProjectId, Requirement, RequirementOperator, TeamId};

    fn member(id: u64) -> Member {
        Member::new(MemberId(id))
    }

    fn refs(members: &[Member]) -> Vec<&Member> {
        members.iter().collect()
    }

    #[test]
    fn test_requirement_without_requirements_is_satisfied() {
        let members = vec![member(1)];
        let team = Team::new(TeamId(1));
        let s = RequirementPriority.satisfaction(&refs(&members), &team);
        assert!((s - 1.0).abs() < 1e-12);
        assert!(RequirementPriority.is_satisfied(s));
    }

    #[test]
    fn test_requirement_partial() {
        let members = vec![member(1).with_attribute(1, vec![5]), member(2)];
        let team = Team::new(TeamId(1))
            .with_requirement(Requirement::new(1, RequirementOperator::Exactly, 5))
            .with_requirement(Requirement::new(2, RequirementOperator::MoreThan, 0));
        let s = RequirementPriority.satisfaction(&refs(&members), &team);
        assert!((s - 0.5).abs() < 1e-12);
        assert!(!RequirementPriority.is_satisfied(s));
    }

    #[test]
    fn test_diversity_strategies() {
        let team = Team::new(TeamId(1));
        let mixed = vec![
            member(1).with_attribute(3, vec![1]),
            member(2).with_attribute(3, vec![2]),
            member(3).with_attribute(3, vec![3]),
        ];
        let same = vec![
            member(1).with_attribute(3, vec![1]),
            member(2).with_attribute(3, vec![1]),
            member(3).with_attribute(3, vec![1]),
        ];
        let diversify = DiversityPriority {
            attribute: 3,
            strategy: DiversityStrategy::Diversify,
        };
        let concentrate = DiversityPriority {
            attribute: 3,
            strategy: DiversityStrategy::Concentrate,
        };

        assert!((diversify.satisfaction(&refs(&mixed), &team) - 1.0).abs() < 1e-12);
        assert!(diversify.satisfaction(&refs(&same), &team).abs() < 1e-12);
        assert!(concentrate.satisfaction(&refs(&mixed), &team).abs() < 1e-12);
        assert!((concentrate.satisfaction(&refs(&same), &team) - 1.0).abs() < 1e-12);

        let single = vec![member(1)];
        assert!((diversify.satisfaction(&refs(&single), &team) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_tokenization_min_and_max() {
        let team = Team::new(TeamId(1));
        let members = vec![
            member(1).with_attribute(0, vec![2]),
            member(2).with_attribute(0, vec![1]),
            member(3).with_attribute(0, vec![2]),
        ];
        let min_of = |threshold| TokenizationPriority {
            attribute: 0,
            value: 2,
            direction: TokenizationDirection::MinOf,
            threshold,
        };
        let max_of = |threshold| TokenizationPriority {
            attribute: 0,
            value: 2,
            direction: TokenizationDirection::MaxOf,
            threshold,
        };

        assert_eq!(min_of(2).satisfaction(&refs(&members), &team), 1.0);
        assert_eq!(min_of(3).satisfaction(&refs(&members), &team), 0.0);
        assert_eq!(max_of(2).satisfaction(&refs(&members), &team), 1.0);
        assert_eq!(max_of(1).satisfaction(&refs(&members), &team), 0.0);
    }

    #[test]
    fn test_tokenization_validation() {
        let bad = TokenizationPriority {
            attribute: 0,
            value: 2,
            direction: TokenizationDirection::MinOf,
            threshold: 0,
        };
        assert!(matches!(
            bad.validate(),
            Err(ConfigError::InvalidPriority { .. })
        ));
        let fine = TokenizationPriority {
            direction: TokenizationDirection::MaxOf,
            ..bad
        };
        assert!(fine.validate().is_ok());
    }

    #[test]
    fn test_project_preference() {
        let priority = ProjectPreferencePriority { max_preferences: 2 };
        let team = Team::new(TeamId(1)).with_project(ProjectId(7));
        let members = vec![
            member(1).with_project_preferences(vec![ProjectId(7)]),
            member(2).with_project_preferences(vec![ProjectId(1), ProjectId(7)]),
            member(3).with_project_preferences(vec![ProjectId(1), ProjectId(2), ProjectId(7)]),
        ];
        // (1.0 + 0.5 + 0.0) / 3
        let s = priority.satisfaction(&refs(&members), &team);
        assert!((s - 0.5).abs() < 1e-12);

        let no_project = Team::new(TeamId(2));
        assert_eq!(priority.satisfaction(&refs(&members), &no_project), 1.0);

        assert!(ProjectPreferencePriority { max_preferences: 0 }
            .validate()
            .is_err());
    }

    #[test]
    fn test_social_preference() {
        let team = Team::new(TeamId(1));
        let members = vec![
            member(1)
                .with_relationship(MemberId(2), Relationship::Friend)
                .with_relationship(MemberId(9), Relationship::Friend),
            member(2).with_relationship(MemberId(1), Relationship::Enemy),
        ];
        // friend 2: honored, friend 9: not, enemy 1: not
        let s = SocialPreferencePriority.satisfaction(&refs(&members), &team);
        assert!((s - 1.0 / 3.0).abs() < 1e-12);
        assert!(!SocialPreferencePriority.is_satisfied(s));

        let loners = vec![member(3)];
        assert_eq!(SocialPreferencePriority.satisfaction(&refs(&loners), &team), 1.0);
    }
}
