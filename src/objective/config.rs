//! Declarative priority configuration.
//!
//! [`PriorityConfig`] is the closed set of built-in priorities, resolved by
//! variant rather than by runtime type inspection. With the `serde`
//! feature it deserializes from an internally tagged map such as
//! `{"kind": "tokenization", "attribute": 0, "value": 2, "direction": "min_of", "threshold": 2}`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::priorities::{
    DiversityPriority, DiversityStrategy, ProjectPreferencePriority, RequirementPriority,
    SocialPreferencePriority, TokenizationDirection, TokenizationPriority,
};
use super::types::Priority;
use crate::error::ConfigError;
use crate::model::{AttributeId, AttributeValue};

/// Parameters of one built-in priority.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum PriorityConfig {
    /// See [`RequirementPriority`].
    Requirement,

    /// See [`DiversityPriority`].
    Diversity {
        /// Attribute inspected.
        attribute: AttributeId,
        /// Diversify or concentrate.
        strategy: DiversityStrategy,
    },

    /// See [`TokenizationPriority`].
    Tokenization {
        /// Attribute inspected.
        attribute: AttributeId,
        /// Value counted.
        value: AttributeValue,
        /// Lower or upper bound.
        direction: TokenizationDirection,
        /// The bound.
        threshold: usize,
    },

    /// See [`ProjectPreferencePriority`].
    ProjectPreference {
        /// How many leading preferences count.
        max_preferences: usize,
    },

    /// See [`SocialPreferencePriority`].
    SocialPreference,
}

impl PriorityConfig {
    /// Name of the priority this configuration builds.
    pub fn kind(&self) -> &'static str {
        match self {
            PriorityConfig::Requirement => "requirement",
            PriorityConfig::Diversity { .. } => "diversity",
            PriorityConfig::Tokenization { .. } => "tokenization",
            PriorityConfig::ProjectPreference { .. } => "project_preference",
            PriorityConfig::SocialPreference => "social_preference",
        }
    }

    /// Instantiates and validates the priority.
    pub fn build(&self) -> Result<Box<dyn Priority>, ConfigError> {
        let priority: Box<dyn Priority> = match *self {
            PriorityConfig::Requirement => Box::new(RequirementPriority),
            PriorityConfig::Diversity {
                attribute,
                strategy,
            } => Box::new(DiversityPriority {
                attribute,
                strategy,
            }),
            PriorityConfig::Tokenization {
                attribute,
                value,
                direction,
                threshold,
            } => Box::new(TokenizationPriority {
                attribute,
                value,
                direction,
                threshold,
            }),
            PriorityConfig::ProjectPreference { max_preferences } => {
                Box::new(ProjectPreferencePriority { max_preferences })
            }
            PriorityConfig::SocialPreference => Box::new(SocialPreferencePriority),
        };
        priority.validate()?;
        Ok(priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_matches_kind() {
        let configs = [
            PriorityConfig::Requirement,
            PriorityConfig::Diversity {
                attribute: 1,
                strategy: DiversityStrategy::Diversify,
            },
            PriorityConfig::Tokenization {
                attribute: 0,
                value: 2,
                direction: TokenizationDirection::MinOf,
                threshold: 2,
            },
            PriorityConfig::ProjectPreference { max_preferences: 3 },
            PriorityConfig::SocialPreference,
        ];
        for config in &configs {
            let priority = config.build().unwrap();
            assert_eq!(priority.name(), config.kind());
        }
    }

    #[test]
    fn test_build_validates() {
        let config = PriorityConfig::ProjectPreference { max_preferences: 0 };
        assert!(matches!(
            config.build(),
            Err(ConfigError::InvalidPriority { .. })
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_tagged() {
        let json = r#"[
            {"kind": "tokenization", "attribute": 0, "value": 2, "direction": "min_of", "threshold": 2},
            {"kind": "diversity", "attribute": 4, "strategy": "concentrate"},
            {"kind": "social_preference"}
        ]"#;
        let configs: Vec<PriorityConfig> = serde_json::from_str(json).unwrap();
        assert_eq!(
            configs[0],
            PriorityConfig::Tokenization {
                attribute: 0,
                value: 2,
                direction: TokenizationDirection::MinOf,
                threshold: 2,
            }
        );
        assert_eq!(configs[2], PriorityConfig::SocialPreference);
    }
}
