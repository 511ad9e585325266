//! Entity types.

use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a [`Member`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct MemberId(pub u64);

/// Identifier of a [`Team`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct TeamId(pub u64);

/// Identifier of a project a team can be associated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct ProjectId(pub u64);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.0)
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// Attribute key (e.g. "gender", "timezone", "skill level").
pub type AttributeId = u32;

/// Attribute value. Attributes are multi-valued, so a member holds a list.
pub type AttributeValue = i32;

/// How a member feels about another member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Relationship {
    /// Wants to be on the same team.
    Friend,
    /// Wants to be on a different team.
    Enemy,
}

/// A person (or any entity) to be assigned to exactly one team.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Member {
    /// Unique id.
    pub id: MemberId,

    /// Display name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,

    /// Attribute values keyed by attribute id.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: HashMap<AttributeId, Vec<AttributeValue>>,

    /// Preferred projects, most preferred first.
    #[cfg_attr(feature = "serde", serde(default))]
    pub project_preferences: Vec<ProjectId>,

    /// Declared relationships towards other members.
    #[cfg_attr(feature = "serde", serde(default))]
    pub relationships: HashMap<MemberId, Relationship>,
}

impl Member {
    /// Creates a member with no attributes, preferences or relationships.
    pub fn new(id: MemberId) -> Self {
        Self {
            id,
            name: String::new(),
            attributes: HashMap::new(),
            project_preferences: Vec::new(),
            relationships: HashMap::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets all values of an attribute, replacing previous ones.
    pub fn with_attribute(mut self, attribute: AttributeId, values: Vec<AttributeValue>) -> Self {
        self.attributes.insert(attribute, values);
        self
    }

    /// Sets the ordered project preferences.
    pub fn with_project_preferences(mut self, projects: Vec<ProjectId>) -> Self {
        self.project_preferences = projects;
        self
    }

    /// Declares a relationship towards another member.
    pub fn with_relationship(mut self, other: MemberId, relationship: Relationship) -> Self {
        self.relationships.insert(other, relationship);
        self
    }

    /// Values of `attribute`, empty if the member has none.
    pub fn values(&self, attribute: AttributeId) -> &[AttributeValue] {
        self.attributes
            .get(&attribute)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether any value of `attribute` equals `value`.
    pub fn has_value(&self, attribute: AttributeId, value: AttributeValue) -> bool {
        self.values(attribute).contains(&value)
    }

    /// 0-based rank of `project` in the preferences, if listed.
    pub fn preference_rank(&self, project: ProjectId) -> Option<usize> {
        self.project_preferences.iter().position(|&p| p == project)
    }
}

/// Comparison used by a [`Requirement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RequirementOperator {
    /// Value equals the requirement value.
    Exactly,
    /// Value is strictly below the requirement value.
    LessThan,
    /// Value is strictly above the requirement value.
    MoreThan,
}

/// A team-level constraint on member attributes.
///
/// A member meets the requirement when any of its values for
/// `attribute` satisfies `operator` against `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Requirement {
    /// Attribute inspected.
    pub attribute: AttributeId,
    /// Comparison.
    pub operator: RequirementOperator,
    /// Right-hand side of the comparison.
    pub value: AttributeValue,
}

impl Requirement {
    /// Creates a requirement.
    pub fn new(
        attribute: AttributeId,
        operator: RequirementOperator,
        value: AttributeValue,
    ) -> Self {
        Self {
            attribute,
            operator,
            value,
        }
    }

    /// Whether `member` meets this requirement.
    pub fn is_met_by(&self, member: &Member) -> bool {
        member.values(self.attribute).iter().any(|&v| match self.operator {
            RequirementOperator::Exactly => v == self.value,
            RequirementOperator::LessThan => v < self.value,
            RequirementOperator::MoreThan => v > self.value,
        })
    }
}

/// A capacity-bounded group of members.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Team {
    /// Unique id.
    pub id: TeamId,

    /// Display name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,

    /// Attribute requirements the team wants met.
    #[cfg_attr(feature = "serde", serde(default))]
    pub requirements: Vec<Requirement>,

    /// Project the team works on.
    #[cfg_attr(feature = "serde", serde(default))]
    pub project: Option<ProjectId>,

    /// Locked teams keep their members untouched.
    #[cfg_attr(feature = "serde", serde(default))]
    pub locked: bool,

    /// Maximum number of members. `None` means unbounded.
    #[cfg_attr(feature = "serde", serde(default))]
    pub capacity: Option<usize>,
}

impl Team {
    /// Creates an unlocked, unbounded team without requirements.
    pub fn new(id: TeamId) -> Self {
        Self {
            id,
            name: String::new(),
            requirements: Vec::new(),
            project: None,
            locked: false,
            capacity: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a requirement.
    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    /// Associates a project.
    pub fn with_project(mut self, project: ProjectId) -> Self {
        self.project = Some(project);
        self
    }

    /// Sets the lock flag.
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Sets the maximum size.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }
}
