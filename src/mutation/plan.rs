//! Mutation plans: which operators run how often per parent.

use std::fmt;
use std::sync::Arc;

use super::registry::MutationRegistry;
use super::types::MutationOperator;
use crate::error::ConfigError;

/// One operator with its per-parent call count.
#[derive(Clone)]
pub struct PlanEntry {
    operator: Arc<dyn MutationOperator>,
    count: usize,
}

impl PlanEntry {
    /// The operator.
    pub fn operator(&self) -> &dyn MutationOperator {
        self.operator.as_ref()
    }

    /// How many children the operator derives from each parent.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl fmt::Debug for PlanEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanEntry")
            .field("operator", &self.operator.name())
            .field("count", &self.count)
            .finish()
    }
}

/// Ordered list of (operator, count) pairs.
///
/// Every generation, each retained candidate spawns `count` children per
/// entry, in entry order. The counts must add up to the search's
/// `max_spread`; [`SearchConfig::new`](crate::search::SearchConfig::new)
/// checks this through [`validate`](Self::validate).
///
/// # Examples
///
/// ```
/// use u_teamform::mutation::{LocalMax, MutationPlan, MutationRegistry, RandomSwap};
///
/// let plan = MutationPlan::new().with(RandomSwap, 8).with(LocalMax, 2);
/// assert_eq!(plan.total(), 10);
///
/// let registry = MutationRegistry::new();
/// let same = MutationPlan::from_names(&registry, &[("random_swap", 8), ("local_max", 2)]).unwrap();
/// assert_eq!(same.total(), 10);
/// ```
#[derive(Clone, Default, Debug)]
pub struct MutationPlan {
    entries: Vec<PlanEntry>,
}

impl MutationPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an operator.
    pub fn with<O: MutationOperator + 'static>(self, operator: O, count: usize) -> Self {
        self.with_shared(Arc::new(operator), count)
    }

    /// Appends an already shared operator.
    pub fn with_shared(mut self, operator: Arc<dyn MutationOperator>, count: usize) -> Self {
        self.entries.push(PlanEntry { operator, count });
        self
    }

    /// Builds a plan from operator names.
    ///
    /// Fails with [`ConfigError::UnknownMutation`] on a name the registry
    /// does not hold.
    pub fn from_names<S: AsRef<str>>(
        registry: &MutationRegistry,
        entries: &[(S, usize)],
    ) -> Result<Self, ConfigError> {
        let mut plan = Self::new();
        for (name, count) in entries {
            plan = plan.with_shared(registry.resolve(name.as_ref())?, *count);
        }
        Ok(plan)
    }

    /// The entries, in order.
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Whether the plan has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks that the plan is non-empty, has no zero counts, and that
    /// its counts add up to `max_spread`.
    pub fn validate(&self, max_spread: usize) -> Result<(), ConfigError> {
        if self.entries.is_empty() {
            return Err(ConfigError::EmptyPlan);
        }
        if let Some(entry) = self.entries.iter().find(|e| e.count == 0) {
            return Err(ConfigError::ZeroCount(entry.operator.name().to_string()));
        }
        let total = self.total();
        if total != max_spread {
            return Err(ConfigError::PlanMismatch {
                expected: max_spread,
                actual: total,
            });
        }
        Ok(())
    }
}
