//! Name → operator lookup.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::local_max::{LocalMax, LocalMaxDoubleRandom, LocalMaxRandom};
use super::robinhood::{Robinhood, RobinhoodHolistic};
use super::slice::{GreedyRandomLocalMax, RandomSlice};
use super::swap::RandomSwap;
use super::types::MutationOperator;
use crate::error::ConfigError;

/// Names of the built-in operators. They cannot be reused by custom ones.
pub const BUILTIN_MUTATIONS: [&str; 8] = [
    "random_swap",
    "local_max",
    "local_max_random",
    "local_max_double_random",
    "robinhood",
    "robinhood_holistic",
    "random_slice",
    "greedy_random_local_max",
];

/// Registry of mutation operators, keyed by [`MutationOperator::name`].
///
/// Always starts with the eight built-in operators. Custom operators can
/// be added under any other name.
///
/// # Examples
///
/// ```
/// use u_teamform::mutation::{MutationRegistry, RandomSwap};
/// use u_teamform::error::ConfigError;
///
/// let mut registry = MutationRegistry::new();
/// assert!(registry.get("local_max").is_some());
///
/// let err = registry.register(RandomSwap).unwrap_err();
/// assert_eq!(err, ConfigError::ReservedName("random_swap".into()));
/// ```
pub struct MutationRegistry {
    operators: BTreeMap<String, Arc<dyn MutationOperator>>,
}

impl MutationRegistry {
    /// Creates a registry holding the built-in operators.
    pub fn new() -> Self {
        let builtins: [Arc<dyn MutationOperator>; 8] = [
            Arc::new(RandomSwap),
            Arc::new(LocalMax),
            Arc::new(LocalMaxRandom),
            Arc::new(LocalMaxDoubleRandom),
            Arc::new(Robinhood),
            Arc::new(RobinhoodHolistic),
            Arc::new(RandomSlice),
            Arc::new(GreedyRandomLocalMax),
        ];
        let operators = builtins
            .into_iter()
            .map(|op| (op.name().to_string(), op))
            .collect();
        Self { operators }
    }

    /// Adds a custom operator.
    ///
    /// Fails with [`ConfigError::ReservedName`] for a built-in name and
    /// [`ConfigError::DuplicateName`] if the name is already taken.
    pub fn register<O: MutationOperator + 'static>(
        &mut self,
        operator: O,
    ) -> Result<(), ConfigError> {
        let name = operator.name().to_string();
        if BUILTIN_MUTATIONS.contains(&name.as_str()) {
            return Err(ConfigError::ReservedName(name));
        }
        if self.operators.contains_key(&name) {
            return Err(ConfigError::DuplicateName(name));
        }
        self.operators.insert(name, Arc::new(operator));
        Ok(())
    }

    /// Looks up an operator.
    pub fn get(&self, name: &str) -> Option<Arc<dyn MutationOperator>> {
        self.operators.get(name).cloned()
    }

    /// Like [`get`](Self::get), failing with [`ConfigError::UnknownMutation`].
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn MutationOperator>, ConfigError> {
        self.get(name)
            .ok_or_else(|| ConfigError::UnknownMutation(name.to_string()))
    }

    /// All registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.operators.keys().map(String::as_str)
    }

    /// Number of registered operators.
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// Always `false`: the built-ins are always present.
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl Default for MutationRegistry {
    fn default() -> Self {
        Self::new()
    }
}
