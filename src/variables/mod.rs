// variables/mod.rs
// Shared variable namespace that submodels publish into and read from
//
// This module handles:
// - Typed variable names and their exact string keys (keys.rs)
// - The name -> expression map shared across submodels
// - Lookups that fail loudly when an upstream submodel did not publish

pub mod keys;

pub use keys::*;

use crate::error::{KineticsError, Result};
use crate::expression::Expr;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Map from variable name to expression. Ordered so serialised and debug
/// output are stable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variables {
    entries: BTreeMap<String, Expr>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Expr> {
        self.entries.get(name)
    }

    pub fn get_key(&self, key: &VariableKey) -> Option<&Expr> {
        self.entries.get(&key.to_string())
    }

    /// Lookup that treats absence as an upstream wiring bug.
    pub fn require(&self, key: &VariableKey) -> Result<&Expr> {
        let name = key.to_string();
        self.entries
            .get(&name)
            .ok_or(KineticsError::MissingVariable { name })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn contains_key(&self, key: &VariableKey) -> bool {
        self.contains(&key.to_string())
    }

    /// Insert under a raw name, returning the replaced expression if any.
    pub fn insert(&mut self, name: impl Into<String>, expr: Expr) -> Option<Expr> {
        self.entries.insert(name.into(), expr)
    }

    /// Insert under a typed key.
    pub fn publish(&mut self, key: &VariableKey, expr: Expr) -> Option<Expr> {
        self.insert(key.to_string(), expr)
    }

    pub fn remove(&mut self, name: &str) -> Option<Expr> {
        self.entries.remove(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Expr)> {
        self.entries.iter().map(|(name, expr)| (name.as_str(), expr))
    }
}

impl FromIterator<(String, Expr)> for Variables {
    fn from_iter<I: IntoIterator<Item = (String, Expr)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<(String, Expr)> for Variables {
    fn extend<I: IntoIterator<Item = (String, Expr)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl IntoIterator for Variables {
    type Item = (String, Expr);
    type IntoIter = std::collections::btree_map::IntoIter<String, Expr>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Domain, Electrode};
    use crate::reactions::Reaction;

    #[test]
    fn require_reports_the_missing_name() {
        let variables = Variables::new();
        let key = VariableKey::interfacial(Electrode::Positive, Reaction::Sei);
        match variables.require(&key) {
            Err(KineticsError::MissingVariable { name }) => {
                assert_eq!(name, "Positive electrode SEI interfacial current density")
            }
            other => panic!("expected MissingVariable, got {other:?}"),
        }
    }

    #[test]
    fn typed_and_raw_names_address_the_same_entry() {
        let mut variables = Variables::new();
        let key = VariableKey::x_averaged_interfacial(Electrode::Negative, Reaction::Main);
        let j = Expr::scalar_variable("j_n_av");
        assert!(variables.publish(&key, j.clone()).is_none());

        assert!(variables.contains("X-averaged negative electrode interfacial current density"));
        assert_eq!(variables.require(&key).unwrap(), &j);
        assert_eq!(variables.get_key(&key), Some(&j));
    }

    #[test]
    fn insert_replaces_and_returns_previous() {
        let mut variables = Variables::new();
        let first = Expr::variable("a", Domain::Separator);
        let second = Expr::variable("b", Domain::Separator);
        variables.insert("x", first.clone());
        assert_eq!(variables.insert("x", second.clone()), Some(first));
        assert_eq!(variables.len(), 1);
        assert_eq!(variables.get("x"), Some(&second));
    }

    #[test]
    fn names_iterate_in_sorted_order() {
        let variables: Variables = ["b", "c", "a"]
            .into_iter()
            .map(|name| (name.to_string(), Expr::scalar_variable(name)))
            .collect();
        assert_eq!(variables.names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }
}
