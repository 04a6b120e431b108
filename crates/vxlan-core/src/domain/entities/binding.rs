//! Variable bindings passed to templates.
//!
//! A binding maps variable names (`DEVICE`, `DCI_VLAN`, ...) to string
//! values. Bindings are assembled by scope: a broad global binding is
//! overlaid by narrower per-device and per-port entries.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered variable map.
///
/// `BTreeMap` keeps iteration sorted, so two bindings built from the same
/// inputs compare and print identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableBinding {
    variables: BTreeMap<String, String>,
}

impl VariableBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, consuming self and returning the extended binding.
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.variables.insert(key.into(), value.to_string());
    }

    /// Start from `self` (broad scope) and overlay `narrow`.
    ///
    /// Entries in `narrow` win on key collision.
    pub fn overlay(&self, narrow: &VariableBinding) -> VariableBinding {
        let mut merged = self.clone();
        merged.variables.extend(
            narrow
                .variables
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        merged
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for VariableBinding {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut binding = Self::new();
        for (k, v) in iter {
            binding.insert(k, v);
        }
        binding
    }
}

impl fmt::Display for VariableBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (k, v) in &self.variables {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{k}={v}")?;
            first = false;
        }
        Ok(())
    }
}
