// src/core/parameters.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// An immutable assignment of numeric values to circuit parameters.
///
/// Parameters missing from the mapping take whatever default the simulator
/// uses; names are not checked here. Iteration is ordered by name so that the
/// same mapping always reaches the simulator in the same form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters {
    values: BTreeMap<String, f64>,
}

impl Parameters {
    /// The empty mapping: every parameter at its simulator default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of this mapping with `name` set to `value`.
    pub fn with(&self, name: impl Into<String>, value: f64) -> Self {
        let mut values = self.values.clone();
        values.insert(name.into(), value);
        Self { values }
    }

    /// Value assigned to `name`, or `None` to use the simulator default.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Number of explicitly assigned parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when every parameter is left at its default.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(name, value)` pairs ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Parameter names, in the same order as `values`.
    pub fn names(&self) -> Vec<&str> {
        self.values.keys().map(String::as_str).collect()
    }

    /// Parameter values, in the same order as `names`.
    pub fn values(&self) -> Vec<f64> {
        self.values.values().copied().collect()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.values.is_empty() {
            return write!(f, "{{defaults}}");
        }
        let rendered: Vec<String> = self.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        write!(f, "{{{}}}", rendered.join(", "))
    }
}
