// src/core/signals.rs

use super::error::VerifyError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// The ordered set of circuit signals whose phases are compared.
///
/// Position in the set is the signal's index: sample vectors, expected vectors
/// and reported failure points all use the same ordering. The set is fixed once
/// built; a verification session never reorders it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct SignalSet {
    names: Vec<String>,
}

impl TryFrom<Vec<String>> for SignalSet {
    type Error = VerifyError;

    fn try_from(names: Vec<String>) -> Result<Self, VerifyError> {
        SignalSet::new(names)
    }
}

impl From<SignalSet> for Vec<String> {
    fn from(set: SignalSet) -> Self {
        set.names
    }
}

impl SignalSet {
    /// Builds a signal set from names in emission order.
    ///
    /// # Returns
    /// * `Err(VerifyError::InvalidExpectation)` if `names` is empty, contains an
    ///   empty name, or repeats a name.
    pub fn new<I, S>(names: I) -> Result<Self, VerifyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(VerifyError::InvalidExpectation {
                message: "at least one tracked signal is required".to_string(),
            });
        }

        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if name.is_empty() {
                return Err(VerifyError::InvalidExpectation {
                    message: "signal names must not be empty".to_string(),
                });
            }
            if !seen.insert(name.as_str()) {
                return Err(VerifyError::InvalidExpectation {
                    message: format!("signal '{}' is tracked more than once", name),
                });
            }
        }

        Ok(Self { names })
    }

    /// Number of tracked signals.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false for a constructed set; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name of the signal at `index`.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Position of `name` in emission order.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Signal names in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Signal names in emission order, as owned strings.
    pub fn as_slice(&self) -> &[String] {
        &self.names
    }
}

impl fmt::Display for SignalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_preserved() -> Result<(), VerifyError> {
        let set = SignalSet::new(["P(XJ1)", "P(XJ2)", "P(XOUT)"])?;
        assert_eq!(set.len(), 3);
        assert_eq!(set.index_of("P(XOUT)"), Some(2));
        assert_eq!(set.name(1), Some("P(XJ2)"));
        assert_eq!(set.to_string(), "[P(XJ1), P(XJ2), P(XOUT)]");
        Ok(())
    }

    #[test]
    fn test_deserialize_goes_through_validation() -> Result<(), VerifyError> {
        #[derive(serde::Deserialize)]
        struct Holder {
            names: SignalSet,
        }

        assert!(toml::from_str::<Holder>("names = ['a', 'a']").is_err());
        assert!(toml::from_str::<Holder>("names = []").is_err());
        assert!(toml::from_str::<Holder>("names = ['a', '']").is_err());

        let holder: Holder = toml::from_str("names = ['P(XJ1)', 'P(XJ2)']")?;
        assert_eq!(holder.names.index_of("P(XJ2)"), Some(1));
        Ok(())
    }

    #[test]
    fn test_rejects_empty_and_duplicates() {
        assert!(SignalSet::new(Vec::<String>::new()).is_err());
        assert!(SignalSet::new(["a", ""]).is_err());
        assert!(matches!(
            SignalSet::new(["a", "b", "a"]),
            Err(VerifyError::InvalidExpectation { .. })
        ));
    }
}
