//! Configuration for the verifier.

use crate::core::{DEFAULT_THRESHOLD, VerifyError};
use serde::{Deserialize, Serialize};

/// Options controlling how observed phases are judged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerifierConfig {
    /// Largest tolerated |observed − expected| flip delta (default: 0.05).
    /// A difference equal to the threshold still passes.
    pub threshold: f64,

    /// Confirm at construction that the simulator emits signals in the
    /// expectation's order (default: true).
    pub check_signal_order: bool,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            check_signal_order: true,
        }
    }
}

impl VerifierConfig {
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold, ..Self::default() }
    }

    /// Parses a configuration from TOML text. Missing keys keep their defaults.
    ///
    /// ```
    /// use sfq_verify::VerifierConfig;
    ///
    /// let config = VerifierConfig::from_toml_str("threshold = 0.1").unwrap();
    /// assert_eq!(config.threshold, 0.1);
    /// assert!(config.check_signal_order);
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, VerifyError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects thresholds that cannot be compared meaningfully.
    pub fn validate(&self) -> Result<(), VerifyError> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(VerifyError::InvalidConfiguration {
                message: format!("threshold must be a finite, non-negative flip count, got {}", self.threshold),
            });
        }
        Ok(())
    }
}
