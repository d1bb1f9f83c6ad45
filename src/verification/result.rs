// src/verification/result.rs
use crate::core::{SignalSet, VerifyError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of verifying one parameter assignment.
///
/// A failure records only the first divergence in time order: the exact
/// expectation time at which it was seen and the signals (by index, ascending)
/// whose flip delta exceeded the threshold there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawVerifierResult")]
pub enum VerifierResult {
    /// Every checked time point was within threshold.
    Success,
    /// The first checked time point that diverged.
    Failure {
        /// Expectation time at which divergence was observed.
        time: f64,
        /// Indices into the tracked signal set; never empty.
        signals: Vec<usize>,
    },
}

/// Unchecked serialized form; a failure must name at least one signal.
#[derive(Deserialize)]
enum RawVerifierResult {
    Success,
    Failure { time: f64, signals: Vec<usize> },
}

impl TryFrom<RawVerifierResult> for VerifierResult {
    type Error = VerifyError;

    fn try_from(raw: RawVerifierResult) -> Result<Self, VerifyError> {
        match raw {
            RawVerifierResult::Success => Ok(VerifierResult::Success),
            RawVerifierResult::Failure { signals, .. } if signals.is_empty() => {
                Err(VerifyError::InvalidResult {
                    message: "a failed verification must name at least one signal".to_string(),
                })
            }
            RawVerifierResult::Failure { time, signals } => Ok(VerifierResult::Failure { time, signals }),
        }
    }
}

impl VerifierResult {
    pub(crate) fn failure(time: f64, signals: Vec<usize>) -> Self {
        debug_assert!(!signals.is_empty(), "a failure must name at least one signal");
        VerifierResult::Failure { time, signals }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, VerifierResult::Success)
    }

    /// Time of the first divergence, or `None` on success.
    pub fn failure_time(&self) -> Option<f64> {
        match self {
            VerifierResult::Success => None,
            VerifierResult::Failure { time, .. } => Some(*time),
        }
    }

    /// Signal indices that diverged, or `None` on success.
    pub fn failure_point(&self) -> Option<&[usize]> {
        match self {
            VerifierResult::Success => None,
            VerifierResult::Failure { signals, .. } => Some(signals.as_slice()),
        }
    }

    /// Renders the outcome with failing signals shown by name.
    pub fn describe(&self, names: &SignalSet) -> String {
        match self {
            VerifierResult::Success => "PASS".to_string(),
            VerifierResult::Failure { time, signals } => {
                let failing: Vec<String> = signals
                    .iter()
                    .map(|&i| names.name(i).map_or_else(|| format!("#{}", i), str::to_string))
                    .collect();
                format!("FAIL at t={} on signals [{}]", time, failing.join(", "))
            }
        }
    }
}

impl From<VerifierResult> for bool {
    fn from(result: VerifierResult) -> bool {
        result.is_success()
    }
}

impl From<&VerifierResult> for bool {
    fn from(result: &VerifierResult) -> bool {
        result.is_success()
    }
}

impl fmt::Display for VerifierResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifierResult::Success => write!(f, "PASS"),
            VerifierResult::Failure { time, signals } => {
                let indices: Vec<String> = signals.iter().map(ToString::to_string).collect();
                write!(f, "FAIL at t={} on signals [{}]", time, indices.join(", "))
            }
        }
    }
}
