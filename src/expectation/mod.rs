// src/expectation/mod.rs

//! Expected phase-flip sequences.
//!
//! An expectation is an ordered list of `(time, flips)` pairs over a fixed
//! `SignalSet`. The first pair is the calibration point: it anchors the
//! comparison and is never checked itself. Parsing these from spec files is
//! left to the caller; this module only holds and validates the data.

use crate::core::{SignalSet, VerifyError};
use serde::{Deserialize, Serialize};

/// Source of expected sample times and phase-flip vectors.
pub trait ExpectationSource {
    /// The tracked signals; defines the order of every vector in `data()`.
    fn names(&self) -> &SignalSet;

    /// Sample times, strictly increasing. Index 0 is the calibration point.
    fn time(&self) -> &[f64];

    /// One expected flip vector per entry of `time()`.
    fn data(&self) -> &[Vec<f64>];

    fn len(&self) -> usize {
        self.time().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `(time, expected)` pair at `index`.
    fn point(&self, index: usize) -> Option<(f64, &[f64])> {
        let time = *self.time().get(index)?;
        let data = self.data().get(index)?;
        Some((time, data.as_slice()))
    }
}

/// An in-memory, validated expectation sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawExpectationSequence")]
pub struct ExpectationSequence {
    names: SignalSet,
    time: Vec<f64>,
    data: Vec<Vec<f64>>,
}

/// Unchecked serialized form; only reachable through `ExpectationSequence::new`.
#[derive(Deserialize)]
struct RawExpectationSequence {
    names: SignalSet,
    time: Vec<f64>,
    data: Vec<Vec<f64>>,
}

impl TryFrom<RawExpectationSequence> for ExpectationSequence {
    type Error = VerifyError;

    fn try_from(raw: RawExpectationSequence) -> Result<Self, VerifyError> {
        ExpectationSequence::new(raw.names, raw.time, raw.data)
    }
}

impl ExpectationSequence {
    /// Builds a sequence, enforcing its invariants.
    ///
    /// # Arguments
    /// * `names` - Tracked signals, in simulator emission order.
    /// * `time` - Sample times; must be finite and strictly increasing.
    /// * `data` - Expected flip counts, one vector per time, each with one
    ///   entry per signal.
    ///
    /// # Returns
    /// * `Err(VerifyError::InvalidExpectation)` for an empty or unordered
    ///   sequence, or when `time` and `data` differ in length.
    /// * `Err(VerifyError::DimensionMismatch)` when a vector does not match
    ///   the number of signals.
    pub fn new(names: SignalSet, time: Vec<f64>, data: Vec<Vec<f64>>) -> Result<Self, VerifyError> {
        check_sequence(&names, &time, &data)?;
        Ok(Self { names, time, data })
    }

    /// Builds a sequence from `(time, expected)` pairs.
    pub fn from_points<I>(names: SignalSet, points: I) -> Result<Self, VerifyError>
    where
        I: IntoIterator<Item = (f64, Vec<f64>)>,
    {
        let (time, data) = points.into_iter().unzip();
        Self::new(names, time, data)
    }
}

/// Checks the invariants every expectation sequence must hold: at least the
/// calibration point, finite and strictly increasing times, and one vector of
/// `names.len()` entries per time.
pub(crate) fn check_sequence(names: &SignalSet, time: &[f64], data: &[Vec<f64>]) -> Result<(), VerifyError> {
    if time.is_empty() {
        return Err(VerifyError::InvalidExpectation {
            message: "sequence needs at least the calibration point".to_string(),
        });
    }
    if time.len() != data.len() {
        return Err(VerifyError::InvalidExpectation {
            message: format!("{} sample times but {} expected vectors", time.len(), data.len()),
        });
    }
    if let Some(t) = time.iter().find(|t| !t.is_finite()) {
        return Err(VerifyError::InvalidExpectation {
            message: format!("sample time {} is not finite", t),
        });
    }
    if let Some(i) = time.windows(2).position(|w| w[1] <= w[0]) {
        return Err(VerifyError::InvalidExpectation {
            message: format!(
                "sample times must strictly increase (index {}: {} then {})",
                i + 1,
                time[i],
                time[i + 1]
            ),
        });
    }
    for (index, vector) in data.iter().enumerate() {
        if vector.len() != names.len() {
            return Err(VerifyError::DimensionMismatch {
                context: format!("expected vector at index {}", index),
                expected: names.len(),
                actual: vector.len(),
            });
        }
    }
    Ok(())
}

impl ExpectationSource for ExpectationSequence {
    fn names(&self) -> &SignalSet {
        &self.names
    }

    fn time(&self) -> &[f64] {
        &self.time
    }

    fn data(&self) -> &[Vec<f64>] {
        &self.data
    }
}
