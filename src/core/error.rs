//! Error handling logic

use thiserror::Error;

/// Errors raised while preparing or running a verification.
///
/// A verification that merely finds a divergence is *not* an error; that is
/// reported through `VerifierResult`. These variants describe a broken
/// environment: a simulator that could not run, a trace that cannot be sampled,
/// or collaborators that disagree about the tracked signals.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The simulation collaborator failed to produce traces.
    #[error("Simulation Process Error: {message}")]
    Simulation {
        /// Simulation failure message
        message: String,
    },

    /// A sample was requested outside the simulated time range.
    #[error("Sampling Error: time {time} is outside the simulated range [{start}, {end}]")]
    Sampling {
        /// Requested sample time
        time: f64,
        /// First simulated time step
        start: f64,
        /// Last simulated time step
        end: f64,
    },

    /// The simulator emits signals in a different order than the expectations.
    #[error("Signal Order Mismatch: expected {expected:?}, simulator reports {actual:?}")]
    SignalOrderMismatch {
        /// Order supplied by the expectation source
        expected: Vec<String>,
        /// Order reported by the simulator
        actual: Vec<String>,
    },

    /// A vector does not have one entry per tracked signal.
    #[error("Dimension Mismatch ({context}): expected {expected} values, found {actual}")]
    DimensionMismatch {
        /// Where the mismatch was detected
        context: String,
        /// Number of tracked signals
        expected: usize,
        /// Length actually found
        actual: usize,
    },

    /// Expectation data breaks the sequence invariants.
    #[error("Invalid Expectation: {message}")]
    InvalidExpectation {
        /// InvalidExpectation failure message
        message: String,
    },

    /// A serialized verification outcome breaks its invariants.
    #[error("Invalid Result: {message}")]
    InvalidResult {
        /// InvalidResult failure message
        message: String,
    },

    /// Verifier configuration is unusable.
    #[error("Invalid Configuration: {message}")]
    InvalidConfiguration {
        /// InvalidConfiguration failure message
        message: String,
    },

    /// Configuration text could not be parsed as TOML.
    #[error("failed to parse verifier configuration")]
    ConfigParse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampling_error_message_names_range() {
        let err = VerifyError::Sampling { time: 5.0, start: 0.0, end: 2.0 };
        assert_eq!(
            err.to_string(),
            "Sampling Error: time 5 is outside the simulated range [0, 2]"
        );
    }

    #[test]
    fn test_dimension_mismatch_message() {
        let err = VerifyError::DimensionMismatch {
            context: "sample at t=1".to_string(),
            expected: 2,
            actual: 3,
        };
        assert!(err.to_string().contains("expected 2 values, found 3"));
    }
}
