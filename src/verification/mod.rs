// src/verification/mod.rs

//! Decides whether a simulated circuit produces the expected phase flips.
//!
//! The `Verifier` samples one simulation run at each expectation time and
//! compares phase-flip *deltas* rather than absolute phases: both the sampled
//! phases and the expected flip counts are taken relative to the calibration
//! point (index 0). Absolute junction phase drifts with bias and is of no
//! interest; only the number of 2π flips since calibration is.
//!
//! Points are visited in increasing time order and the first divergence ends
//! the scan. A divergence is an ordinary `VerifierResult::Failure`; a simulator
//! or sampling error is returned as `Err` unchanged.

mod config;
mod plot;
mod result;

pub use config::VerifierConfig;
pub use plot::TracePlot;
pub use result::VerifierResult;

use crate::core::{PHASE_PER_FLIP, Parameters, VerifyError};
use crate::expectation::{ExpectationSource, check_sequence};
use crate::simulation::{CircuitSimulator, SimulationOutput};
use tracing::{debug, info, trace, warn};

/// Verifies parameter assignments of one circuit against one expectation.
pub struct Verifier<S, E> {
    simulator: S,
    expectations: E,
    config: VerifierConfig,
}

impl<S, E> Verifier<S, E>
where
    S: CircuitSimulator,
    E: ExpectationSource,
{
    /// Creates a verifier and configures the simulator's trace order.
    ///
    /// The simulator is configured with the expectation's signal names. When
    /// `config.check_signal_order` is set, the order the simulator reports back
    /// must match exactly; otherwise samples would be compared against the
    /// wrong signals.
    ///
    /// # Returns
    /// * `Err(VerifyError::InvalidConfiguration)` for an unusable threshold.
    /// * `Err(VerifyError::SignalOrderMismatch)` if the simulator disagrees on order.
    /// * `Err(VerifyError::InvalidExpectation | DimensionMismatch)` if the
    ///   expectation source is empty, ragged, or its times are not finite and
    ///   strictly increasing.
    /// * Any error from `CircuitSimulator::configure`, unchanged.
    pub fn new(mut simulator: S, expectations: E, config: VerifierConfig) -> Result<Self, VerifyError> {
        config.validate()?;
        // Sources other than `ExpectationSequence` are not validated on construction.
        check_sequence(expectations.names(), expectations.time(), expectations.data())?;

        let names = expectations.names();
        simulator.configure(names)?;

        if config.check_signal_order {
            let reported = simulator.signal_order();
            if reported != Some(names) {
                return Err(VerifyError::SignalOrderMismatch {
                    expected: names.as_slice().to_vec(),
                    actual: reported.map(|s| s.as_slice().to_vec()).unwrap_or_default(),
                });
            }
        }

        debug!(
            signals = %names,
            points = expectations.len(),
            threshold = config.threshold,
            "verifier ready"
        );
        Ok(Self { simulator, expectations, config })
    }

    /// Simulates the circuit with `parameters` and checks every expectation
    /// point after the calibration point.
    ///
    /// # Returns
    /// * `Ok(VerifierResult::Success)` if every flip delta is within threshold.
    /// * `Ok(VerifierResult::Failure { .. })` at the earliest divergent time.
    /// * `Err(VerifyError)` if the simulation or a sample could not be produced.
    pub fn verify(&mut self, parameters: &Parameters) -> Result<VerifierResult, VerifyError> {
        debug!(parameters = parameters.len(), "simulating circuit for verification");
        let output = self.simulator.simulate(parameters)?;

        let times = self.expectations.time();
        let expected = self.expectations.data();
        let signals = self.expectations.names().len();
        let threshold = self.config.threshold;

        // Calibration: both the sample and the expectation at index 0 become the
        // zero reference. Neither is checked.
        let calibration_sample = sample_checked(&output, times[0], signals)?;
        let calibration_expected = &expected[0];
        debug!(time = times[0], "captured calibration sample");

        for index in 1..times.len() {
            let time = times[index];
            let sample = sample_checked(&output, time, signals)?;

            let mut diverged = Vec::new();
            for signal in 0..signals {
                let observed = (sample[signal] - calibration_sample[signal]) / PHASE_PER_FLIP;
                let wanted = expected[index][signal] - calibration_expected[signal];
                let difference = (observed - wanted).abs();
                trace!(time, signal, observed, wanted, difference, "compared flip delta");
                // A NaN difference counts as divergence.
                if !(difference <= threshold) {
                    diverged.push(signal);
                }
            }

            if !diverged.is_empty() {
                warn!(time, index, signals = ?diverged, "phase flips diverged from expectation");
                return Ok(VerifierResult::failure(time, diverged));
            }
        }

        info!(points = times.len() - 1, "all phase flips matched expectation");
        Ok(VerifierResult::Success)
    }

    /// `verify` with every parameter at its simulator default.
    pub fn verify_default(&mut self) -> Result<VerifierResult, VerifyError> {
        self.verify(&Parameters::default())
    }

    /// Simulates the circuit and gathers its traces together with a marker at
    /// each expectation time. Verification state is untouched.
    pub fn plot(&mut self, parameters: &Parameters) -> Result<TracePlot, VerifyError> {
        debug!(parameters = parameters.len(), "simulating circuit for plotting");
        let output = self.simulator.simulate(parameters)?;
        Ok(TracePlot {
            time_steps: output.time_steps().to_vec(),
            traces: output.traces().to_vec(),
            markers: self.expectations.time().to_vec(),
        })
    }

    /// Largest tolerated flip-delta difference.
    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    /// The configuration this verifier was built with.
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// The expectation source checked against.
    pub fn expectations(&self) -> &E {
        &self.expectations
    }

    /// The configured simulation collaborator.
    pub fn simulator(&self) -> &S {
        &self.simulator
    }
}

/// Samples `output` at `time`, insisting on one value per tracked signal.
fn sample_checked<O: SimulationOutput>(output: &O, time: f64, signals: usize) -> Result<Vec<f64>, VerifyError> {
    let sample = output.sample(time)?;
    if sample.len() != signals {
        return Err(VerifyError::DimensionMismatch {
            context: format!("sample at t={}", time),
            expected: signals,
            actual: sample.len(),
        });
    }
    Ok(sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SignalSet;
    use crate::expectation::ExpectationSequence;
    use crate::simulation::{Trace, TraceSet};

    /// Simulator that ignores parameters and reorders nothing: it reports
    /// whatever order it was built with, regardless of `configure`.
    struct FixedOrderSimulator {
        order: SignalSet,
        traces: TraceSet,
    }

    impl CircuitSimulator for FixedOrderSimulator {
        type Output = TraceSet;

        fn configure(&mut self, _: &SignalSet) -> Result<(), VerifyError> {
            Ok(())
        }

        fn signal_order(&self) -> Option<&SignalSet> {
            Some(&self.order)
        }

        fn simulate(&mut self, _: &Parameters) -> Result<TraceSet, VerifyError> {
            Ok(self.traces.clone())
        }
    }

    fn fixed(order: &[&str], width: usize) -> Result<FixedOrderSimulator, VerifyError> {
        let traces = (0..width).map(|i| Trace::new(format!("s{}", i), vec![0.0, 0.0])).collect();
        Ok(FixedOrderSimulator {
            order: SignalSet::new(order.iter().copied())?,
            traces: TraceSet::new(vec![0.0, 1.0], traces)?,
        })
    }

    fn expectation(names: &[&str]) -> Result<ExpectationSequence, VerifyError> {
        let zeros = vec![0.0; names.len()];
        ExpectationSequence::new(
            SignalSet::new(names.iter().copied())?,
            vec![0.0, 1.0],
            vec![zeros.clone(), zeros],
        )
    }

    #[test]
    fn test_order_mismatch_rejected_at_construction() -> Result<(), VerifyError> {
        let result = Verifier::new(fixed(&["b", "a"], 2)?, expectation(&["a", "b"])?, VerifierConfig::default());
        match result {
            Err(VerifyError::SignalOrderMismatch { expected, actual }) => {
                assert_eq!(expected, vec!["a", "b"]);
                assert_eq!(actual, vec!["b", "a"]);
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("mismatched order must be rejected"),
        }
        Ok(())
    }

    #[test]
    fn test_order_check_can_be_disabled() -> Result<(), VerifyError> {
        let config = VerifierConfig { check_signal_order: false, ..VerifierConfig::default() };
        let mut verifier = Verifier::new(fixed(&["b", "a"], 2)?, expectation(&["a", "b"])?, config)?;
        assert!(verifier.verify_default()?.is_success());
        Ok(())
    }

    #[test]
    fn test_sample_width_mismatch_is_an_error() -> Result<(), VerifyError> {
        let mut verifier = Verifier::new(fixed(&["a"], 2)?, expectation(&["a"])?, VerifierConfig::default())?;
        assert!(matches!(
            verifier.verify_default(),
            Err(VerifyError::DimensionMismatch { expected: 1, actual: 2, .. })
        ));
        Ok(())
    }

    /// Source that hands out whatever it holds, without validation.
    struct LooseExpectations {
        names: SignalSet,
        time: Vec<f64>,
        data: Vec<Vec<f64>>,
    }

    impl ExpectationSource for LooseExpectations {
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

    #[test]
    fn test_unordered_source_rejected_at_construction() -> Result<(), VerifyError> {
        let backwards = LooseExpectations {
            names: SignalSet::new(["a"])?,
            time: vec![2.0, 1.0],
            data: vec![vec![0.0], vec![1.0]],
        };
        assert!(matches!(
            Verifier::new(fixed(&["a"], 1)?, backwards, VerifierConfig::default()),
            Err(VerifyError::InvalidExpectation { .. })
        ));

        let non_finite = LooseExpectations {
            names: SignalSet::new(["a"])?,
            time: vec![0.0, f64::INFINITY],
            data: vec![vec![0.0], vec![1.0]],
        };
        assert!(matches!(
            Verifier::new(fixed(&["a"], 1)?, non_finite, VerifierConfig::default()),
            Err(VerifyError::InvalidExpectation { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_invalid_threshold_rejected() -> Result<(), VerifyError> {
        let result = Verifier::new(fixed(&["a"], 1)?, expectation(&["a"])?, VerifierConfig::with_threshold(-0.5));
        assert!(matches!(result, Err(VerifyError::InvalidConfiguration { .. })));
        Ok(())
    }

    #[test]
    fn test_nan_phase_counts_as_divergence() -> Result<(), VerifyError> {
        let simulator = FixedOrderSimulator {
            order: SignalSet::new(["a"])?,
            traces: TraceSet::new(vec![0.0, 1.0], vec![Trace::new("s0", vec![0.0, f64::NAN])])?,
        };
        let mut verifier = Verifier::new(simulator, expectation(&["a"])?, VerifierConfig::default())?;
        let result = verifier.verify_default()?;
        assert_eq!(result.failure_time(), Some(1.0));
        assert_eq!(result.failure_point(), Some(&[0][..]));
        Ok(())
    }
}
