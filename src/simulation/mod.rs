// src/simulation/mod.rs

//! The simulation collaborator boundary.
//!
//! Verification never runs a circuit itself. It drives a `CircuitSimulator`,
//! which turns a parameter assignment into a `SimulationOutput` that can be
//! sampled at arbitrary instants. `TraceSet` is the dense, interpolating output
//! most simulators return, and `FnSimulator` adapts a closure (an external
//! simulator process, an analytic model, a replayed recording) to the trait.

mod trace;

pub use trace::{Trace, TraceSet};

use crate::core::{Parameters, SignalSet, VerifyError};
use tracing::debug;

/// A sampling function over one simulation run.
pub trait SimulationOutput {
    /// Values of every tracked signal at `time`, in configured signal order.
    ///
    /// Times outside the simulated range must fail with
    /// `VerifyError::Sampling` rather than extrapolate.
    fn sample(&self, time: f64) -> Result<Vec<f64>, VerifyError>;

    /// The simulated time axis.
    fn time_steps(&self) -> &[f64];

    /// The dense traces, in configured signal order.
    fn traces(&self) -> &[Trace];
}

/// Runs a circuit for a given parameter assignment.
pub trait CircuitSimulator {
    type Output: SimulationOutput;

    /// Fixes the order in which signals are emitted. Called once, before any
    /// simulation; the order must then hold for every later `simulate` call.
    fn configure(&mut self, signal_order: &SignalSet) -> Result<(), VerifyError>;

    /// The order the simulator will actually emit, or `None` if unconfigured.
    fn signal_order(&self) -> Option<&SignalSet>;

    /// Simulates the circuit with `parameters`; absent names use the
    /// simulator's own defaults.
    fn simulate(&mut self, parameters: &Parameters) -> Result<Self::Output, VerifyError>;
}

/// A `CircuitSimulator` backed by a closure.
///
/// The closure receives the configured signal set and the parameters and
/// returns traces named after the signals. Extra traces are dropped and the
/// rest are put in configured order before being handed back.
pub struct FnSimulator<F> {
    run: F,
    signal_order: Option<SignalSet>,
}

impl<F> FnSimulator<F>
where
    F: FnMut(&SignalSet, &Parameters) -> Result<TraceSet, VerifyError>,
{
    /// Wraps `run`; call `configure` before the first `simulate`.
    pub fn new(run: F) -> Self {
        Self { run, signal_order: None }
    }
}

impl<F> CircuitSimulator for FnSimulator<F>
where
    F: FnMut(&SignalSet, &Parameters) -> Result<TraceSet, VerifyError>,
{
    type Output = TraceSet;

    fn configure(&mut self, signal_order: &SignalSet) -> Result<(), VerifyError> {
        debug!(signals = %signal_order, "configuring simulator trace order");
        self.signal_order = Some(signal_order.clone());
        Ok(())
    }

    fn signal_order(&self) -> Option<&SignalSet> {
        self.signal_order.as_ref()
    }

    fn simulate(&mut self, parameters: &Parameters) -> Result<TraceSet, VerifyError> {
        let order = self.signal_order.as_ref().ok_or_else(|| VerifyError::Simulation {
            message: "simulator must be configured with a signal order before simulating".to_string(),
        })?;
        let output = (self.run)(order, parameters)?;
        output.select(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_signal_run(_: &SignalSet, params: &Parameters) -> Result<TraceSet, VerifyError> {
        let gain = params.get("gain").unwrap_or(1.0);
        TraceSet::new(
            vec![0.0, 1.0],
            vec![
                Trace::new("y", vec![0.0, 2.0 * gain]),
                Trace::new("x", vec![0.0, gain]),
                Trace::new("unused", vec![7.0, 7.0]),
            ],
        )
    }

    #[test]
    fn test_unconfigured_simulator_refuses_to_run() {
        let mut sim = FnSimulator::new(two_signal_run);
        assert!(sim.signal_order().is_none());
        assert!(matches!(
            sim.simulate(&Parameters::new()),
            Err(VerifyError::Simulation { .. })
        ));
    }

    #[test]
    fn test_output_follows_configured_order() -> Result<(), VerifyError> {
        let mut sim = FnSimulator::new(two_signal_run);
        sim.configure(&SignalSet::new(["x", "y"])?)?;
        let output = sim.simulate(&Parameters::new().with("gain", 3.0))?;
        assert_eq!(output.sample(1.0)?, vec![3.0, 6.0]);
        assert_eq!(SimulationOutput::traces(&output).len(), 2);
        Ok(())
    }
}
