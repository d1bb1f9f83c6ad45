// src/simulation/trace.rs
use crate::core::{SignalSet, VerifyError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One named time series produced by a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Signal name, e.g. `P(XJ1)` for the phase of junction XJ1.
    pub name: String,
    /// One value per simulated time step.
    pub data: Vec<f64>,
}

impl Trace {
    /// Creates a trace from its name and per-step values.
    pub fn new(name: impl Into<String>, data: Vec<f64>) -> Self {
        Self { name: name.into(), data }
    }
}

/// Dense output of a simulation run: a shared time axis and one trace per
/// emitted signal, in emission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTraceSet")]
pub struct TraceSet {
    time_steps: Vec<f64>,
    traces: Vec<Trace>,
}

/// Unchecked serialized form; only reachable through `TraceSet::new`.
#[derive(Deserialize)]
struct RawTraceSet {
    time_steps: Vec<f64>,
    traces: Vec<Trace>,
}

impl TryFrom<RawTraceSet> for TraceSet {
    type Error = VerifyError;

    fn try_from(raw: RawTraceSet) -> Result<Self, VerifyError> {
        TraceSet::new(raw.time_steps, raw.traces)
    }
}

impl TraceSet {
    /// Creates a trace set after checking its shape.
    ///
    /// # Returns
    /// * `Err(VerifyError::Simulation)` if the time axis is empty, not strictly
    ///   increasing, or contains non-finite values.
    /// * `Err(VerifyError::DimensionMismatch)` if a trace's length differs from
    ///   the number of time steps.
    pub fn new(time_steps: Vec<f64>, traces: Vec<Trace>) -> Result<Self, VerifyError> {
        if time_steps.is_empty() {
            return Err(VerifyError::Simulation {
                message: "simulation produced no time steps".to_string(),
            });
        }
        if time_steps.iter().any(|t| !t.is_finite()) {
            return Err(VerifyError::Simulation {
                message: "simulation time axis contains non-finite values".to_string(),
            });
        }
        if let Some(w) = time_steps.windows(2).find(|w| w[1] <= w[0]) {
            return Err(VerifyError::Simulation {
                message: format!(
                    "simulation time axis is not strictly increasing ({} then {})",
                    w[0], w[1]
                ),
            });
        }
        for trace in &traces {
            if trace.data.len() != time_steps.len() {
                return Err(VerifyError::DimensionMismatch {
                    context: format!("trace '{}'", trace.name),
                    expected: time_steps.len(),
                    actual: trace.data.len(),
                });
            }
        }
        Ok(Self { time_steps, traces })
    }

    /// Returns a trace set containing exactly the signals of `signals`, in that order.
    /// Traces the set does not track are dropped.
    pub fn select(&self, signals: &SignalSet) -> Result<Self, VerifyError> {
        let mut traces = Vec::with_capacity(signals.len());
        for name in signals.iter() {
            let trace = self.trace(name).ok_or_else(|| VerifyError::Simulation {
                message: format!("simulation did not emit a trace for '{}'", name),
            })?;
            traces.push(trace.clone());
        }
        Ok(Self { time_steps: self.time_steps.clone(), traces })
    }

    /// The trace emitted for `name`, if any.
    pub fn trace(&self, name: &str) -> Option<&Trace> {
        self.traces.iter().find(|t| t.name == name)
    }

    /// First simulated time step.
    pub fn start(&self) -> f64 {
        self.time_steps[0]
    }

    /// Last simulated time step.
    pub fn end(&self) -> f64 {
        self.time_steps[self.time_steps.len() - 1]
    }

    /// Value of every trace at `time`, linearly interpolated between the two
    /// surrounding time steps. A time that lands on a step returns that step's
    /// values unchanged.
    pub fn sample(&self, time: f64) -> Result<Vec<f64>, VerifyError> {
        let (start, end) = (self.start(), self.end());
        // Also rejects NaN.
        if !(time >= start && time <= end) {
            return Err(VerifyError::Sampling { time, start, end });
        }

        let upper = self.time_steps.partition_point(|&t| t < time);
        if self.time_steps[upper] == time {
            return Ok(self.traces.iter().map(|t| t.data[upper]).collect());
        }

        let lower = upper - 1;
        let (t0, t1) = (self.time_steps[lower], self.time_steps[upper]);
        let frac = (time - t0) / (t1 - t0);
        Ok(self
            .traces
            .iter()
            .map(|t| {
                let (v0, v1) = (t.data[lower], t.data[upper]);
                v0 + frac * (v1 - v0)
            })
            .collect())
    }
}

impl super::SimulationOutput for TraceSet {
    fn sample(&self, time: f64) -> Result<Vec<f64>, VerifyError> {
        TraceSet::sample(self, time)
    }

    fn time_steps(&self) -> &[f64] {
        &self.time_steps
    }

    fn traces(&self) -> &[Trace] {
        &self.traces
    }
}

impl fmt::Display for TraceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Traces: {} signals over {} steps [{}, {}]",
            self.traces.len(),
            self.time_steps.len(),
            self.start(),
            self.end()
        )?;
        for trace in &self.traces {
            writeln!(f, "  {}", trace.name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_TOLERANCE: f64 = 1e-12;

    fn ramp() -> Result<TraceSet, VerifyError> {
        TraceSet::new(
            vec![0.0, 1.0, 2.0, 4.0],
            vec![
                Trace::new("a", vec![0.0, 10.0, 20.0, 40.0]),
                Trace::new("b", vec![5.0, 5.0, 3.0, 3.0]),
            ],
        )
    }

    #[test]
    fn test_sample_on_step_is_exact() -> Result<(), VerifyError> {
        let traces = ramp()?;
        assert_eq!(traces.sample(1.0)?, vec![10.0, 5.0]);
        assert_eq!(traces.sample(0.0)?, vec![0.0, 5.0]);
        assert_eq!(traces.sample(4.0)?, vec![40.0, 3.0]);
        Ok(())
    }

    #[test]
    fn test_sample_interpolates_between_steps() -> Result<(), VerifyError> {
        let traces = ramp()?;
        let sample = traces.sample(3.0)?;
        assert!((sample[0] - 30.0).abs() < TEST_TOLERANCE);
        assert!((sample[1] - 3.0).abs() < TEST_TOLERANCE);
        let sample = traces.sample(1.5)?;
        assert!((sample[1] - 4.0).abs() < TEST_TOLERANCE);
        Ok(())
    }

    #[test]
    fn test_sample_out_of_range() -> Result<(), VerifyError> {
        let traces = ramp()?;
        assert!(matches!(
            traces.sample(4.5),
            Err(VerifyError::Sampling { start, end, .. }) if start == 0.0 && end == 4.0
        ));
        assert!(traces.sample(-0.1).is_err());
        assert!(traces.sample(f64::NAN).is_err());
        Ok(())
    }

    #[test]
    fn test_new_rejects_bad_shapes() {
        assert!(TraceSet::new(vec![], vec![]).is_err());
        assert!(TraceSet::new(vec![0.0, 0.0], vec![]).is_err());
        assert!(matches!(
            TraceSet::new(vec![0.0, 1.0], vec![Trace::new("a", vec![1.0])]),
            Err(VerifyError::DimensionMismatch { expected: 2, actual: 1, .. })
        ));
    }

    #[test]
    fn test_deserialize_validates_shape() -> Result<(), VerifyError> {
        assert!(toml::from_str::<TraceSet>("time_steps = []\ntraces = []").is_err());
        let ragged = "time_steps = [0.0, 1.0]\n[[traces]]\nname = \"a\"\ndata = [0.0]\n";
        assert!(toml::from_str::<TraceSet>(ragged).is_err());
        let unordered = "time_steps = [1.0, 0.0]\ntraces = []\n";
        assert!(toml::from_str::<TraceSet>(unordered).is_err());

        let valid = "time_steps = [0.0, 1.0]\n[[traces]]\nname = \"a\"\ndata = [0.0, 2.0]\n";
        let traces: TraceSet = toml::from_str(valid)?;
        assert_eq!(traces.sample(0.5)?, vec![1.0]);
        Ok(())
    }

    #[test]
    fn test_select_reorders_and_drops() -> Result<(), VerifyError> {
        let traces = ramp()?;
        let only_b = traces.select(&SignalSet::new(["b"])?)?;
        assert_eq!(only_b.sample(0.0)?, vec![5.0]);
        let swapped = traces.select(&SignalSet::new(["b", "a"])?)?;
        assert_eq!(swapped.sample(1.0)?, vec![5.0, 10.0]);
        assert!(traces.select(&SignalSet::new(["c"])?).is_err());
        Ok(())
    }
}
