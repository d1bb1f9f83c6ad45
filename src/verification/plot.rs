// src/verification/plot.rs
use crate::simulation::Trace;
use serde::Serialize;
use std::fmt;

/// Everything needed to draw a verification run: the simulated traces and a
/// vertical marker at each expected sample time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TracePlot {
    pub time_steps: Vec<f64>,
    pub traces: Vec<Trace>,
    /// Expectation times, calibration point included.
    pub markers: Vec<f64>,
}

impl TracePlot {
    /// Final value of each trace, paired with its name.
    pub fn final_values(&self) -> Vec<(&str, f64)> {
        self.traces
            .iter()
            .filter_map(|t| t.data.last().map(|v| (t.name.as_str(), *v)))
            .collect()
    }
}

impl fmt::Display for TracePlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Trace Plot ({} time steps):", self.time_steps.len())?;
        writeln!(f, "  Legend:")?;
        for (name, value) in self.final_values() {
            writeln!(f, "    {} (final {:.4})", name, value)?;
        }
        let markers: Vec<String> = self.markers.iter().map(|t| format!("{:e}", t)).collect();
        writeln!(f, "  Markers: {}", markers.join(" | "))
    }
}
