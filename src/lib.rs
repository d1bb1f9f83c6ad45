// src/lib.rs

//! `sfq_verify` - Phase-flip verification for superconducting logic circuits
//!
//! A simulated circuit is correct when each tracked junction accumulates the
//! expected number of 2π phase flips between a calibration instant and every
//! later check point. This crate samples simulator traces at those instants,
//! normalises them against the calibration point, and reports the first time
//! at which any signal strays further than a threshold from its expectation.
//!
//! The simulator and the expectation (spec file) reader are collaborators,
//! expressed as the `CircuitSimulator` and `ExpectationSource` traits.

pub mod core;
pub mod expectation;
pub mod simulation;
pub mod verification;

// Re-export the most common types for easier top-level use
pub use core::{Parameters, SignalSet, VerifyError};
pub use expectation::{ExpectationSequence, ExpectationSource};
pub use simulation::{CircuitSimulator, FnSimulator, SimulationOutput, Trace, TraceSet};
pub use verification::{TracePlot, Verifier, VerifierConfig, VerifierResult};

// Example: A single junction that should flip once per clock period.
/// ```
/// use sfq_verify::{
///     ExpectationSequence, FnSimulator, Parameters, SignalSet, Trace, TraceSet,
///     Verifier, VerifierConfig, VerifyError,
/// };
/// use std::f64::consts::TAU;
///
/// fn main() -> Result<(), VerifyError> {
///     let names = SignalSet::new(["P(XJ1)"])?;
///
///     // Times in picoseconds. Expected: one flip by 10ps, two by 20ps.
///     let expectations = ExpectationSequence::from_points(
///         names,
///         [(0.0, vec![0.0]), (10.0, vec![1.0]), (20.0, vec![2.0])],
///     )?;
///
///     // Stand-in simulator: the junction phase advances by `flips` × 2π per
///     // 10ps period (default 1.0).
///     let simulator = FnSimulator::new(|_signals: &SignalSet, params: &Parameters| {
///         let rate = params.get("flips").unwrap_or(1.0);
///         let time: Vec<f64> = (0..=20).map(f64::from).collect();
///         let phase = time.iter().map(|t| TAU * rate * t / 10.0).collect();
///         TraceSet::new(time, vec![Trace::new("P(XJ1)", phase)])
///     });
///
///     let mut verifier = Verifier::new(simulator, expectations, VerifierConfig::with_threshold(0.1))?;
///
///     let result = verifier.verify_default()?;
///     assert!(bool::from(&result));
///
///     // Too fast a flip rate diverges at the first check point.
///     let result = verifier.verify(&Parameters::new().with("flips", 1.5))?;
///     assert_eq!(result.failure_time(), Some(10.0));
///     assert_eq!(result.failure_point(), Some(&[0][..]));
///     Ok(())
/// }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
