//! Example verifying a clocked SFQ AND gate against its expected phase flips.
//!
//! The "simulator" here is an analytic stand-in: each junction phase is a sum
//! of smooth 2π steps at the instants its pulses arrive. A `bias` parameter
//! below 0.7 makes the output junction miss its switching event, which the
//! verifier reports as a divergence on `P(XQ)`.
//!
//! Run with `RUST_LOG=sfq_verify=debug cargo run --example and_gate` to see
//! the verifier's trace output.

use sfq_verify::{
    ExpectationSequence, FnSimulator, Parameters, SignalSet, Trace, TraceSet, Verifier, VerifierConfig,
    VerifyError,
};
use std::f64::consts::TAU;
use tracing_subscriber::EnvFilter;

// Picoseconds.
const STEP: f64 = 0.25;
const END: f64 = 100.0;
const RISE: f64 = 1.5;

/// Phase of a junction that flips once at each time in `flips`.
fn phase_at(t: f64, flips: &[f64]) -> f64 {
    flips.iter().map(|&at| TAU * 0.5 * (1.0 + ((t - at) / RISE).tanh())).sum()
}

fn simulate_and_gate(signals: &SignalSet, params: &Parameters) -> Result<TraceSet, VerifyError> {
    let bias = params.get("bias").unwrap_or(1.0);
    if bias <= 0.0 {
        return Err(VerifyError::Simulation {
            message: format!("bias {} leaves the circuit unpowered", bias),
        });
    }

    // A arrives at 10ps and 50ps, B at 30ps and 55ps, clock every 40ps from 20ps.
    // Q switches on the clock edge following a cycle in which both A and B arrived.
    let a = [10.0, 50.0];
    let b = [30.0, 55.0];
    let clk = [20.0, 60.0, 90.0];
    let q: &[f64] = if bias >= 0.7 { &[62.0] } else { &[] };

    let steps = (END / STEP) as usize;
    let time: Vec<f64> = (0..=steps).map(|i| i as f64 * STEP).collect();
    let wave = |flips: &[f64]| time.iter().map(|&t| phase_at(t, flips)).collect::<Vec<f64>>();

    let traces = vec![
        Trace::new("P(XA)", wave(&a[..])),
        Trace::new("P(XB)", wave(&b[..])),
        Trace::new("P(XCLK)", wave(&clk[..])),
        Trace::new("P(XQ)", wave(q)),
    ];
    tracing::debug!(signals = %signals, bias, steps, "analytic AND gate simulated");
    TraceSet::new(time, traces)
}

fn main() -> Result<(), VerifyError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("--- sfq_verify Example: Clocked AND gate ---");

    let names = SignalSet::new(["P(XA)", "P(XB)", "P(XCLK)", "P(XQ)"])?;
    let expectations = ExpectationSequence::from_points(
        names.clone(),
        [
            (5.0, vec![0.0, 0.0, 0.0, 0.0]),
            (40.0, vec![1.0, 1.0, 1.0, 0.0]),
            (58.0, vec![2.0, 2.0, 1.0, 0.0]),
            (75.0, vec![2.0, 2.0, 2.0, 1.0]),
            (95.0, vec![2.0, 2.0, 3.0, 1.0]),
        ],
    )?;

    let config = VerifierConfig::from_toml_str("threshold = 0.1")?;
    let mut verifier = Verifier::new(FnSimulator::new(simulate_and_gate), expectations, config)?;

    let nominal = Parameters::new();
    let result = verifier.verify(&nominal)?;
    println!("\nNominal bias {}: {}", nominal, result.describe(&names));

    let starved = Parameters::new().with("bias", 0.6);
    let result = verifier.verify(&starved)?;
    println!("Starved bias {}: {}", starved, result.describe(&names));

    println!("\n{}", verifier.plot(&nominal)?);

    match verifier.verify(&Parameters::new().with("bias", 0.0)) {
        Ok(result) => println!("Unpowered circuit unexpectedly produced: {}", result),
        Err(e) => println!("Unpowered circuit could not be verified: {}", e),
    }

    Ok(())
}
