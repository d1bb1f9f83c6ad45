//! Physical and numeric constants used by verification.

/// Constants of the phase-flip model
pub mod phase_constants {
    /// Phase advance of a single flux quantum crossing a junction (2π).
    /// Dividing a raw phase difference by this yields a flip count.
    pub const PHASE_PER_FLIP: f64 = std::f64::consts::TAU;

    /// Default tolerance, in flips, between observed and expected deltas.
    pub const DEFAULT_THRESHOLD: f64 = 0.05;
}
