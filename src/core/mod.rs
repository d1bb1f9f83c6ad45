// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod parameters;
pub mod signals;

// Re-export public types for convenient access via `sfq_verify::core::TypeName`
pub use error::VerifyError;
pub use parameters::Parameters;
pub use signals::SignalSet;

pub mod constants;
pub use constants::phase_constants::{DEFAULT_THRESHOLD, PHASE_PER_FLIP}; // Re-export
