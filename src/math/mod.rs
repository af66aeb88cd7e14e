//! Mathematical utilities for the placement passes

/// Seedable randomness and jitter falloff
pub mod random;
