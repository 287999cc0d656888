//! Complex scalar helpers shared across the engine.
//!
//! Amplitudes are `num_complex::Complex<f64>` throughout; `num_complex`
//! already provides addition, subtraction, multiplication, conjugation,
//! negation, modulus (`norm`), modulus squared (`norm_sqr`), argument
//! (`arg`) and real scaling (`scale`). This module adds the few operations
//! the engine needs on top: guarded division, tolerance-based equality, and
//! unit-phase construction. No operation allocates beyond its return value.

use crate::error::{SimError, SimResult};
use num_complex::Complex;

/// Complex amplitude scalar used throughout the simulator.
pub type Complex64 = Complex<f64>;

/// Near-zero threshold for floating-point guards.
pub const EPSILON: f64 = 1e-10;

/// Tolerance for state-vector normalization checks.
pub const NORM_TOLERANCE: f64 = 1e-9;

/// Complex zero: 0 + 0i.
pub const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// Complex one: 1 + 0i.
pub const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Divide `a` by `b`, failing instead of producing infinities when the
/// divisor is numerically zero (|b|² < [`EPSILON`]).
pub fn checked_div(a: Complex64, b: Complex64) -> SimResult<Complex64> {
    let norm_sqr = b.norm_sqr();
    if norm_sqr < EPSILON {
        return Err(SimError::DivisionByZero { norm_sqr });
    }
    Ok(a / b)
}

/// Componentwise approximate equality: both |Δre| and |Δim| below `tolerance`.
pub fn approx_eq(a: Complex64, b: Complex64, tolerance: f64) -> bool {
    (a.re - b.re).abs() < tolerance && (a.im - b.im).abs() < tolerance
}

/// e^{iφ} = cos(φ) + i·sin(φ) as a unit complex number.
pub fn unit_phase(phi: f64) -> Complex64 {
    Complex64::new(phi.cos(), phi.sin())
}
