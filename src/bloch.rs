//! Bloch-sphere coordinates for single-qubit pure states.
//!
//! (θ, φ) describe a state up to global phase: θ ∈ [0, π] is the polar
//! angle from |0⟩, φ ∈ [0, 2π) the azimuth. The poles are degenerate: φ
//! is undefined at θ = 0 and fixed to 0 by convention.

use crate::complex::{unit_phase, Complex64, EPSILON};
use std::f64::consts::PI;

/// Normalize an angle into [0, 2π).
pub fn normalize_angle(angle: f64) -> f64 {
    let two_pi = 2.0 * PI;
    let mut result = angle % two_pi;
    if result < 0.0 {
        result += two_pi;
    }
    result
}

/// Polar/azimuthal angles of a single-qubit state on the Bloch sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlochAngles {
    pub theta: f64,
    pub phi: f64,
}

impl BlochAngles {
    pub fn new(theta: f64, phi: f64) -> Self {
        Self { theta, phi }
    }

    /// Angles of the state α0|0⟩ + α1|1⟩, discarding global phase.
    pub fn from_state(alpha0: Complex64, alpha1: Complex64) -> Self {
        let abs_alpha0 = alpha0.norm().clamp(0.0, 1.0);
        let theta = 2.0 * abs_alpha0.acos();

        if abs_alpha0 < EPSILON {
            // South pole: all phase lives in α1.
            return Self {
                theta: PI,
                phi: normalize_angle(alpha1.arg()),
            };
        }
        if alpha1.norm() < EPSILON {
            // North pole: φ undefined, fixed to 0.
            return Self { theta: 0.0, phi: 0.0 };
        }
        Self {
            theta,
            phi: normalize_angle(alpha1.arg() - alpha0.arg()),
        }
    }

    /// The state |ψ⟩ = cos(θ/2)|0⟩ + e^{iφ}·sin(θ/2)|1⟩.
    pub fn to_state(self) -> (Complex64, Complex64) {
        let alpha0 = Complex64::new((self.theta / 2.0).cos(), 0.0);
        let alpha1 = unit_phase(self.phi).scale((self.theta / 2.0).sin());
        (alpha0, alpha1)
    }

    /// Cartesian coordinates (sinθcosφ, sinθsinφ, cosθ) on the unit sphere.
    pub fn to_cartesian(self) -> (f64, f64, f64) {
        (
            self.theta.sin() * self.phi.cos(),
            self.theta.sin() * self.phi.sin(),
            self.theta.cos(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::NORM_TOLERANCE;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4};

    #[test]
    fn round_trip_recovers_angles_away_from_poles() {
        for theta in [0.1, FRAC_PI_4, FRAC_PI_2, 2.0, 3.0] {
            for phi in [0.0, FRAC_PI_3, FRAC_PI_2, 3.5, 6.0] {
                let (alpha0, alpha1) = BlochAngles::new(theta, phi).to_state();
                let recovered = BlochAngles::from_state(alpha0, alpha1);
                assert!(
                    (recovered.theta - theta).abs() < NORM_TOLERANCE,
                    "theta {theta} round-tripped to {}",
                    recovered.theta
                );
                assert!(
                    (recovered.phi - phi).abs() < NORM_TOLERANCE,
                    "phi {phi} round-tripped to {}",
                    recovered.phi
                );
            }
        }
    }

    #[test]
    fn north_pole_fixes_phi_to_zero() {
        let angles = BlochAngles::from_state(Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0));
        assert_eq!(angles, BlochAngles::new(0.0, 0.0));
    }

    #[test]
    fn south_pole_takes_phase_from_alpha1() {
        let angles = BlochAngles::from_state(Complex64::new(0.0, 0.0), Complex64::new(0.0, 1.0));
        assert!((angles.theta - PI).abs() < NORM_TOLERANCE);
        assert!((angles.phi - FRAC_PI_2).abs() < NORM_TOLERANCE);
    }

    #[test]
    fn global_phase_is_discarded() {
        let (alpha0, alpha1) = BlochAngles::new(1.2, 0.7).to_state();
        let phase = unit_phase(2.1);
        let rotated = BlochAngles::from_state(alpha0 * phase, alpha1 * phase);
        assert!((rotated.theta - 1.2).abs() < NORM_TOLERANCE);
        assert!((rotated.phi - 0.7).abs() < NORM_TOLERANCE);
    }

    #[test]
    fn equator_cartesian_coordinates() {
        // |+⟩ = (θ=π/2, φ=0) sits on the +x axis.
        let (x, y, z) = BlochAngles::new(FRAC_PI_2, 0.0).to_cartesian();
        assert!((x - 1.0).abs() < NORM_TOLERANCE);
        assert!(y.abs() < NORM_TOLERANCE);
        assert!(z.abs() < NORM_TOLERANCE);
    }

    #[test]
    fn normalize_angle_wraps_negative_values() {
        assert!((normalize_angle(-FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < NORM_TOLERANCE);
        assert!(normalize_angle(2.0 * PI).abs() < NORM_TOLERANCE);
        assert!((normalize_angle(0.5) - 0.5).abs() < NORM_TOLERANCE);
    }
}
