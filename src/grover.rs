//! Grover amplitude amplification: oracle, diffusion, search driver.
//!
//! The oracle flips the sign of target amplitudes (phases only, no
//! probability change); the diffusion operator reflects every amplitude
//! about the mean. Alternating the two R = ⌊π/4·√(N/M)⌋ times rotates the
//! state toward the target subspace. For N=4, M=1 a single iteration lands
//! exactly on the target; for N=8, M=1 two iterations exceed probability
//! 0.94 without reaching 1.0, a property of the rotation angle rather than a bug.

use crate::complex::Complex64;
use crate::error::SimResult;
use crate::gate::{apply_single_qubit_gate, HADAMARD};
use crate::state::StateVector;
use log::debug;
use std::f64::consts::FRAC_PI_4;

/// Negate the amplitude at every target index. Probabilities are
/// unchanged; only phases flip.
pub fn apply_oracle(state: &mut StateVector, targets: &[usize]) {
    let dim = state.dim();
    let amps = state.amplitudes_mut();
    for &target in targets {
        assert!(target < dim, "target index {target} out of range");
        amps[target] = -amps[target];
    }
}

/// Inversion about the average: every amplitude a becomes 2·mean − a.
pub fn apply_diffusion(state: &mut StateVector) {
    let dim = state.dim();
    let sum: Complex64 = state.amplitudes().iter().sum();
    let mean = sum.unscale(dim as f64);
    for amp in state.amplitudes_mut() {
        *amp = mean.scale(2.0) - *amp;
    }
}

/// Optimal iteration count R = ⌊π/4·√(N/M)⌋ for N states and M targets.
pub fn optimal_iterations(num_states: usize, num_targets: usize) -> usize {
    assert!(
        num_targets >= 1 && num_targets <= num_states,
        "target count must be in 1..={num_states}"
    );
    (FRAC_PI_4 * (num_states as f64 / num_targets as f64).sqrt()).floor() as usize
}

/// Outcome of a full Grover run.
#[derive(Debug, Clone)]
pub struct GroverSearch {
    pub state: StateVector,
    pub iterations: usize,
    pub success_probability: f64,
}

/// Run the full search: |0...0⟩, Hadamard on every qubit, then R rounds of
/// oracle + diffusion with the normalization invariant checked after each.
pub fn search(num_qubits: usize, targets: &[usize]) -> SimResult<GroverSearch> {
    assert!(!targets.is_empty(), "at least one target index required");
    let mut state = StateVector::zero(num_qubits);
    let dim = state.dim();
    for &target in targets {
        assert!(target < dim, "target index {target} out of range");
    }

    for qubit in 0..num_qubits {
        apply_single_qubit_gate(&mut state, &HADAMARD, qubit);
    }
    state.assert_normalized("after Hadamard on all qubits")?;

    let iterations = optimal_iterations(dim, targets.len());
    for round in 1..=iterations {
        apply_oracle(&mut state, targets);
        apply_diffusion(&mut state);
        state.assert_normalized(&format!("after Grover iteration {round}"))?;
        let success: f64 = targets.iter().map(|&t| state.amplitude(t).norm_sqr()).sum();
        debug!("Grover iteration {round}/{iterations}: success probability {success:.6}");
    }

    let success_probability = targets.iter().map(|&t| state.amplitude(t).norm_sqr()).sum();
    Ok(GroverSearch {
        state,
        iterations,
        success_probability,
    })
}
