//! Correctness gates: unitarity, entanglement, fidelity.
//!
//! Invoked after mutations in tests and protocol drivers; invariants are
//! checked explicitly, never assumed.

use crate::complex::{approx_eq, Complex64, NORM_TOLERANCE, ONE, ZERO};
use crate::error::{SimError, SimResult};
use crate::state::StateVector;
use num_traits::Zero;

/// Check U·U† = I within `tolerance`, for any square gate dimension.
pub fn is_unitary<const N: usize>(matrix: &[[Complex64; N]; N], tolerance: f64) -> bool {
    for i in 0..N {
        for j in 0..N {
            let mut acc = Complex64::zero();
            for k in 0..N {
                acc += matrix[i][k] * matrix[j][k].conj();
            }
            let expected = if i == j { ONE } else { ZERO };
            if !approx_eq(acc, expected, tolerance) {
                return false;
            }
        }
    }
    true
}

/// Entanglement test for a 2-qubit state via the separability determinant:
/// a product state satisfies a00·a11 = a01·a10 exactly, so any deviation
/// beyond tolerance indicates entanglement.
///
/// Fails with [`SimError::WrongDimension`] unless the state has exactly 4
/// amplitudes.
pub fn is_entangled(state: &StateVector) -> SimResult<bool> {
    if state.dim() != 4 {
        return Err(SimError::WrongDimension {
            expected: 4,
            actual: state.dim(),
        });
    }
    let amps = state.amplitudes();
    let diag = amps[0] * amps[3];
    let off_diag = amps[1] * amps[2];
    Ok(!approx_eq(diag, off_diag, NORM_TOLERANCE))
}

/// State fidelity |⟨a|b⟩|² between two equal-length state vectors.
/// Returns a value in [0, 1]; 1 means identical up to global phase.
pub fn state_fidelity(a: &StateVector, b: &StateVector) -> f64 {
    assert_eq!(a.dim(), b.dim(), "state vectors must have equal length");
    let inner: Complex64 = a
        .amplitudes()
        .iter()
        .zip(b.amplitudes())
        .map(|(ai, bi)| ai.conj() * bi)
        .sum();
    inner.norm_sqr()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::unit_phase;
    use crate::gate::{
        apply_single_qubit_gate, apply_two_qubit_gate, rx, ry, rz, toffoli, CNOT, CZ, HADAMARD,
        IDENTITY, PAULI_X, PAULI_Y, PAULI_Z, PHASE_S, PHASE_T, SWAP,
    };

    #[test]
    fn all_fixed_single_qubit_gates_are_unitary() {
        for gate in [IDENTITY, PAULI_X, PAULI_Y, PAULI_Z, HADAMARD, PHASE_S, PHASE_T] {
            assert!(is_unitary(&gate, NORM_TOLERANCE));
        }
    }

    #[test]
    fn rotation_gates_are_unitary_at_many_angles() {
        for theta in [0.0, 0.3, 1.0, 2.5, 3.14, 5.9] {
            assert!(is_unitary(&rx(theta), NORM_TOLERANCE));
            assert!(is_unitary(&ry(theta), NORM_TOLERANCE));
            assert!(is_unitary(&rz(theta), NORM_TOLERANCE));
        }
    }

    #[test]
    fn multi_qubit_gates_are_unitary() {
        assert!(is_unitary(&CNOT, NORM_TOLERANCE));
        assert!(is_unitary(&CZ, NORM_TOLERANCE));
        assert!(is_unitary(&SWAP, NORM_TOLERANCE));
        assert!(is_unitary(&toffoli(), NORM_TOLERANCE));
    }

    #[test]
    fn shear_matrix_is_not_unitary() {
        let shear = [[ONE, ONE], [ZERO, ONE]];
        assert!(!is_unitary(&shear, NORM_TOLERANCE));
    }

    #[test]
    fn bell_state_is_entangled() {
        let mut state = StateVector::zero(2);
        apply_single_qubit_gate(&mut state, &HADAMARD, 0);
        apply_two_qubit_gate(&mut state, &CNOT, 0, 1);
        assert!(is_entangled(&state).unwrap());
    }

    #[test]
    fn basis_product_state_is_not_entangled() {
        // |01⟩
        let mut state = StateVector::zero(2);
        apply_single_qubit_gate(&mut state, &PAULI_X, 1);
        assert!(!is_entangled(&state).unwrap());
    }

    #[test]
    fn superposed_product_state_is_not_entangled() {
        // |+⟩⊗|+⟩ factorizes, despite every amplitude being nonzero.
        let state = StateVector::uniform(2);
        assert!(!is_entangled(&state).unwrap());
    }

    #[test]
    fn entanglement_check_requires_two_qubits() {
        let state = StateVector::zero(3);
        assert_eq!(
            is_entangled(&state),
            Err(SimError::WrongDimension {
                expected: 4,
                actual: 8
            })
        );
    }

    #[test]
    fn fidelity_of_identical_states_is_one() {
        let state = StateVector::uniform(2);
        assert!((state_fidelity(&state, &state) - 1.0).abs() < NORM_TOLERANCE);
    }

    #[test]
    fn fidelity_of_orthogonal_states_is_zero() {
        let zero = StateVector::zero(1);
        let mut one = StateVector::zero(1);
        apply_single_qubit_gate(&mut one, &PAULI_X, 0);
        assert!(state_fidelity(&zero, &one).abs() < NORM_TOLERANCE);
    }

    #[test]
    fn fidelity_ignores_global_phase() {
        let state = StateVector::uniform(2);
        let phase = unit_phase(1.3);
        let rotated = StateVector::from_raw(
            2,
            state.amplitudes().iter().map(|amp| amp * phase).collect(),
        );
        assert!((state_fidelity(&state, &rotated) - 1.0).abs() < NORM_TOLERANCE);
    }
}
