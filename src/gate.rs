//! Standard gate matrices and in-place gate application.
//!
//! Gates are small fixed-size unitary matrices: 2×2 for single-qubit, 4×4
//! for two-qubit, 8×8 for Toffoli. Application never materializes the full
//! 2^n×2^n tensor-product operator. A single-qubit gate runs in O(2^n)
//! time and O(1) extra space by transforming amplitude pairs directly, a
//! two-qubit gate in O(2^n) time with a visited bitmap.

use crate::complex::{Complex64, ONE, ZERO};
use crate::error::{SimError, SimResult};
use crate::state::StateVector;
use log::trace;
use std::f64::consts::FRAC_1_SQRT_2;

/// 2×2 matrix acting on one qubit.
pub type SingleQubitGate = [[Complex64; 2]; 2];

/// 4×4 matrix acting on an ordered pair of qubits.
pub type TwoQubitGate = [[Complex64; 4]; 4];

/// 8×8 matrix acting on an ordered triple of qubits.
pub type ThreeQubitGate = [[Complex64; 8]; 8];

const fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

/// Identity gate.
pub const IDENTITY: SingleQubitGate = [[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(1.0, 0.0)]];

/// Pauli-X (NOT / bit flip).
pub const PAULI_X: SingleQubitGate = [[c(0.0, 0.0), c(1.0, 0.0)], [c(1.0, 0.0), c(0.0, 0.0)]];

/// Pauli-Y.
pub const PAULI_Y: SingleQubitGate = [[c(0.0, 0.0), c(0.0, -1.0)], [c(0.0, 1.0), c(0.0, 0.0)]];

/// Pauli-Z (phase flip).
pub const PAULI_Z: SingleQubitGate = [[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(-1.0, 0.0)]];

/// Hadamard gate, using the exact 1/√2 constant.
pub const HADAMARD: SingleQubitGate = [
    [c(FRAC_1_SQRT_2, 0.0), c(FRAC_1_SQRT_2, 0.0)],
    [c(FRAC_1_SQRT_2, 0.0), c(-FRAC_1_SQRT_2, 0.0)],
];

/// Phase gate S = diag(1, i).
pub const PHASE_S: SingleQubitGate = [[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(0.0, 1.0)]];

/// T gate (π/8 gate) = diag(1, e^{iπ/4}).
pub const PHASE_T: SingleQubitGate = [
    [c(1.0, 0.0), c(0.0, 0.0)],
    [c(0.0, 0.0), c(FRAC_1_SQRT_2, FRAC_1_SQRT_2)],
];

/// Rotation about the X axis by `theta`.
pub fn rx(theta: f64) -> SingleQubitGate {
    let cos = (theta / 2.0).cos();
    let sin = (theta / 2.0).sin();
    [[c(cos, 0.0), c(0.0, -sin)], [c(0.0, -sin), c(cos, 0.0)]]
}

/// Rotation about the Y axis by `theta`.
pub fn ry(theta: f64) -> SingleQubitGate {
    let cos = (theta / 2.0).cos();
    let sin = (theta / 2.0).sin();
    [[c(cos, 0.0), c(-sin, 0.0)], [c(sin, 0.0), c(cos, 0.0)]]
}

/// Rotation about the Z axis by `theta`.
pub fn rz(theta: f64) -> SingleQubitGate {
    let cos = (theta / 2.0).cos();
    let sin = (theta / 2.0).sin();
    [[c(cos, -sin), c(0.0, 0.0)], [c(0.0, 0.0), c(cos, sin)]]
}

/// CNOT: first qubit controls, second flips.
pub const CNOT: TwoQubitGate = [
    [c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(0.0, 0.0)],
    [c(0.0, 0.0), c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0)],
    [c(0.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(1.0, 0.0)],
    [c(0.0, 0.0), c(0.0, 0.0), c(1.0, 0.0), c(0.0, 0.0)],
];

/// Controlled-Z.
pub const CZ: TwoQubitGate = [
    [c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(0.0, 0.0)],
    [c(0.0, 0.0), c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0)],
    [c(0.0, 0.0), c(0.0, 0.0), c(1.0, 0.0), c(0.0, 0.0)],
    [c(0.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(-1.0, 0.0)],
];

/// SWAP.
pub const SWAP: TwoQubitGate = [
    [c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(0.0, 0.0)],
    [c(0.0, 0.0), c(0.0, 0.0), c(1.0, 0.0), c(0.0, 0.0)],
    [c(0.0, 0.0), c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0)],
    [c(0.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(1.0, 0.0)],
];

/// Toffoli (CCNOT): an 8×8 identity with rows 6 and 7 swapped
/// (|110⟩ ↔ |111⟩). Fixed to two controls; arbitrary n-control gates are
/// out of scope.
pub fn toffoli() -> ThreeQubitGate {
    let mut matrix = [[ZERO; 8]; 8];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[i] = ONE;
    }
    matrix[6] = [ZERO; 8];
    matrix[7] = [ZERO; 8];
    matrix[6][7] = ONE;
    matrix[7][6] = ONE;
    matrix
}

/// Closed vocabulary of named single-qubit gates.
///
/// `Rx`, `Ry` and `Rz` are parametric and require an angle when the matrix
/// is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    I,
    X,
    Y,
    Z,
    H,
    S,
    T,
    Rx,
    Ry,
    Rz,
}

impl GateKind {
    /// Parse a textual gate name.
    pub fn from_name(name: &str) -> SimResult<Self> {
        match name {
            "I" => Ok(GateKind::I),
            "X" => Ok(GateKind::X),
            "Y" => Ok(GateKind::Y),
            "Z" => Ok(GateKind::Z),
            "H" => Ok(GateKind::H),
            "S" => Ok(GateKind::S),
            "T" => Ok(GateKind::T),
            "Rx" => Ok(GateKind::Rx),
            "Ry" => Ok(GateKind::Ry),
            "Rz" => Ok(GateKind::Rz),
            _ => Err(SimError::UnknownGate {
                name: name.to_owned(),
            }),
        }
    }

    /// Whether this kind needs a rotation angle.
    pub fn requires_angle(self) -> bool {
        matches!(self, GateKind::Rx | GateKind::Ry | GateKind::Rz)
    }

    /// The gate matrix, given an angle for the parametric kinds.
    pub fn matrix(self, angle: Option<f64>) -> SimResult<SingleQubitGate> {
        match (self, angle) {
            (GateKind::I, _) => Ok(IDENTITY),
            (GateKind::X, _) => Ok(PAULI_X),
            (GateKind::Y, _) => Ok(PAULI_Y),
            (GateKind::Z, _) => Ok(PAULI_Z),
            (GateKind::H, _) => Ok(HADAMARD),
            (GateKind::S, _) => Ok(PHASE_S),
            (GateKind::T, _) => Ok(PHASE_T),
            (GateKind::Rx, Some(theta)) => Ok(rx(theta)),
            (GateKind::Ry, Some(theta)) => Ok(ry(theta)),
            (GateKind::Rz, Some(theta)) => Ok(rz(theta)),
            (kind, None) => Err(SimError::UnknownGate {
                name: format!("{:?}", kind),
            }),
        }
    }
}

/// Look up a named single-qubit gate matrix.
pub fn standard_gate(name: &str, angle: Option<f64>) -> SimResult<SingleQubitGate> {
    GateKind::from_name(name)?.matrix(angle)
}

/// Apply a single-qubit gate in place.
///
/// Every index whose target bit is 0 is combined with its bit-flipped
/// partner under the 2×2 transform; each of the 2^n amplitudes is touched
/// exactly once across 2^(n−1) pair operations.
pub fn apply_single_qubit_gate(state: &mut StateVector, gate: &SingleQubitGate, qubit: usize) {
    let mask = 1usize << state.bit_position(qubit);
    let dim = state.dim();
    trace!("single-qubit gate on qubit {qubit} of {dim}-dim state");
    let amps = state.amplitudes_mut();
    for i in 0..dim {
        if i & mask != 0 {
            continue;
        }
        let j = i | mask;
        let a0 = amps[i];
        let a1 = amps[j];
        amps[i] = gate[0][0] * a0 + gate[0][1] * a1;
        amps[j] = gate[1][0] * a0 + gate[1][1] * a1;
    }
}

/// Apply a two-qubit gate in place.
///
/// Indices are grouped into sets of four sharing all bits except the two
/// target bits; the 4×4 transform is applied per group. A visited bitmap
/// guarantees each group is handled exactly once regardless of the bit
/// positions of the two qubits.
pub fn apply_two_qubit_gate(
    state: &mut StateVector,
    gate: &TwoQubitGate,
    qubit_a: usize,
    qubit_b: usize,
) {
    assert_ne!(qubit_a, qubit_b, "two-qubit gate requires distinct qubits");
    let mask_a = 1usize << state.bit_position(qubit_a);
    let mask_b = 1usize << state.bit_position(qubit_b);
    let dim = state.dim();
    trace!("two-qubit gate on qubits ({qubit_a}, {qubit_b}) of {dim}-dim state");
    let mut processed = vec![false; dim];
    let amps = state.amplitudes_mut();
    for i in 0..dim {
        if processed[i] {
            continue;
        }
        let base = i & !(mask_a | mask_b);
        // Row/column order: (a=0,b=0), (a=0,b=1), (a=1,b=0), (a=1,b=1).
        let group = [base, base | mask_b, base | mask_a, base | mask_a | mask_b];
        let old = [amps[group[0]], amps[group[1]], amps[group[2]], amps[group[3]]];
        for (row, &index) in group.iter().enumerate() {
            let mut acc = ZERO;
            for (col, &amp) in old.iter().enumerate() {
                acc += gate[row][col] * amp;
            }
            amps[index] = acc;
        }
        for index in group {
            processed[index] = true;
        }
    }
}

/// Pure-returning variant of [`apply_single_qubit_gate`] for callers that
/// prefer value semantics.
pub fn applied_single_qubit_gate(
    state: &StateVector,
    gate: &SingleQubitGate,
    qubit: usize,
) -> StateVector {
    let mut next = state.clone();
    apply_single_qubit_gate(&mut next, gate, qubit);
    next
}

/// Pure-returning variant of [`apply_two_qubit_gate`].
pub fn applied_two_qubit_gate(
    state: &StateVector,
    gate: &TwoQubitGate,
    qubit_a: usize,
    qubit_b: usize,
) -> StateVector {
    let mut next = state.clone();
    apply_two_qubit_gate(&mut next, gate, qubit_a, qubit_b);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::{approx_eq, NORM_TOLERANCE, ONE, ZERO};

    #[test]
    fn hadamard_twice_restores_zero_state() {
        let mut state = StateVector::zero(1);
        apply_single_qubit_gate(&mut state, &HADAMARD, 0);
        apply_single_qubit_gate(&mut state, &HADAMARD, 0);
        assert!(approx_eq(state.amplitude(0), ONE, NORM_TOLERANCE));
        assert!(approx_eq(state.amplitude(1), ZERO, NORM_TOLERANCE));
    }

    #[test]
    fn pauli_x_flips_target_qubit() {
        // X on qubit 1 of |00⟩ → |01⟩ (index 1, big-endian).
        let mut state = StateVector::zero(2);
        apply_single_qubit_gate(&mut state, &PAULI_X, 1);
        assert!(approx_eq(state.amplitude(1), ONE, NORM_TOLERANCE));
    }

    #[test]
    fn cnot_flips_target_when_control_set() {
        // |10⟩ (index 2): control qubit 0 is set, so CNOT(0,1) gives |11⟩.
        let mut state = StateVector::zero(2);
        apply_single_qubit_gate(&mut state, &PAULI_X, 0);
        apply_two_qubit_gate(&mut state, &CNOT, 0, 1);
        assert!(approx_eq(state.amplitude(3), ONE, NORM_TOLERANCE));
    }

    #[test]
    fn cnot_respects_qubit_argument_order() {
        // |01⟩ (index 1): with control qubit 1, CNOT(1,0) gives |11⟩.
        let mut state = StateVector::zero(2);
        apply_single_qubit_gate(&mut state, &PAULI_X, 1);
        apply_two_qubit_gate(&mut state, &CNOT, 1, 0);
        assert!(approx_eq(state.amplitude(3), ONE, NORM_TOLERANCE));
    }

    #[test]
    fn swap_exchanges_qubits() {
        let mut state = StateVector::zero(2);
        apply_single_qubit_gate(&mut state, &PAULI_X, 1); // |01⟩
        apply_two_qubit_gate(&mut state, &SWAP, 0, 1);
        assert!(approx_eq(state.amplitude(2), ONE, NORM_TOLERANCE)); // |10⟩
    }

    #[test]
    fn toffoli_swaps_last_two_rows_only() {
        let matrix = toffoli();
        for i in 0..6 {
            assert!(approx_eq(matrix[i][i], ONE, NORM_TOLERANCE));
        }
        assert!(approx_eq(matrix[6][7], ONE, NORM_TOLERANCE));
        assert!(approx_eq(matrix[7][6], ONE, NORM_TOLERANCE));
        assert!(approx_eq(matrix[6][6], ZERO, NORM_TOLERANCE));
        assert!(approx_eq(matrix[7][7], ZERO, NORM_TOLERANCE));
    }

    #[test]
    fn gate_kind_parses_known_names() {
        assert_eq!(GateKind::from_name("H").unwrap(), GateKind::H);
        assert_eq!(GateKind::from_name("Rz").unwrap(), GateKind::Rz);
    }

    #[test]
    fn unknown_gate_name_fails() {
        let result = GateKind::from_name("Q");
        assert!(matches!(result, Err(SimError::UnknownGate { name }) if name == "Q"));
    }

    #[test]
    fn parametric_gate_without_angle_fails() {
        let result = standard_gate("Rx", None);
        assert!(matches!(result, Err(SimError::UnknownGate { .. })));
        assert!(standard_gate("Rx", Some(0.5)).is_ok());
    }

    #[test]
    fn fixed_gate_ignores_surplus_angle() {
        let with = standard_gate("H", Some(1.0)).unwrap();
        let without = standard_gate("H", None).unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn applied_variant_leaves_original_untouched() {
        let state = StateVector::zero(1);
        let flipped = applied_single_qubit_gate(&state, &PAULI_X, 0);
        assert!(approx_eq(state.amplitude(0), ONE, NORM_TOLERANCE));
        assert!(approx_eq(flipped.amplitude(1), ONE, NORM_TOLERANCE));
    }

    #[test]
    fn single_qubit_gate_preserves_norm() {
        let mut state = StateVector::uniform(4);
        apply_single_qubit_gate(&mut state, &PHASE_T, 2);
        assert!(state.assert_normalized("after T on qubit 2").is_ok());
    }
}
