//! Dense state-vector representation.
//!
//! An n-qubit register stores 2^n complex amplitudes indexed by the
//! big-endian bit pattern of the basis label: qubit 0 is the most
//! significant bit, so qubit q maps to bit position n−1−q of the index.
//! Memory and per-gate time are O(2^n); the realistic ceiling for this
//! representation is tens of qubits, not hundreds.
//!
//! Gate application mutates the vector in place through an exclusive
//! reference. Callers that want to retain an earlier value (e.g. to record
//! a "before" snapshot) must `clone()` before the mutating call; two
//! retained snapshots must never alias the same buffer.

use crate::complex::{Complex64, NORM_TOLERANCE, ONE, ZERO};
use crate::error::{SimError, SimResult};

/// Dense amplitude vector for an n-qubit register.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    num_qubits: usize,
    amps: Vec<Complex64>,
}

impl StateVector {
    /// The |0...0⟩ state: amplitude 1+0i at index 0, zero elsewhere.
    pub fn zero(num_qubits: usize) -> Self {
        assert!(num_qubits >= 1, "at least one qubit required");
        assert!(
            num_qubits <= 30,
            "num_qubits > 30 would require more than 8 GiB of amplitudes"
        );
        let dim = 1usize << num_qubits;
        let mut amps = vec![ZERO; dim];
        amps[0] = ONE;
        Self { num_qubits, amps }
    }

    /// The uniform superposition H^{⊗n}|0...0⟩: every amplitude 1/√(2^n).
    pub fn uniform(num_qubits: usize) -> Self {
        assert!(num_qubits >= 1, "at least one qubit required");
        let dim = 1usize << num_qubits;
        let amp = Complex64::new(1.0 / (dim as f64).sqrt(), 0.0);
        Self {
            num_qubits,
            amps: vec![amp; dim],
        }
    }

    /// Build a state from explicit amplitudes.
    ///
    /// Fails with [`SimError::WrongDimension`] unless exactly 2^n amplitudes
    /// are supplied, and with [`SimError::NotNormalized`] if they do not sum
    /// to unit probability.
    pub fn from_amplitudes(num_qubits: usize, amps: Vec<Complex64>) -> SimResult<Self> {
        let expected = 1usize << num_qubits;
        if amps.len() != expected {
            return Err(SimError::WrongDimension {
                expected,
                actual: amps.len(),
            });
        }
        let state = Self { num_qubits, amps };
        state.assert_normalized("from_amplitudes")?;
        Ok(state)
    }

    /// Internal constructor for amplitudes already known to be consistent.
    pub(crate) fn from_raw(num_qubits: usize, amps: Vec<Complex64>) -> Self {
        debug_assert_eq!(amps.len(), 1 << num_qubits);
        Self { num_qubits, amps }
    }

    /// Number of qubits in the register.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Dimension of the state space: 2^n.
    pub fn dim(&self) -> usize {
        self.amps.len()
    }

    /// The amplitude at basis index `index`.
    pub fn amplitude(&self, index: usize) -> Complex64 {
        self.amps[index]
    }

    /// Read-only view of all amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amps
    }

    /// Mutable amplitude access for in-place gate application.
    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex64] {
        &mut self.amps
    }

    /// Bit position of `qubit` in a basis index (big-endian: n−1−qubit).
    pub fn bit_position(&self, qubit: usize) -> usize {
        assert!(
            qubit < self.num_qubits,
            "qubit {} out of range for {}-qubit state",
            qubit,
            self.num_qubits
        );
        self.num_qubits - 1 - qubit
    }

    /// Σ|amplitude|² over the whole vector.
    pub fn norm_sqr(&self) -> f64 {
        self.amps.iter().map(|amp| amp.norm_sqr()).sum()
    }

    /// Verify the normalization invariant: |norm² − 1| ≤ 1e-9.
    ///
    /// Invoked after every mutation at protocol call sites; the invariant is
    /// checked explicitly, never assumed.
    pub fn assert_normalized(&self, context: &str) -> SimResult<()> {
        let norm_sqr = self.norm_sqr();
        if (norm_sqr - 1.0).abs() > NORM_TOLERANCE {
            return Err(SimError::NotNormalized {
                context: context.to_owned(),
                norm_sqr,
            });
        }
        Ok(())
    }

    /// Born-rule measurement probabilities: |amplitude_k|² per basis index.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amps.iter().map(|amp| amp.norm_sqr()).collect()
    }

    /// Tensor (Kronecker) product: `self` becomes the high-order qubits.
    pub fn tensor(&self, other: &StateVector) -> StateVector {
        let mut amps = Vec::with_capacity(self.dim() * other.dim());
        for a in &self.amps {
            for b in &other.amps {
                amps.push(a * b);
            }
        }
        StateVector {
            num_qubits: self.num_qubits + other.num_qubits,
            amps,
        }
    }

    /// Ket labels for every basis index: `["|00⟩", "|01⟩", ...]`.
    pub fn basis_labels(&self) -> Vec<String> {
        (0..self.dim())
            .map(|k| format!("|{:0width$b}⟩", k, width = self.num_qubits))
            .collect()
    }
}
