//! Quantum teleportation as a fixed eight-stage state machine.
//!
//! Alice holds qubit 0 in the state described by the input Bloch angles;
//! qubits 1 and 2 start in |0⟩ and become the shared Bell pair. The
//! protocol runs the same stage sequence every time; the only data-driven
//! behavior is Bob's correction, which depends on Alice's two measurement
//! outcomes. Outcomes are provided by the caller rather than sampled, so a
//! run is fully reproducible.
//!
//! Each [`advance`](Teleportation::advance) emits a [`StageRecord`] with a
//! deep-copied snapshot of the register: records stay valid no matter how
//! the protocol state mutates afterwards.

use crate::bloch::BlochAngles;
use crate::complex::Complex64;
use crate::error::SimResult;
use crate::gate::{
    apply_single_qubit_gate, apply_two_qubit_gate, CNOT, HADAMARD, PAULI_X, PAULI_Z,
};
use crate::measure::{project_and_normalize, qubit_probabilities, Measurement};
use crate::state::StateVector;
use log::debug;

const NUM_QUBITS: usize = 3;

/// The stages of the protocol, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeleportStage {
    /// Build |ψ⟩⊗|00⟩ from the input Bloch angles.
    Initialize,
    /// Hadamard on qubit 1.
    BellHadamard,
    /// CNOT(1,2); qubits 1 and 2 now form a Bell pair.
    BellCnot,
    /// CNOT(0,1).
    AliceCnot,
    /// Hadamard on qubit 0.
    AliceHadamard,
    /// Project qubit 0 onto the provided outcome m0.
    MeasureQubit0,
    /// Project qubit 1 onto the provided outcome m1.
    MeasureQubit1,
    /// Bob applies X^m1 then Z^m0 to qubit 2.
    Correction,
}

impl TeleportStage {
    /// Fixed execution order; there is no branching between stages.
    pub const SEQUENCE: [TeleportStage; 8] = [
        TeleportStage::Initialize,
        TeleportStage::BellHadamard,
        TeleportStage::BellCnot,
        TeleportStage::AliceCnot,
        TeleportStage::AliceHadamard,
        TeleportStage::MeasureQubit0,
        TeleportStage::MeasureQubit1,
        TeleportStage::Correction,
    ];

    fn label(self) -> &'static str {
        match self {
            TeleportStage::Initialize => "initialize |ψ⟩⊗|00⟩",
            TeleportStage::BellHadamard => "after H on qubit 1",
            TeleportStage::BellCnot => "after CNOT(1,2)",
            TeleportStage::AliceCnot => "after CNOT(0,1)",
            TeleportStage::AliceHadamard => "after H on qubit 0",
            TeleportStage::MeasureQubit0 => "after measuring qubit 0",
            TeleportStage::MeasureQubit1 => "after measuring qubit 1",
            TeleportStage::Correction => "after Bob's correction",
        }
    }
}

/// Snapshot emitted after each stage.
///
/// `state` is an owned deep copy, so later protocol mutations never show
/// through. `measurement` is present for the two measurement stages.
#[derive(Debug, Clone)]
pub struct StageRecord {
    pub stage: TeleportStage,
    pub state: StateVector,
    pub classical_bits: Vec<u8>,
    pub measurement: Option<Measurement>,
}

/// Final result of a completed run.
#[derive(Debug, Clone)]
pub struct TeleportOutcome {
    pub records: Vec<StageRecord>,
    /// Bloch angles recovered from Bob's qubit.
    pub bob_angles: BlochAngles,
    pub bob_cartesian: (f64, f64, f64),
}

/// Driver for the teleportation protocol.
#[derive(Debug, Clone)]
pub struct Teleportation {
    input: BlochAngles,
    m0: u8,
    m1: u8,
    state: StateVector,
    next: usize,
    classical_bits: Vec<u8>,
}

impl Teleportation {
    /// Set up a run teleporting the state (theta, phi) with Alice's
    /// predetermined measurement outcomes `m0` and `m1`.
    pub fn new(theta: f64, phi: f64, m0: u8, m1: u8) -> Self {
        assert!(m0 <= 1 && m1 <= 1, "measurement outcomes must be 0 or 1");
        Self {
            input: BlochAngles::new(theta, phi),
            m0,
            m1,
            state: StateVector::zero(NUM_QUBITS),
            next: 0,
            classical_bits: Vec::with_capacity(2),
        }
    }

    /// Execute the next stage, returning its record, or `None` once the
    /// sequence is exhausted.
    pub fn advance(&mut self) -> SimResult<Option<StageRecord>> {
        let Some(&stage) = TeleportStage::SEQUENCE.get(self.next) else {
            return Ok(None);
        };
        let mut measurement = None;

        match stage {
            TeleportStage::Initialize => {
                let (alpha0, alpha1) = self.input.to_state();
                let psi = StateVector::from_amplitudes(1, vec![alpha0, alpha1])?;
                self.state = psi.tensor(&StateVector::zero(2));
            }
            TeleportStage::BellHadamard => {
                apply_single_qubit_gate(&mut self.state, &HADAMARD, 1);
            }
            TeleportStage::BellCnot => {
                apply_two_qubit_gate(&mut self.state, &CNOT, 1, 2);
            }
            TeleportStage::AliceCnot => {
                apply_two_qubit_gate(&mut self.state, &CNOT, 0, 1);
            }
            TeleportStage::AliceHadamard => {
                apply_single_qubit_gate(&mut self.state, &HADAMARD, 0);
            }
            TeleportStage::MeasureQubit0 => {
                measurement = Some(self.measure(0, self.m0)?);
            }
            TeleportStage::MeasureQubit1 => {
                measurement = Some(self.measure(1, self.m1)?);
            }
            TeleportStage::Correction => {
                // X before Z: the correction is X^m1·Z^m0 applied
                // right-to-left to the state.
                if self.m1 == 1 {
                    apply_single_qubit_gate(&mut self.state, &PAULI_X, 2);
                }
                if self.m0 == 1 {
                    apply_single_qubit_gate(&mut self.state, &PAULI_Z, 2);
                }
            }
        }

        self.state.assert_normalized(stage.label())?;
        self.next += 1;
        debug!("teleportation stage {:?} complete", stage);

        Ok(Some(StageRecord {
            stage,
            state: self.state.clone(),
            classical_bits: self.classical_bits.clone(),
            measurement,
        }))
    }

    fn measure(&mut self, qubit: usize, outcome: u8) -> SimResult<Measurement> {
        let (p0, p1) = qubit_probabilities(&self.state, qubit);
        let probability = if outcome == 0 { p0 } else { p1 };
        self.state = project_and_normalize(&self.state, qubit, outcome)?;
        self.classical_bits.push(outcome);
        Ok(Measurement {
            outcome,
            probability,
        })
    }

    /// Whether all eight stages have executed.
    pub fn is_complete(&self) -> bool {
        self.next == TeleportStage::SEQUENCE.len()
    }

    /// Current register contents.
    pub fn state(&self) -> &StateVector {
        &self.state
    }

    /// Classical bits Alice has sent so far.
    pub fn classical_bits(&self) -> &[u8] {
        &self.classical_bits
    }

    /// Bob's qubit after completion: the two surviving amplitudes at
    /// indices base and base|1, where base = m0<<2 | m1<<1.
    pub fn bob_qubit(&self) -> Option<(Complex64, Complex64)> {
        if !self.is_complete() {
            return None;
        }
        let base = ((self.m0 as usize) << 2) | ((self.m1 as usize) << 1);
        Some((self.state.amplitude(base), self.state.amplitude(base | 1)))
    }

    /// Drive a fresh protocol run to completion.
    pub fn run(theta: f64, phi: f64, m0: u8, m1: u8) -> SimResult<TeleportOutcome> {
        let mut protocol = Teleportation::new(theta, phi, m0, m1);
        let mut records = Vec::with_capacity(TeleportStage::SEQUENCE.len());
        while let Some(record) = protocol.advance()? {
            records.push(record);
        }
        let base = ((m0 as usize) << 2) | ((m1 as usize) << 1);
        let alpha0 = protocol.state.amplitude(base);
        let alpha1 = protocol.state.amplitude(base | 1);
        let bob_angles = BlochAngles::from_state(alpha0, alpha1);
        Ok(TeleportOutcome {
            records,
            bob_angles,
            bob_cartesian: bob_angles.to_cartesian(),
        })
    }
}
