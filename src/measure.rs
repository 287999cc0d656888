//! Born-rule measurement: marginal probabilities, projection, sampling.
//!
//! Projection returns a NEW state vector rather than mutating in place:
//! measurement is a transition to a new conditional distribution, not an
//! edit of the old one.

use crate::complex::{Complex64, EPSILON, ZERO};
use crate::error::{SimError, SimResult};
use crate::state::StateVector;
use log::trace;
use rand::Rng;

/// A classical measurement result: the observed bit and the Born-rule
/// probability that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub outcome: u8,
    pub probability: f64,
}

/// Marginal probabilities (P(0), P(1)) of measuring `qubit`.
pub fn qubit_probabilities(state: &StateVector, qubit: usize) -> (f64, f64) {
    let bit = state.bit_position(qubit);
    let mut p0 = 0.0;
    let mut p1 = 0.0;
    for (k, amp) in state.amplitudes().iter().enumerate() {
        let prob = amp.norm_sqr();
        if (k >> bit) & 1 == 0 {
            p0 += prob;
        } else {
            p1 += prob;
        }
    }
    (p0, p1)
}

/// Collapse `state` onto `qubit` = `outcome`.
///
/// Amplitudes inconsistent with the outcome are zeroed and the survivors
/// rescaled by 1/√P(outcome). Fails with
/// [`SimError::ZeroProbabilityOutcome`] when the outcome has negligible
/// probability; one cannot condition on an impossible event.
pub fn project_and_normalize(
    state: &StateVector,
    qubit: usize,
    outcome: u8,
) -> SimResult<StateVector> {
    assert!(outcome <= 1, "measurement outcome must be 0 or 1");
    let bit = state.bit_position(qubit);
    let want = outcome as usize;
    let probability: f64 = state
        .amplitudes()
        .iter()
        .enumerate()
        .filter(|&(k, _)| (k >> bit) & 1 == want)
        .map(|(_, amp)| amp.norm_sqr())
        .sum();
    if probability < EPSILON {
        return Err(SimError::ZeroProbabilityOutcome {
            qubit,
            outcome,
            probability,
        });
    }
    let rescale = 1.0 / probability.sqrt();
    let amps: Vec<Complex64> = state
        .amplitudes()
        .iter()
        .enumerate()
        .map(|(k, &amp)| {
            if (k >> bit) & 1 == want {
                amp.scale(rescale)
            } else {
                ZERO
            }
        })
        .collect();
    trace!("projected qubit {qubit} onto {outcome} with probability {probability}");
    Ok(StateVector::from_raw(state.num_qubits(), amps))
}

/// Sample a measurement of `qubit` from the Born distribution and collapse.
///
/// Protocol drivers that need reproducible pedagogy pass predetermined
/// outcomes to [`project_and_normalize`] instead; this entry point is for
/// stochastic runs with a caller-supplied (typically seeded) RNG.
pub fn measure_qubit<R: Rng>(
    state: &StateVector,
    qubit: usize,
    rng: &mut R,
) -> SimResult<(Measurement, StateVector)> {
    let (p0, p1) = qubit_probabilities(state, qubit);
    let draw: f64 = rng.gen();
    let (outcome, probability) = if draw < p0 { (0, p0) } else { (1, p1) };
    let collapsed = project_and_normalize(state, qubit, outcome)?;
    Ok((
        Measurement {
            outcome,
            probability,
        },
        collapsed,
    ))
}
