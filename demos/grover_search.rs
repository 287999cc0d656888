//! Grover's search over a 3-qubit register, printing the probability of
//! every basis state after each amplification round.

use statevector_sim::gate::{apply_single_qubit_gate, HADAMARD};
use statevector_sim::grover::{apply_diffusion, apply_oracle, optimal_iterations};
use statevector_sim::state::StateVector;

fn main() {
    let num_qubits = 3;
    let targets = [5usize];

    let mut state = StateVector::zero(num_qubits);
    let labels = state.basis_labels();
    println!("Searching for {} among {} states", labels[targets[0]], state.dim());

    for qubit in 0..num_qubits {
        apply_single_qubit_gate(&mut state, &HADAMARD, qubit);
    }
    print_distribution("uniform superposition", &state, &labels);

    let rounds = optimal_iterations(state.dim(), targets.len());
    for round in 1..=rounds {
        apply_oracle(&mut state, &targets);
        apply_diffusion(&mut state);
        print_distribution(&format!("after iteration {round}"), &state, &labels);
    }

    let success: f64 = targets.iter().map(|&t| state.amplitude(t).norm_sqr()).sum();
    println!("\nSuccess probability after {rounds} rounds: {success:.4}");
}

fn print_distribution(title: &str, state: &StateVector, labels: &[String]) {
    println!("\n{title}:");
    for (label, prob) in labels.iter().zip(state.probabilities()) {
        let bar = "#".repeat((prob * 40.0).round() as usize);
        println!("  {label}  {prob:.4}  {bar}");
    }
}
