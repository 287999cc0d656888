//! Runs the teleportation protocol for every measurement combination and
//! prints the per-stage probability distributions.

use statevector_sim::teleport::Teleportation;
use std::f64::consts::PI;

fn main() {
    let (theta, phi) = (PI / 3.0, PI / 4.0);
    println!("Teleporting θ = {theta:.4}, φ = {phi:.4}\n");

    for (m0, m1) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
        let outcome = Teleportation::run(theta, phi, m0, m1).expect("protocol run");
        println!("Alice measures (m0={m0}, m1={m1}):");
        for record in &outcome.records {
            let probs: Vec<String> = record
                .state
                .probabilities()
                .iter()
                .map(|p| format!("{p:.3}"))
                .collect();
            print!("  {:<14?} [{}]", record.stage, probs.join(", "));
            if let Some(measurement) = record.measurement {
                print!(
                    "  ← outcome {} (p = {:.3})",
                    measurement.outcome, measurement.probability
                );
            }
            println!();
        }
        println!(
            "  Bob's qubit: θ = {:.6}, φ = {:.6}\n",
            outcome.bob_angles.theta, outcome.bob_angles.phi
        );
    }
}
