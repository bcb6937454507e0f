//! QA Suite for the 2D BEM solver
//!
//! Validates plane-wave scattering by a circular cylinder against the
//! cylindrical wave expansion, for every formulation, in the Rayleigh,
//! resonance and geometric regimes, rigid and absorbing.
//!
//! Usage:
//!     cargo run --bin qa-suite --release

use math_audio_bem2d::analytical::{Point, cylinder_scattered_2d, cylinder_series_terms};
use math_audio_bem2d::core::mesh::{circle_element_count, circle_mesh};
use math_audio_bem2d::core::postprocess::circle_eval_points;
use math_audio_bem2d::core::{BemProblem, BemSolver, Formulation, IncidentField, PhysicsParams};
use math_audio_bem2d::testing::ValidationResult;
use num_complex::Complex64;
use std::path::Path;

const IMPEDANCE: f64 = 343.0 * 1.21;
const RADIUS: f64 = 0.1;
const MIN_ELEMENTS: usize = 180;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Starting 2D BEM QA Suite...");
    println!("===========================");

    let formulations = [
        Formulation::KirchhoffHelmholtz,
        Formulation::BurtonMiller,
        Formulation::FastBurtonMiller,
    ];
    let regimes = [("Rayleigh", 0.2), ("Resonance", 1.0), ("Geometric", 3.0)];

    let mut results = Vec::new();
    for (regime, ka) in regimes {
        for specific_admittance in [0.0, 0.5] {
            for formulation in formulations {
                let name = format!(
                    "Cylinder ({}, ka={}, β={}) [{:?}]",
                    regime, ka, specific_admittance, formulation
                );
                results.push(run_scattering_test(&name, ka, specific_admittance, formulation)?);
            }
        }
    }

    print_summary(&results);

    let output_path = "qa_results_2d.json";
    save_results(&results, output_path)?;
    println!("\nFull results saved to: {}", output_path);

    let mut failed = false;
    for res in &results {
        if !res.passed(0.01) {
            eprintln!(
                "TEST FAILED: {} (Error: {:.3}%)",
                res.test_name,
                res.errors.l2_relative * 100.0
            );
            failed = true;
        }
    }

    if failed {
        std::process::exit(1);
    }
    println!("\nALL TESTS PASSED");
    Ok(())
}

fn run_scattering_test(
    name: &str,
    ka: f64,
    specific_admittance: f64,
    formulation: Formulation,
) -> anyhow::Result<ValidationResult> {
    println!("  Executing: {}...", name);
    let start_time = std::time::Instant::now();

    let k = ka / RADIUS;
    let wavelength = 2.0 * std::f64::consts::PI / k;
    let count = circle_element_count(RADIUS, wavelength / 16.0, MIN_ELEMENTS);
    let mesh = circle_mesh([0.0, 0.0], RADIUS, count)?
        .with_uniform_admittance(Complex64::new(specific_admittance / IMPEDANCE, 0.0));
    let problem = BemProblem::new(
        mesh,
        PhysicsParams::from_wave_number(k, IMPEDANCE),
        IncidentField::plane_wave([1.0, 0.0], 1.0),
    );
    let solution = BemSolver::new()
        .with_formulation(formulation)
        .solve(&problem)?;

    let microphones = circle_eval_points([0.0, 0.0], 2.0 * RADIUS, 72);
    let scattered = solution.scattered_pressure(&microphones)?;
    let execution_time_ms = start_time.elapsed().as_millis() as u64;

    let analytical = cylinder_scattered_2d(
        k,
        RADIUS,
        Complex64::new(specific_admittance, 0.0),
        Complex64::new(1.0, 0.0),
        cylinder_series_terms(ka),
        microphones
            .rows()
            .into_iter()
            .map(|row| Point::new(row[0], row[1]))
            .collect(),
    );

    ValidationResult::new(
        name,
        &analytical,
        &scattered.to_vec(),
        Some(problem.mesh.num_elements()),
        execution_time_ms,
    )
}

fn print_summary(results: &[ValidationResult]) {
    println!("\nQA Summary");
    println!("{:-<90}", "");
    println!("{:<62} {:>8} {:>10} {:>6}", "Test", "N", "L2 rel", "ms");
    println!("{:-<90}", "");
    for res in results {
        println!(
            "{:<62} {:>8} {:>10.3e} {:>6}",
            res.test_name,
            res.parameters.num_elements.unwrap_or(0),
            res.errors.l2_relative,
            res.metadata.execution_time_ms
        );
    }
}

fn save_results(results: &[ValidationResult], path: impl AsRef<Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(path, json)?;
    Ok(())
}
