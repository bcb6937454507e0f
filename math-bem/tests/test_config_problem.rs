//! Configuration-driven solve
//!
//! Builds a full problem from a TOML document, solves it with each
//! formulation and checks the scattered field against the series solution.

use math_audio_bem2d::analytical::{Point, cylinder_scattered_2d, cylinder_series_terms};
use math_audio_bem2d::core::io::{ConfigFormat, load_config, parse_config, save_config};
use math_audio_bem2d::core::{BemProblem, BemSolver, Formulation, solve_surface_pressure};
use math_audio_bem2d::testing::complex_relative_error;
use num_complex::Complex64;
use std::path::Path;

const CONFIG: &str = r#"
description = "Absorbing cylinder at 100 Hz"

[physics]
frequency = 100.0
speed_of_sound = 343.0
density = 1.21

[mesh.circle]
radius = 0.5
elements = 96

[solver]
formulation = "burton_miller"

[[boundary_conditions]]
elements = [0, 95]
type = "specific_admittance"
value = 0.5

[sources]
[[sources.plane_waves]]
direction = [1.0, 0.0]
amplitude = 1.0

[output]
evaluation_points = [[1.5, 0.0], [0.0, 1.5], [-1.5, 0.0], [0.0, -1.5], [1.0, 1.0], [-1.0, -1.0]]
"#;

#[test]
fn test_config_problem_matches_series() {
    let config = parse_config(CONFIG, ConfigFormat::Toml).unwrap();
    let base_dir = Path::new(".");
    let problem = BemProblem::from_config(&config, base_dir).unwrap();
    let points = config.evaluation_points(base_dir).unwrap();

    let k = problem.physics.wave_number;
    let analytical = cylinder_scattered_2d(
        k,
        0.5,
        Complex64::new(0.5, 0.0),
        Complex64::new(1.0, 0.0),
        cylinder_series_terms(k * 0.5),
        points
            .rows()
            .into_iter()
            .map(|row| Point::new(row[0], row[1]))
            .collect(),
    );

    for formulation in [
        Formulation::KirchhoffHelmholtz,
        Formulation::BurtonMiller,
        Formulation::FastBurtonMiller,
    ] {
        let solution = BemSolver::from_config(&config)
            .with_formulation(formulation)
            .solve(&problem)
            .unwrap();
        let scattered = solution.scattered_pressure(&points).unwrap();

        let error = complex_relative_error(&analytical.pressure, &scattered.to_vec());
        assert!(error < 0.01, "{:?}: relative error {:.3e}", formulation, error);
    }
}

#[test]
fn test_solve_surface_pressure_dispatch() {
    let config = parse_config(CONFIG, ConfigFormat::Toml).unwrap();
    let problem = BemProblem::from_config(&config, Path::new(".")).unwrap();
    let (p_inc, grad) = problem
        .incident_field
        .surface_excitation(&problem.mesh, &problem.physics);

    let from_config =
        solve_surface_pressure(&config, &problem.mesh, &p_inc, &grad, &problem.physics).unwrap();
    let direct = BemSolver::new()
        .solve_surface_pressure(&problem.mesh, &p_inc, &grad, &problem.physics)
        .unwrap();

    assert_eq!(from_config.len(), 96);
    assert!((&from_config - &direct).iter().all(|d| d.norm() < 1e-12));
}

#[test]
fn test_config_file_round_trip() {
    let config = parse_config(CONFIG, ConfigFormat::Toml).unwrap();
    let dir = std::env::temp_dir().join(format!("bem2d-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    for name in ["case.json", "case.toml"] {
        let path = dir.join(name);
        save_config(&config, &path).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
    }
    std::fs::remove_dir_all(&dir).unwrap();
}
