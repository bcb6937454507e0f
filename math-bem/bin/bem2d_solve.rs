//! Solve a 2D scattering problem described by a JSON or TOML file
//!
//! Writes incident, scattered and total pressure at the configured
//! evaluation points as JSON.
//!
//! Usage:
//!   cargo run --release --bin bem2d-solve -- --config case.toml --output field.json

use clap::{Parser, ValueEnum};
use math_audio_bem2d::core::io::load_config;
use math_audio_bem2d::core::{BemProblem, BemSolver, Formulation};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bem2d-solve")]
#[command(about = "2D Helmholtz scattering with the boundary element method", long_about = None)]
struct Args {
    /// Path to JSON or TOML configuration file
    #[arg(short, long)]
    config: PathBuf,

    /// Output JSON file path
    #[arg(short, long, default_value = "field.json")]
    output: PathBuf,

    /// Override the formulation of the configuration
    #[arg(short, long)]
    formulation: Option<FormulationArg>,

    /// Number of parallel threads (default: all cores)
    #[arg(short = 't', long)]
    threads: Option<usize>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormulationArg {
    /// Kirchhoff-Helmholtz
    Kh,
    /// Burton-Miller
    Bm,
    /// Burton-Miller from layer operators
    FastBm,
}

impl From<FormulationArg> for Formulation {
    fn from(arg: FormulationArg) -> Self {
        match arg {
            FormulationArg::Kh => Formulation::KirchhoffHelmholtz,
            FormulationArg::Bm => Formulation::BurtonMiller,
            FormulationArg::FastBm => Formulation::FastBurtonMiller,
        }
    }
}

#[derive(Serialize)]
struct FieldRecord {
    x: f64,
    y: f64,
    p_incident: [f64; 2],
    p_scattered: [f64; 2],
    p_total: [f64; 2],
    spl_db: f64,
}

#[derive(Serialize)]
struct Output {
    description: String,
    formulation: Formulation,
    frequency: f64,
    num_elements: usize,
    surface_pressure: Vec<[f64; 2]>,
    field: Vec<FieldRecord>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    let config = load_config(&args.config)?;
    let base_dir = args
        .config
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let problem = BemProblem::from_config(&config, &base_dir)?;
    let mut solver = BemSolver::from_config(&config);
    if let Some(formulation) = args.formulation {
        solver = solver.with_formulation(formulation.into());
    }

    println!(
        "Solving {} elements at {:.1} Hz with {:?}",
        problem.mesh.num_elements(),
        problem.physics.frequency,
        solver.formulation
    );
    let solution = solver.solve(&problem)?;

    let points = config.evaluation_points(&base_dir)?;
    let field = solution
        .evaluate_pressure_field(&points)?
        .into_iter()
        .map(|fp| FieldRecord {
            x: fp.position[0],
            y: fp.position[1],
            p_incident: [fp.p_incident.re, fp.p_incident.im],
            p_scattered: [fp.p_scattered.re, fp.p_scattered.im],
            p_total: [fp.p_total.re, fp.p_total.im],
            spl_db: fp.spl_db(),
        })
        .collect();

    let output = Output {
        description: config.description.clone(),
        formulation: solver.formulation,
        frequency: problem.physics.frequency,
        num_elements: problem.mesh.num_elements(),
        surface_pressure: solution
            .surface_pressure
            .iter()
            .map(|p| [p.re, p.im])
            .collect(),
        field,
    };

    fs::write(&args.output, serde_json::to_string_pretty(&output)?)?;
    println!("Results written to {}", args.output.display());
    Ok(())
}
