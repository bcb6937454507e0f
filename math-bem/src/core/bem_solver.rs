//! High-level BEM Solver API
//!
//! Ties mesh, incident field, system solve and post-processing together.
//!
//! # Example
//!
//! ```no_run
//! use math_audio_bem2d::core::{BemProblem, BemSolver, Formulation};
//!
//! // Sound-hard cylinder of radius 1 at k = 2
//! let problem = BemProblem::cylinder_scattering(1.0, 2.0, 343.0, 0.0)?;
//! let solution = BemSolver::new()
//!     .with_formulation(Formulation::BurtonMiller)
//!     .solve(&problem)?;
//!
//! let p = solution.evaluate_pressure([2.0, 0.0])?;
//! # Ok::<(), math_audio_bem2d::core::BemError>(())
//! ```

use std::f64::consts::PI;
use std::path::Path;

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::assembly::LayerOperators;
use crate::core::incident::IncidentField;
use crate::core::integration::QuadratureParams;
use crate::core::io::{BemConfig, ConfigError};
use crate::core::mesh::{circle_element_count, circle_mesh};
use crate::core::postprocess::{
    AdmittanceFieldIntegrand, FieldPoint, calc_solution_at, total_field_at,
};
use crate::core::solver::{
    burton_miller_solver_with_params, kirchhoff_helmholtz_solver_with_params,
    fast_burton_miller_solver_with_params, solve_with_operators,
};
use crate::core::types::{Mesh, MeshError, PhysicsParams};
use math_audio_dense::LuError;

/// Boundary integral formulation of the surface problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formulation {
    /// Kirchhoff-Helmholtz equation (fails at irregular frequencies)
    #[serde(alias = "kh")]
    KirchhoffHelmholtz,
    /// Burton-Miller combined equation
    #[default]
    #[serde(alias = "bm")]
    BurtonMiller,
    /// Burton-Miller from precomputed layer operators
    #[serde(alias = "fast_bm")]
    FastBurtonMiller,
}

/// BEM solver configuration
#[derive(Debug, Clone, PartialEq)]
pub struct BemSolver {
    /// Boundary integral formulation
    pub formulation: Formulation,
    /// Burton-Miller coupling β = i·scale/k
    pub coupling_scale: f64,
    /// Quadrature parameters
    pub quadrature: QuadratureParams,
}

impl Default for BemSolver {
    fn default() -> Self {
        Self {
            formulation: Formulation::BurtonMiller,
            coupling_scale: 1.0,
            quadrature: QuadratureParams::default(),
        }
    }
}

impl BemSolver {
    /// Create a new solver with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Solver described by the `solver` and `quadrature` sections of a config
    pub fn from_config(config: &BemConfig) -> Self {
        Self {
            formulation: config.solver.formulation,
            coupling_scale: config.solver.coupling_scale.unwrap_or(1.0),
            quadrature: config.quadrature,
        }
    }

    /// Set the formulation
    pub fn with_formulation(mut self, formulation: Formulation) -> Self {
        self.formulation = formulation;
        self
    }

    /// Set the Burton-Miller coupling scale
    pub fn with_coupling_scale(mut self, scale: f64) -> Self {
        self.coupling_scale = scale;
        self
    }

    /// Set the quadrature parameters
    pub fn with_quadrature(mut self, quadrature: QuadratureParams) -> Self {
        self.quadrature = quadrature;
        self
    }

    /// Surface pressure for a given excitation at the element centers
    pub fn solve_surface_pressure(
        &self,
        mesh: &Mesh,
        p_inc: &Array1<Complex64>,
        grad_p_inc: &Array2<Complex64>,
        physics: &PhysicsParams,
    ) -> Result<Array1<Complex64>, BemError> {
        if self.coupling_scale == 0.0 && self.formulation != Formulation::KirchhoffHelmholtz {
            return Err(BemError::InvalidParameters(
                "Burton-Miller coupling scale must be non-zero".to_string(),
            ));
        }

        match self.formulation {
            Formulation::KirchhoffHelmholtz => kirchhoff_helmholtz_solver_with_params(
                mesh,
                p_inc,
                grad_p_inc,
                physics,
                &self.quadrature,
            ),
            Formulation::BurtonMiller => burton_miller_solver_with_params(
                mesh,
                p_inc,
                grad_p_inc,
                physics,
                self.coupling_scale,
                &self.quadrature,
            ),
            Formulation::FastBurtonMiller => fast_burton_miller_solver_with_params(
                mesh,
                p_inc,
                grad_p_inc,
                physics,
                self.coupling_scale,
                &self.quadrature,
            ),
        }
    }

    /// Solve with layer operators assembled earlier for the same mesh and k
    pub fn solve_with_operators(
        &self,
        operators: &LayerOperators,
        problem: &BemProblem,
    ) -> Result<BemSolution, BemError> {
        let (p_inc, grad) = problem
            .incident_field
            .surface_excitation(&problem.mesh, &problem.physics);
        let beta = problem.physics.burton_miller_beta_scaled(self.coupling_scale);
        let surface_pressure =
            solve_with_operators(operators, &problem.mesh, &p_inc, &grad, &problem.physics, beta)?;
        Ok(self.solution(problem, surface_pressure))
    }

    /// Solve a BEM problem
    pub fn solve(&self, problem: &BemProblem) -> Result<BemSolution, BemError> {
        log::info!(
            "Solving BEM problem: {} elements, ka = {:.3}, {:?}",
            problem.mesh.num_elements(),
            problem.ka(),
            self.formulation
        );

        let (p_inc, grad) = problem
            .incident_field
            .surface_excitation(&problem.mesh, &problem.physics);
        let surface_pressure =
            self.solve_surface_pressure(&problem.mesh, &p_inc, &grad, &problem.physics)?;

        let solution = self.solution(problem, surface_pressure);
        log::info!(
            "Solution complete. Max surface pressure: {:.6}",
            solution.max_surface_pressure()
        );
        Ok(solution)
    }

    fn solution(&self, problem: &BemProblem, surface_pressure: Array1<Complex64>) -> BemSolution {
        BemSolution {
            surface_pressure,
            mesh: problem.mesh.clone(),
            incident_field: problem.incident_field.clone(),
            physics: problem.physics.clone(),
            quadrature: self.quadrature,
        }
    }
}

/// Surface pressure with the formulation and quadrature chosen by `config`
pub fn solve_surface_pressure(
    config: &BemConfig,
    mesh: &Mesh,
    p_inc: &Array1<Complex64>,
    grad_p_inc: &Array2<Complex64>,
    physics: &PhysicsParams,
) -> Result<Array1<Complex64>, BemError> {
    BemSolver::from_config(config).solve_surface_pressure(mesh, p_inc, grad_p_inc, physics)
}

/// Definition of a BEM problem
#[derive(Debug, Clone)]
pub struct BemProblem {
    /// Boundary mesh with admittances
    pub mesh: Mesh,
    /// Physical parameters
    pub physics: PhysicsParams,
    /// Incident field
    pub incident_field: IncidentField,
}

impl BemProblem {
    /// Create a problem from its parts
    pub fn new(mesh: Mesh, physics: PhysicsParams, incident_field: IncidentField) -> Self {
        Self {
            mesh,
            physics,
            incident_field,
        }
    }

    /// Plane wave along +x scattered by a circular cylinder at the origin
    ///
    /// The boundary is meshed with at least 16 elements per wavelength and
    /// never fewer than 32 elements; every element gets the specific
    /// `admittance` (relative to 1/z₀).
    pub fn cylinder_scattering(
        radius: f64,
        wave_number: f64,
        impedance: f64,
        specific_admittance: f64,
    ) -> Result<Self, BemError> {
        let physics = PhysicsParams::from_wave_number(wave_number, impedance);
        if !physics.is_valid() {
            return Err(BemError::InvalidParameters(format!(
                "wave number must be positive and finite, got {}",
                wave_number
            )));
        }

        let wavelength = 2.0 * PI / wave_number;
        let count = circle_element_count(radius, wavelength / 16.0, 32);
        let mesh = circle_mesh([0.0, 0.0], radius, count)?
            .with_uniform_admittance(Complex64::new(specific_admittance / impedance, 0.0));

        Ok(Self::new(mesh, physics, IncidentField::plane_wave([1.0, 0.0], 1.0)))
    }

    /// Problem described by the physics, mesh, boundary and source sections
    /// of a config; relative mesh files resolve against `base_dir`
    pub fn from_config(config: &BemConfig, base_dir: &Path) -> Result<Self, BemError> {
        let physics = config.to_physics_params()?;
        let mesh = config.build_mesh(base_dir, physics.impedance)?;
        let incident_field = config.incident_field()?;
        Ok(Self::new(mesh, physics, incident_field))
    }

    /// Set the incident field
    pub fn with_incident_field(mut self, field: IncidentField) -> Self {
        self.incident_field = field;
        self
    }

    /// Get the wave number times the largest node distance from the origin
    pub fn ka(&self) -> f64 {
        let radius = self
            .mesh
            .nodes()
            .rows()
            .into_iter()
            .map(|row| row[0].hypot(row[1]))
            .fold(0.0f64, f64::max);
        self.physics.ka(radius)
    }
}

/// Solution of a BEM problem
#[derive(Debug, Clone)]
pub struct BemSolution {
    /// Surface pressure at each element
    pub surface_pressure: Array1<Complex64>,
    /// Mesh the problem was solved on
    pub mesh: Mesh,
    /// Incident field used
    pub incident_field: IncidentField,
    /// Physics parameters
    pub physics: PhysicsParams,
    /// Quadrature used for field evaluation
    pub quadrature: QuadratureParams,
}

impl BemSolution {
    /// Evaluate total pressure at a single point
    pub fn evaluate_pressure(&self, point: [f64; 2]) -> Result<Complex64, BemError> {
        let points = Array2::from_shape_fn((1, 2), |(_, j)| point[j]);
        let field = self.evaluate_pressure_field(&points)?;
        Ok(field[0].p_total)
    }

    /// Evaluate incident, scattered and total pressure at multiple points
    pub fn evaluate_pressure_field(&self, points: &Array2<f64>) -> Result<Vec<FieldPoint>, BemError> {
        total_field_at(
            &self.mesh,
            &self.surface_pressure,
            points,
            &self.incident_field,
            &self.physics,
            &self.quadrature,
        )
    }

    /// Scattered pressure at multiple points
    pub fn scattered_pressure(&self, points: &Array2<f64>) -> Result<Array1<Complex64>, BemError> {
        let integrand =
            AdmittanceFieldIntegrand::new(self.physics.impedance).with_quadrature(self.quadrature);
        calc_solution_at(
            &integrand,
            &self.mesh,
            &self.surface_pressure,
            points,
            self.physics.wave_number,
        )
    }

    /// Get max surface pressure magnitude
    pub fn max_surface_pressure(&self) -> f64 {
        self.surface_pressure
            .iter()
            .map(|p| p.norm())
            .fold(0.0f64, f64::max)
    }

    /// Get mean surface pressure magnitude
    pub fn mean_surface_pressure(&self) -> f64 {
        let sum: f64 = self.surface_pressure.iter().map(|p| p.norm()).sum();
        sum / self.surface_pressure.len() as f64
    }

    /// Number of DOFs in the solution
    pub fn num_dofs(&self) -> usize {
        self.surface_pressure.len()
    }
}

/// BEM solver errors
#[derive(Debug, Error)]
pub enum BemError {
    /// Dense solve failed
    #[error("linear solve failed: {0}")]
    Solver(#[from] LuError),
    /// Invalid mesh
    #[error("invalid mesh: {0}")]
    Mesh(#[from] MeshError),
    /// Array shape does not match the mesh
    #[error("{what}: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Which input
        what: &'static str,
        /// Expected size
        expected: usize,
        /// Supplied size
        got: usize,
    },
    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
    /// Configuration could not be turned into a problem
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::{ConfigFormat, parse_config};

    #[test]
    fn test_cylinder_problem_creation() {
        let problem = BemProblem::cylinder_scattering(1.0, 2.0, 343.0, 1.0).unwrap();

        assert!(problem.mesh.num_elements() >= 32);
        assert!((problem.ka() - 2.0).abs() < 1e-12);
        let y = problem.mesh.element(0).admittance;
        assert!((y - Complex64::new(1.0 / 343.0, 0.0)).norm() < 1e-15);

        assert!(matches!(
            BemProblem::cylinder_scattering(1.0, -1.0, 343.0, 0.0),
            Err(BemError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_bem_solver_creation() {
        let solver = BemSolver::new()
            .with_formulation(Formulation::FastBurtonMiller)
            .with_coupling_scale(2.0);

        assert_eq!(solver.formulation, Formulation::FastBurtonMiller);
        assert_eq!(solver.coupling_scale, 2.0);
        assert_eq!(BemSolver::default().formulation, Formulation::BurtonMiller);
    }

    #[test]
    fn test_formulation_names() {
        let parsed: Formulation = serde_json::from_str("\"kirchhoff_helmholtz\"").unwrap();
        assert_eq!(parsed, Formulation::KirchhoffHelmholtz);
        let parsed: Formulation = serde_json::from_str("\"fast_bm\"").unwrap();
        assert_eq!(parsed, Formulation::FastBurtonMiller);
        assert_eq!(
            serde_json::to_string(&Formulation::BurtonMiller).unwrap(),
            "\"burton_miller\""
        );
    }

    #[test]
    fn test_zero_coupling_rejected() {
        let problem = BemProblem::cylinder_scattering(1.0, 1.0, 343.0, 0.0).unwrap();
        let result = BemSolver::new().with_coupling_scale(0.0).solve(&problem);
        assert!(matches!(result, Err(BemError::InvalidParameters(_))));
    }

    #[test]
    fn test_formulations_agree_on_small_problem() {
        let problem = BemProblem::cylinder_scattering(0.5, 1.0, 343.0, 0.0).unwrap();
        let point = [1.5, 0.5];

        let values: Vec<Complex64> = [
            Formulation::KirchhoffHelmholtz,
            Formulation::BurtonMiller,
            Formulation::FastBurtonMiller,
        ]
        .into_iter()
        .map(|f| {
            BemSolver::new()
                .with_formulation(f)
                .solve(&problem)
                .unwrap()
                .evaluate_pressure(point)
                .unwrap()
        })
        .collect();

        for v in &values[1..] {
            assert!((v - values[0]).norm() < 0.02 * values[0].norm());
        }
    }

    #[test]
    fn test_solution_field_split() {
        let problem = BemProblem::cylinder_scattering(0.5, 1.0, 343.0, 0.0).unwrap();
        let solution = BemSolver::new().solve(&problem).unwrap();
        let points = ndarray::array![[2.0, 0.0], [0.0, -3.0]];

        let field = solution.evaluate_pressure_field(&points).unwrap();
        let scattered = solution.scattered_pressure(&points).unwrap();
        for (fp, ps) in field.iter().zip(scattered.iter()) {
            assert!((fp.p_scattered - ps).norm() < 1e-14);
            assert!((fp.p_total - fp.p_incident - fp.p_scattered).norm() < 1e-14);
        }
        assert_eq!(solution.num_dofs(), problem.mesh.num_elements());
        assert!(solution.mean_surface_pressure() > 0.0);
    }

    #[test]
    fn test_reuse_layer_operators() {
        let problem = BemProblem::cylinder_scattering(0.5, 1.0, 343.0, 0.0).unwrap();
        let solver = BemSolver::new();
        let operators = LayerOperators::assemble(&problem.mesh, 1.0, &solver.quadrature);

        let reused = solver.solve_with_operators(&operators, &problem).unwrap();
        let fresh = solver.with_formulation(Formulation::FastBurtonMiller).solve(&problem).unwrap();
        assert!((&reused.surface_pressure - &fresh.surface_pressure)
            .iter()
            .all(|d| d.norm() < 1e-12));
    }

    #[test]
    fn test_solver_from_config() {
        let config = parse_config(
            r#"{ "solver": { "formulation": "kirchhoff_helmholtz", "coupling_scale": 3.0 },
                 "quadrature": { "gauss_order": 7 } }"#,
            ConfigFormat::Json,
        )
        .unwrap();
        let solver = BemSolver::from_config(&config);

        assert_eq!(solver.formulation, Formulation::KirchhoffHelmholtz);
        assert_eq!(solver.coupling_scale, 3.0);
        assert_eq!(solver.quadrature.gauss_order, 7);
        assert_eq!(solver.quadrature.max_depth, QuadratureParams::default().max_depth);
    }
}
