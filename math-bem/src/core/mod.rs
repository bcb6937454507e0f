//! Pure Rust 2D BEM solver
//!
//! ## Architecture
//!
//! - `types`: Core data structures (Mesh, Element, PhysicsParams)
//! - `constants`: Physical defaults
//! - `kernels`: Green's function and its normal derivatives
//! - `mesh`: Element geometry and mesh generators
//! - `integration`: Line quadrature (Gauss-Legendre, adaptive Gauss-Kronrod)
//! - `assembly`: Dense matrix assembly from element-pair integrands
//! - `solver`: Kirchhoff-Helmholtz and Burton-Miller surface solvers
//! - `incident`: Incident field computation (plane waves, line sources)
//! - `postprocess`: Field evaluation at exterior points
//! - `io`: JSON/TOML configuration
//! - `bem_solver`: High-level API for solving BEM problems
//! - `parallel`: Parallel iteration with a sequential fallback

pub mod assembly;
pub mod bem_solver;
pub mod constants;
pub mod incident;
pub mod integration;
pub mod io;
pub mod kernels;
pub mod mesh;
pub mod parallel;
pub mod postprocess;
pub mod solver;
pub mod types;

pub use bem_solver::{
    BemError, BemProblem, BemSolution, BemSolver, Formulation, solve_surface_pressure,
};
pub use incident::IncidentField;
pub use integration::QuadratureParams;
pub use types::*;
