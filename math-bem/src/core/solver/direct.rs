//! Element-by-element assembled solvers

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use super::{burton_miller_rhs, validate_inputs};
use crate::core::assembly::{AdmittanceIntegrand, BurtonMillerIntegrand, complex_system_matrix};
use crate::core::bem_solver::BemError;
use crate::core::integration::QuadratureParams;
use crate::core::types::{Mesh, PhysicsParams};
use math_audio_dense::lu_solve;

/// Solve the Kirchhoff-Helmholtz equation with default quadrature
///
/// Ill-conditioned near the interior eigenfrequencies of the scatterer.
pub fn kirchhoff_helmholtz_solver(
    mesh: &Mesh,
    p_inc: &Array1<Complex64>,
    grad_p_inc: &Array2<Complex64>,
    physics: &PhysicsParams,
) -> Result<Array1<Complex64>, BemError> {
    kirchhoff_helmholtz_solver_with_params(
        mesh,
        p_inc,
        grad_p_inc,
        physics,
        &QuadratureParams::default(),
    )
}

/// Solve the Kirchhoff-Helmholtz equation
///
/// The gradient is validated but unused: the right-hand side is `p_inc`.
pub fn kirchhoff_helmholtz_solver_with_params(
    mesh: &Mesh,
    p_inc: &Array1<Complex64>,
    grad_p_inc: &Array2<Complex64>,
    physics: &PhysicsParams,
    quadrature: &QuadratureParams,
) -> Result<Array1<Complex64>, BemError> {
    validate_inputs(mesh, p_inc, grad_p_inc, physics)?;
    log::info!(
        "Kirchhoff-Helmholtz solve: {} elements, k = {:.4}",
        mesh.num_elements(),
        physics.wave_number
    );

    let integrand = AdmittanceIntegrand::new(physics.impedance).with_quadrature(*quadrature);
    let matrix = complex_system_matrix(&integrand, mesh, physics.wave_number);
    Ok(lu_solve(&matrix, p_inc)?)
}

/// Solve the Burton-Miller equation with β = i/k and default quadrature
pub fn burton_miller_solver(
    mesh: &Mesh,
    p_inc: &Array1<Complex64>,
    grad_p_inc: &Array2<Complex64>,
    physics: &PhysicsParams,
) -> Result<Array1<Complex64>, BemError> {
    burton_miller_solver_with_params(
        mesh,
        p_inc,
        grad_p_inc,
        physics,
        1.0,
        &QuadratureParams::default(),
    )
}

/// Solve the Burton-Miller equation with β = i·`coupling_scale`/k
pub fn burton_miller_solver_with_params(
    mesh: &Mesh,
    p_inc: &Array1<Complex64>,
    grad_p_inc: &Array2<Complex64>,
    physics: &PhysicsParams,
    coupling_scale: f64,
    quadrature: &QuadratureParams,
) -> Result<Array1<Complex64>, BemError> {
    validate_inputs(mesh, p_inc, grad_p_inc, physics)?;
    log::info!(
        "Burton-Miller solve: {} elements, k = {:.4}, coupling scale {}",
        mesh.num_elements(),
        physics.wave_number,
        coupling_scale
    );

    let integrand = BurtonMillerIntegrand::new(physics.impedance)
        .with_coupling_scale(coupling_scale)
        .with_quadrature(*quadrature);
    let k = physics.wave_number;
    let matrix = complex_system_matrix(&integrand, mesh, k);
    let rhs = burton_miller_rhs(mesh, p_inc, grad_p_inc, integrand.beta(k));
    Ok(lu_solve(&matrix, &rhs)?)
}
