//! Field pressure evaluation at exterior points
//!
//! The scattered pressure follows from the surface pressure through the
//! representation formula. With the admittance boundary condition:
//!
//! p_s(x) = Σⱼ pⱼ ∫ⱼ [−∂g/∂n_rs + ikz₀Yⱼ g] ds
//!
//! Field points are assumed to lie off the boundary.

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use std::f64::consts::PI;

use crate::core::bem_solver::BemError;
use crate::core::incident::IncidentField;
use crate::core::integration::{LineQuadrature, QuadratureParams, line_integral_with_params};
use crate::core::kernels::{g_2d, h_2d};
use crate::core::parallel::parallel_map_indexed;
use crate::core::types::{Mesh, PhysicsParams};

/// Field evaluation result at a single point
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPoint {
    /// Position [x, y]
    pub position: [f64; 2],
    /// Incident pressure
    pub p_incident: Complex64,
    /// Scattered pressure
    pub p_scattered: Complex64,
    /// Total pressure (incident + scattered)
    pub p_total: Complex64,
}

impl FieldPoint {
    /// Create new field point
    pub fn new(position: [f64; 2], p_incident: Complex64, p_scattered: Complex64) -> Self {
        Self {
            position,
            p_incident,
            p_scattered,
            p_total: p_incident + p_scattered,
        }
    }

    /// Get pressure magnitude in dB SPL (re: 20 μPa)
    pub fn spl_db(&self) -> f64 {
        let p_ref = 20e-6;
        20.0 * (self.p_total.norm() / p_ref).log10()
    }

    /// Get pressure magnitude (absolute value)
    pub fn magnitude(&self) -> f64 {
        self.p_total.norm()
    }

    /// Get pressure phase in radians
    pub fn phase(&self) -> f64 {
        self.p_total.arg()
    }
}

/// Contribution of source element `col` to the field at `point`, per unit
/// surface pressure
///
/// Implemented by [`AdmittanceFieldIntegrand`] and by any closure
/// `Fn(&Mesh, [f64; 2], usize, f64) -> Complex64`.
pub trait FieldPointIntegrand: Sync {
    /// Coefficient of element `col` at wave number `k`
    fn field_element(&self, mesh: &Mesh, point: [f64; 2], col: usize, k: f64) -> Complex64;
}

impl<F> FieldPointIntegrand for F
where
    F: Fn(&Mesh, [f64; 2], usize, f64) -> Complex64 + Sync,
{
    fn field_element(&self, mesh: &Mesh, point: [f64; 2], col: usize, k: f64) -> Complex64 {
        self(mesh, point, col, k)
    }
}

/// Scattered field of an admittance boundary: `∫ⱼ [−h + ikz₀Yⱼ g] ds`
///
/// Elements close to the field point are integrated adaptively.
#[derive(Debug, Clone, PartialEq)]
pub struct AdmittanceFieldIntegrand {
    /// Characteristic impedance z₀ = ρc
    pub impedance: f64,
    /// Quadrature parameters
    pub quadrature: QuadratureParams,
}

impl AdmittanceFieldIntegrand {
    /// Create with default quadrature
    pub fn new(impedance: f64) -> Self {
        Self {
            impedance,
            quadrature: QuadratureParams::default(),
        }
    }

    /// Set the quadrature parameters
    pub fn with_quadrature(mut self, quadrature: QuadratureParams) -> Self {
        self.quadrature = quadrature;
        self
    }
}

impl FieldPointIntegrand for AdmittanceFieldIntegrand {
    fn field_element(&self, mesh: &Mesh, point: [f64; 2], col: usize, k: f64) -> Complex64 {
        let source = mesh.element(col);
        let coupling = Complex64::new(0.0, k * self.impedance) * source.admittance;
        let mode = if source.is_near(point, self.quadrature.near_field_factor) {
            LineQuadrature::NearSingular
        } else {
            LineQuadrature::Regular
        };
        let [a, b] = source.corners;

        line_integral_with_params(
            |rs| -h_2d(source.normal, k, point, rs) + coupling * g_2d(k, point, rs),
            a,
            b,
            mode,
            &self.quadrature,
        )
    }
}

/// Pressure at `field_points` (M × 2) radiated by `surface_pressure`
pub fn calc_solution_at<I>(
    integrand: &I,
    mesh: &Mesh,
    surface_pressure: &Array1<Complex64>,
    field_points: &Array2<f64>,
    k: f64,
) -> Result<Array1<Complex64>, BemError>
where
    I: FieldPointIntegrand + ?Sized,
{
    let n = mesh.num_elements();
    if surface_pressure.len() != n {
        return Err(BemError::DimensionMismatch {
            what: "surface pressure",
            expected: n,
            got: surface_pressure.len(),
        });
    }
    if field_points.ncols() != 2 {
        return Err(BemError::DimensionMismatch {
            what: "field point columns",
            expected: 2,
            got: field_points.ncols(),
        });
    }

    let values = parallel_map_indexed(field_points.nrows(), |i| {
        let point = [field_points[[i, 0]], field_points[[i, 1]]];
        surface_pressure
            .iter()
            .enumerate()
            .map(|(j, p)| p * integrand.field_element(mesh, point, j, k))
            .sum::<Complex64>()
    });
    Ok(Array1::from_vec(values))
}

/// Incident, scattered and total pressure at `field_points`
pub fn total_field_at(
    mesh: &Mesh,
    surface_pressure: &Array1<Complex64>,
    field_points: &Array2<f64>,
    incident: &IncidentField,
    physics: &PhysicsParams,
    quadrature: &QuadratureParams,
) -> Result<Vec<FieldPoint>, BemError> {
    let integrand = AdmittanceFieldIntegrand::new(physics.impedance).with_quadrature(*quadrature);
    let scattered = calc_solution_at(
        &integrand,
        mesh,
        surface_pressure,
        field_points,
        physics.wave_number,
    )?;
    let p_incident = incident.evaluate_pressure(field_points, physics);

    Ok(field_points
        .rows()
        .into_iter()
        .zip(p_incident.iter().zip(scattered.iter()))
        .map(|(row, (pi, ps))| FieldPoint::new([row[0], row[1]], *pi, *ps))
        .collect())
}

/// `count` points evenly spaced on a circle, starting on the +x axis
pub fn circle_eval_points(center: [f64; 2], radius: f64, count: usize) -> Array2<f64> {
    let mut points = Array2::zeros((count, 2));
    for i in 0..count {
        let theta = 2.0 * PI * i as f64 / count as f64;
        points[[i, 0]] = center[0] + radius * theta.cos();
        points[[i, 1]] = center[1] + radius * theta.sin();
    }
    points
}
