//! Incident field computation
//!
//! Computes incident acoustic fields for BEM excitation sources:
//! - Plane waves
//! - Line sources (2D monopoles)
//!
//! These provide the incident pressure and gradient at the collocation
//! points that form the right-hand side of the BEM system. The time
//! convention is `exp(+iωt)`, so a plane wave travelling along `d` is
//! `A·exp(−ik d·x)`.

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::core::types::{Mesh, PhysicsParams};
use math_audio_wave2d::Point;
use math_audio_wave2d::special::{greens_function_2d, greens_function_gradient_2d};

/// Incident field source type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IncidentField {
    /// Plane wave: p = A·exp(−ik d·x)
    PlaneWave {
        /// Direction of propagation (unit vector)
        direction: [f64; 2],
        /// Complex amplitude
        amplitude: Complex64,
    },

    /// Line source: p = S·(i/4)·H₀⁽²⁾(k|x − x₀|)
    LineSource {
        /// Source position
        position: [f64; 2],
        /// Source strength
        strength: Complex64,
    },

    /// Sum of several sources
    Superposition(Vec<IncidentField>),
}

impl IncidentField {
    /// Create a plane wave with specified direction and amplitude
    ///
    /// The direction is normalised; a zero vector falls back to +x.
    pub fn plane_wave(direction: [f64; 2], amplitude: f64) -> Self {
        let len = direction[0].hypot(direction[1]);
        let dir = if len > 1e-10 {
            [direction[0] / len, direction[1] / len]
        } else {
            [1.0, 0.0]
        };

        IncidentField::PlaneWave {
            direction: dir,
            amplitude: Complex64::new(amplitude, 0.0),
        }
    }

    /// Plane wave travelling at angle `theta` from the +x axis
    pub fn plane_wave_angle(theta: f64, amplitude: f64) -> Self {
        Self::plane_wave([theta.cos(), theta.sin()], amplitude)
    }

    /// Create a line source at given position
    pub fn line_source(position: [f64; 2], strength: f64) -> Self {
        IncidentField::LineSource {
            position,
            strength: Complex64::new(strength, 0.0),
        }
    }

    /// Pressure at a single point
    ///
    /// A line source evaluated at its own position returns zero.
    pub fn pressure_at(&self, point: [f64; 2], k: f64) -> Complex64 {
        match self {
            IncidentField::PlaneWave {
                direction,
                amplitude,
            } => {
                let phase = k * (direction[0] * point[0] + direction[1] * point[1]);
                *amplitude * Complex64::new(phase.cos(), -phase.sin())
            }
            IncidentField::LineSource { position, strength } => {
                let r = (point[0] - position[0]).hypot(point[1] - position[1]);
                if r > 1e-10 {
                    *strength * greens_function_2d(r, k)
                } else {
                    Complex64::new(0.0, 0.0)
                }
            }
            IncidentField::Superposition(sources) => {
                sources.iter().map(|s| s.pressure_at(point, k)).sum()
            }
        }
    }

    /// Pressure gradient at a single point
    pub fn gradient_at(&self, point: [f64; 2], k: f64) -> [Complex64; 2] {
        match self {
            IncidentField::PlaneWave { direction, .. } => {
                // ∇p = −ik d p
                let p = self.pressure_at(point, k);
                let factor = Complex64::new(0.0, -k) * p;
                [factor * direction[0], factor * direction[1]]
            }
            IncidentField::LineSource { position, strength } => {
                let r = (point[0] - position[0]).hypot(point[1] - position[1]);
                if r > 1e-10 {
                    let grad = greens_function_gradient_2d(
                        &Point::from(*position),
                        &Point::from(point),
                        k,
                    );
                    [*strength * grad[0], *strength * grad[1]]
                } else {
                    [Complex64::new(0.0, 0.0); 2]
                }
            }
            IncidentField::Superposition(sources) => {
                sources.iter().fold([Complex64::new(0.0, 0.0); 2], |acc, s| {
                    let g = s.gradient_at(point, k);
                    [acc[0] + g[0], acc[1] + g[1]]
                })
            }
        }
    }

    /// Evaluate incident pressure at given points
    ///
    /// # Arguments
    /// * `points` - Evaluation points (N × 2 array)
    /// * `physics` - Physical parameters (contains wave number k)
    pub fn evaluate_pressure(
        &self,
        points: &Array2<f64>,
        physics: &PhysicsParams,
    ) -> Array1<Complex64> {
        let k = physics.wave_number;
        points
            .rows()
            .into_iter()
            .map(|row| self.pressure_at([row[0], row[1]], k))
            .collect()
    }

    /// Evaluate the incident pressure gradient at given points (N × 2)
    pub fn evaluate_gradient(
        &self,
        points: &Array2<f64>,
        physics: &PhysicsParams,
    ) -> Array2<Complex64> {
        let k = physics.wave_number;
        let mut gradient = Array2::zeros((points.nrows(), 2));
        for (i, row) in points.rows().into_iter().enumerate() {
            let g = self.gradient_at([row[0], row[1]], k);
            gradient[[i, 0]] = g[0];
            gradient[[i, 1]] = g[1];
        }
        gradient
    }

    /// Evaluate ∂p/∂n at given points with normals
    pub fn evaluate_normal_derivative(
        &self,
        points: &Array2<f64>,
        normals: &Array2<f64>,
        physics: &PhysicsParams,
    ) -> Array1<Complex64> {
        let gradient = self.evaluate_gradient(points, physics);
        normal_component(&gradient, normals)
    }

    /// Incident pressure and gradient at the element centers of `mesh`
    ///
    /// This is the excitation the surface solvers take.
    pub fn surface_excitation(
        &self,
        mesh: &Mesh,
        physics: &PhysicsParams,
    ) -> (Array1<Complex64>, Array2<Complex64>) {
        let centers = mesh.centers();
        (
            self.evaluate_pressure(&centers, physics),
            self.evaluate_gradient(&centers, physics),
        )
    }

    /// Compute the right-hand side vector for BEM
    ///
    /// `p_inc` for the Kirchhoff-Helmholtz equation, `p_inc + β·∂p_inc/∂n`
    /// with β = i/k for Burton-Miller.
    pub fn compute_rhs(
        &self,
        element_centers: &Array2<f64>,
        element_normals: &Array2<f64>,
        physics: &PhysicsParams,
        use_burton_miller: bool,
    ) -> Array1<Complex64> {
        if use_burton_miller {
            let beta = physics.burton_miller_beta();
            self.compute_rhs_with_beta(element_centers, element_normals, physics, beta)
        } else {
            self.evaluate_pressure(element_centers, physics)
        }
    }

    /// Compute the Burton-Miller right-hand side with a custom coupling β
    pub fn compute_rhs_with_beta(
        &self,
        element_centers: &Array2<f64>,
        element_normals: &Array2<f64>,
        physics: &PhysicsParams,
        beta: Complex64,
    ) -> Array1<Complex64> {
        let p_inc = self.evaluate_pressure(element_centers, physics);
        let dpdn = self.evaluate_normal_derivative(element_centers, element_normals, physics);
        &p_inc + &dpdn.mapv(|v| beta * v)
    }
}

/// Row-wise `n·∇p` for gradients and normals stored as N × 2 arrays
pub fn normal_component(gradient: &Array2<Complex64>, normals: &Array2<f64>) -> Array1<Complex64> {
    gradient
        .rows()
        .into_iter()
        .zip(normals.rows())
        .map(|(g, n)| g[0] * n[0] + g[1] * n[1])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use math_audio_wave2d::analytical::line_source_2d;
    use ndarray::array;

    #[test]
    fn test_plane_wave_phase() {
        let incident = IncidentField::plane_wave([2.0, 0.0], 1.0);
        let physics = PhysicsParams::from_wave_number(1.0, 343.0);

        let points = array![[0.0, 0.0], [1.0, 0.0], [1.0, 5.0]];
        let p = incident.evaluate_pressure(&points, &physics);

        assert_abs_diff_eq!(p[0].re, 1.0, epsilon = 1e-14);
        assert_abs_diff_eq!(p[0].im, 0.0, epsilon = 1e-14);
        // exp(−i) at x = 1
        assert_abs_diff_eq!(p[1].re, 1.0_f64.cos(), epsilon = 1e-14);
        assert_abs_diff_eq!(p[1].im, -(1.0_f64).sin(), epsilon = 1e-14);
        assert!((p[2] - p[1]).norm() < 1e-14);
    }

    #[test]
    fn test_plane_wave_normal_derivative() {
        let incident = IncidentField::plane_wave_angle(0.0, 1.0);
        let physics = PhysicsParams::from_wave_number(2.0, 343.0);

        let points = array![[0.0, 0.0]];
        let normals = array![[1.0, 0.0]];
        let dpdn = incident.evaluate_normal_derivative(&points, &normals, &physics);

        // ∂p/∂n = −ik (d·n) p = −2i
        assert_abs_diff_eq!(dpdn[0].re, 0.0, epsilon = 1e-14);
        assert_abs_diff_eq!(dpdn[0].im, -2.0, epsilon = 1e-14);
    }

    #[test]
    fn test_gradient_matches_finite_difference() {
        let k = 3.0;
        let h = 1e-6;
        let x = [0.4, -0.7];
        let sources = [
            IncidentField::plane_wave([1.0, 1.0], 2.0),
            IncidentField::line_source([1.0, 1.0], 1.5),
            IncidentField::Superposition(vec![
                IncidentField::plane_wave_angle(0.3, 1.0),
                IncidentField::line_source([-1.0, 0.5], 1.0),
            ]),
        ];

        for source in &sources {
            let grad = source.gradient_at(x, k);
            let dx = (source.pressure_at([x[0] + h, x[1]], k)
                - source.pressure_at([x[0] - h, x[1]], k))
                / (2.0 * h);
            let dy = (source.pressure_at([x[0], x[1] + h], k)
                - source.pressure_at([x[0], x[1] - h], k))
                / (2.0 * h);
            assert!((grad[0] - dx).norm() < 1e-6, "{:?}", source);
            assert!((grad[1] - dy).norm() < 1e-6, "{:?}", source);
        }
    }

    #[test]
    fn test_line_source_matches_analytical() {
        let k = 2.0;
        let source = IncidentField::line_source([0.0, 1.0], 1.0);
        let points = vec![
            math_audio_wave2d::Point::new(1.0, 0.0),
            math_audio_wave2d::Point::new(-2.0, 3.0),
        ];
        let exact = line_source_2d(k, [0.0, 1.0].into(), Complex64::new(1.0, 0.0), points.clone());

        for (p, expected) in points.iter().zip(&exact.pressure) {
            let value = source.pressure_at((*p).into(), k);
            assert!((value - expected).norm() < 1e-14);
        }
        assert_eq!(source.pressure_at([0.0, 1.0], k), Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_rhs_computation() {
        let incident = IncidentField::plane_wave([1.0, 0.0], 1.0);
        let physics = PhysicsParams::from_wave_number(1.0, 343.0);

        let centers = array![[0.0, 0.0]];
        let normals = array![[1.0, 0.0]];

        let kh = incident.compute_rhs(&centers, &normals, &physics, false);
        assert_abs_diff_eq!(kh[0].re, 1.0, epsilon = 1e-14);

        // p + (i/k)(−ik) p = 2p for a wave travelling along the normal
        let bm = incident.compute_rhs(&centers, &normals, &physics, true);
        assert_abs_diff_eq!(bm[0].re, 2.0, epsilon = 1e-14);
        assert_abs_diff_eq!(bm[0].im, 0.0, epsilon = 1e-14);
    }
}
