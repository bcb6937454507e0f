//! Analytical solutions for 2D Helmholtz validation
//!
//! Exact solutions used to validate the boundary element solver.
//!
//! ## Available Solutions
//!
//! - Plane wave and line source in free space
//! - Line source above a rigid plane (image source)
//! - Circular cylinder with a locally reacting admittance boundary

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

pub mod solutions_2d;

pub use solutions_2d::*;

/// Speed of sound in air at 20 °C (m/s)
pub const SPEED_OF_SOUND: f64 = 343.0;

/// Point in the plane
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Point {
    /// x-coordinate
    pub x: f64,
    /// y-coordinate
    pub y: f64,
}

impl Point {
    /// Create a point from Cartesian coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Polar coordinates (r, θ)
    pub fn from_polar(r: f64, theta: f64) -> Self {
        Self::new(r * theta.cos(), r * theta.sin())
    }

    /// Distance from origin
    pub fn radius(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Angle from the positive x-axis
    pub fn theta(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<[f64; 2]> for Point {
    fn from(p: [f64; 2]) -> Self {
        Self::new(p[0], p[1])
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// Analytical solution result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticalSolution {
    /// Test name
    pub name: String,
    /// Evaluation points
    pub positions: Vec<Point>,
    /// Complex pressure values
    pub pressure: Vec<Complex64>,
    /// Wave number k = ω/c = 2πf/c
    pub wave_number: f64,
    /// Frequency (Hz)
    pub frequency: f64,
    /// Additional metadata
    pub metadata: serde_json::Value,
}

impl AnalyticalSolution {
    /// Create a solution with empty metadata
    pub fn new(
        name: impl Into<String>,
        positions: Vec<Point>,
        pressure: Vec<Complex64>,
        wave_number: f64,
    ) -> Self {
        Self {
            name: name.into(),
            positions,
            pressure,
            wave_number,
            frequency: wave_number * SPEED_OF_SOUND / (2.0 * std::f64::consts::PI),
            metadata: serde_json::json!({}),
        }
    }

    /// Attach metadata describing the configuration
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// Add the pressure of another solution sampled at the same points
    ///
    /// Returns `None` when the point counts differ.
    pub fn superpose(&self, other: &AnalyticalSolution) -> Option<AnalyticalSolution> {
        if self.pressure.len() != other.pressure.len() {
            return None;
        }
        let mut sum = self.clone();
        for (p, q) in sum.pressure.iter_mut().zip(&other.pressure) {
            *p += q;
        }
        sum.name = format!("{} + {}", self.name, other.name);
        Some(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_point_creation() {
        let p = Point::from_polar(2.0, PI / 4.0);
        assert!((p.radius() - 2.0).abs() < 1e-12);
        assert!((p.theta() - PI / 4.0).abs() < 1e-12);

        let q: Point = [1.0, -3.0].into();
        assert_eq!(<[f64; 2]>::from(q), [1.0, -3.0]);
    }

    #[test]
    fn test_point_distance() {
        let p1 = Point::new(1.0, 0.0);
        let p2 = Point::new(4.0, 4.0);
        assert!((p1.distance_to(&p2) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_superpose() {
        let a = AnalyticalSolution::new(
            "incident",
            vec![Point::default(); 2],
            vec![Complex64::new(1.0, 0.0), Complex64::new(0.0, 1.0)],
            1.0,
        );
        let b = AnalyticalSolution::new(
            "scattered",
            vec![Point::default(); 2],
            vec![Complex64::new(0.5, 0.0), Complex64::new(0.0, -1.0)],
            1.0,
        )
        .with_metadata(serde_json::json!({"radius": 1.0}));

        let total = a.superpose(&b).unwrap();
        assert_eq!(total.name, "incident + scattered");
        assert!((total.pressure[0] - Complex64::new(1.5, 0.0)).norm() < 1e-15);
        assert!(total.pressure[1].norm() < 1e-15);
        assert!((total.frequency - SPEED_OF_SOUND / (2.0 * PI)).abs() < 1e-12);

        let short = AnalyticalSolution::new("one", vec![Point::default()], vec![Complex64::new(1.0, 0.0)], 1.0);
        assert!(a.superpose(&short).is_none());
    }
}
