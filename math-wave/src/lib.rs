//! Special functions and analytical solutions for 2D Helmholtz problems
//!
//! This crate provides the cylindrical Bessel / Hankel functions a 2D
//! boundary element solver is built on, together with exact solutions used
//! to validate it.
//!
//! # Features
//!
//! - **Special functions**: Jₙ, Yₙ, Hₙ⁽²⁾ of integer order and their derivatives
//! - **Green's function**: the 2D Helmholtz kernel and its gradient
//! - **Analytical solutions**: plane wave, line source, image source,
//!   admittance cylinder scattering (Bessel/Hankel series)
//!
//! The time convention is `exp(+iωt)` throughout.
//!
//! # Example
//!
//! ```rust
//! use math_audio_wave2d::analytical::{cylinder_scattered_2d, cylinder_series_terms, Point};
//! use num_complex::Complex64;
//! use std::f64::consts::PI;
//!
//! let mics: Vec<Point> = (0..8).map(|i| Point::from_polar(2.0, i as f64 * PI / 4.0)).collect();
//! let scattered = cylinder_scattered_2d(
//!     2.0, 1.0, Complex64::new(1.0, 0.0), Complex64::new(1.0, 0.0),
//!     cylinder_series_terms(2.0), mics,
//! );
//! assert!(scattered.pressure[0].norm() > 0.0);
//! ```

pub mod analytical;
pub mod special;

// Re-export main types at crate root
pub use analytical::{AnalyticalSolution, Point};
