//! Dense linear solvers for boundary element systems
//!
//! BEM matrices are dense, unsymmetric and complex. This crate provides the
//! direct solve used by the 2D Helmholtz solvers: an LU factorisation with
//! partial pivoting that is generic over real and complex scalars.
//!
//! # Example
//!
//! ```rust
//! use math_audio_dense::lu_solve;
//! use ndarray::array;
//! use num_complex::Complex64;
//!
//! let a = array![
//!     [Complex64::new(2.0, 0.0), Complex64::new(0.0, 1.0)],
//!     [Complex64::new(0.0, -1.0), Complex64::new(2.0, 0.0)],
//! ];
//! let b = array![Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)];
//! let x = lu_solve(&a, &b).unwrap();
//! assert!((a.dot(&x) - &b).iter().all(|r| r.norm() < 1e-12));
//! ```

#![warn(missing_docs)]

pub mod direct;
pub mod traits;

pub use direct::{LuError, LuFactorization, lu_factorize, lu_solve};
pub use traits::ComplexField;
