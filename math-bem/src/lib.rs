//! # BEM2D: 2D Helmholtz Boundary Element Library
//!
//! Collocation BEM for exterior acoustic scattering by 2D boundaries made of
//! straight line elements with constant pressure, under an admittance
//! boundary condition `∂p/∂n = ikz₀Y p`.
//!
//! ## Features
//!
//! - Kirchhoff-Helmholtz, Burton-Miller and fast (layer-operator) Burton-Miller
//!   formulations
//! - Adaptive Gauss-Kronrod quadrature for singular and near-singular elements
//! - Parallel assembly with Rayon
//! - JSON / TOML configuration
//! - Validation against analytical cylinder and image-source solutions
//!
//! ## Example
//!
//! ```no_run
//! use math_audio_bem2d::core::{IncidentField, PhysicsParams};
//! use math_audio_bem2d::core::mesh::circle_mesh;
//! use math_audio_bem2d::core::solver::burton_miller_solver;
//!
//! let mesh = circle_mesh([0.0, 0.0], 1.0, 128)?;
//! let physics = PhysicsParams::from_wave_number(2.0, 343.0);
//! let incident = IncidentField::plane_wave([1.0, 0.0], 1.0);
//! let (p_inc, grad_p_inc) = incident.surface_excitation(&mesh, &physics);
//!
//! let surface = burton_miller_solver(&mesh, &p_inc, &grad_p_inc, &physics)?;
//! assert_eq!(surface.len(), 128);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::too_many_arguments)]

pub mod core;
pub mod testing;

pub use math_audio_wave2d::analytical;
pub use testing::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Git commit hash (set during build)
pub const GIT_HASH: &str = env!("GIT_HASH");
