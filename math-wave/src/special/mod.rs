//! Special mathematical functions for 2D wave equations
//!
//! - Cylindrical Bessel functions (Jₙ, Yₙ) of integer order
//! - Cylindrical Hankel functions of the second kind (Hₙ⁽²⁾)
//! - The 2D Helmholtz Green's function
//!
//! The time convention throughout is `exp(+iωt)`, so outgoing waves are
//! built from Hₙ⁽²⁾ = Jₙ − i·Yₙ.

pub mod bessel;
pub mod helmholtz;

pub use bessel::*;
pub use helmholtz::*;
