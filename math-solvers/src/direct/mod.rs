//! Direct solvers for dense linear systems
//!
//! - [`lu_solve`]: LU decomposition with partial pivoting

mod lu;

pub use lu::{LuError, LuFactorization, lu_factorize, lu_solve};
