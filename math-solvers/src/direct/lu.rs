//! LU decomposition with partial pivoting
//!
//! Pure-Rust dense factorisation. The BEM systems are small enough
//! (a few hundred unknowns) that a straightforward right-looking
//! elimination is the right tool.

use crate::traits::ComplexField;
use ndarray::{Array1, Array2};
use num_traits::{Float, FromPrimitive, One, Zero};
use thiserror::Error;

/// Errors that can occur during LU factorisation or solve
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LuError {
    /// No usable pivot was found in the given column
    #[error("matrix is singular or nearly singular (no pivot in column {column})")]
    SingularMatrix {
        /// Column in which elimination broke down
        column: usize,
    },
    /// Operand shapes do not agree
    #[error("matrix dimensions mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected length
        expected: usize,
        /// Length that was supplied
        got: usize,
    },
}

/// LU factorisation `P·A = L·U`
///
/// L is unit lower triangular and stored below the diagonal of `lu`,
/// U is stored on and above it.
#[derive(Debug, Clone)]
pub struct LuFactorization<T: ComplexField> {
    /// Combined L and U factors
    pub lu: Array2<T>,
    /// Row permutation: row `i` of `P·A` is row `permutation[i]` of `A`
    pub permutation: Vec<usize>,
}

impl<T: ComplexField> LuFactorization<T> {
    /// Dimension of the factorised matrix
    pub fn dim(&self) -> usize {
        self.permutation.len()
    }

    /// Solve `A·x = b` with the stored factors
    pub fn solve(&self, b: &Array1<T>) -> Result<Array1<T>, LuError> {
        let n = self.dim();
        if b.len() != n {
            return Err(LuError::DimensionMismatch {
                expected: n,
                got: b.len(),
            });
        }

        let mut x: Array1<T> = self.permutation.iter().map(|&p| b[p]).collect();

        // L·y = P·b
        for i in 0..n {
            let mut acc = x[i];
            for j in 0..i {
                acc -= self.lu[[i, j]] * x[j];
            }
            x[i] = acc;
        }

        // U·x = y
        for i in (0..n).rev() {
            let mut acc = x[i];
            for j in (i + 1)..n {
                acc -= self.lu[[i, j]] * x[j];
            }
            let u_ii = self.lu[[i, i]];
            if u_ii.norm() == T::Real::zero() {
                return Err(LuError::SingularMatrix { column: i });
            }
            x[i] = acc * u_ii.inv();
        }

        Ok(x)
    }
}

/// Factorise a square matrix with partial (row) pivoting
///
/// A pivot is rejected when its magnitude falls below `ε·n·max|Aᵢⱼ|`.
pub fn lu_factorize<T: ComplexField>(a: &Array2<T>) -> Result<LuFactorization<T>, LuError> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(LuError::DimensionMismatch {
            expected: n,
            got: a.ncols(),
        });
    }

    let scale = a
        .iter()
        .map(|v| v.norm())
        .fold(T::Real::zero(), |acc, v| acc.max(v));
    let n_real = T::Real::from_usize(n.max(1)).unwrap_or_else(T::Real::one);
    let threshold = T::Real::epsilon() * n_real * scale;

    let mut lu = a.clone();
    let mut permutation: Vec<usize> = (0..n).collect();

    for k in 0..n {
        let (pivot_row, pivot_norm) = (k..n)
            .map(|i| (i, lu[[i, k]].norm()))
            .fold((k, T::Real::zero()), |best, cand| {
                if cand.1 > best.1 { cand } else { best }
            });

        if pivot_norm <= threshold {
            return Err(LuError::SingularMatrix { column: k });
        }

        if pivot_row != k {
            for j in 0..n {
                lu.swap([k, j], [pivot_row, j]);
            }
            permutation.swap(k, pivot_row);
        }

        let pivot_inv = lu[[k, k]].inv();
        for i in (k + 1)..n {
            let mult = lu[[i, k]] * pivot_inv;
            lu[[i, k]] = mult;
            if mult.norm() == T::Real::zero() {
                continue;
            }
            for j in (k + 1)..n {
                let update = mult * lu[[k, j]];
                lu[[i, j]] -= update;
            }
        }
    }

    Ok(LuFactorization { lu, permutation })
}

/// Solve `A·x = b` by factorising `A`
pub fn lu_solve<T: ComplexField>(a: &Array2<T>, b: &Array1<T>) -> Result<Array1<T>, LuError> {
    if b.len() != a.nrows() {
        return Err(LuError::DimensionMismatch {
            expected: a.nrows(),
            got: b.len(),
        });
    }
    lu_factorize(a)?.solve(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use num_complex::Complex64;

    #[test]
    fn test_lu_solve_real() {
        let a = array![[4.0_f64, 1.0], [1.0, 3.0]];
        let b = array![1.0_f64, 2.0];

        let x = lu_solve(&a, &b).expect("LU solve should succeed");

        let ax = a.dot(&x);
        for i in 0..2 {
            assert_relative_eq!(ax[i], b[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_lu_solve_complex() {
        let a = array![
            [Complex64::new(4.0, 1.0), Complex64::new(1.0, 0.0)],
            [Complex64::new(1.0, 0.0), Complex64::new(3.0, -1.0)],
        ];
        let b = array![Complex64::new(1.0, 1.0), Complex64::new(2.0, -1.0)];

        let x = lu_solve(&a, &b).expect("LU solve should succeed");

        let ax = a.dot(&x);
        for i in 0..2 {
            assert!((ax[i] - b[i]).norm() < 1e-12);
        }
    }

    #[test]
    fn test_lu_requires_pivoting() {
        // Zero in the leading position forces a row swap
        let a = array![[0.0_f64, 2.0, 1.0], [1.0, 1.0, 0.0], [3.0, 0.0, 1.0]];
        let b = array![3.0_f64, 2.0, 4.0];

        let x = lu_solve(&a, &b).expect("LU solve should succeed");

        for (xi, expected) in x.iter().zip([1.0, 1.0, 1.0]) {
            assert_relative_eq!(*xi, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_lu_singular() {
        let a = array![[1.0_f64, 2.0], [2.0, 4.0]];
        let b = array![1.0_f64, 2.0];

        let result = lu_solve(&a, &b);
        assert_eq!(result.unwrap_err(), LuError::SingularMatrix { column: 1 });
    }

    #[test]
    fn test_lu_dimension_mismatch() {
        let a = Array2::<f64>::eye(3);
        let b = array![1.0_f64, 2.0];
        assert!(matches!(
            lu_solve(&a, &b),
            Err(LuError::DimensionMismatch { expected: 3, got: 2 })
        ));
    }

    #[test]
    fn test_factorization_reused_for_several_rhs() {
        let a = array![[4.0_f64, 1.0, 0.0], [1.0, 3.0, 1.0], [0.0, 1.0, 2.0]];
        let factorization = lu_factorize(&a).expect("factorisation should succeed");
        assert_eq!(factorization.dim(), 3);

        for b in [array![1.0_f64, 2.0, 3.0], array![4.0_f64, 5.0, 6.0]] {
            let x = factorization.solve(&b).expect("solve should succeed");
            let ax = a.dot(&x);
            for i in 0..3 {
                assert_relative_eq!(ax[i], b[i], epsilon = 1e-12);
            }
        }
    }
}
