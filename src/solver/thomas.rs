//! Thomas algorithm for strictly tridiagonal systems.
//!
//! O(n) forward elimination and back substitution over the banded store.
//! Unlike the SPP path there is no pivoting fallback: a near-zero
//! denominator aborts the sweep, fills the solution with NaN, and reports
//! failure to the caller.

use crate::core::precision::WorkingScalar;
use crate::core::traits::Indexing;
use crate::matrix::banded::TridiagonalMatrix;
use crate::solver::DirectSolver;

/// Solve A·x = d for a tridiagonal A. Returns `false` on a degenerate
/// pivot, in which case `x` is all-NaN.
pub fn solve<T: WorkingScalar>(a: &TridiagonalMatrix<T>, d: &[T], x: &mut [T]) -> bool {
    let n = a.nrows();
    debug_assert_eq!(d.len(), n);
    debug_assert_eq!(x.len(), n);
    if n == 0 {
        return true;
    }

    // Degeneracy threshold: ε · smallest-normal · 10 for the working
    // precision. Catches exact zeros and denormal-range denominators.
    let tiny = T::epsilon() * T::min_positive_value() * T::from_f64(10.0);

    let b0 = a.diag(0);
    if b0.abs() < tiny {
        return degenerate(x, 0, b0);
    }

    let mut c_prime = vec![T::zero(); n];
    let mut d_prime = vec![T::zero(); n];
    c_prime[0] = a.sup(0) / b0;
    d_prime[0] = d[0] / b0;

    for i in 1..n {
        let denom = a.diag(i) - a.sub(i) * c_prime[i - 1];
        if denom.abs() < tiny {
            return degenerate(x, i, denom);
        }
        if i + 1 < n {
            c_prime[i] = a.sup(i) / denom;
        }
        let num = d[i] - a.sub(i) * d_prime[i - 1];
        d_prime[i] = num / denom;
    }

    x[n - 1] = d_prime[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = d_prime[i] - c_prime[i] * x[i + 1];
    }
    true
}

fn degenerate<T: WorkingScalar>(x: &mut [T], row: usize, denom: T) -> bool {
    log::warn!(
        "thomas: near-zero pivot at row {row} (denominator {:e}); writing NaN solution",
        denom.to_f64()
    );
    x.fill(T::nan());
    false
}

/// Unit-struct handle for the tridiagonal path behind [`DirectSolver`].
pub struct Thomas;

impl<T: WorkingScalar> DirectSolver<TridiagonalMatrix<T>, T> for Thomas {
    fn solve(&self, a: &TridiagonalMatrix<T>, b: &[T], x: &mut [T]) -> bool {
        solve(a, b, x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_constant_band() {
        // [[2,1,0],[1,2,1],[0,1,2]] x = [4,8,8] has x = [1,2,3]
        let mut a = TridiagonalMatrix::zeros(3);
        for i in 0..3 {
            a.set_diag(i, 2.0);
        }
        a.set_sup(0, 1.0);
        a.set_sup(1, 1.0);
        a.set_sub(1, 1.0);
        a.set_sub(2, 1.0);
        let d = [4.0, 8.0, 8.0];
        let mut x = [0.0f64; 3];
        assert!(solve(&a, &d, &mut x));
        for (xi, ei) in x.iter().zip([1.0, 2.0, 3.0]) {
            assert!((xi - ei).abs() < 1e-14);
        }
    }

    #[test]
    fn zero_leading_diagonal_reports_failure() {
        let mut a = TridiagonalMatrix::zeros(3);
        a.set_diag(0, 0.0);
        a.set_diag(1, 1.0);
        a.set_diag(2, 1.0);
        let d = [1.0, 1.0, 1.0];
        let mut x = [0.0f64; 3];
        assert!(!solve(&a, &d, &mut x));
        assert!(x.iter().all(|v| v.is_nan()));
    }
}
