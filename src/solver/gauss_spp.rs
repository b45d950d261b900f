//! Gaussian elimination with scaled partial pivoting (SPP).
//!
//! Factorizes a dense A into a row permutation π and a packed LU stored
//! in-place: unit-lower multipliers below the diagonal, U on and above.
//! Row scale factors s_i = max_j |a_ij| enter only the pivot ratio
//! |a[π[r]][k]| / s_r. Every arithmetic step rounds to the working
//! precision because the whole routine is monomorphized over it.
//!
//! There is no singularity bailout: a zero pivot produces ±∞ or NaN
//! multipliers per IEEE-754 and the caller inspects the solution for
//! non-finite entries.
//!
//! # References
//! - Burden & Faires, Numerical Analysis, §6.2 (scaled partial pivoting)
//! - Golub & Van Loan, Matrix Computations

use crate::core::precision::WorkingScalar;
use crate::core::traits::Indexing;
use crate::matrix::dense::DenseMatrix;
use crate::solver::DirectSolver;

/// Packed LU factors with the row permutation and scale factors.
///
/// `lu` aliases L and U in one store; logical row i lives at physical row
/// `pivot[i]`. `scale` is kept for inspection — it plays no role after
/// pivot selection.
#[derive(Debug, Clone)]
pub struct SppFactorization<T> {
    pub lu: DenseMatrix<T>,
    pub pivot: Vec<usize>,
    pub scale: Vec<T>,
}

/// Factorize a square dense matrix with scaled partial pivoting.
///
/// The input is deep-copied; the factorization never mutates its argument.
pub fn factorize<T: WorkingScalar>(a: &DenseMatrix<T>) -> SppFactorization<T> {
    assert!(a.is_square(), "SPP factorization requires a square matrix");
    let n = a.nrows();
    let mut lu = a.clone();
    let mut pivot: Vec<usize> = (0..n).collect();

    let mut scale = Vec::with_capacity(n);
    for i in 0..n {
        let mut s = T::zero();
        for j in 0..n {
            let v = lu[(i, j)].abs();
            if v > s {
                s = v;
            }
        }
        scale.push(s);
    }

    for k in 0..n.saturating_sub(1) {
        // Pivot search over the remaining rows: max |a[π[r]][k]| / s_r,
        // ties to the lowest current pivot position. Rows with zero scale
        // are entirely zero and never selected.
        let mut best = k;
        let mut best_ratio = T::zero();
        for idx in k..n {
            let r = pivot[idx];
            if scale[r] == T::zero() {
                continue;
            }
            let ratio = lu[(r, k)].abs() / scale[r];
            if ratio > best_ratio {
                best_ratio = ratio;
                best = idx;
            }
        }
        pivot.swap(k, best);

        let prow = pivot[k];
        let piv = lu[(prow, k)];
        for idx in (k + 1)..n {
            let row = pivot[idx];
            // ±∞ or NaN when the pivot is zero; propagates by design.
            let m = lu[(row, k)] / piv;
            lu[(row, k)] = m;
            for j in (k + 1)..n {
                let term = m * lu[(prow, j)];
                let v = lu[(row, j)] - term;
                lu[(row, j)] = v;
            }
        }
    }

    SppFactorization { lu, pivot, scale }
}

/// Forward/back substitution through the permutation.
///
/// y_i = b[π[i]] − Σ_{j<i} L[π[i]][j]·y_j with the unit L diagonal
/// implicit; then x_i = (y_i − Σ_{j>i} U[π[i]][j]·x_j) / U[π[i]][i].
/// A zero U diagonal yields ±∞ or NaN, not a fatal error.
pub fn solve_factored<T: WorkingScalar>(f: &SppFactorization<T>, b: &[T], x: &mut [T]) {
    let n = f.lu.nrows();
    debug_assert_eq!(b.len(), n);
    debug_assert_eq!(x.len(), n);

    let mut y = vec![T::zero(); n];
    for i in 0..n {
        let mut sum = T::zero();
        for (j, &yj) in y.iter().enumerate().take(i) {
            sum = sum + f.lu[(f.pivot[i], j)] * yj;
        }
        y[i] = b[f.pivot[i]] - sum;
    }

    for i in (0..n).rev() {
        let mut sum = T::zero();
        for j in (i + 1)..n {
            sum = sum + f.lu[(f.pivot[i], j)] * x[j];
        }
        x[i] = (y[i] - sum) / f.lu[(f.pivot[i], i)];
    }
}

/// Factorize and solve A·x = b in one call.
pub fn solve<T: WorkingScalar>(a: &DenseMatrix<T>, b: &[T], x: &mut [T]) {
    let f = factorize(a);
    solve_factored(&f, b, x);
}

/// A⁻¹ by solving against the identity columns on one factorization.
///
/// Column j of the result is the solution for b = e_j. Degenerate systems
/// leave NaN/±∞ in the affected columns.
pub fn invert<T: WorkingScalar>(a: &DenseMatrix<T>) -> DenseMatrix<T> {
    let n = a.nrows();
    let f = factorize(a);
    let mut inv = DenseMatrix::zeros(n, n);
    let mut e = vec![T::zero(); n];
    let mut col = vec![T::zero(); n];
    for j in 0..n {
        for (i, ei) in e.iter_mut().enumerate() {
            *ei = if i == j { T::one() } else { T::zero() };
        }
        solve_factored(&f, &e, &mut col);
        for i in 0..n {
            inv[(i, j)] = col[i];
        }
    }
    inv
}

/// L1 condition number κ₁(A) = ‖A‖₁·‖A⁻¹‖₁ at the working precision.
///
/// Returns +∞ whenever any step degenerates: a non-finite or zero norm on
/// either factor, or a non-finite product.
pub fn cond_l1<T: WorkingScalar>(a: &DenseMatrix<T>) -> f64 {
    let norm_a = a.norm_l1();
    if !norm_a.is_finite() || norm_a == T::zero() {
        return f64::INFINITY;
    }
    let inv = invert(a);
    let norm_inv = inv.norm_l1();
    if !norm_inv.is_finite() || norm_inv == T::zero() {
        return f64::INFINITY;
    }
    let cond = (norm_a * norm_inv).to_f64();
    if cond.is_finite() { cond } else { f64::INFINITY }
}

/// Unit-struct handle for the dense SPP path behind [`DirectSolver`].
pub struct GaussSpp;

impl<T: WorkingScalar> DirectSolver<DenseMatrix<T>, T> for GaussSpp {
    /// Always reports completion; degradation stays in-band in `x`.
    fn solve(&self, a: &DenseMatrix<T>, b: &[T], x: &mut [T]) -> bool {
        solve(a, b, x);
        true
    }
}
