//! Tests for the tridiagonal Thomas sweep: the m=4, k=5 fixture, parity
//! with dense elimination, and zero-pivot degradation.

use approx::assert_abs_diff_eq;
use numlab::core::MatVec;
use numlab::matrix::TridiagonalMatrix;
use numlab::matrix::family::{self, FamilyParams};
use numlab::solver::{gauss_spp, thomas};

/// F_TRI with n=3, m=4, k=5: diagonal (−9, −13, −17), super (1, 2),
/// sub (2, 4/3). With x* = (1, −1, 1) the sweep recovers x* exactly up to
/// double rounding.
#[test]
fn recovers_reference_solution_on_fixture() {
    let p = FamilyParams { m: 4.0, k: 5.0 };
    let a = family::tridiagonal_banded::<f64>(3, p);
    let x_true = vec![1.0, -1.0, 1.0];
    let mut b = vec![0.0; 3];
    a.matvec(&x_true, &mut b);
    assert_eq!(b, vec![-10.0, 17.0, 4.0 / 3.0 - 17.0]);

    let mut x = vec![0.0; 3];
    assert!(thomas::solve(&a, &b, &mut x));
    for (xi, ei) in x.iter().zip(&x_true) {
        assert_abs_diff_eq!(*xi, *ei, epsilon = 1e-14);
    }
}

/// The banded sweep and dense SPP elimination agree on the same system.
#[test]
fn agrees_with_dense_elimination() {
    let n = 50;
    let p = FamilyParams::default();
    let banded = family::tridiagonal_banded::<f64>(n, p);
    let dense = family::tridiagonal_dense::<f64>(n, p);

    let x_true: Vec<f64> = (0..n).map(|i| if i % 3 == 0 { -1.0 } else { 1.0 }).collect();
    let mut b = vec![0.0; n];
    banded.matvec(&x_true, &mut b);

    let mut x_thomas = vec![0.0; n];
    assert!(thomas::solve(&banded, &b, &mut x_thomas));
    let mut x_gauss = vec![0.0; n];
    gauss_spp::solve(&dense, &b, &mut x_gauss);

    let spread = numlab::core::max_abs_diff(&x_thomas, &x_gauss);
    assert!(spread < 1e-12, "solver disagreement {spread:e}");
}

/// Single-precision run of the same system stays within a tolerance scaled
/// by the single-precision epsilon.
#[test]
fn single_precision_parity_is_coarser_but_finite() {
    let n = 40;
    let p = FamilyParams::default();
    let banded = family::tridiagonal_banded::<f32>(n, p);
    let x_true: Vec<f32> = (0..n).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
    let mut b = vec![0.0f32; n];
    banded.matvec(&x_true, &mut b);

    let mut x = vec![0.0f32; n];
    assert!(thomas::solve(&banded, &b, &mut x));
    for (xi, ei) in x.iter().zip(&x_true) {
        assert!((xi - ei).abs() < 1e-3);
    }
}

/// A zero leading diagonal writes NaN throughout and reports failure; the
/// max-abs error of such a solution is non-finite.
#[test]
fn zero_pivot_fills_nan() {
    let mut a = TridiagonalMatrix::<f64>::zeros(4);
    a.set_diag(0, 0.0);
    a.set_sup(0, 1.0);
    for i in 1..4 {
        a.set_diag(i, 2.0);
        a.set_sub(i, 1.0);
        if i < 3 {
            a.set_sup(i, 1.0);
        }
    }
    let b = [1.0, 1.0, 1.0, 1.0];
    let mut x = [0.0f64; 4];
    assert!(!thomas::solve(&a, &b, &mut x));
    assert!(x.iter().all(|v| v.is_nan()));
    assert_eq!(
        numlab::core::max_abs_error(&x, &[1.0, 1.0, 1.0, 1.0]),
        f64::INFINITY
    );
}

/// An interior zero denominator (δ = 0 mid-sweep) degrades the same way.
#[test]
fn interior_zero_denominator_fills_nan() {
    // Row 1: δ = diag − sub·c'₀ = 1 − 2·(1/2) = 0.
    let mut a = TridiagonalMatrix::<f64>::zeros(3);
    a.set_diag(0, 2.0);
    a.set_sup(0, 1.0);
    a.set_sub(1, 2.0);
    a.set_diag(1, 1.0);
    a.set_sup(1, 1.0);
    a.set_sub(2, 1.0);
    a.set_diag(2, 1.0);
    let b = [1.0, 1.0, 1.0];
    let mut x = [0.0f64; 3];
    assert!(!thomas::solve(&a, &b, &mut x));
    assert!(x.iter().all(|v| v.is_nan()));
}
