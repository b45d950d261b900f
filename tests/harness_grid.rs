//! End-to-end harness tests: grid ordering, determinism, precision
//! comparison, configuration rejection, and memory accounting. This binary
//! registers the tracking allocator so peak measurements are live.

use numlab::config::LabOptions;
use numlab::core::Precision;
use numlab::harness::{Method, collect_experiments};
use numlab::matrix::Family;
use numlab::mem;

#[global_allocator]
static ALLOC: mem::TrackingAllocator = mem::TrackingAllocator;

#[test]
fn tridiagonal_grid_order_and_shape() {
    let opts = LabOptions::new(Family::Tridiagonal, vec![2, 3, 5]);
    let records = collect_experiments(&opts).unwrap();

    // size outer, precision inner, method innermost; both methods per cell.
    assert_eq!(records.len(), 3 * 2 * 2);
    let expected: Vec<(usize, Precision, Method)> = [2usize, 3, 5]
        .iter()
        .flat_map(|&n| {
            [Precision::Single, Precision::Double]
                .iter()
                .flat_map(move |&p| {
                    [Method::GaussSpp, Method::Thomas]
                        .iter()
                        .map(move |&m| (n, p, m))
                })
        })
        .collect();
    let got: Vec<_> = records
        .iter()
        .map(|r| (r.size, r.precision, r.method))
        .collect();
    assert_eq!(got, expected);

    for r in &records {
        assert_eq!(r.family, Family::Tridiagonal);
        // κ is not computed for the tridiagonal family, on either path.
        assert!(r.condition_number.is_none());
        assert!(r.time_cond.is_none());
        // The family is diagonally dominant; both solvers stay accurate.
        let tol = match r.precision {
            Precision::Single => 1e-4,
            Precision::Double => 1e-10,
        };
        assert!(
            r.max_abs_error < tol,
            "{} {} n={}: error {:e}",
            r.method,
            r.precision,
            r.size,
            r.max_abs_error
        );
    }
}

#[test]
fn dense_family_reports_condition_numbers() {
    let opts = LabOptions::new(Family::WellConditioned, vec![2, 4, 8]);
    let records = collect_experiments(&opts).unwrap();
    assert_eq!(records.len(), 3 * 2);
    for r in &records {
        assert_eq!(r.method, Method::GaussSpp);
        let cond = r.condition_number.expect("dense family computes κ");
        assert!(cond >= 1.0);
        assert!(r.time_cond.is_some());
    }
}

/// Same configuration twice: every numeric output is identical to the bit.
#[test]
fn grid_is_deterministic() {
    let opts = LabOptions::new(Family::IllConditioned, vec![3, 6, 9]);
    let first = collect_experiments(&opts).unwrap();
    let second = collect_experiments(&opts).unwrap();
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.max_abs_error.to_bits(), b.max_abs_error.to_bits());
        assert_eq!(
            a.condition_number.map(f64::to_bits),
            b.condition_number.map(f64::to_bits)
        );
    }
}

/// On the ill-conditioned family, single precision loses strictly more
/// accuracy than double for at least one size.
#[test]
fn single_precision_error_dominates_on_ill_conditioned() {
    let opts = LabOptions::new(Family::IllConditioned, vec![4, 6, 8, 10, 12, 16, 20]);
    let records = collect_experiments(&opts).unwrap();

    let mut dominated = false;
    for chunk in records.chunks(2) {
        let (single, double) = (&chunk[0], &chunk[1]);
        assert_eq!(single.precision, Precision::Single);
        assert_eq!(double.precision, Precision::Double);
        assert_eq!(single.size, double.size);
        if single.max_abs_error.is_finite()
            && double.max_abs_error.is_finite()
            && single.max_abs_error > double.max_abs_error
        {
            dominated = true;
        }
    }
    assert!(dominated, "single precision never lost accuracy to double");
}

#[test]
fn invalid_configurations_are_fatal_before_any_cell() {
    let cases = [
        LabOptions::new(Family::Tridiagonal, vec![]),
        LabOptions::new(Family::Tridiagonal, vec![0, 2]),
        LabOptions::new(Family::Tridiagonal, vec![4, 4]),
        LabOptions::new(Family::Tridiagonal, vec![8, 2]),
        {
            let mut o = LabOptions::new(Family::Tridiagonal, vec![2, 4]);
            o.precisions.clear();
            o
        },
    ];
    for opts in cases {
        let err = collect_experiments(&opts).unwrap_err();
        assert!(
            matches!(err, numlab::error::LabError::InvalidConfig(_)),
            "expected InvalidConfig, got {err:?}"
        );
    }
}

/// With the tracking allocator registered, every sub-cell observes a
/// non-zero peak and the counters move.
#[test]
fn peak_memory_is_tracked_per_subcell() {
    let before = mem::snapshot();
    let opts = LabOptions::new(Family::Tridiagonal, vec![16, 32]);
    let records = collect_experiments(&opts).unwrap();
    let after = mem::snapshot();

    for r in &records {
        assert!(r.peak_memory_bytes > 0);
    }
    // The dense path must at least cover its n×n store (tests in this
    // binary run concurrently, so only lower bounds are exact).
    let gauss = records
        .iter()
        .find(|r| r.method == Method::GaussSpp && r.size == 32 && r.precision == Precision::Double)
        .unwrap();
    assert!(gauss.peak_memory_bytes >= 32 * 32 * std::mem::size_of::<f64>());
    let thomas = records
        .iter()
        .find(|r| r.method == Method::Thomas && r.size == 32 && r.precision == Precision::Double)
        .unwrap();
    assert!(thomas.peak_memory_bytes >= 32 * 3 * std::mem::size_of::<f64>());

    assert!(after.allocations > before.allocations);
    assert!(after.deallocations > before.deallocations);
}
