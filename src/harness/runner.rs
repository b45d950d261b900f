//! Grid iteration and per-cell measurement.
//!
//! For each cell (size, precision) the runner materializes A at the working
//! precision, builds the right-hand side from a known reference solution,
//! times the solve, measures the max-abs error, and — for dense families —
//! times a separate L1 condition number. The allocator's peak counter is
//! reset before each sub-cell and read after its state is released, so the
//! peak belongs to the method that ran.
//!
//! The runner is strictly single-threaded and synchronous; numerical
//! degradation never interrupts the grid, it only leaves non-finite fields
//! in the affected record.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::options::LabOptions;
use crate::core::ops::max_abs_error;
use crate::core::precision::{Precision, WorkingScalar};
use crate::core::traits::MatVec;
use crate::error::LabError;
use crate::harness::record::{ExperimentRecord, MemorySink, Method, RecordSink};
use crate::matrix::family::{self, Family};
use crate::mem;
use crate::solver::{DirectSolver, GaussSpp, Thomas, gauss_spp};

/// Methods exercised for a family: dense families run the SPP path only,
/// the tridiagonal family runs both its dense expansion and the Thomas
/// sweep.
fn methods_for(family: Family) -> &'static [Method] {
    match family {
        Family::Tridiagonal => &[Method::GaussSpp, Method::Thomas],
        _ => &[Method::GaussSpp],
    }
}

/// Run the configured grid, delivering one record per sub-cell to the sink
/// in (size, precision, method) order.
pub fn run_experiments(opts: &LabOptions, sink: &mut dyn RecordSink) -> Result<(), LabError> {
    opts.validate()?;
    log::info!(
        "family {}: {} sizes × {} precisions",
        opts.family,
        opts.sizes.len(),
        opts.precisions.len()
    );

    for &n in &opts.sizes {
        // Re-seeded per size so every precision of a cell sees the same x*.
        let mut rng = StdRng::seed_from_u64(opts.seed.wrapping_add(n as u64));
        let x_true = family::reference_solution(&mut rng, n);

        for &precision in &opts.precisions {
            for &method in methods_for(opts.family) {
                let record = match precision {
                    Precision::Single => run_subcell::<f32>(opts, method, n, &x_true),
                    Precision::Double => run_subcell::<f64>(opts, method, n, &x_true),
                };
                log::debug!(
                    "n={} {} {}: err {:e}, solve {:?}",
                    n,
                    precision,
                    method,
                    record.max_abs_error,
                    record.time_solve
                );
                sink.write(&record)?;
            }
        }
    }
    Ok(())
}

/// Run the grid into a [`MemorySink`] and return the records.
pub fn collect_experiments(opts: &LabOptions) -> Result<Vec<ExperimentRecord>, LabError> {
    let mut sink = MemorySink::new();
    run_experiments(opts, &mut sink)?;
    Ok(sink.records)
}

fn run_subcell<T: WorkingScalar>(
    opts: &LabOptions,
    method: Method,
    n: usize,
    x_true: &[f64],
) -> ExperimentRecord {
    mem::reset_peak();

    let (max_err, cond, time_solve, time_cond) = match method {
        Method::GaussSpp => solve_dense::<T>(opts, n, x_true),
        Method::Thomas => solve_banded::<T>(opts, n, x_true),
    };

    // All cell state has been dropped; the peak since the reset is this
    // sub-cell's.
    let peak = mem::snapshot().peak_bytes;

    ExperimentRecord {
        family: opts.family,
        method,
        size: n,
        precision: T::TAG,
        max_abs_error: max_err,
        condition_number: cond,
        time_solve,
        time_cond,
        peak_memory_bytes: peak,
    }
}

fn solve_dense<T: WorkingScalar>(
    opts: &LabOptions,
    n: usize,
    x_true: &[f64],
) -> (f64, Option<f64>, Duration, Option<Duration>) {
    let a = opts.family.dense::<T>(n, opts.params);
    let xs: Vec<T> = x_true.iter().map(|&v| T::from_f64(v)).collect();
    let mut b = vec![T::zero(); n];
    a.matvec(&xs, &mut b);

    let mut x = vec![T::zero(); n];
    let clock = Instant::now();
    GaussSpp.solve(&a, &b, &mut x);
    let time_solve = clock.elapsed();
    let err = max_abs_error(&x, x_true);

    let (cond, time_cond) = if opts.family.is_dense() {
        let clock = Instant::now();
        let c = gauss_spp::cond_l1(&a);
        (Some(c), Some(clock.elapsed()))
    } else {
        // Tridiagonal family: κ is not computed, even on the dense path.
        (None, None)
    };

    (err, cond, time_solve, time_cond)
}

fn solve_banded<T: WorkingScalar>(
    opts: &LabOptions,
    n: usize,
    x_true: &[f64],
) -> (f64, Option<f64>, Duration, Option<Duration>) {
    let a = family::tridiagonal_banded::<T>(n, opts.params);
    let xs: Vec<T> = x_true.iter().map(|&v| T::from_f64(v)).collect();
    let mut b = vec![T::zero(); n];
    a.matvec(&xs, &mut b);

    let mut x = vec![T::zero(); n];
    let clock = Instant::now();
    Thomas.solve(&a, &b, &mut x);
    let time_solve = clock.elapsed();

    (max_abs_error(&x, x_true), None, time_solve, None)
}
