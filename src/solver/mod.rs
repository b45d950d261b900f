//! Direct solver interfaces.

/// Common interface for the direct solvers.
///
/// `solve` writes the result into `x` and never fails on numerical
/// degradation — degraded entries stay in-band as NaN/±∞. The boolean
/// reports a detected structural breakdown (the Thomas zero pivot), after
/// which `x` is all-NaN.
pub trait DirectSolver<M, T> {
    fn solve(&self, a: &M, b: &[T], x: &mut [T]) -> bool;
}

pub mod gauss_spp;
pub use gauss_spp::{GaussSpp, SppFactorization};

pub mod thomas;
pub use thomas::Thomas;
