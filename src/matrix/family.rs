//! Closed-form matrix families driven by the experiment harness.
//!
//! Two dense generators — one ill-conditioned (a bordered Hilbert-like
//! matrix whose condition number grows rapidly with n) and one
//! well-conditioned symmetric matrix — plus a tridiagonal family
//! parameterized by the scalars m and k. Every element is rounded to the
//! working precision as it is produced.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::core::precision::WorkingScalar;
use crate::error::LabError;
use crate::matrix::banded::TridiagonalMatrix;
use crate::matrix::dense::DenseMatrix;

/// Scalar parameters shared by the family generators.
///
/// Only the tridiagonal family reads them; the dense families are keyed by
/// size alone. Defaults are m = 4, k = 5.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FamilyParams {
    pub m: f64,
    pub k: f64,
}

impl Default for FamilyParams {
    fn default() -> Self {
        FamilyParams { m: 4.0, k: 5.0 }
    }
}

/// Matrix generator rule selected by the experiment configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Bordered Hilbert-like matrix: a_ij = 1 on the first row and column,
    /// 1/(i+j+1) elsewhere (0-based). Severely ill-conditioned.
    IllConditioned,
    /// Symmetric matrix a_ij = 2(i+1)/(j+1) for j ≥ i, mirrored below.
    WellConditioned,
    /// Tridiagonal: diagonal −m(i+1) − k, superdiagonal i+1,
    /// subdiagonal m/(i+1) on rows 1..n.
    Tridiagonal,
}

impl Family {
    /// Tag used in records and CSV output.
    pub fn label(self) -> &'static str {
        match self {
            Family::IllConditioned => "A_I",
            Family::WellConditioned => "A_II",
            Family::Tridiagonal => "A_tri",
        }
    }

    /// Dense families get a condition number; the tridiagonal family does not.
    pub fn is_dense(self) -> bool {
        !matches!(self, Family::Tridiagonal)
    }

    /// Materialize the n×n dense form of the family at the working precision.
    ///
    /// For the tridiagonal family this is the full expansion used by the
    /// dense elimination path; the banded store comes from
    /// [`tridiagonal_banded`].
    pub fn dense<T: WorkingScalar>(self, n: usize, params: FamilyParams) -> DenseMatrix<T> {
        match self {
            Family::IllConditioned => ill_conditioned(n),
            Family::WellConditioned => well_conditioned(n),
            Family::Tridiagonal => tridiagonal_dense(n, params),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Family {
    type Err = LabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a1" | "A_I" | "ill" => Ok(Family::IllConditioned),
            "a2" | "A_II" | "well" => Ok(Family::WellConditioned),
            "tri" | "A_tri" | "tridiagonal" => Ok(Family::Tridiagonal),
            other => Err(LabError::InvalidConfig(format!(
                "unknown matrix family {other:?} (expected a1, a2, or tri)"
            ))),
        }
    }
}

/// Bordered Hilbert-like generator: 1 on the first row and column, else
/// 1/(i+j+1).
pub fn ill_conditioned<T: WorkingScalar>(n: usize) -> DenseMatrix<T> {
    DenseMatrix::from_fn(n, n, |i, j| {
        if i == 0 || j == 0 {
            T::one()
        } else {
            T::from_f64(1.0 / (i as f64 + j as f64 + 1.0))
        }
    })
}

/// Well-conditioned symmetric generator: a_ij = 2(i+1)/(j+1) for j ≥ i,
/// mirrored below the diagonal.
pub fn well_conditioned<T: WorkingScalar>(n: usize) -> DenseMatrix<T> {
    let mut a = DenseMatrix::zeros(n, n);
    for i in 0..n {
        for j in 0..n {
            if j >= i {
                a[(i, j)] = T::from_f64(2.0 * (i as f64 + 1.0) / (j as f64 + 1.0));
            } else {
                a[(i, j)] = a[(j, i)];
            }
        }
    }
    a
}

/// Dense expansion of the tridiagonal family.
pub fn tridiagonal_dense<T: WorkingScalar>(n: usize, params: FamilyParams) -> DenseMatrix<T> {
    let mut a = DenseMatrix::zeros(n, n);
    for i in 0..n {
        a[(i, i)] = T::from_f64(-params.m * (i as f64 + 1.0) - params.k);
        if i + 1 < n {
            a[(i, i + 1)] = T::from_f64(i as f64 + 1.0);
        }
        if i > 0 {
            a[(i, i - 1)] = T::from_f64(params.m / (i as f64 + 1.0));
        }
    }
    a
}

/// Banded store of the tridiagonal family.
pub fn tridiagonal_banded<T: WorkingScalar>(n: usize, params: FamilyParams) -> TridiagonalMatrix<T> {
    let mut a = TridiagonalMatrix::zeros(n);
    for i in 0..n {
        a.set_diag(i, T::from_f64(-params.m * (i as f64 + 1.0) - params.k));
        if i + 1 < n {
            a.set_sup(i, T::from_f64(i as f64 + 1.0));
        }
        if i > 0 {
            a.set_sub(i, T::from_f64(params.m / (i as f64 + 1.0)));
        }
    }
    a
}

/// Reference solution x*: components drawn independently from {−1, +1}.
///
/// The generator is passed in explicitly; the harness seeds it per size so
/// every precision of a cell sees the same x*, kept in double precision and
/// rounded to the working precision only at the comparison boundary.
pub fn reference_solution<R: Rng>(rng: &mut R, n: usize) -> Vec<f64> {
    (0..n)
        .map(|_| if rng.r#gen::<f64>() < 0.5 { 1.0 } else { -1.0 })
        .collect()
}
